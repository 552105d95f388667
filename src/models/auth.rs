use super::session::SessionUser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SetSessionRequest {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthSuccess {
    pub success: bool,
    pub user: SessionUser,
}

impl AuthSuccess {
    pub fn new(user: SessionUser) -> Self {
        Self {
            success: true,
            user,
        }
    }
}
