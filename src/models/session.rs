use crate::provider::{ProviderSession, ProviderUser};
use serde::{Deserialize, Serialize};

pub const USER_KEY: &str = "user";
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Identity of the signed-in user as kept in the session store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
}

impl From<&ProviderUser> for SessionUser {
    fn from(user: &ProviderUser) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone().unwrap_or_default(),
            name: user.metadata_str("full_name").to_string(),
            avatar_url: user.metadata_str("avatar_url").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

impl From<ProviderSession> for SessionTokens {
    fn from(session: ProviderSession) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
        }
    }
}
