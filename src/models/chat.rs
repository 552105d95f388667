use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Default)]
pub struct ChatQuery {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub message: String,
}
