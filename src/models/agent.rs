use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct GenerateAgentRequest {
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateAgentResponse {
    pub message: String,
    pub user_id: String,
}
