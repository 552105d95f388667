use crate::error::AppError;
use crate::handlers::required;
use crate::models::agent::{GenerateAgentRequest, GenerateAgentResponse};
use crate::session::GatewaySession;
use axum::{Json, extract::rejection::JsonRejection};

/// Accepts a prompt from a signed-in user. Generation itself is not wired up yet,
/// so this only validates and acknowledges.
pub async fn generate_handler(
    session: GatewaySession,
    body: Result<Json<GenerateAgentRequest>, JsonRejection>,
) -> Result<Json<GenerateAgentResponse>, AppError> {
    let user = session.require_user().await?;
    let Json(request) = body?;

    if required(request.prompt).is_none() {
        return Err(AppError::Validation("Prompt is required".to_string()));
    }

    tracing::info!(user_id = %user.id, "Agent generation requested");
    Ok(Json(GenerateAgentResponse {
        message: "Agent generation started".to_string(),
        user_id: user.id,
    }))
}
