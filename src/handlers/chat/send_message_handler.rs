use crate::error::AppError;
use crate::handlers::required;
use crate::models::chat::{SendMessageRequest, SendMessageResponse};
use crate::session::GatewaySession;
use axum::{Json, extract::rejection::JsonRejection};

pub async fn send_message_handler(
    session: GatewaySession,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let user = session.require_user().await?;
    let Json(request) = body?;

    if required(request.message).is_none() {
        return Err(AppError::Validation("Message is required".to_string()));
    }

    tracing::debug!(user_id = %user.id, "Chat message received");
    Ok(Json(SendMessageResponse {
        success: true,
        message: "Message sent successfully".to_string(),
    }))
}
