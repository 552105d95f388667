use crate::error::AppError;
use crate::handlers::required;
use crate::models::auth::{AuthSuccess, SetSessionRequest};
use crate::models::{AppState, SessionTokens, SessionUser};
use crate::session::GatewaySession;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

/// Binds tokens collected by the callback page to this session.
pub async fn set_session_handler(
    State(app_state): State<AppState>,
    session: GatewaySession,
    body: Result<Json<SetSessionRequest>, JsonRejection>,
) -> Result<Json<AuthSuccess>, AppError> {
    let Json(request) = body?;

    let access_token = required(request.access_token)
        .ok_or_else(|| AppError::Validation("Access token required".to_string()))?;
    let refresh_token = request.refresh_token.unwrap_or_default();

    let bound = app_state
        .auth
        .set_session(&access_token, &refresh_token)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Provider rejected session tokens"))?;

    let provider_user = match bound.user.clone() {
        Some(user) => Some(user),
        None => app_state
            .auth
            .get_user(&bound.access_token)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to fetch user for session"))?,
    }
    .ok_or_else(|| AppError::Validation("Failed to get user info".to_string()))?;

    let user = SessionUser::from(&provider_user);
    let tokens = SessionTokens::from(bound);
    session.establish(&user, Some(&tokens)).await?;

    tracing::info!(user_id = %user.id, "Session established from client tokens");
    Ok(Json(AuthSuccess::new(user)))
}
