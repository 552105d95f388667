use crate::error::AppError;
use crate::handlers::found;
use crate::models::AppState;
use crate::session::GatewaySession;
use axum::{extract::State, response::Response};

pub async fn logout_handler(
    State(app_state): State<AppState>,
    session: GatewaySession,
) -> Result<Response, AppError> {
    // Revoking at the provider is best effort; the local session goes regardless.
    if let Some(tokens) = session.tokens().await? {
        if let Err(e) = app_state.auth.sign_out(&tokens.access_token).await {
            tracing::warn!(error = %e, "Failed to revoke token at provider");
        }
    }

    session.clear().await?;

    Ok(found("/"))
}
