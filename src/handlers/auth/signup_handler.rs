use crate::error::AppError;
use crate::handlers::required;
use crate::models::auth::{AuthSuccess, SignUpRequest};
use crate::models::{AppState, SessionTokens, SessionUser};
use crate::root_url::RootUrl;
use crate::session::GatewaySession;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

const MISSING_CREDENTIALS: &str = "Email y contraseña son requeridos";
const SIGNUP_FAILED: &str = "Error al crear la cuenta";

pub async fn signup_handler(
    State(app_state): State<AppState>,
    root: RootUrl,
    session: GatewaySession,
    body: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<Json<AuthSuccess>, AppError> {
    let Json(request) = body?;

    let (Some(email), Some(password)) = (required(request.email), required(request.password))
    else {
        return Err(AppError::Validation(MISSING_CREDENTIALS.to_string()));
    };

    let redirect_to = root.join("auth/callback")?;
    let outcome = app_state
        .auth
        .sign_up(&email, &password, &redirect_to)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Signup rejected by provider"))?;

    let Some(provider_user) = outcome.user else {
        return Err(AppError::Validation(SIGNUP_FAILED.to_string()));
    };

    let user = SessionUser::from(&provider_user);
    let tokens = outcome.session.map(SessionTokens::from);
    session.establish(&user, tokens.as_ref()).await?;

    tracing::info!(
        user_id = %user.id,
        confirmed = tokens.is_some(),
        "Account created"
    );
    Ok(Json(AuthSuccess::new(user)))
}
