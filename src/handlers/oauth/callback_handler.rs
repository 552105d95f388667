use crate::error::AppError;
use crate::handlers::{found, required};
use crate::models::oauth::CallbackParams;
use crate::models::{AppState, SessionTokens, SessionUser};
use crate::pages;
use crate::session::GatewaySession;
use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::{Html, IntoResponse, Response},
};
use oauth2::PkceCodeVerifier;

fn error_html(message: &str) -> Response {
    Html(pages::error_page(message)).into_response()
}

/// Without a `code` this only serves the page that lifts tokens out of the URL
/// fragment. With one, it finishes a PKCE sign-in server-side.
pub async fn callback_handler(
    query: Result<Query<CallbackParams>, QueryRejection>,
    State(app_state): State<AppState>,
    session: GatewaySession,
) -> Result<Response, AppError> {
    let Query(params) = query?;

    if let Some(error) = params.error {
        let message = params.error_description.unwrap_or(error);
        tracing::warn!(error = %message, "Provider returned an error to the OAuth callback");
        return Ok(error_html(&message));
    }

    let Some(code) = required(params.code) else {
        return Ok(Html(pages::callback_page()).into_response());
    };

    let oauth_data = session.take_oauth_data().await?;
    let Some(pkce_verifier_secret) = oauth_data.and_then(|data| data.pkce_verifier_secret) else {
        tracing::warn!("OAuth callback with a code but no PKCE verifier in session");
        return Ok(error_html(
            "No sign-in in progress for this session. Please try signing in again.",
        ));
    };
    let pkce_verifier = PkceCodeVerifier::new(pkce_verifier_secret);

    let provider_session = match app_state
        .auth
        .exchange_code(&code, pkce_verifier.secret())
        .await
    {
        Ok(provider_session) => provider_session,
        Err(e) => {
            tracing::error!(error = %e, "Failed to exchange authorization code");
            return Ok(error_html(&format!("Failed to exchange code: {}", e)));
        }
    };

    let provider_user = match provider_session.user.clone() {
        Some(user) => Some(user),
        None => match app_state.auth.get_user(&provider_session.access_token).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch user after code exchange");
                return Ok(error_html(&format!("Failed to get user info: {}", e)));
            }
        },
    };
    let Some(provider_user) = provider_user else {
        return Ok(error_html("Failed to get user info"));
    };

    let user = SessionUser::from(&provider_user);
    let tokens = SessionTokens::from(provider_session);
    session.establish(&user, Some(&tokens)).await?;

    tracing::info!(user_id = %user.id, "Signed in with Google");
    Ok(found("/"))
}
