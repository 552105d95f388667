use crate::error::AppError;
use crate::handlers::found;
use crate::models::oauth::OAuthSessionData;
use crate::models::{AppState, OAuthFlow};
use crate::provider::OAuthRequest;
use crate::root_url::RootUrl;
use crate::session::GatewaySession;
use axum::{extract::State, response::Response};
use oauth2::PkceCodeChallenge;

pub async fn google_handler(
    State(app_state): State<AppState>,
    root: RootUrl,
    session: GatewaySession,
) -> Result<Response, AppError> {
    let mut request = OAuthRequest::google(root.join("auth/callback")?);

    let pkce_verifier = match app_state.config.oauth_flow {
        OAuthFlow::Pkce => {
            let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();
            request.code_challenge = Some(pkce_challenge.as_str().to_string());
            Some(pkce_verifier)
        }
        OAuthFlow::Implicit => None,
    };

    let url = app_state
        .auth
        .authorize_url(&request)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Failed to get Google sign-in URL"))?;

    if let Some(pkce_verifier) = pkce_verifier {
        let oauth_data = OAuthSessionData {
            pkce_verifier_secret: Some(pkce_verifier.secret().to_string()),
        };
        session.store_oauth_data(&oauth_data).await?;
    }

    tracing::info!(redirect_to = %request.redirect_to, "Redirecting to Google sign-in");
    Ok(found(url.as_str()))
}
