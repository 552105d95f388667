//! Session gateway in front of a hosted Supabase Auth project.
//!
//! Sign-in, sign-up and logout are forwarded to the provider and the resulting
//! identity is mirrored into a server-side session behind a signed cookie.

pub mod error;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod provider;
pub mod root_url;
pub mod session;

pub use models::{AppConfig, AppState};

use axum::{
    Router,
    routing::{get, post},
};
use handlers::{
    callback_handler, chat_handler, generate_handler, google_handler, index_handler,
    logout_handler, send_message_handler, set_session_handler, signup_handler,
};
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore, cookie::SameSite};

/// Builds the full router over `store`. Fails only when the signing key cannot be
/// derived from the configured secret.
pub fn app<Store>(state: AppState, store: Store) -> Result<Router, String>
where
    Store: SessionStore + Clone,
{
    let session_key = state.config.session_key()?;
    let session_expiry = Expiry::OnInactivity(Duration::hours(state.config.session_idle_hours));
    let session_layer = SessionManagerLayer::new(store)
        .with_secure(state.config.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(session_expiry)
        .with_signed(session_key);

    let router = Router::new()
        .route("/", get(index_handler))
        .route("/auth/google", get(google_handler))
        .route("/auth/callback", get(callback_handler))
        .route("/auth/set-session", post(set_session_handler))
        .route("/auth/signup", post(signup_handler))
        .route("/auth/logout", get(logout_handler))
        .route("/generate-agent", post(generate_handler))
        .route("/chat", get(chat_handler))
        .route("/send-message", post(send_message_handler))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}
