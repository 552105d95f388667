pub mod agent;
pub mod auth;
pub mod chat;
pub mod index_handler;
pub mod oauth;

pub use agent::generate_handler;
pub use auth::{logout_handler, signup_handler};
pub use chat::{chat_handler, send_message_handler};
pub use index_handler::index_handler;
pub use oauth::{callback_handler, google_handler, set_session_handler};

use axum::{
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

/// 302 Found. axum's `Redirect::to` answers 303, which browsers treat the same
/// for GET, but clients of this service expect 302.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// A required body field: absent and empty both count as missing.
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
