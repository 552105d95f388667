pub mod agent;
pub mod app_config;
pub mod auth;
pub mod chat;
pub mod oauth;
pub mod session;

pub use app_config::{AppConfig, AppState, OAuthFlow};
pub use session::{SessionTokens, SessionUser};
