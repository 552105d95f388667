use crate::provider::AuthProvider;
use reqwest::Url;
use sha2::{Digest, Sha512};
use std::sync::Arc;
use tower_sessions::cookie::Key;

const MIN_SESSION_SECRET_LEN: usize = 32;

/// How Google sign-in hands tokens back to us.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OAuthFlow {
    /// Tokens arrive in the URL fragment and the callback page posts them back.
    #[default]
    Implicit,
    /// An authorization code arrives on the callback and is exchanged server-side.
    Pkce,
}

#[derive(Clone)]
pub struct AppConfig {
    pub supabase_url: Url,
    pub supabase_key: String,
    pub session_secret: String,
    pub bind_addr: String,
    pub public_url: Option<Url>,
    pub secure_cookies: bool,
    pub session_idle_hours: i64,
    pub oauth_flow: OAuthFlow,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        use dotenvy::dotenv;
        use std::env;

        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| optional(key).ok_or_else(|| format!("{} not found", key));

        let supabase_url = Url::parse(&required("SUPABASE_URL")?)
            .map_err(|e| format!("SUPABASE_URL is not a valid URL: {}", e))?;
        let supabase_key = required("SUPABASE_KEY")?;

        let session_secret = required("SESSION_SECRET")?;
        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(format!(
                "SESSION_SECRET must be at least {} bytes long",
                MIN_SESSION_SECRET_LEN
            ));
        }

        let bind_addr = optional("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:10000".to_string());

        let public_url = optional("PUBLIC_URL")
            .map(|raw| {
                let mut url = Url::parse(&raw)
                    .map_err(|e| format!("PUBLIC_URL is not a valid URL: {}", e))?;
                if !url.path().ends_with('/') {
                    let path = format!("{}/", url.path());
                    url.set_path(&path);
                }
                Ok::<_, String>(url)
            })
            .transpose()?;

        let secure_cookies = match optional("SESSION_COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| format!("SESSION_COOKIE_SECURE must be true or false, got {}", raw))?,
            None => false,
        };

        let session_idle_hours = match optional("SESSION_IDLE_HOURS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|hours| *hours > 0)
                .ok_or_else(|| format!("SESSION_IDLE_HOURS must be a positive integer, got {}", raw))?,
            None => 6,
        };

        let oauth_flow = match optional("SUPABASE_OAUTH_FLOW").as_deref().map(str::trim) {
            None | Some("implicit") => OAuthFlow::Implicit,
            Some("pkce") => OAuthFlow::Pkce,
            Some(other) => {
                return Err(format!(
                    "SUPABASE_OAUTH_FLOW must be implicit or pkce, got {}",
                    other
                ));
            }
        };

        Ok(Self {
            supabase_url,
            supabase_key,
            session_secret,
            bind_addr,
            public_url,
            secure_cookies,
            session_idle_hours,
            oauth_flow,
        })
    }

    /// Cookie-signing key derived from `session_secret`.
    pub fn session_key(&self) -> Result<Key, String> {
        let digest = Sha512::digest(self.session_secret.as_bytes());
        Key::try_from(digest.as_slice()).map_err(|e| format!("Invalid session key: {}", e))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(config: AppConfig, auth: Arc<dyn AuthProvider>) -> Self {
        Self { config, auth }
    }
}
