use crate::error::AppError;
use crate::models::AppState;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::HOST, request::Parts},
};
use reqwest::Url;

const FORWARDED_PROTO: &str = "x-forwarded-proto";
const FORWARDED_HOST: &str = "x-forwarded-host";

/// Externally visible root of the site, always ending in `/`.
///
/// Uses `PUBLIC_URL` when configured, otherwise rebuilds it from the forwarding
/// headers or `Host`.
#[derive(Debug, Clone)]
pub struct RootUrl(pub Url);

impl RootUrl {
    /// `path` resolved against the root, e.g. `auth/callback`.
    pub fn join(&self, path: &str) -> Result<Url, AppError> {
        self.0
            .join(path)
            .map_err(|e| AppError::Validation(format!("Invalid callback URL: {}", e)))
    }
}

fn first_header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

pub fn root_url_from_parts(parts: &Parts) -> Result<Url, AppError> {
    let scheme = first_header(&parts.headers, FORWARDED_PROTO).unwrap_or("http");
    let host = first_header(&parts.headers, FORWARDED_HOST)
        .or_else(|| first_header(&parts.headers, HOST.as_str()))
        .or_else(|| parts.uri.authority().map(|authority| authority.as_str()))
        .ok_or_else(|| AppError::Validation("Missing Host header".to_string()))?;

    Url::parse(&format!("{}://{}/", scheme, host))
        .map_err(|e| AppError::Validation(format!("Invalid Host header: {}", e)))
}

impl FromRequestParts<AppState> for RootUrl {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match &state.config.public_url {
            Some(url) => Ok(RootUrl(url.clone())),
            None => root_url_from_parts(parts).map(RootUrl),
        }
    }
}
