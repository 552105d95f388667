use thiserror::Error;

/// `Display` is what clients see in the `{error}` body.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Unexpected provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid provider URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ProviderError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ProviderError::Api { status: 401 | 403, .. })
    }
}
