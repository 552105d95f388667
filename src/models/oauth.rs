use serde::{Deserialize, Serialize};

pub const OAUTH_DATA_KEY: &str = "oauth_data";

/// State carried between `/auth/google` and `/auth/callback` in the PKCE flow.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct OAuthSessionData {
    pub pkce_verifier_secret: Option<String>,
}

/// Query string the provider appends to the callback URL. All fields are
/// optional because the implicit flow puts its tokens in the fragment instead.
#[derive(Debug, Deserialize, Default)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
