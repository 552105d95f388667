use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub user_metadata: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProviderUser {
    pub fn metadata_str(&self, key: &str) -> &str {
        self.user_metadata
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub user: Option<ProviderUser>,
}

/// Result of a signup call. Either part may be missing: a project that requires
/// email confirmation returns a user without a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignUpOutcome {
    pub user: Option<ProviderUser>,
    pub session: Option<ProviderSession>,
}

#[derive(Debug, Clone)]
pub struct OAuthRequest {
    pub provider: String,
    pub redirect_to: Url,
    pub code_challenge: Option<String>,
}

impl OAuthRequest {
    pub fn google(redirect_to: Url) -> Self {
        Self {
            provider: "google".to_string(),
            redirect_to,
            code_challenge: None,
        }
    }
}
