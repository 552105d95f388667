use super::{AuthProvider, OAuthRequest, ProviderError, ProviderSession, ProviderUser, SignUpOutcome};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::{Value, json};

const API_KEY_HEADER: &str = "apikey";

/// GoTrue (Supabase Auth) client.
#[derive(Clone)]
pub struct SupabaseAuth {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl SupabaseAuth {
    pub fn new(base_url: &Url, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.clone();
        // Url::join drops the last segment of a path without a trailing slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        Ok(self.base_url.join("auth/v1/")?.join(path)?)
    }

    fn request(&self, method: Method, url: Url, bearer: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(AUTHORIZATION, format!("Bearer {}", bearer))
            .header(ACCEPT, "application/json")
    }

    async fn send(request: RequestBuilder) -> Result<Response, ProviderError> {
        let response = request.send().await?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(api_error(response).await)
        }
    }

    async fn send_json(request: RequestBuilder) -> Result<Value, ProviderError> {
        let body = Self::send(request).await?.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    async fn token_grant(&self, grant_type: &str, body: Value) -> Result<ProviderSession, ProviderError> {
        let mut url = self.endpoint("token")?;
        url.query_pairs_mut().append_pair("grant_type", grant_type);

        let value = Self::send_json(self.request(Method::POST, url, &self.api_key).json(&body)).await?;

        session_from(value)?.ok_or_else(|| ProviderError::Api {
            status: 502,
            message: "Auth session missing from provider response".to_string(),
        })
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn authorize_url(&self, request: &OAuthRequest) -> Result<Url, ProviderError> {
        let mut url = self.endpoint("authorize")?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("provider", &request.provider)
                .append_pair("redirect_to", request.redirect_to.as_str());
            if let Some(challenge) = &request.code_challenge {
                query
                    .append_pair("code_challenge", challenge)
                    .append_pair("code_challenge_method", "s256");
            }
        }
        Ok(url)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: &Url,
    ) -> Result<SignUpOutcome, ProviderError> {
        let mut url = self.endpoint("signup")?;
        url.query_pairs_mut()
            .append_pair("redirect_to", redirect_to.as_str());

        let body = json!({ "email": email, "password": password });
        let value = Self::send_json(self.request(Method::POST, url, &self.api_key).json(&body)).await?;

        // With autoconfirm on, GoTrue answers with a full session; otherwise with the bare user.
        match session_from(value.clone())? {
            Some(session) => Ok(SignUpOutcome {
                user: session.user.clone(),
                session: Some(session),
            }),
            None => Ok(SignUpOutcome {
                user: user_from(value)?,
                session: None,
            }),
        }
    }

    async fn set_session(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<ProviderSession, ProviderError> {
        match self.get_user(access_token).await {
            Ok(user) => Ok(ProviderSession {
                access_token: access_token.to_string(),
                refresh_token: refresh_token.to_string(),
                user,
            }),
            Err(e) if e.is_unauthorized() && !refresh_token.is_empty() => {
                tracing::debug!("Access token rejected by provider, refreshing session");
                self.token_grant("refresh_token", json!({ "refresh_token": refresh_token }))
                    .await
            }
            Err(e) => Err(e),
        }
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<ProviderUser>, ProviderError> {
        let url = self.endpoint("user")?;
        let value = Self::send_json(self.request(Method::GET, url, access_token)).await?;
        user_from(value)
    }

    async fn exchange_code(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> Result<ProviderSession, ProviderError> {
        self.token_grant(
            "pkce",
            json!({ "auth_code": auth_code, "code_verifier": code_verifier }),
        )
        .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        let url = self.endpoint("logout")?;
        Self::send(self.request(Method::POST, url, access_token)).await?;
        Ok(())
    }
}

fn user_from(value: Value) -> Result<Option<ProviderUser>, ProviderError> {
    if value.get("id").is_some() {
        Ok(Some(serde_json::from_value(value)?))
    } else {
        Ok(None)
    }
}

fn session_from(value: Value) -> Result<Option<ProviderSession>, ProviderError> {
    if value.get("access_token").is_some() {
        Ok(Some(serde_json::from_value(value)?))
    } else {
        Ok(None)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

async fn api_error(response: Response) -> ProviderError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("Error reading response body: {}", e));

    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.msg.or(b.message).or(b.error_description).or(b.error))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                body
            }
        });

    ProviderError::Api {
        status: status.as_u16(),
        message,
    }
}
