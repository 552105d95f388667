//! Shared fixtures: an in-memory auth provider and a running gateway.

#![allow(dead_code)]

use agentgate_server::models::OAuthFlow;
use agentgate_server::provider::{
    AuthProvider, OAuthRequest, ProviderError, ProviderSession, ProviderUser, SignUpOutcome,
};
use agentgate_server::{AppConfig, AppState};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower_sessions::MemoryStore;

pub const PKCE_CODE: &str = "good-code";

/// Scripted stand-in for the hosted auth service.
#[derive(Default)]
pub struct FakeProvider {
    /// When set, every call fails with this message.
    pub fail_with: Option<String>,
    /// Users by access token.
    pub users: HashMap<String, ProviderUser>,
    pub signup_user: Option<ProviderUser>,
    pub signup_session: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn with_user(mut self, access_token: &str, user: ProviderUser) -> Self {
        self.users.insert(access_token.to_string(), user);
        self
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self) -> Result<(), ProviderError> {
        match &self.fail_with {
            Some(message) => Err(ProviderError::Api {
                status: 503,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AuthProvider for FakeProvider {
    async fn authorize_url(&self, request: &OAuthRequest) -> Result<Url, ProviderError> {
        self.check()?;
        self.record(format!(
            "authorize:{}:{}",
            request.provider,
            request.code_challenge.clone().unwrap_or_default()
        ));

        let mut url = Url::parse("https://auth.example.com/auth/v1/authorize").unwrap();
        url.query_pairs_mut()
            .append_pair("provider", &request.provider)
            .append_pair("redirect_to", request.redirect_to.as_str());
        Ok(url)
    }

    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        redirect_to: &Url,
    ) -> Result<SignUpOutcome, ProviderError> {
        self.check()?;
        self.record(format!("sign_up:{}:{}", email, redirect_to));

        let session = self.signup_session.then(|| ProviderSession {
            access_token: "signup-access".to_string(),
            refresh_token: "signup-refresh".to_string(),
            user: self.signup_user.clone(),
        });
        Ok(SignUpOutcome {
            user: self.signup_user.clone(),
            session,
        })
    }

    async fn set_session(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<ProviderSession, ProviderError> {
        self.check()?;
        self.record(format!("set_session:{}:{}", access_token, refresh_token));

        Ok(ProviderSession {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
            user: self.users.get(access_token).cloned(),
        })
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<ProviderUser>, ProviderError> {
        self.check()?;
        self.record(format!("get_user:{}", access_token));
        Ok(self.users.get(access_token).cloned())
    }

    async fn exchange_code(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> Result<ProviderSession, ProviderError> {
        self.check()?;
        self.record(format!("exchange_code:{}:{}", auth_code, code_verifier));

        if auth_code != PKCE_CODE {
            return Err(ProviderError::Api {
                status: 400,
                message: "invalid flow state, no valid flow state found".to_string(),
            });
        }
        Ok(ProviderSession {
            access_token: "pkce-access".to_string(),
            refresh_token: "pkce-refresh".to_string(),
            user: self.users.get("pkce-access").cloned(),
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        self.record(format!("sign_out:{}", access_token));
        self.check()
    }
}

pub fn provider_user(id: &str, email: &str) -> ProviderUser {
    ProviderUser {
        id: id.to_string(),
        email: Some(email.to_string()),
        user_metadata: Default::default(),
    }
}

pub fn google_user(id: &str, email: &str, name: &str, avatar_url: &str) -> ProviderUser {
    serde_json::from_value(json!({
        "id": id,
        "email": email,
        "user_metadata": { "full_name": name, "avatar_url": avatar_url }
    }))
    .unwrap()
}

pub fn test_config(oauth_flow: OAuthFlow) -> AppConfig {
    AppConfig {
        supabase_url: Url::parse("https://auth.example.com").unwrap(),
        supabase_key: "anon-key".to_string(),
        session_secret: "test-secret-key-that-is-long-enough-for-signing".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        public_url: None,
        secure_cookies: false,
        session_idle_hours: 6,
        oauth_flow,
    }
}

/// A gateway listening on an ephemeral port, with a cookie-keeping client that
/// does not follow redirects.
pub struct TestServer {
    pub base_url: String,
    pub provider: Arc<FakeProvider>,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn start(provider: FakeProvider) -> Self {
        Self::start_with(provider, OAuthFlow::Implicit).await
    }

    pub async fn start_with(provider: FakeProvider, oauth_flow: OAuthFlow) -> Self {
        let provider = Arc::new(provider);
        let auth: Arc<dyn AuthProvider> = provider.clone();
        let state = AppState::new(test_config(oauth_flow), auth);
        let app = agentgate_server::app(state, MemoryStore::default()).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app.into_make_service()).await.unwrap();
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            base_url: format!("http://{}", addr),
            provider,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap()
    }
}
