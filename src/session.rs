//! Request-scoped view of the session store.

use crate::error::AppError;
use crate::models::oauth::{OAUTH_DATA_KEY, OAuthSessionData};
use crate::models::session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
use crate::models::{SessionTokens, SessionUser};
use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

#[derive(Debug, Clone)]
pub struct GatewaySession(Session);

impl GatewaySession {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    pub async fn user(&self) -> Result<Option<SessionUser>, AppError> {
        Ok(self.0.get::<SessionUser>(USER_KEY).await?)
    }

    pub async fn require_user(&self) -> Result<SessionUser, AppError> {
        self.user().await?.ok_or(AppError::Unauthorized)
    }

    pub async fn tokens(&self) -> Result<Option<SessionTokens>, AppError> {
        let access_token: Option<String> = self.0.get(ACCESS_TOKEN_KEY).await?;
        let Some(access_token) = access_token else {
            return Ok(None);
        };
        let refresh_token: Option<String> = self.0.get(REFRESH_TOKEN_KEY).await?;

        Ok(Some(SessionTokens {
            access_token,
            refresh_token: refresh_token.unwrap_or_default(),
        }))
    }

    /// Cycles the session id, then stores `user`. Without `tokens`, any stored
    /// tokens are dropped.
    pub async fn establish(
        &self,
        user: &SessionUser,
        tokens: Option<&SessionTokens>,
    ) -> Result<(), AppError> {
        self.0.cycle_id().await?;
        self.0.insert(USER_KEY, user).await?;

        match tokens {
            Some(tokens) => {
                self.0.insert(ACCESS_TOKEN_KEY, &tokens.access_token).await?;
                self.0.insert(REFRESH_TOKEN_KEY, &tokens.refresh_token).await?;
            }
            None => {
                self.0.remove::<String>(ACCESS_TOKEN_KEY).await?;
                self.0.remove::<String>(REFRESH_TOKEN_KEY).await?;
            }
        }

        tracing::debug!(user_id = %user.id, "Session user established");
        Ok(())
    }

    pub async fn store_oauth_data(&self, data: &OAuthSessionData) -> Result<(), AppError> {
        self.0.insert(OAUTH_DATA_KEY, data).await?;
        Ok(())
    }

    pub async fn take_oauth_data(&self) -> Result<Option<OAuthSessionData>, AppError> {
        Ok(self.0.remove::<OAuthSessionData>(OAUTH_DATA_KEY).await?)
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        self.0.flush().await?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for GatewaySession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(GatewaySession)
            .ok_or(AppError::SessionLayerMissing)
    }
}
