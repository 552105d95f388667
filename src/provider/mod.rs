//! Abstraction over the hosted authentication service.
//!
//! Handlers only ever talk to [`AuthProvider`]; the production implementation is
//! [`SupabaseAuth`], which speaks the GoTrue REST API.

pub mod error;
pub mod supabase;
pub mod types;

use async_trait::async_trait;
use reqwest::Url;

pub use error::ProviderError;
pub use supabase::SupabaseAuth;
pub use types::{OAuthRequest, ProviderSession, ProviderUser, SignUpOutcome};

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authorize_url(&self, request: &OAuthRequest) -> Result<Url, ProviderError>;

    /// `redirect_to` is where the confirmation email links back to.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: &Url,
    ) -> Result<SignUpOutcome, ProviderError>;

    /// Binds a token pair obtained client-side. The returned tokens may differ from
    /// the input when the provider had to refresh an expired access token.
    async fn set_session(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<ProviderSession, ProviderError>;

    async fn get_user(&self, access_token: &str) -> Result<Option<ProviderUser>, ProviderError>;

    async fn exchange_code(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> Result<ProviderSession, ProviderError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError>;
}
