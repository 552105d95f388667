use crate::error::AppError;
use crate::pages;
use crate::session::GatewaySession;
use axum::response::{Html, IntoResponse};

pub async fn index_handler(session: GatewaySession) -> Result<impl IntoResponse, AppError> {
    let user = session.user().await?;
    Ok(Html(pages::landing_page(user.as_ref())))
}
