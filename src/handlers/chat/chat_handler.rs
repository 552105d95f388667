use crate::error::AppError;
use crate::handlers::found;
use crate::models::chat::ChatQuery;
use crate::pages;
use crate::session::GatewaySession;
use axum::{
    extract::{Query, rejection::QueryRejection},
    response::{Html, IntoResponse, Response},
};

pub async fn chat_handler(
    query: Result<Query<ChatQuery>, QueryRejection>,
    session: GatewaySession,
) -> Result<Response, AppError> {
    let Some(user) = session.user().await? else {
        return Ok(found("/"));
    };
    let Query(params) = query?;

    let initial_message = params.message.unwrap_or_default();
    Ok(Html(pages::chat_page(&user, &initial_message)).into_response())
}
