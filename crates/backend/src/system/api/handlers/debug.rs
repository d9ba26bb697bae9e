use axum::{
    extract::Json,
    http::{header::AUTHORIZATION, HeaderMap},
};
use contracts::system::auth::AuthStatusReport;

use crate::shared::api_error::ApiResult;
use crate::shared::data::get_store;
use crate::system::auth::service;

/// GET /api/debug/auth-status
pub async fn auth_status(headers: HeaderMap) -> ApiResult<AuthStatusReport> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);
    Ok(Json(
        service::auth_status(get_store(), header.as_deref()).await?,
    ))
}
