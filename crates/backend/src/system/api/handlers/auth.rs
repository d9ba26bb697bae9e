use axum::{
    extract::Json,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
};
use contracts::system::auth::{LoginRequest, LoginResponse, UserInfo};

use crate::shared::api_error::{ApiError, ApiResult};
use crate::shared::data::get_store;
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::service;

/// POST /api/auth/login
pub async fn login(Json(request): Json<LoginRequest>) -> ApiResult<LoginResponse> {
    Ok(Json(service::login(get_store(), request).await?))
}

/// POST /api/auth/logout
pub async fn logout(headers: HeaderMap) -> Result<StatusCode, ApiError> {
    let header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    if let Some(token) = service::bearer_token(header) {
        service::logout(get_store(), token).await?;
    }
    Ok(StatusCode::OK)
}

/// GET /api/auth/me
pub async fn current_user(CurrentUser(user): CurrentUser) -> ApiResult<UserInfo> {
    Ok(Json(user))
}
