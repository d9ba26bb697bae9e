use axum::{
    extract::{Json, Path},
    http::StatusCode,
};
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};

use crate::shared::api_error::{ApiError, ApiResult};
use crate::shared::data::get_store;
use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

/// List all users (admin only)
pub async fn list() -> ApiResult<Vec<User>> {
    Ok(Json(service::list_all(get_store()).await?))
}

/// Get user by ID (admin only)
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<User> {
    service::get_by_id(get_store(), &id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("ไม่พบผู้ใช้".into()))
}

/// Create user (admin only)
pub async fn create(
    CurrentUser(admin): CurrentUser,
    Json(dto): Json<CreateUserDto>,
) -> ApiResult<User> {
    let user = service::create(get_store(), dto).await?;
    tracing::info!("User {} created by {}", user.username, admin.username);
    Ok(Json(user))
}

/// Update user (admin only)
pub async fn update(Path(id): Path<String>, Json(dto): Json<UpdateUserDto>) -> ApiResult<User> {
    Ok(Json(service::update(get_store(), &id, dto).await?))
}

/// Delete user (admin only); deleting yourself is not allowed
pub async fn delete(
    CurrentUser(admin): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if admin.id == id {
        return Err(ApiError::Conflict("ไม่สามารถลบบัญชีของตนเองได้".into()));
    }
    service::delete(get_store(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
