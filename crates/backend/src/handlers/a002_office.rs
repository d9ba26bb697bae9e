use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a002_office::{Office, OfficeDto};

use crate::domain::a002_office::service;
use crate::shared::api_error::{ApiError, ApiResult};
use crate::shared::data::get_store;

/// GET /api/offices (active only)
pub async fn list_active() -> ApiResult<Vec<Office>> {
    Ok(Json(service::list_active(get_store()).await?))
}

/// GET /api/admin/offices
pub async fn list_all() -> ApiResult<Vec<Office>> {
    Ok(Json(service::list_all(get_store()).await?))
}

/// GET /api/admin/offices/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Office> {
    service::get_by_id(get_store(), &id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("ไม่พบสาขา".into()))
}

/// POST /api/admin/offices
pub async fn create(Json(dto): Json<OfficeDto>) -> ApiResult<Office> {
    Ok(Json(service::create(get_store(), dto).await?))
}

/// PUT /api/admin/offices/:id
pub async fn update(Path(id): Path<String>, Json(dto): Json<OfficeDto>) -> ApiResult<Office> {
    Ok(Json(service::update(get_store(), &id, dto).await?))
}

/// DELETE /api/admin/offices/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    service::delete(get_store(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
