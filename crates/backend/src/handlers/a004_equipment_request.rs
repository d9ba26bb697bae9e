use axum::{
    extract::{Path, Query},
    Json,
};
use contracts::domain::a004_equipment_request::{
    CreateEquipmentRequestDto, EquipmentRequest, RequestKind, UpdateRequestStatusDto,
};
use serde::Deserialize;

use crate::domain::a004_equipment_request::service;
use crate::shared::api_error::ApiResult;
use crate::shared::data::get_store;
use crate::system::auth::extractor::CurrentUser;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub kind: Option<RequestKind>,
}

/// GET /api/equipment-requests?kind=request|return
pub async fn list(Query(query): Query<ListQuery>) -> ApiResult<Vec<EquipmentRequest>> {
    Ok(Json(service::list(get_store(), query.kind).await?))
}

/// POST /api/equipment-requests
pub async fn create(Json(dto): Json<CreateEquipmentRequestDto>) -> ApiResult<EquipmentRequest> {
    Ok(Json(service::create(get_store(), dto).await?))
}

/// PUT /api/admin/equipment-requests/:id/status
pub async fn update_status(
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<UpdateRequestStatusDto>,
) -> ApiResult<EquipmentRequest> {
    Ok(Json(
        service::update_status(get_store(), &id, dto, Some(user.username)).await?,
    ))
}
