use axum::{
    extract::{Path, Query},
    Json,
};
use contracts::domain::a005_it_issue::{
    CreateItIssueDto, IssueFilter, ItIssue, UpdateIssueStatusDto,
};

use crate::domain::a005_it_issue::service;
use crate::shared::api_error::{ApiError, ApiResult};
use crate::shared::data::get_store;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/it-issues?status=&officeId=
pub async fn list(Query(filter): Query<IssueFilter>) -> ApiResult<Vec<ItIssue>> {
    Ok(Json(service::list(get_store(), &filter).await?))
}

/// GET /api/it-issues/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<ItIssue> {
    service::get_by_id(get_store(), &id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("ไม่พบรายการแจ้งปัญหา".into()))
}

/// POST /api/it-issues
pub async fn create(Json(dto): Json<CreateItIssueDto>) -> ApiResult<ItIssue> {
    Ok(Json(service::create(get_store(), dto).await?))
}

/// PUT /api/admin/it-issues/:id/status
pub async fn update_status(
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(mut dto): Json<UpdateIssueStatusDto>,
) -> ApiResult<ItIssue> {
    if dto.assigned_admin.as_deref().map_or(true, |a| a.trim().is_empty()) {
        dto.assigned_admin = Some(user.username);
    }
    Ok(Json(service::update_status(get_store(), &id, dto).await?))
}
