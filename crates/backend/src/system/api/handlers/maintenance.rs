use axum::extract::Json;
use contracts::system::maintenance::{FixReport, RenameItemRequest, RenameItemResult};

use crate::shared::api_error::ApiResult;
use crate::shared::data::get_store;
use crate::system::auth::extractor::CurrentUser;
use crate::system::maintenance::service;

/// POST /api/admin/fix-return-id-mismatch
pub async fn fix_return_id_mismatch(CurrentUser(user): CurrentUser) -> ApiResult<FixReport> {
    tracing::info!("fix-return-id-mismatch started by {}", user.username);
    Ok(Json(service::fix_return_id_mismatch(get_store()).await?))
}

/// POST /api/admin/fix-serialnumber-index
pub async fn fix_serialnumber_index(CurrentUser(user): CurrentUser) -> ApiResult<FixReport> {
    tracing::info!("fix-serialnumber-index started by {}", user.username);
    Ok(Json(service::fix_serialnumber_index(get_store()).await?))
}

/// POST /api/admin/rename-item
pub async fn rename_item(
    CurrentUser(user): CurrentUser,
    Json(request): Json<RenameItemRequest>,
) -> ApiResult<RenameItemResult> {
    tracing::info!("rename-item {:?} requested by {}", request.action, user.username);
    Ok(Json(service::rename_item(get_store(), request).await?))
}
