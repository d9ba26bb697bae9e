use axum::{extract::Path, Json};
use contracts::domain::a001_inventory_config::{
    ConfigEntry, ConfigKind, InventoryConfig, NewConfigEntryDto,
};

use crate::domain::a001_inventory_config::service;
use crate::shared::api_error::{ApiError, ApiResult};
use crate::shared::data::get_store;

fn parse_kind(kind: &str) -> Result<ConfigKind, ApiError> {
    ConfigKind::parse(kind)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown config kind: {}", kind)))
}

/// GET /api/inventory-config, GET /api/admin/inventory-config
pub async fn get_config() -> ApiResult<InventoryConfig> {
    Ok(Json(service::get_config(get_store()).await?))
}

/// PUT /api/admin/inventory-config/:kind
pub async fn replace_entries(
    Path(kind): Path<String>,
    Json(entries): Json<Vec<ConfigEntry>>,
) -> ApiResult<Vec<ConfigEntry>> {
    let kind = parse_kind(&kind)?;
    Ok(Json(service::replace_entries(get_store(), kind, entries).await?))
}

/// POST /api/admin/inventory-config/:kind
pub async fn add_entry(
    Path(kind): Path<String>,
    Json(dto): Json<NewConfigEntryDto>,
) -> ApiResult<ConfigEntry> {
    let kind = parse_kind(&kind)?;
    Ok(Json(service::add_entry(get_store(), kind, &dto.name).await?))
}

/// PUT /api/admin/inventory-config/:kind/:id
pub async fn rename_entry(
    Path((kind, id)): Path<(String, String)>,
    Json(dto): Json<NewConfigEntryDto>,
) -> ApiResult<ConfigEntry> {
    let kind = parse_kind(&kind)?;
    Ok(Json(service::rename_entry(get_store(), kind, &id, &dto.name).await?))
}

/// DELETE /api/admin/inventory-config/:kind/:id
pub async fn delete_entry(
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<Vec<ConfigEntry>> {
    let kind = parse_kind(&kind)?;
    Ok(Json(service::delete_entry(get_store(), kind, &id).await?))
}
