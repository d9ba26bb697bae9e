use axum::{extract::Query, Json};
use contracts::domain::a003_inventory_item::{
    AvailableFilter, AvailableItems, BreakdownQuery, CreateInventoryItemDto, InventoryFilter,
    InventoryGroupRow, InventoryItem, ItemBreakdown,
};

use crate::domain::a003_inventory_item::service;
use crate::shared::api_error::ApiResult;
use crate::shared::data::get_store;

/// GET /api/inventory
pub async fn list_grouped(Query(filter): Query<InventoryFilter>) -> ApiResult<Vec<InventoryGroupRow>> {
    Ok(Json(service::list_grouped(get_store(), &filter).await?))
}

/// GET /api/inventory/items
pub async fn list_items(Query(filter): Query<InventoryFilter>) -> ApiResult<Vec<InventoryItem>> {
    Ok(Json(service::list_items(get_store(), &filter).await?))
}

/// POST /api/inventory
pub async fn create(Json(dto): Json<CreateInventoryItemDto>) -> ApiResult<Vec<InventoryItem>> {
    Ok(Json(service::create(get_store(), dto).await?))
}

/// GET /api/inventory/breakdown?itemName=&categoryId=
pub async fn breakdown(Query(query): Query<BreakdownQuery>) -> ApiResult<ItemBreakdown> {
    Ok(Json(service::breakdown(get_store(), &query).await?))
}

/// GET /api/admin/equipment-reports/available-items
pub async fn available_items(Query(filter): Query<AvailableFilter>) -> ApiResult<AvailableItems> {
    Ok(Json(service::available_items(get_store(), &filter).await?))
}
