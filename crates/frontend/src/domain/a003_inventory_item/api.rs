use contracts::domain::a003_inventory_item::{
    AvailableFilter, AvailableItems, CreateInventoryItemDto, InventoryFilter, InventoryGroupRow,
    InventoryItem,
};

use crate::shared::api_utils::{api_url, api_url_with_query};
use crate::shared::http::{self, Method};

/// Пустые строки из полей фильтра не уходят в query
pub fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub async fn fetch_grouped(filter: &InventoryFilter) -> Result<Vec<InventoryGroupRow>, String> {
    http::get_json(&api_url_with_query("/api/inventory", filter)?).await
}

pub async fn fetch_items(filter: &InventoryFilter) -> Result<Vec<InventoryItem>, String> {
    http::get_json(&api_url_with_query("/api/inventory/items", filter)?).await
}

/// Добавить оборудование; при quantity > 1 сервер создаёт несколько единиц
pub async fn create(dto: &CreateInventoryItemDto) -> Result<Vec<InventoryItem>, String> {
    http::send_json(Method::Post, &api_url("/api/inventory"), dto).await
}

/// Свободные единицы (admin)
pub async fn fetch_available(filter: &AvailableFilter) -> Result<AvailableItems, String> {
    http::get_json(&api_url_with_query(
        "/api/admin/equipment-reports/available-items",
        filter,
    )?)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  ".into()), None);
        assert_eq!(non_empty(" โน้ตบุ๊ก ".into()), Some("โน้ตบุ๊ก".to_string()));
    }
}
