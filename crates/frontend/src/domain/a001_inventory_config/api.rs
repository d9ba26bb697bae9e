use contracts::domain::a001_inventory_config::{
    ConfigEntry, ConfigKind, InventoryConfig, NewConfigEntryDto,
};

use crate::shared::api_utils::{api_url, path_segment};
use crate::shared::http::{self, Method};

fn kind_url(kind: ConfigKind) -> String {
    api_url(&format!("/api/admin/inventory-config/{}", kind.as_str()))
}

fn entry_url(kind: ConfigKind, id: &str) -> String {
    format!("{}/{}", kind_url(kind), path_segment(id))
}

/// Справочники для форм (публичный маршрут)
pub async fn fetch_config() -> Result<InventoryConfig, String> {
    http::get_json(&api_url("/api/inventory-config")).await
}

pub async fn fetch_admin_config() -> Result<InventoryConfig, String> {
    http::get_json(&api_url("/api/admin/inventory-config")).await
}

/// Сохранить весь список (новый порядок)
pub async fn replace_entries(
    kind: ConfigKind,
    entries: &[ConfigEntry],
) -> Result<Vec<ConfigEntry>, String> {
    http::send_json(Method::Put, &kind_url(kind), &entries).await
}

pub async fn add_entry(kind: ConfigKind, name: String) -> Result<ConfigEntry, String> {
    http::send_json(Method::Post, &kind_url(kind), &NewConfigEntryDto { name }).await
}

pub async fn rename_entry(kind: ConfigKind, id: &str, name: String) -> Result<ConfigEntry, String> {
    http::send_json(Method::Put, &entry_url(kind, id), &NewConfigEntryDto { name }).await
}

/// Удалить запись; в ответе - оставшийся список
pub async fn delete_entry(kind: ConfigKind, id: &str) -> Result<Vec<ConfigEntry>, String> {
    http::delete_json(&entry_url(kind, id)).await
}
