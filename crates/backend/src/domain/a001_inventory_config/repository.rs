use contracts::domain::a001_inventory_config::{ConfigEntry, ConfigKind, InventoryConfig};
use contracts::domain::a003_inventory_item::InventoryItem;

use crate::shared::data::MockStore;

pub async fn get(store: &MockStore) -> anyhow::Result<InventoryConfig> {
    store.simulate_latency().await;
    Ok(store.config.read().await.clone())
}

/// Чтение-изменение-запись одного справочника под одной блокировкой.
/// `edit` получает копию списка и склад (для проверки использования);
/// при ошибке справочник не меняется. Порядок захвата: config → items.
pub async fn modify<T, F>(store: &MockStore, kind: ConfigKind, edit: F) -> anyhow::Result<T>
where
    F: FnOnce(&mut Vec<ConfigEntry>, &[InventoryItem]) -> anyhow::Result<T>,
{
    store.simulate_latency().await;
    let mut config = store.config.write().await;
    let items = store.items.read().await;
    let mut entries = config.entries(kind).to_vec();
    let result = edit(&mut entries, &items)?;
    *config.entries_mut(kind) = entries;
    Ok(result)
}
