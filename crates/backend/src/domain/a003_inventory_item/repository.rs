use contracts::domain::a003_inventory_item::InventoryItem;

use crate::shared::data::MockStore;

pub async fn list_all(store: &MockStore) -> anyhow::Result<Vec<InventoryItem>> {
    store.simulate_latency().await;
    Ok(store.items.read().await.clone())
}

pub async fn get_by_id(store: &MockStore, id: &str) -> anyhow::Result<Option<InventoryItem>> {
    store.simulate_latency().await;
    Ok(store.items.read().await.iter().find(|i| i.id == id).cloned())
}

/// Проверка на дубли и вставка под одной блокировкой склада
pub async fn insert_checked<F>(
    store: &MockStore,
    new_items: &[InventoryItem],
    check: F,
) -> anyhow::Result<usize>
where
    F: FnOnce(&[InventoryItem]) -> anyhow::Result<()>,
{
    store.simulate_latency().await;
    let mut items = store.items.write().await;
    check(&items)?;
    items.extend_from_slice(new_items);
    Ok(new_items.len())
}

/// Заменяет записи с совпадающими id; возвращает число обновлённых.
/// Вызывается под уже взятой блокировкой склада.
pub fn apply_updates(items: &mut [InventoryItem], updated: &[InventoryItem]) -> usize {
    let mut count = 0;
    for item in updated {
        if let Some(existing) = items.iter_mut().find(|i| i.id == item.id) {
            *existing = item.clone();
            count += 1;
        }
    }
    count
}
