use contracts::domain::a003_inventory_item::InventoryItem;
use contracts::domain::a004_equipment_request::EquipmentRequest;

use crate::domain::a003_inventory_item::repository::apply_updates;
use crate::shared::data::MockStore;

pub async fn list_all(store: &MockStore) -> anyhow::Result<Vec<EquipmentRequest>> {
    store.simulate_latency().await;
    Ok(store.requests.read().await.clone())
}

pub async fn get_by_id(store: &MockStore, id: &str) -> anyhow::Result<Option<EquipmentRequest>> {
    store.simulate_latency().await;
    Ok(store.requests.read().await.iter().find(|r| r.id == id).cloned())
}

pub async fn insert(store: &MockStore, request: &EquipmentRequest) -> anyhow::Result<String> {
    store.simulate_latency().await;
    store.requests.write().await.push(request.clone());
    Ok(request.id.clone())
}

/// Вставка заявки, которая сразу меняет склад (возврат).
/// `edit` возвращает обновлённые записи склада; при ошибке не меняется ничего.
/// Порядок захвата: items → requests.
pub async fn insert_with_items<F>(
    store: &MockStore,
    mut request: EquipmentRequest,
    edit: F,
) -> anyhow::Result<EquipmentRequest>
where
    F: FnOnce(&mut EquipmentRequest, &[InventoryItem]) -> anyhow::Result<Vec<InventoryItem>>,
{
    store.simulate_latency().await;
    let mut items = store.items.write().await;
    let mut requests = store.requests.write().await;
    let updated = edit(&mut request, &items)?;
    apply_updates(&mut items, &updated);
    requests.push(request.clone());
    Ok(request)
}

/// Проверка перехода и изменение заявки вместе со складом под одной
/// парой блокировок (items → requests). `None`, если заявки нет.
pub async fn update_with_items<F>(
    store: &MockStore,
    id: &str,
    edit: F,
) -> anyhow::Result<Option<EquipmentRequest>>
where
    F: FnOnce(&mut EquipmentRequest, &[InventoryItem]) -> anyhow::Result<Vec<InventoryItem>>,
{
    store.simulate_latency().await;
    let mut items = store.items.write().await;
    let mut requests = store.requests.write().await;
    let Some(slot) = requests.iter_mut().find(|r| r.id == id) else {
        return Ok(None);
    };
    let mut request = slot.clone();
    let updated = edit(&mut request, &items)?;
    apply_updates(&mut items, &updated);
    *slot = request.clone();
    Ok(Some(request))
}
