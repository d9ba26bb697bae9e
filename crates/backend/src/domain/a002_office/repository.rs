use contracts::domain::a002_office::Office;

use crate::shared::data::MockStore;

pub async fn list_all(store: &MockStore) -> anyhow::Result<Vec<Office>> {
    store.simulate_latency().await;
    Ok(store.offices.read().await.clone())
}

pub async fn get_by_id(store: &MockStore, id: &str) -> anyhow::Result<Option<Office>> {
    store.simulate_latency().await;
    Ok(store.offices.read().await.iter().find(|o| o.id == id).cloned())
}

pub async fn insert(store: &MockStore, office: &Office) -> anyhow::Result<String> {
    store.simulate_latency().await;
    store.offices.write().await.push(office.clone());
    Ok(office.id.clone())
}

pub async fn update(store: &MockStore, office: &Office) -> anyhow::Result<bool> {
    store.simulate_latency().await;
    let mut offices = store.offices.write().await;
    match offices.iter_mut().find(|o| o.id == office.id) {
        Some(existing) => {
            *existing = office.clone();
            Ok(true)
        }
        None => Ok(false),
    }
}

pub async fn delete(store: &MockStore, id: &str) -> anyhow::Result<bool> {
    store.simulate_latency().await;
    let mut offices = store.offices.write().await;
    let before = offices.len();
    offices.retain(|o| o.id != id);
    Ok(offices.len() != before)
}
