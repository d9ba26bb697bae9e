use contracts::system::users::User;

use crate::shared::data::MockStore;

pub async fn list_all(store: &MockStore) -> anyhow::Result<Vec<User>> {
    store.simulate_latency().await;
    Ok(store.users.read().await.clone())
}

pub async fn get_by_id(store: &MockStore, id: &str) -> anyhow::Result<Option<User>> {
    store.simulate_latency().await;
    Ok(store.users.read().await.iter().find(|u| u.id == id).cloned())
}

/// Поиск без учёта регистра
pub async fn get_by_username(store: &MockStore, username: &str) -> anyhow::Result<Option<User>> {
    store.simulate_latency().await;
    let username = username.trim();
    Ok(store
        .users
        .read()
        .await
        .iter()
        .find(|u| u.username.eq_ignore_ascii_case(username))
        .cloned())
}

pub async fn insert(store: &MockStore, user: &User) -> anyhow::Result<()> {
    store.simulate_latency().await;
    store.users.write().await.push(user.clone());
    Ok(())
}

pub async fn update(store: &MockStore, user: &User) -> anyhow::Result<bool> {
    store.simulate_latency().await;
    let mut users = store.users.write().await;
    match users.iter_mut().find(|u| u.id == user.id) {
        Some(existing) => {
            *existing = user.clone();
            Ok(true)
        }
        None => Ok(false),
    }
}

pub async fn delete(store: &MockStore, id: &str) -> anyhow::Result<bool> {
    store.simulate_latency().await;
    let mut users = store.users.write().await;
    let before = users.len();
    users.retain(|u| u.id != id);
    Ok(users.len() != before)
}
