use contracts::domain::a005_it_issue::ItIssue;

use crate::shared::data::MockStore;

pub async fn list_all(store: &MockStore) -> anyhow::Result<Vec<ItIssue>> {
    store.simulate_latency().await;
    Ok(store.issues.read().await.clone())
}

pub async fn get_by_id(store: &MockStore, id: &str) -> anyhow::Result<Option<ItIssue>> {
    store.simulate_latency().await;
    Ok(store.issues.read().await.iter().find(|i| i.id == id).cloned())
}

/// Изменение под одной блокировкой; при ошибке запись не меняется.
/// `None`, если записи нет.
pub async fn modify<T, F>(store: &MockStore, id: &str, edit: F) -> anyhow::Result<Option<T>>
where
    F: FnOnce(&mut ItIssue) -> anyhow::Result<T>,
{
    store.simulate_latency().await;
    let mut issues = store.issues.write().await;
    let Some(slot) = issues.iter_mut().find(|i| i.id == id) else {
        return Ok(None);
    };
    let mut issue = slot.clone();
    let result = edit(&mut issue)?;
    *slot = issue;
    Ok(Some(result))
}

/// Вставка с выдачей номера под одной блокировкой, чтобы номера за день не повторялись
pub async fn insert_numbered<F>(store: &MockStore, build: F) -> anyhow::Result<ItIssue>
where
    F: FnOnce(&[ItIssue]) -> ItIssue,
{
    store.simulate_latency().await;
    let mut issues = store.issues.write().await;
    let issue = build(&issues);
    issues.push(issue.clone());
    Ok(issue)
}
