use chrono::Utc;
use contracts::domain::a001_inventory_config::aggregate::validate_entries;
use contracts::domain::a001_inventory_config::ordering::{
    append, remove_at, rename_at, replace_entry, sorted_by_order, OrderingError,
};
use contracts::domain::a001_inventory_config::{ConfigEntry, ConfigKind, InventoryConfig};
use contracts::domain::a003_inventory_item::InventoryItem;
use std::collections::HashSet;

use super::repository;
use crate::shared::api_error::ApiError;
use crate::shared::data::MockStore;

pub async fn get_config(store: &MockStore) -> anyhow::Result<InventoryConfig> {
    let config = repository::get(store).await?;
    Ok(InventoryConfig {
        categories: sorted_by_order(&config.categories),
        statuses: sorted_by_order(&config.statuses),
        conditions: sorted_by_order(&config.conditions),
    })
}

/// Сколько единиц склада ссылается на запись справочника
fn usage_count(items: &[InventoryItem], kind: ConfigKind, id: &str) -> usize {
    items
        .iter()
        .filter(|item| match kind {
            ConfigKind::Category => item.category_id == id,
            ConfigKind::Status => item.status_id == id,
            ConfigKind::Condition => item.condition_id == id,
        })
        .count()
}

/// Замена упорядоченного списка (результат drag-and-drop или правки в UI)
pub async fn replace_entries(
    store: &MockStore,
    kind: ConfigKind,
    entries: Vec<ConfigEntry>,
) -> anyhow::Result<Vec<ConfigEntry>> {
    validate_entries(kind, &entries).map_err(ApiError::Validation)?;

    let count = entries.len();
    let saved = repository::modify(store, kind, |current, items| {
        let incoming: HashSet<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        for existing in current.iter() {
            if incoming.contains(existing.id.as_str()) {
                continue;
            }
            if existing.is_system_config {
                return Err(ApiError::Conflict(format!(
                    "ไม่สามารถลบ \"{}\" เนื่องจากเป็นค่าของระบบ",
                    existing.name
                ))
                .into());
            }
            if usage_count(items, kind, &existing.id) > 0 {
                return Err(ApiError::Conflict(format!(
                    "ไม่สามารถลบ \"{}\" เนื่องจากมีอุปกรณ์ใช้งานอยู่",
                    existing.name
                ))
                .into());
            }
        }

        // флаг системной записи клиент поменять не может
        let system_ids: HashSet<&str> = current
            .iter()
            .filter(|e| e.is_system_config)
            .map(|e| e.id.as_str())
            .collect();
        let entries: Vec<ConfigEntry> = entries
            .iter()
            .cloned()
            .map(|mut e| {
                e.is_system_config = system_ids.contains(e.id.as_str());
                e
            })
            .collect();
        *current = sorted_by_order(&entries);
        Ok(current.clone())
    })
    .await?;

    tracing::info!("Inventory config {} replaced ({} entries)", kind.as_str(), count);
    Ok(saved)
}

pub async fn add_entry(
    store: &MockStore,
    kind: ConfigKind,
    name: &str,
) -> anyhow::Result<ConfigEntry> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("กรุณาระบุชื่อ".into()).into());
    }

    let added = repository::modify(store, kind, |entries, _| {
        if entries
            .iter()
            .any(|e| e.name.trim().to_lowercase() == name.to_lowercase())
        {
            return Err(ApiError::Conflict(format!("\"{}\" มีอยู่แล้ว", name)).into());
        }
        let entry = ConfigEntry::new(name, 0, Utc::now());
        let updated = append(entries, entry.clone());
        let added = updated
            .iter()
            .find(|e| e.id == entry.id)
            .cloned()
            .unwrap_or(entry);
        *entries = updated;
        Ok(added)
    })
    .await?;

    tracing::info!("Inventory config {}: added \"{}\"", kind.as_str(), name);
    Ok(added)
}

pub async fn rename_entry(
    store: &MockStore,
    kind: ConfigKind,
    id: &str,
    name: &str,
) -> anyhow::Result<ConfigEntry> {
    repository::modify(store, kind, |entries, _| {
        let sorted = sorted_by_order(entries);
        let index = sorted
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ApiError::NotFound("ไม่พบรายการ".into()))?;
        if sorted
            .iter()
            .any(|e| e.id != id && e.name.trim().to_lowercase() == name.trim().to_lowercase())
        {
            return Err(ApiError::Conflict(format!("\"{}\" มีอยู่แล้ว", name.trim())).into());
        }

        let renamed = rename_at(&sorted, index, name, Utc::now())
            .ok_or_else(|| ApiError::Validation("กรุณาระบุชื่อ".into()))?;
        *entries = replace_entry(&sorted, renamed.clone());
        Ok(renamed)
    })
    .await
}

pub async fn delete_entry(
    store: &MockStore,
    kind: ConfigKind,
    id: &str,
) -> anyhow::Result<Vec<ConfigEntry>> {
    let remaining = repository::modify(store, kind, |entries, items| {
        let sorted = sorted_by_order(entries);
        let index = sorted
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ApiError::NotFound("ไม่พบรายการ".into()))?;

        let used = usage_count(items, kind, id);
        if used > 0 {
            return Err(ApiError::Conflict(format!(
                "ไม่สามารถลบได้ เนื่องจากมีอุปกรณ์ {} รายการใช้งานอยู่",
                used
            ))
            .into());
        }

        *entries = remove_at(&sorted, index, Utc::now()).map_err(|e| match e {
            OrderingError::SystemEntry(_) => ApiError::Conflict("ไม่สามารถลบค่าของระบบได้".into()),
            OrderingError::IndexOutOfRange { .. } => ApiError::NotFound("ไม่พบรายการ".into()),
        })?;
        Ok(entries.clone())
    })
    .await?;

    tracing::info!("Inventory config {}: deleted {}", kind.as_str(), id);
    Ok(remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_inventory_config::aggregate::{
        CATEGORY_PERIPHERAL, CONDITION_DAMAGED, STATUS_LOST,
    };
    use contracts::domain::a001_inventory_config::ordering::is_dense;

    fn store() -> MockStore {
        MockStore::seeded(Utc::now())
    }

    fn api_error(err: anyhow::Error) -> ApiError {
        ApiError::from(err)
    }

    #[tokio::test]
    async fn test_add_then_delete_keeps_orders_dense() {
        let store = store();
        let added = add_entry(&store, ConfigKind::Category, "  เครื่องพิมพ์ ").await.unwrap();
        assert_eq!(added.name, "เครื่องพิมพ์");
        assert_eq!(added.order, 6);

        let remaining = delete_entry(&store, ConfigKind::Category, &added.id).await.unwrap();
        assert_eq!(remaining.len(), 5);
        assert!(is_dense(&remaining));
    }

    #[tokio::test]
    async fn test_concurrent_adds_get_distinct_orders() {
        let store = MockStore::seeded(Utc::now()).with_latency(10);
        let (a, b) = tokio::join!(
            add_entry(&store, ConfigKind::Category, "เครื่องพิมพ์"),
            add_entry(&store, ConfigKind::Category, "สแกนเนอร์"),
        );
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_ne!(a.order, b.order);

        let config = get_config(&store).await.unwrap();
        assert_eq!(config.categories.len(), 7);
        assert!(config.categories.iter().any(|c| c.id == a.id));
        assert!(config.categories.iter().any(|c| c.id == b.id));
        assert!(is_dense(&config.categories));
    }

    #[tokio::test]
    async fn test_concurrent_same_name_adds_once() {
        let store = MockStore::seeded(Utc::now()).with_latency(10);
        let (a, b) = tokio::join!(
            add_entry(&store, ConfigKind::Status, "ส่งซ่อม"),
            add_entry(&store, ConfigKind::Status, "ส่งซ่อม"),
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let config = get_config(&store).await.unwrap();
        assert_eq!(config.statuses.iter().filter(|s| s.name == "ส่งซ่อม").count(), 1);
    }

    #[tokio::test]
    async fn test_add_duplicate_name_conflicts() {
        let store = store();
        let err = add_entry(&store, ConfigKind::Status, "สูญหาย").await.unwrap_err();
        assert!(matches!(api_error(err), ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_system_entry_cannot_be_deleted() {
        let store = store();
        let err = delete_entry(&store, ConfigKind::Status, STATUS_LOST).await.unwrap_err();
        assert!(matches!(api_error(err), ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_replace_cannot_drop_system_entry() {
        let store = store();
        let config = get_config(&store).await.unwrap();
        let without: Vec<ConfigEntry> = config
            .categories
            .into_iter()
            .filter(|c| c.id != CATEGORY_PERIPHERAL)
            .enumerate()
            .map(|(pos, mut c)| {
                c.order = pos as u32 + 1;
                c
            })
            .collect();
        let err = replace_entries(&store, ConfigKind::Category, without)
            .await
            .unwrap_err();
        assert!(matches!(api_error(err), ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_replace_with_reordered_list() {
        let store = store();
        let config = get_config(&store).await.unwrap();
        let mut conditions = config.conditions.clone();
        conditions.reverse();
        for (pos, c) in conditions.iter_mut().enumerate() {
            c.order = pos as u32 + 1;
        }
        let saved = replace_entries(&store, ConfigKind::Condition, conditions)
            .await
            .unwrap();
        assert_eq!(saved[0].id, CONDITION_DAMAGED);
        assert!(saved.iter().all(|c| c.is_system_config));
    }

    #[tokio::test]
    async fn test_replace_rejects_gaps() {
        let store = store();
        let config = get_config(&store).await.unwrap();
        let mut statuses = config.statuses.clone();
        statuses[0].order = 10;
        let err = replace_entries(&store, ConfigKind::Status, statuses)
            .await
            .unwrap_err();
        assert!(matches!(api_error(err), ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_rename_entry() {
        let store = store();
        let renamed = rename_entry(&store, ConfigKind::Condition, CONDITION_DAMAGED, " เสียหาย ")
            .await
            .unwrap();
        assert_eq!(renamed.name, "เสียหาย");
        let config = get_config(&store).await.unwrap();
        assert!(config.conditions.iter().any(|c| c.name == "เสียหาย"));

        let err = rename_entry(&store, ConfigKind::Condition, CONDITION_DAMAGED, "   ")
            .await
            .unwrap_err();
        assert!(matches!(api_error(err), ApiError::Validation(_)));
    }
}
