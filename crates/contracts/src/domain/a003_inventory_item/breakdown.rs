use serde::{Deserialize, Serialize};

use super::aggregate::{InventoryItem, OwnershipType};
use crate::domain::a001_inventory_config::{ConfigKind, InventoryConfig};
use crate::domain::a001_inventory_config::ordering::sorted_by_order;

/// Query для GET /api/inventory/breakdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownQuery {
    pub item_name: String,
    pub category_id: String,
}

impl BreakdownQuery {
    /// Ключ кэша на стороне UI
    pub fn cache_key(&self) -> String {
        format!("{}::{}", self.category_id, self.item_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownBucket {
    pub key: String,
    pub label: String,
    pub count: u32,
}

/// Разбивка строки склада: количество по статусу, состоянию и типу владения
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBreakdown {
    pub item_name: String,
    pub category_id: String,
    pub total: u32,
    pub by_status: Vec<BreakdownBucket>,
    pub by_condition: Vec<BreakdownBucket>,
    pub by_ownership: Vec<BreakdownBucket>,
}

impl ItemBreakdown {
    /// Корзины идут в порядке справочника, пустые корзины опускаются.
    /// Значения, которых нет в справочнике, попадают в конец под своим id.
    pub fn from_items(
        query: &BreakdownQuery,
        items: &[InventoryItem],
        config: &InventoryConfig,
    ) -> Self {
        let matching: Vec<&InventoryItem> = items
            .iter()
            .filter(|i| i.item_name == query.item_name && i.category_id == query.category_id)
            .collect();

        Self {
            item_name: query.item_name.clone(),
            category_id: query.category_id.clone(),
            total: matching.len() as u32,
            by_status: buckets(config, ConfigKind::Status, &matching, |i| &i.status_id),
            by_condition: buckets(config, ConfigKind::Condition, &matching, |i| &i.condition_id),
            by_ownership: OwnershipType::all()
                .into_iter()
                .map(|kind| BreakdownBucket {
                    key: kind.as_str().to_string(),
                    label: kind.display_name().to_string(),
                    count: matching.iter().filter(|i| i.ownership == kind).count() as u32,
                })
                .filter(|b| b.count > 0)
                .collect(),
        }
    }
}

fn buckets<F>(
    config: &InventoryConfig,
    kind: ConfigKind,
    items: &[&InventoryItem],
    field: F,
) -> Vec<BreakdownBucket>
where
    F: Fn(&InventoryItem) -> &String,
{
    let mut result: Vec<BreakdownBucket> = sorted_by_order(config.entries(kind))
        .into_iter()
        .map(|entry| BreakdownBucket {
            count: items.iter().filter(|i| field(i) == &entry.id).count() as u32,
            key: entry.id,
            label: entry.name,
        })
        .filter(|b| b.count > 0)
        .collect();

    for item in items {
        let value = field(item);
        if config.contains(kind, value) {
            continue;
        }
        match result.iter_mut().find(|b| &b.key == value) {
            Some(bucket) => bucket.count += 1,
            None => result.push(BreakdownBucket {
                key: value.clone(),
                label: value.clone(),
                count: 1,
            }),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_inventory_config::aggregate::{
        CATEGORY_NOTEBOOK, CONDITION_DAMAGED, STATUS_AVAILABLE, STATUS_IN_USE,
    };
    use crate::domain::a003_inventory_item::CreateInventoryItemDto;
    use chrono::Utc;

    #[test]
    fn test_breakdown_counts_by_group() {
        let now = Utc::now();
        let config = InventoryConfig::seeded(now);
        let mut items = CreateInventoryItemDto {
            item_name: "ThinkPad E14".into(),
            category_id: CATEGORY_NOTEBOOK.into(),
            quantity: 4,
            office_id: "office-hq".into(),
            ..Default::default()
        }
        .into_items(now);
        items[0].status_id = STATUS_IN_USE.into();
        items[1].condition_id = CONDITION_DAMAGED.into();
        items[2].ownership = OwnershipType::Personal;
        items[3].status_id = "status_legacy".into();

        let query = BreakdownQuery {
            item_name: "ThinkPad E14".into(),
            category_id: CATEGORY_NOTEBOOK.into(),
        };
        let breakdown = ItemBreakdown::from_items(&query, &items, &config);

        assert_eq!(breakdown.total, 4);
        let status: Vec<(&str, u32)> = breakdown
            .by_status
            .iter()
            .map(|b| (b.key.as_str(), b.count))
            .collect();
        assert_eq!(
            status,
            vec![(STATUS_AVAILABLE, 2), (STATUS_IN_USE, 1), ("status_legacy", 1)]
        );
        assert_eq!(breakdown.by_condition.len(), 2);
        assert_eq!(breakdown.by_ownership[0].count, 3);
        assert_eq!(breakdown.by_ownership[1].label, "ของส่วนตัว");
    }

    #[test]
    fn test_breakdown_for_unknown_item_is_empty() {
        let config = InventoryConfig::seeded(Utc::now());
        let query = BreakdownQuery {
            item_name: "ไม่มี".into(),
            category_id: CATEGORY_NOTEBOOK.into(),
        };
        let breakdown = ItemBreakdown::from_items(&query, &[], &config);
        assert_eq!(breakdown.total, 0);
        assert!(breakdown.by_status.is_empty());
    }
}
