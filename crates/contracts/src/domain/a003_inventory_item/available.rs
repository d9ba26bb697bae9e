use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aggregate::{InventoryItem, OwnershipType};
use crate::domain::a001_inventory_config::aggregate::CONDITION_DAMAGED;

/// Query для GET /api/admin/equipment-reports/available-items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableFilter {
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub office_id: Option<String>,
}

/// Единица с индивидуальным номером (серийный или телефонный)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSerialItem {
    pub item_id: String,
    pub item_name: String,
    pub category_id: String,
    pub serial_number: Option<String>,
    pub phone_number: Option<String>,
    pub condition_id: String,
    pub office_id: String,
}

/// Обезличенный остаток
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableStock {
    pub item_name: String,
    pub category_id: String,
    pub office_id: String,
    pub quantity: u32,
    pub item_ids: Vec<String>,
}

/// Свободный к выдаче склад
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableItems {
    pub with_serial_number: Vec<AvailableSerialItem>,
    pub without_serial_number: Vec<AvailableStock>,
    pub with_phone_number: Vec<AvailableSerialItem>,
}

impl AvailableFilter {
    fn matches(&self, item: &InventoryItem) -> bool {
        let eq = |filter: &Option<String>, value: &str| {
            filter
                .as_deref()
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map_or(true, |f| f == value)
        };
        eq(&self.item_name, &item.item_name)
            && eq(&self.category_id, &item.category_id)
            && eq(&self.office_id, &item.office_id)
    }
}

impl AvailableItems {
    /// Выдавать можно только исправное оборудование компании со статусом "พร้อมใช้งาน"
    pub fn collect(items: &[InventoryItem], filter: &AvailableFilter) -> Self {
        let mut result = AvailableItems::default();
        let mut stock: BTreeMap<(String, String, String), AvailableStock> = BTreeMap::new();

        for item in items.iter().filter(|i| {
            i.is_available()
                && i.ownership == OwnershipType::Company
                && i.condition_id != CONDITION_DAMAGED
                && filter.matches(i)
        }) {
            let single = || AvailableSerialItem {
                item_id: item.id.clone(),
                item_name: item.item_name.clone(),
                category_id: item.category_id.clone(),
                serial_number: item.serial_number.clone(),
                phone_number: item.phone_number.clone(),
                condition_id: item.condition_id.clone(),
                office_id: item.office_id.clone(),
            };
            if item.has_phone() {
                result.with_phone_number.push(single());
            } else if item.has_serial() {
                result.with_serial_number.push(single());
            } else {
                let entry = stock
                    .entry((
                        item.category_id.clone(),
                        item.item_name.clone(),
                        item.office_id.clone(),
                    ))
                    .or_insert_with(|| AvailableStock {
                        item_name: item.item_name.clone(),
                        category_id: item.category_id.clone(),
                        office_id: item.office_id.clone(),
                        quantity: 0,
                        item_ids: Vec::new(),
                    });
                entry.quantity += 1;
                entry.item_ids.push(item.id.clone());
            }
        }

        result.without_serial_number = stock.into_values().collect();
        result
            .with_serial_number
            .sort_by(|a, b| a.item_name.cmp(&b.item_name).then(a.serial_number.cmp(&b.serial_number)));
        result
            .with_phone_number
            .sort_by(|a, b| a.phone_number.cmp(&b.phone_number));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_inventory_config::aggregate::{
        CATEGORY_PERIPHERAL, CATEGORY_SIM_CARD, STATUS_IN_USE,
    };
    use crate::domain::a003_inventory_item::CreateInventoryItemDto;
    use chrono::Utc;

    fn items() -> Vec<InventoryItem> {
        let now = Utc::now();
        let mut all = CreateInventoryItemDto {
            item_name: "Logitech M331".into(),
            category_id: CATEGORY_PERIPHERAL.into(),
            quantity: 3,
            office_id: "office-hq".into(),
            ..Default::default()
        }
        .into_items(now);
        all.extend(
            CreateInventoryItemDto {
                item_name: "Logitech M331".into(),
                category_id: CATEGORY_PERIPHERAL.into(),
                serial_number: Some("LG-7781".into()),
                quantity: 1,
                office_id: "office-hq".into(),
                ..Default::default()
            }
            .into_items(now),
        );
        all.extend(
            CreateInventoryItemDto {
                item_name: "AIS".into(),
                category_id: CATEGORY_SIM_CARD.into(),
                phone_number: Some("0891234567".into()),
                quantity: 1,
                office_id: "office-hq".into(),
                ..Default::default()
            }
            .into_items(now),
        );
        all
    }

    #[test]
    fn test_split_by_identifier_kind() {
        let mut all = items();
        all[0].status_id = STATUS_IN_USE.into();
        all[1].condition_id = CONDITION_DAMAGED.into();
        let available = AvailableItems::collect(&all, &AvailableFilter::default());
        assert_eq!(available.with_serial_number.len(), 1);
        assert_eq!(available.with_phone_number.len(), 1);
        assert_eq!(available.without_serial_number.len(), 1);
        assert_eq!(available.without_serial_number[0].quantity, 1);
        assert_eq!(available.without_serial_number[0].item_ids, vec![all[2].id.clone()]);
    }

    #[test]
    fn test_filter_by_category() {
        let filter = AvailableFilter {
            category_id: Some(CATEGORY_SIM_CARD.into()),
            ..Default::default()
        };
        let available = AvailableItems::collect(&items(), &filter);
        assert!(available.with_serial_number.is_empty());
        assert!(available.without_serial_number.is_empty());
        assert_eq!(
            available.with_phone_number[0].phone_number.as_deref(),
            Some("0891234567")
        );
    }

    #[test]
    fn test_personal_devices_are_not_available() {
        let mut all = items();
        for item in &mut all {
            item.ownership = OwnershipType::Personal;
        }
        let available = AvailableItems::collect(&all, &AvailableFilter::default());
        assert_eq!(available, AvailableItems::default());
    }
}
