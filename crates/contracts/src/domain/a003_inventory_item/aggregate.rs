use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::a001_inventory_config::aggregate::{
    CATEGORY_SIM_CARD, CONDITION_WORKING, STATUS_AVAILABLE,
};
use crate::domain::a001_inventory_config::{ConfigKind, InventoryConfig};
use crate::domain::common::{new_id, EntityMetadata};
use crate::shared::validation::is_valid_thai_phone;

/// Тип владения: склад компании или личное устройство сотрудника
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OwnershipType {
    #[default]
    Company,
    Personal,
}

impl OwnershipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnershipType::Company => "company",
            OwnershipType::Personal => "personal",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OwnershipType::Company => "ของบริษัท",
            OwnershipType::Personal => "ของส่วนตัว",
        }
    }

    pub fn all() -> [OwnershipType; 2] {
        [OwnershipType::Company, OwnershipType::Personal]
    }
}

/// Единица оборудования на складе
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub item_name: String,
    pub category_id: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub status_id: String,
    pub condition_id: String,
    pub office_id: String,
    #[serde(default)]
    pub ownership: OwnershipType,
    /// Кому выдано (имя пользователя)
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl InventoryItem {
    pub fn has_serial(&self) -> bool {
        self.serial_number.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    pub fn has_phone(&self) -> bool {
        self.phone_number.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    pub fn is_available(&self) -> bool {
        self.status_id == STATUS_AVAILABLE && self.assigned_to.is_none()
    }
}

/// DTO формы "เพิ่มอุปกรณ์"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryItemDto {
    pub item_name: String,
    pub category_id: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub status_id: Option<String>,
    #[serde(default)]
    pub condition_id: Option<String>,
    pub office_id: String,
    #[serde(default)]
    pub ownership: Option<OwnershipType>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl CreateInventoryItemDto {
    /// Валидация данных
    pub fn validate(&self, config: &InventoryConfig) -> Result<(), String> {
        if self.item_name.trim().is_empty() {
            return Err("กรุณาระบุชื่ออุปกรณ์".into());
        }
        if !config.contains(ConfigKind::Category, &self.category_id) {
            return Err("กรุณาเลือกหมวดหมู่".into());
        }
        if self.office_id.trim().is_empty() {
            return Err("กรุณาเลือกสาขา".into());
        }
        if self.quantity == 0 {
            return Err("จำนวนต้องมากกว่า 0".into());
        }
        let serial = non_blank(&self.serial_number);
        let phone = non_blank(&self.phone_number);
        if serial.is_some() && self.quantity != 1 {
            return Err("อุปกรณ์ที่มีหมายเลขซีเรียลต้องเพิ่มทีละ 1 ชิ้น".into());
        }
        if self.category_id == CATEGORY_SIM_CARD {
            match &phone {
                None => return Err("ซิมการ์ดต้องระบุเบอร์โทรศัพท์".into()),
                Some(_) if self.quantity != 1 => {
                    return Err("ซิมการ์ดต้องเพิ่มทีละ 1 ชิ้น".into())
                }
                _ => {}
            }
        }
        if let Some(phone) = &phone {
            if !is_valid_thai_phone(phone) {
                return Err("เบอร์โทรศัพท์ต้องเป็นตัวเลข 10 หลัก".into());
            }
        }
        if let Some(status) = &self.status_id {
            if !config.contains(ConfigKind::Status, status) {
                return Err("สถานะไม่ถูกต้อง".into());
            }
        }
        if let Some(condition) = &self.condition_id {
            if !config.contains(ConfigKind::Condition, condition) {
                return Err("สภาพอุปกรณ์ไม่ถูกต้อง".into());
            }
        }
        Ok(())
    }

    /// Разворачивает DTO в `quantity` записей склада
    pub fn into_items(self, now: DateTime<Utc>) -> Vec<InventoryItem> {
        let serial = non_blank(&self.serial_number);
        let phone = non_blank(&self.phone_number);
        let notes = non_blank(&self.notes);
        let assigned_to = non_blank(&self.assigned_to);
        (0..self.quantity)
            .map(|_| InventoryItem {
                id: new_id(),
                item_name: self.item_name.trim().to_string(),
                category_id: self.category_id.clone(),
                serial_number: serial.clone(),
                phone_number: phone.clone(),
                status_id: self
                    .status_id
                    .clone()
                    .unwrap_or_else(|| STATUS_AVAILABLE.to_string()),
                condition_id: self
                    .condition_id
                    .clone()
                    .unwrap_or_else(|| CONDITION_WORKING.to_string()),
                office_id: self.office_id.clone(),
                ownership: self.ownership.unwrap_or_default(),
                assigned_to: assigned_to.clone(),
                notes: notes.clone(),
                metadata: EntityMetadata::new(now),
            })
            .collect()
    }
}

/// Фильтр списка склада (query string)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub office_id: Option<String>,
    #[serde(default)]
    pub status_id: Option<String>,
}

impl InventoryFilter {
    pub fn matches(&self, item: &InventoryItem) -> bool {
        let eq = |filter: &Option<String>, value: &str| {
            filter
                .as_deref()
                .filter(|f| !f.is_empty())
                .map_or(true, |f| f == value)
        };
        if !eq(&self.category_id, &item.category_id)
            || !eq(&self.office_id, &item.office_id)
            || !eq(&self.status_id, &item.status_id)
        {
            return false;
        }
        match self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            None => true,
            Some(q) => {
                let q = q.to_lowercase();
                item.item_name.to_lowercase().contains(&q)
                    || item
                        .serial_number
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&q))
                    || item.phone_number.as_deref().is_some_and(|p| p.contains(&q))
            }
        }
    }
}

/// Строка списка склада: оборудование, сгруппированное по названию и категории
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryGroupRow {
    pub item_name: String,
    pub category_id: String,
    pub category_name: String,
    pub total: u32,
    pub available: u32,
    pub in_use: u32,
}

impl InventoryGroupRow {
    /// Группировка; порядок строк: порядок категории, затем название
    pub fn group(items: &[InventoryItem], config: &InventoryConfig) -> Vec<InventoryGroupRow> {
        let mut groups: BTreeMap<(String, String), InventoryGroupRow> = BTreeMap::new();
        for item in items {
            let row = groups
                .entry((item.category_id.clone(), item.item_name.clone()))
                .or_insert_with(|| InventoryGroupRow {
                    item_name: item.item_name.clone(),
                    category_id: item.category_id.clone(),
                    category_name: config.name_of(ConfigKind::Category, &item.category_id),
                    total: 0,
                    available: 0,
                    in_use: 0,
                });
            row.total += 1;
            if item.is_available() {
                row.available += 1;
            } else if item.assigned_to.is_some() {
                row.in_use += 1;
            }
        }

        let category_order = |id: &str| {
            config
                .categories
                .iter()
                .find(|c| c.id == id)
                .map_or(u32::MAX, |c| c.order)
        };
        let mut rows: Vec<InventoryGroupRow> = groups.into_values().collect();
        rows.sort_by(|a, b| {
            category_order(&a.category_id)
                .cmp(&category_order(&b.category_id))
                .then_with(|| a.item_name.cmp(&b.item_name))
        });
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_inventory_config::aggregate::{CATEGORY_COMPUTER, STATUS_IN_USE};

    fn dto() -> CreateInventoryItemDto {
        CreateInventoryItemDto {
            item_name: "Dell Latitude 5420".into(),
            category_id: CATEGORY_COMPUTER.into(),
            quantity: 1,
            office_id: "office-hq".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_requires_name_and_category() {
        let config = InventoryConfig::seeded(Utc::now());
        assert!(dto().validate(&config).is_ok());

        let mut d = dto();
        d.item_name = " ".into();
        assert!(d.validate(&config).is_err());

        let mut d = dto();
        d.category_id = "cat_unknown".into();
        assert!(d.validate(&config).is_err());
    }

    #[test]
    fn test_serial_number_forces_single_quantity() {
        let config = InventoryConfig::seeded(Utc::now());
        let mut d = dto();
        d.serial_number = Some("SN-001".into());
        d.quantity = 3;
        assert!(d.validate(&config).is_err());
        d.quantity = 1;
        assert!(d.validate(&config).is_ok());
    }

    #[test]
    fn test_sim_card_requires_ten_digit_phone() {
        let config = InventoryConfig::seeded(Utc::now());
        let mut d = dto();
        d.category_id = CATEGORY_SIM_CARD.into();
        assert!(d.validate(&config).is_err());
        d.phone_number = Some("08123".into());
        assert!(d.validate(&config).is_err());
        d.phone_number = Some("0812345678".into());
        assert!(d.validate(&config).is_ok());
    }

    #[test]
    fn test_into_items_expands_quantity_with_defaults() {
        let mut d = dto();
        d.quantity = 3;
        d.notes = Some("  ".into());
        let items = d.into_items(Utc::now());
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.status_id == STATUS_AVAILABLE));
        assert!(items.iter().all(|i| i.condition_id == CONDITION_WORKING));
        assert!(items.iter().all(|i| i.notes.is_none()));
        assert_ne!(items[0].id, items[1].id);
    }

    #[test]
    fn test_filter_and_group() {
        let now = Utc::now();
        let config = InventoryConfig::seeded(now);
        let mut items = dto().into_items(now);
        let mut second = dto();
        second.quantity = 2;
        items.extend(second.into_items(now));
        items[0].status_id = STATUS_IN_USE.into();
        items[0].assigned_to = Some("somchai".into());

        let filter = InventoryFilter {
            search: Some("latitude".into()),
            ..Default::default()
        };
        assert!(items.iter().all(|i| filter.matches(i)));
        let filter = InventoryFilter {
            office_id: Some("office-branch".into()),
            ..Default::default()
        };
        assert!(!filter.matches(&items[0]));

        let rows = InventoryGroupRow::group(&items, &config);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total, 3);
        assert_eq!(rows[0].available, 2);
        assert_eq!(rows[0].in_use, 1);
        assert_eq!(rows[0].category_name, "คอมพิวเตอร์");
    }
}
