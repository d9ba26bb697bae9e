use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::ordering::{is_dense, OrderedEntry};
use crate::domain::common::{new_id, EntityMetadata};

// ============================================================================
// Системные идентификаторы (записи, которые нельзя удалить)
// ============================================================================

pub const STATUS_AVAILABLE: &str = "status_available";
pub const STATUS_IN_USE: &str = "status_in_use";
pub const STATUS_LOST: &str = "status_lost";

pub const CONDITION_WORKING: &str = "cond_working";
pub const CONDITION_DAMAGED: &str = "cond_damaged";

pub const CATEGORY_COMPUTER: &str = "cat_computer";
pub const CATEGORY_NOTEBOOK: &str = "cat_notebook";
pub const CATEGORY_SIM_CARD: &str = "cat_sim_card";
pub const CATEGORY_PERIPHERAL: &str = "cat_peripheral";
pub const CATEGORY_OTHER: &str = "cat_other";

/// Вид справочника настроек склада
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigKind {
    Category,
    Status,
    Condition,
}

impl ConfigKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKind::Category => "category",
            ConfigKind::Status => "status",
            ConfigKind::Condition => "condition",
        }
    }

    /// Название для UI
    pub fn display_name(&self) -> &'static str {
        match self {
            ConfigKind::Category => "หมวดหมู่อุปกรณ์",
            ConfigKind::Status => "สถานะอุปกรณ์",
            ConfigKind::Condition => "สภาพอุปกรณ์",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "category" | "categories" => Some(ConfigKind::Category),
            "status" | "statuses" => Some(ConfigKind::Status),
            "condition" | "conditions" => Some(ConfigKind::Condition),
            _ => None,
        }
    }

    pub fn all() -> [ConfigKind; 3] {
        [ConfigKind::Category, ConfigKind::Status, ConfigKind::Condition]
    }
}

/// Запись справочника (категория / статус / состояние)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEntry {
    pub id: String,
    pub name: String,
    /// Позиция в списке, плотная нумерация 1..N
    pub order: u32,
    #[serde(default, alias = "isSystemCategory")]
    pub is_system_config: bool,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl ConfigEntry {
    /// Новая пользовательская запись; `order` выставляет вызывающий код
    pub fn new(name: impl Into<String>, order: u32, now: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            order,
            is_system_config: false,
            metadata: EntityMetadata::new(now),
        }
    }

    /// Системная запись с фиксированным id
    pub fn system(id: &str, name: &str, order: u32, now: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            order,
            is_system_config: true,
            metadata: EntityMetadata::new(now),
        }
    }
}

impl OrderedEntry for ConfigEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }

    fn is_system(&self) -> bool {
        self.is_system_config
    }

    fn rename(&mut self, name: String) {
        self.name = name;
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.metadata.touch(now);
    }
}

/// DTO для добавления записи в справочник
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewConfigEntryDto {
    pub name: String,
}

/// Все справочники склада (ответ GET /api/admin/inventory-config)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryConfig {
    pub categories: Vec<ConfigEntry>,
    pub statuses: Vec<ConfigEntry>,
    pub conditions: Vec<ConfigEntry>,
}

impl InventoryConfig {
    pub fn entries(&self, kind: ConfigKind) -> &[ConfigEntry] {
        match kind {
            ConfigKind::Category => &self.categories,
            ConfigKind::Status => &self.statuses,
            ConfigKind::Condition => &self.conditions,
        }
    }

    pub fn entries_mut(&mut self, kind: ConfigKind) -> &mut Vec<ConfigEntry> {
        match kind {
            ConfigKind::Category => &mut self.categories,
            ConfigKind::Status => &mut self.statuses,
            ConfigKind::Condition => &mut self.conditions,
        }
    }

    /// Название записи по id, либо сам id если запись не найдена
    pub fn name_of(&self, kind: ConfigKind, id: &str) -> String {
        self.entries(kind)
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn contains(&self, kind: ConfigKind, id: &str) -> bool {
        self.entries(kind).iter().any(|e| e.id == id)
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        for kind in ConfigKind::all() {
            validate_entries(kind, self.entries(kind))?;
        }
        Ok(())
    }

    /// Системные записи, с которыми стартует приложение
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self {
            categories: vec![
                ConfigEntry::system(CATEGORY_COMPUTER, "คอมพิวเตอร์", 1, now),
                ConfigEntry::system(CATEGORY_NOTEBOOK, "โน้ตบุ๊ก", 2, now),
                ConfigEntry::system(CATEGORY_SIM_CARD, "ซิมการ์ด", 3, now),
                ConfigEntry::system(CATEGORY_PERIPHERAL, "อุปกรณ์ต่อพ่วง", 4, now),
                ConfigEntry::system(CATEGORY_OTHER, "อื่นๆ", 5, now),
            ],
            statuses: vec![
                ConfigEntry::system(STATUS_AVAILABLE, "พร้อมใช้งาน", 1, now),
                ConfigEntry::system(STATUS_IN_USE, "ถูกเบิก", 2, now),
                ConfigEntry::system(STATUS_LOST, "สูญหาย", 3, now),
            ],
            conditions: vec![
                ConfigEntry::system(CONDITION_WORKING, "ใช้งานได้", 1, now),
                ConfigEntry::system(CONDITION_DAMAGED, "ชำรุด", 2, now),
            ],
        }
    }
}

/// Проверка одного справочника: непустые имена, уникальные id, плотный order
pub fn validate_entries(kind: ConfigKind, entries: &[ConfigEntry]) -> Result<(), String> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for entry in entries {
        if entry.name.trim().is_empty() {
            return Err(format!("{}: ชื่อต้องไม่เป็นค่าว่าง", kind.display_name()));
        }
        if !ids.insert(entry.id.as_str()) {
            return Err(format!("{}: รหัสซ้ำ {}", kind.display_name(), entry.id));
        }
        if !names.insert(entry.name.trim().to_lowercase()) {
            return Err(format!("{}: ชื่อซ้ำ \"{}\"", kind.display_name(), entry.name));
        }
    }
    if !is_dense(entries) {
        return Err(format!(
            "{}: ลำดับต้องต่อเนื่องตั้งแต่ 1 ถึง {}",
            kind.display_name(),
            entries.len()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_config_is_valid() {
        let config = InventoryConfig::seeded(Utc::now());
        assert!(config.validate().is_ok());
        assert!(config.statuses.iter().all(|e| e.is_system_config));
    }

    #[test]
    fn test_validate_rejects_gap_in_order() {
        let now = Utc::now();
        let mut config = InventoryConfig::seeded(now);
        config.conditions[1].order = 5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let now = Utc::now();
        let mut config = InventoryConfig::seeded(now);
        config.categories.push(ConfigEntry::new(" คอมพิวเตอร์ ", 6, now));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_entry_accepts_legacy_system_flag() {
        let json = r#"{
            "id": "c1",
            "name": "เครื่องพิมพ์",
            "order": 1,
            "isSystemCategory": true,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;
        let entry: ConfigEntry = serde_json::from_str(json).unwrap();
        assert!(entry.is_system_config);
        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["isSystemConfig"], true);
        assert_eq!(back["createdAt"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(ConfigKind::parse("statuses"), Some(ConfigKind::Status));
        assert_eq!(ConfigKind::parse("condition"), Some(ConfigKind::Condition));
        assert_eq!(ConfigKind::parse("office"), None);
    }
}
