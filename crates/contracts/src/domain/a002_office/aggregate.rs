use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{new_id, EntityMetadata};

pub const MAX_OFFICE_NAME_LEN: usize = 100;

/// Офис / филиал
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Office {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Офис по умолчанию удалить нельзя
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

fn default_true() -> bool {
    true
}

impl Office {
    pub fn new_for_insert(dto: &OfficeDto, now: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            name: dto.name.trim().to_string(),
            description: normalize(dto.description.as_deref()),
            is_default: false,
            is_active: dto.is_active.unwrap_or(true),
            metadata: EntityMetadata::new(now),
        }
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &OfficeDto, now: DateTime<Utc>) {
        self.name = dto.name.trim().to_string();
        self.description = normalize(dto.description.as_deref());
        if let Some(active) = dto.is_active {
            self.is_active = active;
        }
        self.metadata.touch(now);
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// DTO для создания/обновления офиса
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeDto {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl OfficeDto {
    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("กรุณาระบุชื่อสาขา".into());
        }
        if name.chars().count() > MAX_OFFICE_NAME_LEN {
            return Err(format!(
                "ชื่อสาขาต้องไม่เกิน {} ตัวอักษร",
                MAX_OFFICE_NAME_LEN
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        let mut dto = OfficeDto {
            name: "  ".into(),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
        dto.name = "สาขาเชียงใหม่".into();
        assert!(dto.validate().is_ok());
        dto.name = "ก".repeat(101);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_new_office_trims_fields() {
        let dto = OfficeDto {
            name: " สำนักงานใหญ่ ".into(),
            description: Some("   ".into()),
            ..Default::default()
        };
        let office = Office::new_for_insert(&dto, Utc::now());
        assert_eq!(office.name, "สำนักงานใหญ่");
        assert_eq!(office.description, None);
        assert!(office.is_active);
        assert!(!office.is_default);
    }
}
