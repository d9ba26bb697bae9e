//! Сервисные операции администратора: починка данных и массовое
//! переименование оборудования.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixSummary {
    pub checked: u32,
    pub fixed: u32,
    pub unresolved: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixDetail {
    pub record_id: String,
    pub description: String,
    pub fixed: bool,
}

/// Результат POST /api/admin/fix-*
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixReport {
    pub success: bool,
    pub message: String,
    pub summary: FixSummary,
    pub details: Vec<FixDetail>,
}

impl FixReport {
    pub fn from_details(details: Vec<FixDetail>, checked: u32) -> Self {
        let fixed = details.iter().filter(|d| d.fixed).count() as u32;
        let unresolved = details.len() as u32 - fixed;
        let message = if details.is_empty() {
            format!("ตรวจสอบ {} รายการ ไม่พบปัญหา", checked)
        } else {
            format!(
                "ตรวจสอบ {} รายการ แก้ไขแล้ว {} รายการ แก้ไขไม่ได้ {} รายการ",
                checked, fixed, unresolved
            )
        };
        Self {
            success: unresolved == 0,
            message,
            summary: FixSummary {
                checked,
                fixed,
                unresolved,
            },
            details,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenameAction {
    Preview,
    Rename,
    Rollback,
}

/// Текст, который админ должен набрать для подтверждения переименования
pub const RENAME_CONFIRMATION: &str = "RENAME";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameItemRequest {
    pub action: RenameAction,
    #[serde(default)]
    pub old_name: String,
    #[serde(default)]
    pub new_name: String,
    #[serde(default)]
    pub category_id: Option<String>,
    /// Для rollback
    #[serde(default)]
    pub backup_id: Option<String>,
}

impl RenameItemRequest {
    pub fn validate(&self) -> Result<(), String> {
        match self.action {
            RenameAction::Rollback => {
                if self.backup_id.as_deref().map_or(true, |b| b.trim().is_empty()) {
                    return Err("กรุณาระบุรหัสสำรองข้อมูล".into());
                }
            }
            RenameAction::Preview | RenameAction::Rename => {
                let old = self.old_name.trim();
                let new = self.new_name.trim();
                if old.is_empty() || new.is_empty() {
                    return Err("กรุณาระบุชื่อเดิมและชื่อใหม่".into());
                }
                if old == new {
                    return Err("ชื่อใหม่ต้องไม่ซ้ำกับชื่อเดิม".into());
                }
            }
        }
        Ok(())
    }
}

/// Количество затронутых записей в одной коллекции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCount {
    pub collection: String,
    pub before: u32,
    pub after: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameItemResult {
    pub action: RenameAction,
    pub old_name: String,
    pub new_name: String,
    pub collections: Vec<CollectionCount>,
    pub backup_id: Option<String>,
}

impl RenameItemResult {
    pub fn total_affected(&self) -> u32 {
        self.collections.iter().map(|c| c.before).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_report_summary() {
        let report = FixReport::from_details(
            vec![
                FixDetail {
                    record_id: "r1".into(),
                    description: "x".into(),
                    fixed: true,
                },
                FixDetail {
                    record_id: "r2".into(),
                    description: "y".into(),
                    fixed: false,
                },
            ],
            10,
        );
        assert!(!report.success);
        assert_eq!(
            report.summary,
            FixSummary {
                checked: 10,
                fixed: 1,
                unresolved: 1
            }
        );

        let clean = FixReport::from_details(Vec::new(), 4);
        assert!(clean.success);
        assert_eq!(clean.summary.checked, 4);
    }

    #[test]
    fn test_rename_request_validation() {
        let mut req = RenameItemRequest {
            action: RenameAction::Preview,
            old_name: "Mouse".into(),
            new_name: "Mouse".into(),
            category_id: None,
            backup_id: None,
        };
        assert!(req.validate().is_err());
        req.new_name = "เมาส์".into();
        assert!(req.validate().is_ok());
        req.action = RenameAction::Rollback;
        assert!(req.validate().is_err());
    }
}
