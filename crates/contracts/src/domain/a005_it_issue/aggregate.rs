use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a004_equipment_request::Urgency;
use crate::domain::common::{new_id, EntityMetadata};
use crate::shared::validation::{is_valid_thai_phone, required};

pub const MAX_DESCRIPTION_LEN: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Pending,
    InProgress,
    Completed,
    Closed,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Pending => "pending",
            IssueStatus::InProgress => "in_progress",
            IssueStatus::Completed => "completed",
            IssueStatus::Closed => "closed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            IssueStatus::Pending => "รอดำเนินการ",
            IssueStatus::InProgress => "กำลังดำเนินการ",
            IssueStatus::Completed => "ดำเนินการเสร็จ",
            IssueStatus::Closed => "ปิดงาน",
        }
    }

    /// Pending → InProgress → Completed → Closed; Completed может вернуться
    /// в работу, если пользователь не подтвердил решение
    pub fn can_transition_to(&self, next: IssueStatus) -> bool {
        matches!(
            (self, next),
            (IssueStatus::Pending, IssueStatus::InProgress)
                | (IssueStatus::InProgress, IssueStatus::Completed)
                | (IssueStatus::Completed, IssueStatus::Closed)
                | (IssueStatus::Completed, IssueStatus::InProgress)
        )
    }

    pub fn parse(value: &str) -> Option<IssueStatus> {
        Self::all().into_iter().find(|s| s.as_str() == value)
    }

    pub fn all() -> [IssueStatus; 4] {
        [
            IssueStatus::Pending,
            IssueStatus::InProgress,
            IssueStatus::Completed,
            IssueStatus::Closed,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Computer,
    Network,
    Printer,
    Software,
    Other,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Computer => "computer",
            IssueType::Network => "network",
            IssueType::Printer => "printer",
            IssueType::Software => "software",
            IssueType::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<IssueType> {
        Self::all().into_iter().find(|t| t.as_str() == value)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            IssueType::Computer => "คอมพิวเตอร์",
            IssueType::Network => "เครือข่าย/อินเทอร์เน็ต",
            IssueType::Printer => "เครื่องพิมพ์",
            IssueType::Software => "โปรแกรม",
            IssueType::Other => "อื่นๆ",
        }
    }

    pub fn all() -> [IssueType; 5] {
        [
            IssueType::Computer,
            IssueType::Network,
            IssueType::Printer,
            IssueType::Software,
            IssueType::Other,
        ]
    }
}

/// Заявка в IT (แจ้งงาน IT)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItIssue {
    pub id: String,
    /// IT-YYYYMMDD-NNN
    pub issue_no: String,
    pub reporter_name: String,
    pub phone: String,
    pub office_id: String,
    pub issue_type: IssueType,
    pub urgency: Urgency,
    pub description: String,
    pub status: IssueStatus,
    #[serde(default)]
    pub assigned_admin: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl ItIssue {
    pub fn new_for_insert(dto: CreateItIssueDto, issue_no: String, now: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            issue_no,
            reporter_name: dto.reporter_name.trim().to_string(),
            phone: dto.phone.trim().to_string(),
            office_id: dto.office_id,
            issue_type: dto.issue_type,
            urgency: dto.urgency,
            description: dto.description.trim().to_string(),
            status: IssueStatus::Pending,
            assigned_admin: None,
            notes: None,
            completed_at: None,
            metadata: EntityMetadata::new(now),
        }
    }

    /// Смена статуса с проверкой допустимости перехода
    pub fn transition(
        &mut self,
        next: IssueStatus,
        admin: Option<String>,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), String> {
        if !self.status.can_transition_to(next) {
            return Err(format!(
                "ไม่สามารถเปลี่ยนสถานะจาก \"{}\" เป็น \"{}\"",
                self.status.display_name(),
                next.display_name()
            ));
        }
        self.status = next;
        if admin.is_some() {
            self.assigned_admin = admin;
        }
        if let Some(notes) = notes.filter(|n| !n.trim().is_empty()) {
            self.notes = Some(notes);
        }
        self.completed_at = match next {
            IssueStatus::Completed => Some(now),
            IssueStatus::InProgress => None,
            _ => self.completed_at,
        };
        self.metadata.touch(now);
        Ok(())
    }
}

/// Номер заявки: префикс, дата и порядковый номер за день
pub fn issue_number(date: DateTime<Utc>, seq_of_day: u32) -> String {
    format!("IT-{}-{:03}", date.format("%Y%m%d"), seq_of_day)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItIssueDto {
    pub reporter_name: String,
    pub phone: String,
    pub office_id: String,
    pub issue_type: IssueType,
    #[serde(default)]
    pub urgency: Urgency,
    pub description: String,
}

impl CreateItIssueDto {
    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        required("ชื่อผู้แจ้ง", &self.reporter_name)?;
        if !is_valid_thai_phone(&self.phone) {
            return Err("เบอร์โทรศัพท์ต้องเป็นตัวเลข 10 หลัก".into());
        }
        required("สาขา", &self.office_id)?;
        required("รายละเอียดปัญหา", &self.description)?;
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(format!(
                "รายละเอียดต้องไม่เกิน {} ตัวอักษร",
                MAX_DESCRIPTION_LEN
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueStatusDto {
    pub status: IssueStatus,
    #[serde(default)]
    pub assigned_admin: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueFilter {
    #[serde(default)]
    pub status: Option<IssueStatus>,
    #[serde(default)]
    pub office_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dto() -> CreateItIssueDto {
        CreateItIssueDto {
            reporter_name: "มานี มีนา".into(),
            phone: "0899999999".into(),
            office_id: "office-hq".into(),
            issue_type: IssueType::Printer,
            urgency: Urgency::VeryUrgent,
            description: "เครื่องพิมพ์ชั้น 2 กระดาษติด".into(),
        }
    }

    #[test]
    fn test_issue_number_format() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        assert_eq!(issue_number(date, 7), "IT-20240305-007");
    }

    #[test]
    fn test_as_str_matches_serde_names() {
        for t in IssueType::all() {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
            assert_eq!(IssueType::parse(t.as_str()), Some(t));
        }
        for s in IssueStatus::all() {
            let json = serde_json::to_string(&s).unwrap();
            assert_eq!(json, format!("\"{}\"", s.as_str()));
            assert_eq!(IssueStatus::parse(s.as_str()), Some(s));
        }
    }

    #[test]
    fn test_validate() {
        assert!(dto().validate().is_ok());
        let mut d = dto();
        d.description = "  ".into();
        assert!(d.validate().is_err());
        let mut d = dto();
        d.phone = "02-123-4567".into();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_transition_flow() {
        let now = Utc::now();
        let mut issue = ItIssue::new_for_insert(dto(), "IT-1".into(), now);
        assert!(issue
            .transition(IssueStatus::Completed, None, None, now)
            .is_err());
        issue
            .transition(IssueStatus::InProgress, Some("admin".into()), None, now)
            .unwrap();
        assert_eq!(issue.assigned_admin.as_deref(), Some("admin"));
        issue
            .transition(IssueStatus::Completed, None, Some("เปลี่ยนลูกยาง".into()), now)
            .unwrap();
        assert_eq!(issue.completed_at, Some(now));
        issue
            .transition(IssueStatus::InProgress, None, None, now)
            .unwrap();
        assert_eq!(issue.completed_at, None);
        assert_eq!(issue.assigned_admin.as_deref(), Some("admin"));
        assert_eq!(issue.notes.as_deref(), Some("เปลี่ยนลูกยาง"));
    }
}
