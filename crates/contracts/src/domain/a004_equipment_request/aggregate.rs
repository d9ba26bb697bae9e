use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::{new_id, EntityMetadata};
use crate::shared::validation::{is_valid_thai_phone, required};

/// Заявка на выдачу (เบิก) или возврат (คืน) оборудования
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Request,
    Return,
}

impl RequestKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            RequestKind::Request => "เบิกอุปกรณ์",
            RequestKind::Return => "คืนอุปกรณ์",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl RequestStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "รอดำเนินการ",
            RequestStatus::Approved => "อนุมัติแล้ว",
            RequestStatus::Rejected => "ไม่อนุมัติ",
            RequestStatus::Completed => "เสร็จสิ้น",
        }
    }

    /// Pending → Approved | Rejected, Approved → Completed
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Pending, RequestStatus::Approved)
                | (RequestStatus::Pending, RequestStatus::Rejected)
                | (RequestStatus::Approved, RequestStatus::Completed)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[default]
    Normal,
    VeryUrgent,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Normal => "normal",
            Urgency::VeryUrgent => "very_urgent",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Urgency::Normal => "ปกติ",
            Urgency::VeryUrgent => "ด่วนมาก",
        }
    }

    pub fn parse(value: &str) -> Option<Urgency> {
        Self::all().into_iter().find(|u| u.as_str() == value)
    }

    pub fn all() -> [Urgency; 2] {
        [Urgency::Normal, Urgency::VeryUrgent]
    }
}

/// Строка заявки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RequestLine {
    pub item_name: String,
    pub category_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Для возврата и для выдачи конкретной единицы
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    /// Состояние при возврате
    #[serde(default)]
    pub condition_id: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRequest {
    pub id: String,
    pub kind: RequestKind,
    pub requester_name: String,
    pub phone: String,
    pub office_id: String,
    #[serde(default)]
    pub department: Option<String>,
    pub urgency: Urgency,
    #[serde(default)]
    pub delivery_location: Option<String>,
    pub lines: Vec<RequestLine>,
    pub status: RequestStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub processed_by: Option<String>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl EquipmentRequest {
    pub fn new_for_insert(dto: CreateEquipmentRequestDto, now: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            kind: dto.kind,
            requester_name: dto.requester_name.trim().to_string(),
            phone: dto.phone.trim().to_string(),
            office_id: dto.office_id,
            department: dto.department.filter(|d| !d.trim().is_empty()),
            urgency: dto.urgency,
            delivery_location: dto.delivery_location.filter(|d| !d.trim().is_empty()),
            lines: dto.lines,
            status: RequestStatus::Pending,
            notes: dto.notes.filter(|n| !n.trim().is_empty()),
            processed_by: None,
            metadata: EntityMetadata::new(now),
        }
    }

    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// DTO форм "เบิกอุปกรณ์" / "คืนอุปกรณ์"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentRequestDto {
    pub kind: RequestKind,
    pub requester_name: String,
    pub phone: String,
    pub office_id: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub delivery_location: Option<String>,
    pub lines: Vec<RequestLine>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreateEquipmentRequestDto {
    pub fn empty(kind: RequestKind) -> Self {
        Self {
            kind,
            requester_name: String::new(),
            phone: String::new(),
            office_id: String::new(),
            department: None,
            urgency: Urgency::Normal,
            delivery_location: None,
            lines: Vec::new(),
            notes: None,
        }
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        required("ชื่อผู้ขอ", &self.requester_name)?;
        if !is_valid_thai_phone(&self.phone) {
            return Err("เบอร์โทรศัพท์ต้องเป็นตัวเลข 10 หลัก".into());
        }
        required("สาขา", &self.office_id)?;
        if self.lines.is_empty() {
            return Err("กรุณาเพิ่มรายการอุปกรณ์อย่างน้อย 1 รายการ".into());
        }
        for (pos, line) in self.lines.iter().enumerate() {
            let n = pos + 1;
            if line.item_name.trim().is_empty() {
                return Err(format!("รายการที่ {}: กรุณาระบุชื่ออุปกรณ์", n));
            }
            if line.quantity == 0 {
                return Err(format!("รายการที่ {}: จำนวนต้องมากกว่า 0", n));
            }
            if self.kind == RequestKind::Return {
                if line.item_id.as_deref().map_or(true, |id| id.trim().is_empty()) {
                    return Err(format!("รายการที่ {}: กรุณาเลือกอุปกรณ์ที่ต้องการคืน", n));
                }
                if line.quantity != 1 {
                    return Err(format!("รายการที่ {}: คืนได้ครั้งละ 1 ชิ้นต่อรายการ", n));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestStatusDto {
    pub status: RequestStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateEquipmentRequestDto {
        CreateEquipmentRequestDto {
            requester_name: "สมชาย ใจดี".into(),
            phone: "0812345678".into(),
            office_id: "office-hq".into(),
            lines: vec![RequestLine {
                item_name: "เมาส์".into(),
                category_id: "cat_peripheral".into(),
                quantity: 2,
                ..Default::default()
            }],
            ..CreateEquipmentRequestDto::empty(RequestKind::Request)
        }
    }

    #[test]
    fn test_request_validation() {
        assert!(request().validate().is_ok());

        let mut dto = request();
        dto.phone = "081234567".into();
        assert!(dto.validate().is_err());

        let mut dto = request();
        dto.lines.clear();
        assert!(dto.validate().is_err());

        let mut dto = request();
        dto.lines[0].quantity = 0;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_return_lines_need_item_id() {
        let mut dto = request();
        dto.kind = RequestKind::Return;
        dto.lines[0].quantity = 1;
        assert!(dto.validate().is_err());
        dto.lines[0].item_id = Some("item-1".into());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_status_transitions() {
        use RequestStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!Completed.can_transition_to(Pending));
    }

    #[test]
    fn test_urgency_parse_matches_serde_names() {
        for u in Urgency::all() {
            let json = serde_json::to_string(&u).unwrap();
            assert_eq!(json, format!("\"{}\"", u.as_str()));
            assert_eq!(Urgency::parse(u.as_str()), Some(u));
        }
        assert_eq!(Urgency::parse("urgent"), None);
    }

    #[test]
    fn test_new_request_is_pending() {
        let req = EquipmentRequest::new_for_insert(request(), Utc::now());
        assert_eq!(req.status, RequestStatus::Pending);
        assert_eq!(req.total_quantity(), 2);
        assert_eq!(req.department, None);
    }
}
