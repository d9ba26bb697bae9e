//! Демо-данные: три филиала, склад, несколько заявок и пользователи.

use chrono::{DateTime, Duration, Utc};
use contracts::domain::a001_inventory_config::aggregate::{
    CATEGORY_COMPUTER, CATEGORY_NOTEBOOK, CATEGORY_PERIPHERAL, CATEGORY_SIM_CARD,
    CONDITION_DAMAGED, STATUS_IN_USE,
};
use contracts::domain::a001_inventory_config::InventoryConfig;
use contracts::domain::a002_office::Office;
use contracts::domain::a003_inventory_item::{CreateInventoryItemDto, InventoryItem, OwnershipType};
use contracts::domain::a004_equipment_request::{
    CreateEquipmentRequestDto, EquipmentRequest, RequestKind, RequestLine, Urgency,
};
use contracts::domain::a005_it_issue::{issue_number, CreateItIssueDto, IssueType, ItIssue};
use contracts::domain::common::EntityMetadata;
use contracts::system::users::{User, UserRole};

pub const OFFICE_HQ: &str = "office-hq";
pub const OFFICE_BANGNA: &str = "office-bangna";
pub const OFFICE_CHIANGMAI: &str = "office-chiangmai";

pub struct DemoData {
    pub config: InventoryConfig,
    pub offices: Vec<Office>,
    pub items: Vec<InventoryItem>,
    pub requests: Vec<EquipmentRequest>,
    pub issues: Vec<ItIssue>,
    pub users: Vec<User>,
}

pub fn demo_data(now: DateTime<Utc>) -> DemoData {
    DemoData {
        config: InventoryConfig::seeded(now),
        offices: offices(now),
        items: items(now),
        requests: requests(now),
        issues: issues(now),
        users: users(now),
    }
}

fn office(id: &str, name: &str, description: &str, is_default: bool, now: DateTime<Utc>) -> Office {
    Office {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        is_default,
        is_active: true,
        metadata: EntityMetadata::new(now),
    }
}

fn offices(now: DateTime<Utc>) -> Vec<Office> {
    vec![
        office(OFFICE_HQ, "สำนักงานใหญ่", "อาคารสำนักงานใหญ่ ชั้น 5", true, now),
        office(OFFICE_BANGNA, "สาขาบางนา", "ศูนย์กระจายสินค้าบางนา", false, now),
        office(OFFICE_CHIANGMAI, "สาขาเชียงใหม่", "สำนักงานภาคเหนือ", false, now),
    ]
}

fn stock(name: &str, category: &str, office: &str, quantity: u32) -> CreateInventoryItemDto {
    CreateInventoryItemDto {
        item_name: name.into(),
        category_id: category.into(),
        quantity,
        office_id: office.into(),
        ..Default::default()
    }
}

fn items(now: DateTime<Utc>) -> Vec<InventoryItem> {
    let batches = vec![
        stock("เมาส์ Logitech M90", CATEGORY_PERIPHERAL, OFFICE_HQ, 6),
        stock("คีย์บอร์ด Logitech K120", CATEGORY_PERIPHERAL, OFFICE_HQ, 4),
        stock("เมาส์ Logitech M90", CATEGORY_PERIPHERAL, OFFICE_BANGNA, 2),
        CreateInventoryItemDto {
            serial_number: Some("5CG1234ABC".into()),
            ..stock("Dell Latitude 5420", CATEGORY_NOTEBOOK, OFFICE_HQ, 1)
        },
        CreateInventoryItemDto {
            serial_number: Some("5CG1234ABD".into()),
            status_id: Some(STATUS_IN_USE.into()),
            assigned_to: Some("สมชาย ใจดี".into()),
            ..stock("Dell Latitude 5420", CATEGORY_NOTEBOOK, OFFICE_HQ, 1)
        },
        CreateInventoryItemDto {
            serial_number: Some("5CG1234ABE".into()),
            condition_id: Some(CONDITION_DAMAGED.into()),
            ..stock("Dell Latitude 5420", CATEGORY_NOTEBOOK, OFFICE_BANGNA, 1)
        },
        CreateInventoryItemDto {
            serial_number: Some("MJ0X9K2L".into()),
            ..stock("Lenovo ThinkCentre M70q", CATEGORY_COMPUTER, OFFICE_CHIANGMAI, 1)
        },
        CreateInventoryItemDto {
            serial_number: Some("C02FK1ZZ".into()),
            ownership: Some(OwnershipType::Personal),
            status_id: Some(STATUS_IN_USE.into()),
            assigned_to: Some("มานี มีนา".into()),
            notes: Some("เครื่องส่วนตัว ลงทะเบียนเพื่อใช้ VPN".into()),
            ..stock("MacBook Air M1", CATEGORY_NOTEBOOK, OFFICE_HQ, 1)
        },
        CreateInventoryItemDto {
            phone_number: Some("0812345678".into()),
            ..stock("ซิม AIS รายเดือน", CATEGORY_SIM_CARD, OFFICE_HQ, 1)
        },
        CreateInventoryItemDto {
            phone_number: Some("0898765432".into()),
            status_id: Some(STATUS_IN_USE.into()),
            assigned_to: Some("สมชาย ใจดี".into()),
            ..stock("ซิม AIS รายเดือน", CATEGORY_SIM_CARD, OFFICE_HQ, 1)
        },
    ];

    batches
        .into_iter()
        .enumerate()
        .flat_map(|(pos, dto)| dto.into_items(now - Duration::days(30 - pos as i64)))
        .collect()
}

fn requests(now: DateTime<Utc>) -> Vec<EquipmentRequest> {
    let pending = CreateEquipmentRequestDto {
        requester_name: "วิชัย สุขสันต์".into(),
        phone: "0861112233".into(),
        office_id: OFFICE_BANGNA.into(),
        department: Some("คลังสินค้า".into()),
        urgency: Urgency::VeryUrgent,
        lines: vec![RequestLine {
            item_name: "เมาส์ Logitech M90".into(),
            category_id: CATEGORY_PERIPHERAL.into(),
            quantity: 2,
            ..Default::default()
        }],
        ..CreateEquipmentRequestDto::empty(RequestKind::Request)
    };
    vec![EquipmentRequest::new_for_insert(pending, now - Duration::hours(5))]
}

fn issues(now: DateTime<Utc>) -> Vec<ItIssue> {
    let yesterday = now - Duration::days(1);
    let dto = CreateItIssueDto {
        reporter_name: "มานี มีนา".into(),
        phone: "0899999999".into(),
        office_id: OFFICE_HQ.into(),
        issue_type: IssueType::Printer,
        urgency: Urgency::Normal,
        description: "เครื่องพิมพ์ชั้น 5 พิมพ์ไม่ออก ขึ้นไฟสีส้ม".into(),
    };
    vec![ItIssue::new_for_insert(dto, issue_number(yesterday, 1), yesterday)]
}

fn user(id: &str, username: &str, full_name: &str, role: UserRole, now: DateTime<Utc>) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        full_name: Some(full_name.to_string()),
        email: Some(format!("{}@example.co.th", username)),
        role,
        is_active: true,
        last_login_at: None,
        metadata: EntityMetadata::new(now),
    }
}

fn users(now: DateTime<Utc>) -> Vec<User> {
    vec![
        user("user-admin", "admin", "ผู้ดูแลระบบ", UserRole::Admin, now),
        user("user-somchai", "somchai", "สมชาย ใจดี", UserRole::User, now),
        user("user-manee", "manee", "มานี มีนา", UserRole::User, now),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_data_is_consistent() {
        let data = demo_data(Utc::now());
        assert!(data.config.validate().is_ok());
        for item in &data.items {
            assert!(data.offices.iter().any(|o| o.id == item.office_id));
        }
        assert!(data.requests.iter().all(|r| !r.lines.is_empty()));
        assert_eq!(data.offices.iter().filter(|o| o.is_default).count(), 1);
        assert!(data.users.iter().any(|u| u.is_admin()));
    }
}
