use chrono::Utc;
use contracts::domain::a001_inventory_config::aggregate::{
    CONDITION_WORKING, STATUS_AVAILABLE, STATUS_IN_USE,
};
use contracts::domain::a003_inventory_item::{InventoryItem, OwnershipType};
use contracts::domain::a004_equipment_request::{
    CreateEquipmentRequestDto, EquipmentRequest, RequestKind, RequestStatus,
    UpdateRequestStatusDto,
};
use std::collections::HashSet;

use super::repository;
use crate::domain::a002_office::repository as office_repository;
use crate::shared::api_error::ApiError;
use crate::shared::data::MockStore;

/// Заявка на выдачу остаётся в Pending. Возврат обрабатывается сразу:
/// оборудование возвращается на склад с указанным состоянием.
pub async fn create(
    store: &MockStore,
    dto: CreateEquipmentRequestDto,
) -> anyhow::Result<EquipmentRequest> {
    dto.validate().map_err(ApiError::Validation)?;
    if office_repository::get_by_id(store, &dto.office_id)
        .await?
        .is_none()
    {
        return Err(ApiError::Validation("ไม่พบสาขาที่เลือก".into()).into());
    }

    let request = EquipmentRequest::new_for_insert(dto, Utc::now());
    let request = if request.kind == RequestKind::Return {
        repository::insert_with_items(store, request, |request, items| {
            let returned = return_items(items, request)?;
            request.status = RequestStatus::Completed;
            request.processed_by = Some("system".into());
            tracing::info!(
                "Return {}: {} item(s) back to stock",
                request.id,
                returned.len()
            );
            Ok(returned)
        })
        .await?
    } else {
        repository::insert(store, &request).await?;
        request
    };

    tracing::info!(
        "Equipment {} created: {} ({} pcs)",
        request.kind.display_name(),
        request.id,
        request.total_quantity()
    );
    Ok(request)
}

/// Проверка строк возврата и подготовка обновлённых записей склада
fn return_items(
    items: &[InventoryItem],
    request: &EquipmentRequest,
) -> anyhow::Result<Vec<InventoryItem>> {
    let now = Utc::now();
    let mut seen = HashSet::new();
    let mut returned = Vec::with_capacity(request.lines.len());

    for (pos, line) in request.lines.iter().enumerate() {
        let item_id = line.item_id.as_deref().unwrap_or_default();
        if !seen.insert(item_id.to_string()) {
            return Err(ApiError::Validation(format!(
                "รายการที่ {}: เลือกอุปกรณ์ซ้ำ",
                pos + 1
            ))
            .into());
        }
        let mut item = items
            .iter()
            .find(|i| i.id == item_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("รายการที่ {}: ไม่พบอุปกรณ์", pos + 1)))?;
        if item.is_available() {
            return Err(ApiError::Conflict(format!(
                "รายการที่ {}: อุปกรณ์ \"{}\" อยู่ในคลังแล้ว",
                pos + 1,
                item.item_name
            ))
            .into());
        }
        item.status_id = STATUS_AVAILABLE.to_string();
        item.condition_id = line
            .condition_id
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| CONDITION_WORKING.to_string());
        item.assigned_to = None;
        item.office_id = request.office_id.clone();
        item.metadata.touch(now);
        returned.push(item);
    }
    Ok(returned)
}

/// Заявки, новые сверху; `kind = None` означает все
pub async fn list(
    store: &MockStore,
    kind: Option<RequestKind>,
) -> anyhow::Result<Vec<EquipmentRequest>> {
    let mut requests: Vec<EquipmentRequest> = repository::list_all(store)
        .await?
        .into_iter()
        .filter(|r| kind.map_or(true, |k| r.kind == k))
        .collect();
    requests.sort_by(|a, b| b.metadata.created_at.cmp(&a.metadata.created_at));
    Ok(requests)
}

pub async fn update_status(
    store: &MockStore,
    id: &str,
    dto: UpdateRequestStatusDto,
    processed_by: Option<String>,
) -> anyhow::Result<EquipmentRequest> {
    repository::update_with_items(store, id, |request, items| {
        if !request.status.can_transition_to(dto.status) {
            return Err(ApiError::Conflict(format!(
                "ไม่สามารถเปลี่ยนสถานะจาก \"{}\" เป็น \"{}\"",
                request.status.display_name(),
                dto.status.display_name()
            ))
            .into());
        }

        let mut assigned = Vec::new();
        if request.kind == RequestKind::Request && dto.status == RequestStatus::Completed {
            assigned = assign_items(items, request)?;
            tracing::info!("Request {}: assigned {} item(s)", request.id, assigned.len());
        }

        request.status = dto.status;
        if let Some(notes) = dto.notes.filter(|n| !n.trim().is_empty()) {
            request.notes = Some(notes);
        }
        if processed_by.is_some() {
            request.processed_by = processed_by;
        }
        request.metadata.touch(Utc::now());
        Ok(assigned)
    })
    .await?
    .ok_or_else(|| ApiError::NotFound("ไม่พบคำขอ".into()).into())
}

/// Подбор свободного оборудования под строки заявки.
/// Конкретная единица берётся по `item_id`, иначе любые свободные по
/// названию и категории, в первую очередь из офиса заявителя.
fn assign_items(
    items: &[InventoryItem],
    request: &EquipmentRequest,
) -> anyhow::Result<Vec<InventoryItem>> {
    let now = Utc::now();
    let mut stock: Vec<InventoryItem> = items
        .iter()
        .filter(|i| i.is_available() && i.ownership == OwnershipType::Company)
        .cloned()
        .collect();
    stock.sort_by_key(|i| i.office_id != request.office_id);

    let mut assigned: Vec<InventoryItem> = Vec::new();
    for (pos, line) in request.lines.iter().enumerate() {
        // пустой item_id означает "любая свободная единица"
        let item_id = line.item_id.as_deref().map(str::trim).filter(|id| !id.is_empty());
        let (picked, wanted): (Vec<usize>, usize) = match item_id {
            Some(item_id) => (
                stock.iter().position(|i| i.id == item_id).into_iter().collect(),
                1,
            ),
            None => (
                stock
                    .iter()
                    .enumerate()
                    .filter(|(_, i)| {
                        i.item_name == line.item_name && i.category_id == line.category_id
                    })
                    .map(|(idx, _)| idx)
                    .take(line.quantity as usize)
                    .collect(),
                line.quantity as usize,
            ),
        };
        if picked.len() < wanted {
            return Err(ApiError::Conflict(format!(
                "รายการที่ {}: \"{}\" มีในคลังไม่เพียงพอ (ต้องการ {}, มี {})",
                pos + 1,
                line.item_name,
                wanted,
                picked.len()
            ))
            .into());
        }
        // удаляем с конца, чтобы индексы не съезжали
        for idx in picked.into_iter().rev() {
            let mut item = stock.remove(idx);
            item.status_id = STATUS_IN_USE.to_string();
            item.assigned_to = Some(request.requester_name.clone());
            item.metadata.touch(now);
            assigned.push(item);
        }
    }
    Ok(assigned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_inventory_item::repository as items_repository;
    use crate::shared::data::seed::{OFFICE_BANGNA, OFFICE_HQ};
    use contracts::domain::a001_inventory_config::aggregate::{
        CATEGORY_PERIPHERAL, CONDITION_DAMAGED,
    };
    use contracts::domain::a004_equipment_request::RequestLine;

    fn mouse_request(quantity: u32) -> CreateEquipmentRequestDto {
        CreateEquipmentRequestDto {
            requester_name: "ปิติ ยินดี".into(),
            phone: "0811111111".into(),
            office_id: OFFICE_BANGNA.into(),
            lines: vec![RequestLine {
                item_name: "เมาส์ Logitech M90".into(),
                category_id: CATEGORY_PERIPHERAL.into(),
                quantity,
                ..Default::default()
            }],
            ..CreateEquipmentRequestDto::empty(RequestKind::Request)
        }
    }

    fn status(status: RequestStatus) -> UpdateRequestStatusDto {
        UpdateRequestStatusDto {
            status,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_request_lifecycle_assigns_items() {
        let store = MockStore::seeded(Utc::now());
        let request = create(&store, mouse_request(3)).await.unwrap();
        assert_eq!(request.status, RequestStatus::Pending);

        update_status(&store, &request.id, status(RequestStatus::Approved), Some("admin".into()))
            .await
            .unwrap();
        let done = update_status(&store, &request.id, status(RequestStatus::Completed), None)
            .await
            .unwrap();
        assert_eq!(done.status, RequestStatus::Completed);
        assert_eq!(done.processed_by.as_deref(), Some("admin"));

        let items = items_repository::list_all(&store).await.unwrap();
        let assigned: Vec<_> = items
            .iter()
            .filter(|i| i.assigned_to.as_deref() == Some("ปิติ ยินดี"))
            .collect();
        assert_eq!(assigned.len(), 3);
        // сначала берутся мыши из офиса заявителя
        assert_eq!(
            assigned.iter().filter(|i| i.office_id == OFFICE_BANGNA).count(),
            2
        );
    }

    #[tokio::test]
    async fn test_invalid_transition_rejected() {
        let store = MockStore::seeded(Utc::now());
        let request = create(&store, mouse_request(1)).await.unwrap();
        let err = update_status(&store, &request.id, status(RequestStatus::Completed), None)
            .await
            .unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_insufficient_stock() {
        let store = MockStore::seeded(Utc::now());
        let request = create(&store, mouse_request(50)).await.unwrap();
        update_status(&store, &request.id, status(RequestStatus::Approved), None)
            .await
            .unwrap();
        let err = update_status(&store, &request.id, status(RequestStatus::Completed), None)
            .await
            .unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
        let still = repository::get_by_id(&store, &request.id).await.unwrap().unwrap();
        assert_eq!(still.status, RequestStatus::Approved);
    }

    #[tokio::test]
    async fn test_concurrent_completion_assigns_once() {
        let store = MockStore::seeded(Utc::now()).with_latency(10);
        let request = create(&store, mouse_request(2)).await.unwrap();
        update_status(&store, &request.id, status(RequestStatus::Approved), None)
            .await
            .unwrap();

        let (a, b) = tokio::join!(
            update_status(&store, &request.id, status(RequestStatus::Completed), None),
            update_status(&store, &request.id, status(RequestStatus::Completed), None),
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let err = a.err().or(b.err()).unwrap();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));

        let items = items_repository::list_all(&store).await.unwrap();
        let assigned = items
            .iter()
            .filter(|i| i.assigned_to.as_deref() == Some("ปิติ ยินดี"))
            .count();
        assert_eq!(assigned, 2);
    }

    #[tokio::test]
    async fn test_empty_item_id_counts_full_quantity() {
        let store = MockStore::seeded(Utc::now());
        let mut dto = mouse_request(50);
        dto.lines[0].item_id = Some(String::new());
        let request = create(&store, dto).await.unwrap();
        update_status(&store, &request.id, status(RequestStatus::Approved), None)
            .await
            .unwrap();

        let err = update_status(&store, &request.id, status(RequestStatus::Completed), None)
            .await
            .unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
        let items = items_repository::list_all(&store).await.unwrap();
        assert!(items
            .iter()
            .all(|i| i.assigned_to.as_deref() != Some("ปิติ ยินดี")));
    }

    #[tokio::test]
    async fn test_update_status_unknown_request() {
        let store = MockStore::seeded(Utc::now());
        let err = update_status(&store, "req-missing", status(RequestStatus::Approved), None)
            .await
            .unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_return_puts_item_back_with_condition() {
        let store = MockStore::seeded(Utc::now());
        let lent = items_repository::list_all(&store)
            .await
            .unwrap()
            .into_iter()
            .find(|i| i.serial_number.as_deref() == Some("5CG1234ABD"))
            .unwrap();

        let dto = CreateEquipmentRequestDto {
            requester_name: "สมชาย ใจดี".into(),
            phone: "0812345678".into(),
            office_id: OFFICE_HQ.into(),
            lines: vec![RequestLine {
                item_name: lent.item_name.clone(),
                category_id: lent.category_id.clone(),
                quantity: 1,
                item_id: Some(lent.id.clone()),
                serial_number: lent.serial_number.clone(),
                condition_id: Some(CONDITION_DAMAGED.into()),
            }],
            ..CreateEquipmentRequestDto::empty(RequestKind::Return)
        };
        let ret = create(&store, dto.clone()).await.unwrap();
        assert_eq!(ret.status, RequestStatus::Completed);

        let item = items_repository::get_by_id(&store, &lent.id).await.unwrap().unwrap();
        assert_eq!(item.status_id, STATUS_AVAILABLE);
        assert_eq!(item.condition_id, CONDITION_DAMAGED);
        assert!(item.assigned_to.is_none());

        // повторный возврат той же единицы
        let err = create(&store, dto).await.unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_filters_by_kind() {
        let store = MockStore::seeded(Utc::now());
        let returns = list(&store, Some(RequestKind::Return)).await.unwrap();
        assert!(returns.is_empty());
        let all = list(&store, None).await.unwrap();
        assert_eq!(all.len(), 1);
    }
}
