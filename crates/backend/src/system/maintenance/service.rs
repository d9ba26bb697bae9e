//! Сервисные операции над данными склада.

use chrono::Utc;
use contracts::domain::a004_equipment_request::{RequestKind, RequestStatus};
use contracts::domain::common::new_id;
use contracts::system::maintenance::{
    CollectionCount, FixDetail, FixReport, RenameAction, RenameItemRequest, RenameItemResult,
};
use std::collections::HashMap;

use crate::shared::api_error::ApiError;
use crate::shared::data::{MockStore, RenameBackup};

const COLLECTION_ITEMS: &str = "inventoryItems";
const COLLECTION_REQUESTS: &str = "equipmentRequests";

/// Строки завершённых возвратов, чей `item_id` не указывает на запись склада.
/// Запись ищется по серийному номеру, затем по названию среди выданных
/// тому же сотруднику; если кандидат ровно один, ссылка исправляется.
pub async fn fix_return_id_mismatch(store: &MockStore) -> anyhow::Result<FixReport> {
    store.simulate_latency().await;
    let items = store.items.read().await.clone();
    let mut requests = store.requests.write().await;

    let mut checked = 0;
    let mut details = Vec::new();
    let now = Utc::now();

    for request in requests
        .iter_mut()
        .filter(|r| r.kind == RequestKind::Return && r.status == RequestStatus::Completed)
    {
        let requester = request.requester_name.clone();
        let mut touched = false;
        for (pos, line) in request.lines.iter_mut().enumerate() {
            checked += 1;
            let current = line.item_id.clone().unwrap_or_default();
            if items.iter().any(|i| i.id == current) {
                continue;
            }

            let by_serial: Vec<&str> = line
                .serial_number
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|serial| {
                    items
                        .iter()
                        .filter(|i| {
                            i.serial_number
                                .as_deref()
                                .is_some_and(|s| s.trim().eq_ignore_ascii_case(serial))
                        })
                        .map(|i| i.id.as_str())
                        .collect()
                })
                .unwrap_or_default();
            let candidates: Vec<&str> = if by_serial.is_empty() {
                items
                    .iter()
                    .filter(|i| {
                        i.item_name == line.item_name
                            && i.category_id == line.category_id
                            && i.assigned_to.as_deref() == Some(requester.as_str())
                    })
                    .map(|i| i.id.as_str())
                    .collect()
            } else {
                by_serial
            };

            let record_id = format!("{}#{}", request.id, pos + 1);
            match candidates.as_slice() {
                [single] => {
                    details.push(FixDetail {
                        record_id,
                        description: format!(
                            "\"{}\": itemId {} -> {}",
                            line.item_name,
                            if current.is_empty() { "-" } else { current.as_str() },
                            single
                        ),
                        fixed: true,
                    });
                    line.item_id = Some(single.to_string());
                    touched = true;
                }
                [] => details.push(FixDetail {
                    record_id,
                    description: format!("\"{}\": ไม่พบอุปกรณ์ที่ตรงกัน", line.item_name),
                    fixed: false,
                }),
                many => details.push(FixDetail {
                    record_id,
                    description: format!(
                        "\"{}\": พบอุปกรณ์ที่ตรงกัน {} รายการ ต้องตรวจสอบเอง",
                        line.item_name,
                        many.len()
                    ),
                    fixed: false,
                }),
            }
        }
        if touched {
            request.metadata.touch(now);
        }
    }

    let report = FixReport::from_details(details, checked);
    tracing::info!("fix-return-id-mismatch: {}", report.message);
    Ok(report)
}

/// Нормализация серийных номеров: пробелы по краям, верхний регистр,
/// пустая строка становится `None`. Дубликаты только сообщаются.
pub async fn fix_serialnumber_index(store: &MockStore) -> anyhow::Result<FixReport> {
    store.simulate_latency().await;
    let mut items = store.items.write().await;
    let now = Utc::now();

    let mut checked = 0;
    let mut details = Vec::new();

    for item in items.iter_mut() {
        let Some(raw) = item.serial_number.clone() else {
            continue;
        };
        checked += 1;
        let normalized = raw.trim().to_uppercase();
        if normalized == raw {
            continue;
        }
        details.push(FixDetail {
            record_id: item.id.clone(),
            description: if normalized.is_empty() {
                format!("\"{}\": ลบหมายเลขซีเรียลว่าง", item.item_name)
            } else {
                format!("\"{}\": \"{}\" -> \"{}\"", item.item_name, raw, normalized)
            },
            fixed: true,
        });
        item.serial_number = Some(normalized).filter(|s| !s.is_empty());
        item.metadata.touch(now);
    }

    let mut by_serial: HashMap<&str, Vec<&str>> = HashMap::new();
    for item in items.iter() {
        if let Some(serial) = item.serial_number.as_deref() {
            by_serial.entry(serial).or_default().push(item.id.as_str());
        }
    }
    let mut duplicates: Vec<(&str, Vec<&str>)> = by_serial
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .collect();
    duplicates.sort_by(|a, b| a.0.cmp(b.0));
    for (serial, ids) in duplicates {
        details.push(FixDetail {
            record_id: ids.join(","),
            description: format!("หมายเลขซีเรียลซ้ำ {} ({} รายการ)", serial, ids.len()),
            fixed: false,
        });
    }

    let report = FixReport::from_details(details, checked);
    tracing::info!("fix-serialnumber-index: {}", report.message);
    Ok(report)
}

fn name_matches(name: &str, category: &str, old_name: &str, category_filter: Option<&str>) -> bool {
    name == old_name && category_filter.map_or(true, |c| c == category)
}

/// Массовое переименование оборудования в складе и строках заявок.
/// Rename сохраняет резервную копию затронутых записей, rollback по ней
/// возвращает старое название.
pub async fn rename_item(
    store: &MockStore,
    request: RenameItemRequest,
) -> anyhow::Result<RenameItemResult> {
    request.validate().map_err(ApiError::Validation)?;
    store.simulate_latency().await;
    match request.action {
        RenameAction::Preview => preview(store, &request).await,
        RenameAction::Rename => rename(store, &request).await,
        RenameAction::Rollback => rollback(store, &request).await,
    }
}

async fn preview(store: &MockStore, request: &RenameItemRequest) -> anyhow::Result<RenameItemResult> {
    let old_name = request.old_name.trim();
    let new_name = request.new_name.trim();
    let category = request.category_id.as_deref().filter(|c| !c.is_empty());

    let items = store.items.read().await;
    let requests = store.requests.read().await;

    let count_items = |name: &str| {
        items
            .iter()
            .filter(|i| name_matches(&i.item_name, &i.category_id, name, category))
            .count() as u32
    };
    let count_lines = |name: &str| {
        requests
            .iter()
            .flat_map(|r| r.lines.iter())
            .filter(|l| name_matches(&l.item_name, &l.category_id, name, category))
            .count() as u32
    };

    let items_old = count_items(old_name);
    let lines_old = count_lines(old_name);
    if items_old + lines_old == 0 {
        return Err(ApiError::NotFound(format!("ไม่พบอุปกรณ์ชื่อ \"{}\"", old_name)).into());
    }

    Ok(RenameItemResult {
        action: RenameAction::Preview,
        old_name: old_name.to_string(),
        new_name: new_name.to_string(),
        collections: vec![
            CollectionCount {
                collection: COLLECTION_ITEMS.into(),
                before: items_old,
                after: count_items(new_name) + items_old,
            },
            CollectionCount {
                collection: COLLECTION_REQUESTS.into(),
                before: lines_old,
                after: count_lines(new_name) + lines_old,
            },
        ],
        backup_id: None,
    })
}

async fn rename(store: &MockStore, request: &RenameItemRequest) -> anyhow::Result<RenameItemResult> {
    let old_name = request.old_name.trim();
    let new_name = request.new_name.trim();
    let category = request.category_id.as_deref().filter(|c| !c.is_empty());
    let now = Utc::now();

    let mut items = store.items.write().await;
    let mut requests = store.requests.write().await;

    let mut item_ids = Vec::new();
    for item in items
        .iter_mut()
        .filter(|i| name_matches(&i.item_name, &i.category_id, old_name, category))
    {
        item.item_name = new_name.to_string();
        item.metadata.touch(now);
        item_ids.push(item.id.clone());
    }

    let mut request_lines = Vec::new();
    for req in requests.iter_mut() {
        let mut touched = false;
        for (idx, line) in req.lines.iter_mut().enumerate() {
            if name_matches(&line.item_name, &line.category_id, old_name, category) {
                line.item_name = new_name.to_string();
                request_lines.push((req.id.clone(), idx));
                touched = true;
            }
        }
        if touched {
            req.metadata.touch(now);
        }
    }

    if item_ids.is_empty() && request_lines.is_empty() {
        return Err(ApiError::NotFound(format!("ไม่พบอุปกรณ์ชื่อ \"{}\"", old_name)).into());
    }

    let backup = RenameBackup {
        id: new_id(),
        old_name: old_name.to_string(),
        new_name: new_name.to_string(),
        item_ids,
        request_lines,
        created_at: now,
    };
    let result = RenameItemResult {
        action: RenameAction::Rename,
        old_name: backup.old_name.clone(),
        new_name: backup.new_name.clone(),
        collections: vec![
            CollectionCount {
                collection: COLLECTION_ITEMS.into(),
                before: backup.item_ids.len() as u32,
                after: backup.item_ids.len() as u32,
            },
            CollectionCount {
                collection: COLLECTION_REQUESTS.into(),
                before: backup.request_lines.len() as u32,
                after: backup.request_lines.len() as u32,
            },
        ],
        backup_id: Some(backup.id.clone()),
    };
    tracing::info!(
        "rename-item: \"{}\" -> \"{}\" ({} items, {} lines), backup {}",
        backup.old_name,
        backup.new_name,
        backup.item_ids.len(),
        backup.request_lines.len(),
        backup.id
    );
    store
        .rename_backups
        .write()
        .await
        .insert(backup.id.clone(), backup);
    Ok(result)
}

async fn rollback(store: &MockStore, request: &RenameItemRequest) -> anyhow::Result<RenameItemResult> {
    let backup_id = request.backup_id.as_deref().unwrap_or_default().trim();
    let backup = store
        .rename_backups
        .write()
        .await
        .remove(backup_id)
        .ok_or_else(|| ApiError::NotFound("ไม่พบข้อมูลสำรอง".into()))?;
    let now = Utc::now();

    let mut items = store.items.write().await;
    let mut restored_items = 0;
    for item in items.iter_mut().filter(|i| backup.item_ids.contains(&i.id)) {
        // запись могли переименовать повторно после бэкапа
        if item.item_name == backup.new_name {
            item.item_name = backup.old_name.clone();
            item.metadata.touch(now);
            restored_items += 1;
        }
    }

    let mut requests = store.requests.write().await;
    let mut restored_lines = 0;
    for (request_id, idx) in &backup.request_lines {
        let Some(req) = requests.iter_mut().find(|r| &r.id == request_id) else {
            continue;
        };
        if let Some(line) = req.lines.get_mut(*idx) {
            if line.item_name == backup.new_name {
                line.item_name = backup.old_name.clone();
                restored_lines += 1;
            }
        }
        req.metadata.touch(now);
    }

    tracing::info!(
        "rename-item rollback {}: {} items, {} lines restored",
        backup.id,
        restored_items,
        restored_lines
    );
    Ok(RenameItemResult {
        action: RenameAction::Rollback,
        old_name: backup.new_name,
        new_name: backup.old_name,
        collections: vec![
            CollectionCount {
                collection: COLLECTION_ITEMS.into(),
                before: backup.item_ids.len() as u32,
                after: restored_items,
            },
            CollectionCount {
                collection: COLLECTION_REQUESTS.into(),
                before: backup.request_lines.len() as u32,
                after: restored_lines,
            },
        ],
        backup_id: Some(backup.id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_equipment_request::{
        CreateEquipmentRequestDto, EquipmentRequest, RequestLine,
    };

    fn rename_request(action: RenameAction) -> RenameItemRequest {
        RenameItemRequest {
            action,
            old_name: "เมาส์ Logitech M90".into(),
            new_name: "เมาส์ Logitech M90 (USB)".into(),
            category_id: None,
            backup_id: None,
        }
    }

    #[tokio::test]
    async fn test_preview_does_not_modify() {
        let store = MockStore::seeded(Utc::now());
        let result = rename_item(&store, rename_request(RenameAction::Preview)).await.unwrap();
        assert_eq!(result.collections[0].before, 8);
        assert_eq!(result.collections[1].before, 1);
        assert!(result.backup_id.is_none());
        assert!(store
            .items
            .read()
            .await
            .iter()
            .all(|i| i.item_name != "เมาส์ Logitech M90 (USB)"));
    }

    #[tokio::test]
    async fn test_rename_then_rollback() {
        let store = MockStore::seeded(Utc::now());
        let renamed = rename_item(&store, rename_request(RenameAction::Rename)).await.unwrap();
        let backup_id = renamed.backup_id.clone().unwrap();
        assert_eq!(renamed.total_affected(), 9);
        assert!(store
            .requests
            .read()
            .await
            .iter()
            .all(|r| r.lines.iter().all(|l| l.item_name != "เมาส์ Logitech M90")));

        let rolled = rename_item(
            &store,
            RenameItemRequest {
                backup_id: Some(backup_id.clone()),
                ..rename_request(RenameAction::Rollback)
            },
        )
        .await
        .unwrap();
        assert_eq!(rolled.collections[0].after, 8);
        assert_eq!(
            store
                .items
                .read()
                .await
                .iter()
                .filter(|i| i.item_name == "เมาส์ Logitech M90")
                .count(),
            8
        );

        // бэкап одноразовый
        let err = rename_item(
            &store,
            RenameItemRequest {
                backup_id: Some(backup_id),
                ..rename_request(RenameAction::Rollback)
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_rename_unknown_name() {
        let store = MockStore::seeded(Utc::now());
        let err = rename_item(
            &store,
            RenameItemRequest {
                old_name: "ไม่มีในระบบ".into(),
                ..rename_request(RenameAction::Rename)
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_fix_serialnumber_index() {
        let store = MockStore::seeded(Utc::now());
        {
            let mut items = store.items.write().await;
            items[0].serial_number = Some(" 5cg1234abc ".into());
            items[1].serial_number = Some("   ".into());
        }
        let report = fix_serialnumber_index(&store).await.unwrap();
        // " 5cg1234abc " нормализуется и совпадает с существующим Dell
        assert_eq!(report.summary.fixed, 2);
        assert_eq!(report.summary.unresolved, 1);
        assert!(!report.success);
        let items = store.items.read().await;
        assert_eq!(items[1].serial_number, None);
    }

    #[tokio::test]
    async fn test_fix_return_id_mismatch() {
        let store = MockStore::seeded(Utc::now());
        let serial = "MJ0X9K2L";
        let dto = CreateEquipmentRequestDto {
            requester_name: "ปิติ ยินดี".into(),
            phone: "0811111111".into(),
            office_id: "office-chiangmai".into(),
            lines: vec![
                RequestLine {
                    item_name: "Lenovo ThinkCentre M70q".into(),
                    category_id: "cat_computer".into(),
                    item_id: Some("stale-id".into()),
                    serial_number: Some(serial.to_lowercase()),
                    ..Default::default()
                },
                RequestLine {
                    item_name: "โปรเจคเตอร์".into(),
                    category_id: "cat_other".into(),
                    item_id: Some("lost-id".into()),
                    ..Default::default()
                },
            ],
            ..CreateEquipmentRequestDto::empty(RequestKind::Return)
        };
        let mut broken = EquipmentRequest::new_for_insert(dto, Utc::now());
        broken.status = RequestStatus::Completed;
        store.requests.write().await.push(broken.clone());

        let report = fix_return_id_mismatch(&store).await.unwrap();
        assert_eq!(report.summary.checked, 2);
        assert_eq!(report.summary.fixed, 1);
        assert_eq!(report.summary.unresolved, 1);

        let requests = store.requests.read().await;
        let fixed = requests.iter().find(|r| r.id == broken.id).unwrap();
        let expected = store
            .items
            .read()
            .await
            .iter()
            .find(|i| i.serial_number.as_deref() == Some(serial))
            .map(|i| i.id.clone());
        assert_eq!(fixed.lines[0].item_id, expected);
    }
}
