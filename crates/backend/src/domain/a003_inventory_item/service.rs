use chrono::Utc;
use contracts::domain::a003_inventory_item::{
    AvailableFilter, AvailableItems, BreakdownQuery, CreateInventoryItemDto, InventoryFilter,
    InventoryGroupRow, InventoryItem, ItemBreakdown,
};

use super::repository;
use crate::domain::a001_inventory_config::service as config_service;
use crate::domain::a002_office::repository as office_repository;
use crate::shared::api_error::ApiError;
use crate::shared::data::MockStore;

/// Список склада, сгруппированный по названию и категории
pub async fn list_grouped(
    store: &MockStore,
    filter: &InventoryFilter,
) -> anyhow::Result<Vec<InventoryGroupRow>> {
    let config = config_service::get_config(store).await?;
    let items = list_items(store, filter).await?;
    Ok(InventoryGroupRow::group(&items, &config))
}

/// Отдельные единицы, новые сверху
pub async fn list_items(
    store: &MockStore,
    filter: &InventoryFilter,
) -> anyhow::Result<Vec<InventoryItem>> {
    let mut items: Vec<InventoryItem> = repository::list_all(store)
        .await?
        .into_iter()
        .filter(|i| filter.matches(i))
        .collect();
    items.sort_by(|a, b| b.metadata.created_at.cmp(&a.metadata.created_at));
    Ok(items)
}

/// Добавление оборудования: `quantity` превращается в N записей
pub async fn create(
    store: &MockStore,
    dto: CreateInventoryItemDto,
) -> anyhow::Result<Vec<InventoryItem>> {
    let config = config_service::get_config(store).await?;
    dto.validate(&config).map_err(ApiError::Validation)?;

    if office_repository::get_by_id(store, &dto.office_id)
        .await?
        .is_none()
    {
        return Err(ApiError::Validation("ไม่พบสาขาที่เลือก".into()).into());
    }

    let serial = dto
        .serial_number
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let phone = dto
        .phone_number
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let items = dto.into_items(Utc::now());
    repository::insert_checked(store, &items, |existing| {
        check_unique(existing, serial.as_deref(), phone.as_deref())
    })
    .await?;
    tracing::info!(
        "Inventory: added {} x \"{}\"",
        items.len(),
        items.first().map(|i| i.item_name.as_str()).unwrap_or_default()
    );
    Ok(items)
}

/// Серийный номер (без учёта регистра) и номер SIM не должны повторяться
fn check_unique(
    existing: &[InventoryItem],
    serial: Option<&str>,
    phone: Option<&str>,
) -> anyhow::Result<()> {
    if let Some(serial) = serial {
        let duplicate = existing.iter().any(|i| {
            i.serial_number
                .as_deref()
                .is_some_and(|s| s.trim().eq_ignore_ascii_case(serial))
        });
        if duplicate {
            return Err(ApiError::Conflict(format!("หมายเลขซีเรียล {} มีอยู่ในระบบแล้ว", serial)).into());
        }
    }
    if let Some(phone) = phone {
        if existing.iter().any(|i| i.phone_number.as_deref() == Some(phone)) {
            return Err(ApiError::Conflict(format!("เบอร์โทรศัพท์ {} มีอยู่ในระบบแล้ว", phone)).into());
        }
    }
    Ok(())
}

/// Разбивка одной строки склада для всплывающей подсказки
pub async fn breakdown(store: &MockStore, query: &BreakdownQuery) -> anyhow::Result<ItemBreakdown> {
    if query.item_name.trim().is_empty() {
        return Err(ApiError::Validation("กรุณาระบุชื่ออุปกรณ์".into()).into());
    }
    let config = config_service::get_config(store).await?;
    let items = repository::list_all(store).await?;
    let result = ItemBreakdown::from_items(query, &items, &config);
    if result.total == 0 {
        return Err(ApiError::NotFound(format!("ไม่พบอุปกรณ์ \"{}\"", query.item_name)).into());
    }
    Ok(result)
}

/// Свободное к выдаче оборудование (отчёт администратора)
pub async fn available_items(
    store: &MockStore,
    filter: &AvailableFilter,
) -> anyhow::Result<AvailableItems> {
    let items = repository::list_all(store).await?;
    Ok(AvailableItems::collect(&items, filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::seed::OFFICE_HQ;
    use contracts::domain::a001_inventory_config::aggregate::{
        CATEGORY_NOTEBOOK, CATEGORY_PERIPHERAL, CATEGORY_SIM_CARD,
    };

    fn dto(name: &str, quantity: u32) -> CreateInventoryItemDto {
        CreateInventoryItemDto {
            item_name: name.into(),
            category_id: CATEGORY_PERIPHERAL.into(),
            quantity,
            office_id: OFFICE_HQ.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_quantity_expands_into_records() {
        let store = MockStore::seeded(Utc::now());
        let created = create(&store, dto("หูฟัง Jabra", 3)).await.unwrap();
        assert_eq!(created.len(), 3);

        let rows = list_grouped(&store, &InventoryFilter::default()).await.unwrap();
        let row = rows.iter().find(|r| r.item_name == "หูฟัง Jabra").unwrap();
        assert_eq!(row.total, 3);
        assert_eq!(row.available, 3);
    }

    #[tokio::test]
    async fn test_duplicate_serial_rejected() {
        let store = MockStore::seeded(Utc::now());
        let err = create(
            &store,
            CreateInventoryItemDto {
                category_id: CATEGORY_NOTEBOOK.into(),
                serial_number: Some("5cg1234abc".into()),
                ..dto("Dell Latitude 5420", 1)
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_concurrent_same_serial_inserted_once() {
        let store = MockStore::seeded(Utc::now()).with_latency(10);
        let notebook = || CreateInventoryItemDto {
            category_id: CATEGORY_NOTEBOOK.into(),
            serial_number: Some("PF3XK9Z1".into()),
            ..dto("Lenovo ThinkPad E14", 1)
        };
        let (a, b) = tokio::join!(create(&store, notebook()), create(&store, notebook()));
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let err = a.err().or(b.err()).unwrap();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));

        let items = repository::list_all(&store).await.unwrap();
        assert_eq!(
            items
                .iter()
                .filter(|i| i.serial_number.as_deref() == Some("PF3XK9Z1"))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_sim_requires_phone() {
        let store = MockStore::seeded(Utc::now());
        let err = create(
            &store,
            CreateInventoryItemDto {
                category_id: CATEGORY_SIM_CARD.into(),
                ..dto("ซิม True", 1)
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_office_rejected() {
        let store = MockStore::seeded(Utc::now());
        let err = create(
            &store,
            CreateInventoryItemDto {
                office_id: "office-missing".into(),
                ..dto("หูฟัง", 1)
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_breakdown_counts_and_not_found() {
        let store = MockStore::seeded(Utc::now());
        let query = BreakdownQuery {
            item_name: "Dell Latitude 5420".into(),
            category_id: CATEGORY_NOTEBOOK.into(),
        };
        let result = breakdown(&store, &query).await.unwrap();
        assert_eq!(result.total, 3);
        assert_eq!(result.by_status.iter().map(|b| b.count).sum::<u32>(), 3);

        let missing = BreakdownQuery {
            item_name: "Nokia 3310".into(),
            category_id: CATEGORY_NOTEBOOK.into(),
        };
        let err = breakdown(&store, &missing).await.unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_available_items_excludes_damaged_and_personal() {
        let store = MockStore::seeded(Utc::now());
        let available = available_items(&store, &AvailableFilter::default()).await.unwrap();
        // из трёх Dell свободен и исправен только один
        let dells: Vec<_> = available
            .with_serial_number
            .iter()
            .filter(|i| i.item_name == "Dell Latitude 5420")
            .collect();
        assert_eq!(dells.len(), 1);
        assert!(available
            .with_serial_number
            .iter()
            .all(|i| i.item_name != "MacBook Air M1"));
        assert_eq!(available.with_phone_number.len(), 1);
    }
}
