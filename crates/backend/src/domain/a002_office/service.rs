use chrono::Utc;
use contracts::domain::a002_office::{Office, OfficeDto};

use super::repository;
use crate::domain::a003_inventory_item::repository as items_repository;
use crate::shared::api_error::ApiError;
use crate::shared::data::MockStore;

/// Список офисов: сначала офис по умолчанию, затем по названию
pub async fn list_all(store: &MockStore) -> anyhow::Result<Vec<Office>> {
    let mut offices = repository::list_all(store).await?;
    offices.sort_by(|a, b| b.is_default.cmp(&a.is_default).then(a.name.cmp(&b.name)));
    Ok(offices)
}

/// Только активные (для выпадающих списков форм)
pub async fn list_active(store: &MockStore) -> anyhow::Result<Vec<Office>> {
    Ok(list_all(store)
        .await?
        .into_iter()
        .filter(|o| o.is_active)
        .collect())
}

pub async fn get_by_id(store: &MockStore, id: &str) -> anyhow::Result<Option<Office>> {
    repository::get_by_id(store, id).await
}

async fn ensure_unique_name(
    store: &MockStore,
    name: &str,
    except_id: Option<&str>,
) -> anyhow::Result<()> {
    let name = name.trim().to_lowercase();
    let taken = repository::list_all(store)
        .await?
        .iter()
        .any(|o| Some(o.id.as_str()) != except_id && o.name.to_lowercase() == name);
    if taken {
        return Err(ApiError::Conflict("มีสาขานี้อยู่แล้ว".into()).into());
    }
    Ok(())
}

/// Создание нового офиса
pub async fn create(store: &MockStore, dto: OfficeDto) -> anyhow::Result<Office> {
    dto.validate().map_err(ApiError::Validation)?;
    ensure_unique_name(store, &dto.name, None).await?;

    let office = Office::new_for_insert(&dto, Utc::now());
    repository::insert(store, &office).await?;
    tracing::info!("Office created: {} ({})", office.name, office.id);
    Ok(office)
}

/// Обновление существующего офиса
pub async fn update(store: &MockStore, id: &str, dto: OfficeDto) -> anyhow::Result<Office> {
    dto.validate().map_err(ApiError::Validation)?;
    let mut office = repository::get_by_id(store, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("ไม่พบสาขา".into()))?;
    ensure_unique_name(store, &dto.name, Some(id)).await?;

    if office.is_default && dto.is_active == Some(false) {
        return Err(ApiError::Conflict("ไม่สามารถปิดใช้งานสาขาหลักได้".into()).into());
    }

    office.update(&dto, Utc::now());
    repository::update(store, &office).await?;
    Ok(office)
}

/// Удаление; офис по умолчанию и офис с оборудованием удалить нельзя
pub async fn delete(store: &MockStore, id: &str) -> anyhow::Result<()> {
    let office = repository::get_by_id(store, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("ไม่พบสาขา".into()))?;
    if office.is_default {
        return Err(ApiError::Conflict("ไม่สามารถลบสาขาหลักได้".into()).into());
    }
    let in_use = items_repository::list_all(store)
        .await?
        .iter()
        .filter(|i| i.office_id == id)
        .count();
    if in_use > 0 {
        return Err(ApiError::Conflict(format!(
            "ไม่สามารถลบสาขาได้ เนื่องจากมีอุปกรณ์ {} รายการ",
            in_use
        ))
        .into());
    }
    repository::delete(store, id).await?;
    tracing::info!("Office deleted: {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::seed::{OFFICE_BANGNA, OFFICE_HQ};

    fn dto(name: &str) -> OfficeDto {
        OfficeDto {
            name: name.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let store = MockStore::seeded(Utc::now());
        let office = create(&store, dto("สาขาขอนแก่น")).await.unwrap();
        assert!(office.is_active);

        let updated = update(
            &store,
            &office.id,
            OfficeDto {
                description: Some("ภาคอีสาน".into()),
                ..dto("สาขาขอนแก่น 2")
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.name, "สาขาขอนแก่น 2");
        assert_eq!(updated.description.as_deref(), Some("ภาคอีสาน"));

        delete(&store, &office.id).await.unwrap();
        assert!(get_by_id(&store, &office.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let store = MockStore::seeded(Utc::now());
        let err = create(&store, dto(" สาขาบางนา ")).await.unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_default_and_used_offices_are_protected() {
        let store = MockStore::seeded(Utc::now());
        let err = delete(&store, OFFICE_HQ).await.unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
        let err = delete(&store, OFFICE_BANGNA).await.unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_default_office_listed_first() {
        let store = MockStore::seeded(Utc::now());
        let offices = list_all(&store).await.unwrap();
        assert_eq!(offices[0].id, OFFICE_HQ);
    }
}
