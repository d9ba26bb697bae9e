use chrono::Utc;
use contracts::domain::a005_it_issue::{
    issue_number, CreateItIssueDto, IssueFilter, ItIssue, UpdateIssueStatusDto,
};

use super::repository;
use crate::domain::a002_office::repository as office_repository;
use crate::shared::api_error::ApiError;
use crate::shared::data::MockStore;

/// Регистрация заявки; номер IT-YYYYMMDD-NNN считается в пределах дня
pub async fn create(store: &MockStore, dto: CreateItIssueDto) -> anyhow::Result<ItIssue> {
    dto.validate().map_err(ApiError::Validation)?;
    if office_repository::get_by_id(store, &dto.office_id)
        .await?
        .is_none()
    {
        return Err(ApiError::Validation("ไม่พบสาขาที่เลือก".into()).into());
    }

    let now = Utc::now();
    let prefix = issue_number(now, 0);
    let day_prefix = &prefix[..prefix.len() - 3];
    let issue = repository::insert_numbered(store, |existing| {
        let seq = existing
            .iter()
            .filter(|i| i.issue_no.starts_with(day_prefix))
            .count() as u32
            + 1;
        ItIssue::new_for_insert(dto, issue_number(now, seq), now)
    })
    .await?;

    tracing::info!("IT issue registered: {} ({})", issue.issue_no, issue.issue_type.display_name());
    Ok(issue)
}

/// Заявки, новые сверху
pub async fn list(store: &MockStore, filter: &IssueFilter) -> anyhow::Result<Vec<ItIssue>> {
    let mut issues: Vec<ItIssue> = repository::list_all(store)
        .await?
        .into_iter()
        .filter(|i| filter.status.map_or(true, |s| i.status == s))
        .filter(|i| {
            filter
                .office_id
                .as_deref()
                .filter(|o| !o.is_empty())
                .map_or(true, |o| i.office_id == o)
        })
        .collect();
    issues.sort_by(|a, b| b.metadata.created_at.cmp(&a.metadata.created_at));
    Ok(issues)
}

pub async fn get_by_id(store: &MockStore, id: &str) -> anyhow::Result<Option<ItIssue>> {
    repository::get_by_id(store, id).await
}

pub async fn update_status(
    store: &MockStore,
    id: &str,
    dto: UpdateIssueStatusDto,
) -> anyhow::Result<ItIssue> {
    let issue = repository::modify(store, id, |issue| {
        issue
            .transition(dto.status, dto.assigned_admin, dto.notes, Utc::now())
            .map_err(ApiError::Conflict)?;
        Ok(issue.clone())
    })
    .await?
    .ok_or_else(|| ApiError::NotFound("ไม่พบรายการแจ้งปัญหา".into()))?;
    tracing::info!("IT issue {} -> {}", issue.issue_no, issue.status.as_str());
    Ok(issue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::seed::OFFICE_HQ;
    use contracts::domain::a004_equipment_request::Urgency;
    use contracts::domain::a005_it_issue::{IssueStatus, IssueType};

    fn dto() -> CreateItIssueDto {
        CreateItIssueDto {
            reporter_name: "ปิติ ยินดี".into(),
            phone: "0811111111".into(),
            office_id: OFFICE_HQ.into(),
            issue_type: IssueType::Network,
            urgency: Urgency::Normal,
            description: "Wi-Fi ชั้น 3 หลุดบ่อย".into(),
        }
    }

    fn status(status: IssueStatus) -> UpdateIssueStatusDto {
        UpdateIssueStatusDto {
            status,
            assigned_admin: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_issue_numbers_are_sequential_per_day() {
        let store = MockStore::seeded(Utc::now());
        let first = create(&store, dto()).await.unwrap();
        let second = create(&store, dto()).await.unwrap();
        assert!(first.issue_no.ends_with("-001"));
        assert!(second.issue_no.ends_with("-002"));
        assert_eq!(first.status, IssueStatus::Pending);
    }

    #[tokio::test]
    async fn test_status_flow() {
        let store = MockStore::seeded(Utc::now());
        let issue = create(&store, dto()).await.unwrap();

        let err = update_status(&store, &issue.id, status(IssueStatus::Closed))
            .await
            .unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));

        let in_progress = update_status(
            &store,
            &issue.id,
            UpdateIssueStatusDto {
                assigned_admin: Some("admin".into()),
                ..status(IssueStatus::InProgress)
            },
        )
        .await
        .unwrap();
        assert_eq!(in_progress.assigned_admin.as_deref(), Some("admin"));

        let done = update_status(&store, &issue.id, status(IssueStatus::Completed))
            .await
            .unwrap();
        assert!(done.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_concurrent_transition_applies_once() {
        let store = MockStore::seeded(Utc::now()).with_latency(10);
        let issue = create(&store, dto()).await.unwrap();
        let (a, b) = tokio::join!(
            update_status(&store, &issue.id, status(IssueStatus::InProgress)),
            update_status(&store, &issue.id, status(IssueStatus::InProgress)),
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let err = a.err().or(b.err()).unwrap();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_filter_by_status() {
        let store = MockStore::seeded(Utc::now());
        create(&store, dto()).await.unwrap();
        let pending = list(
            &store,
            &IssueFilter {
                status: Some(IssueStatus::Pending),
                office_id: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(pending.len(), 2);
        let closed = list(
            &store,
            &IssueFilter {
                status: Some(IssueStatus::Closed),
                office_id: None,
            },
        )
        .await
        .unwrap();
        assert!(closed.is_empty());
    }
}
