use chrono::Utc;
use contracts::domain::common::{new_id, EntityMetadata};
use contracts::system::users::{CreateUserDto, UpdateUserDto, User, UserRole};

use super::repository;
use crate::shared::api_error::ApiError;
use crate::shared::data::MockStore;

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// List all users, admins first
pub async fn list_all(store: &MockStore) -> anyhow::Result<Vec<User>> {
    let mut users = repository::list_all(store).await?;
    users.sort_by(|a, b| {
        b.is_admin()
            .cmp(&a.is_admin())
            .then_with(|| a.username.cmp(&b.username))
    });
    Ok(users)
}

pub async fn get_by_id(store: &MockStore, id: &str) -> anyhow::Result<Option<User>> {
    repository::get_by_id(store, id).await
}

/// Create a new user
pub async fn create(store: &MockStore, dto: CreateUserDto) -> anyhow::Result<User> {
    dto.validate().map_err(ApiError::Validation)?;

    if repository::get_by_username(store, &dto.username)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("ชื่อผู้ใช้นี้มีอยู่แล้ว".into()).into());
    }

    let user = User {
        id: new_id(),
        username: dto.username.trim().to_string(),
        full_name: normalize(dto.full_name),
        email: normalize(dto.email),
        role: dto.role,
        is_active: true,
        last_login_at: None,
        metadata: EntityMetadata::new(Utc::now()),
    };
    repository::insert(store, &user).await?;
    tracing::info!("User created: {} ({:?})", user.username, user.role);
    Ok(user)
}

async fn other_active_admins(store: &MockStore, id: &str) -> anyhow::Result<usize> {
    Ok(repository::list_all(store)
        .await?
        .iter()
        .filter(|u| u.id != id && u.is_admin() && u.is_active)
        .count())
}

/// Update user; the last active admin cannot be demoted or deactivated
pub async fn update(store: &MockStore, id: &str, dto: UpdateUserDto) -> anyhow::Result<User> {
    let mut user = repository::get_by_id(store, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("ไม่พบผู้ใช้".into()))?;

    if let Some(email) = dto.email.as_deref().filter(|e| !e.trim().is_empty()) {
        if !email.contains('@') {
            return Err(ApiError::Validation("รูปแบบอีเมลไม่ถูกต้อง".into()).into());
        }
    }

    let loses_admin = user.is_admin() && (dto.role != UserRole::Admin || !dto.is_active);
    if loses_admin && other_active_admins(store, id).await? == 0 {
        return Err(ApiError::Conflict("ต้องมีผู้ดูแลระบบอย่างน้อย 1 คน".into()).into());
    }

    user.email = normalize(dto.email);
    user.full_name = normalize(dto.full_name);
    user.role = dto.role;
    user.is_active = dto.is_active;
    user.metadata.touch(Utc::now());
    repository::update(store, &user).await?;
    Ok(user)
}

/// Delete user; the last admin cannot be deleted
pub async fn delete(store: &MockStore, id: &str) -> anyhow::Result<()> {
    let user = repository::get_by_id(store, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("ไม่พบผู้ใช้".into()))?;
    if user.is_admin() && other_active_admins(store, id).await? == 0 {
        return Err(ApiError::Conflict("ไม่สามารถลบผู้ดูแลระบบคนสุดท้ายได้".into()).into());
    }
    repository::delete(store, id).await?;
    store.sessions.write().await.retain(|_, s| s.user_id != id);
    tracing::info!("User deleted: {}", user.username);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_unique_username() {
        let store = MockStore::seeded(Utc::now());
        let user = create(
            &store,
            CreateUserDto {
                username: "piti".into(),
                full_name: Some("ปิติ ยินดี".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(user.role, UserRole::User);

        let err = create(
            &store,
            CreateUserDto {
                username: "PITI".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_last_admin_is_protected() {
        let store = MockStore::seeded(Utc::now());
        let err = delete(&store, "user-admin").await.unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));

        let err = update(
            &store,
            "user-admin",
            UpdateUserDto {
                role: UserRole::User,
                is_active: true,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_promote_then_delete_admin() {
        let store = MockStore::seeded(Utc::now());
        update(
            &store,
            "user-somchai",
            UpdateUserDto {
                role: UserRole::Admin,
                is_active: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        delete(&store, "user-admin").await.unwrap();
        assert!(get_by_id(&store, "user-admin").await.unwrap().is_none());
    }
}
