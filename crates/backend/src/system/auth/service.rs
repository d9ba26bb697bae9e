//! Mock-аутентификация: сессии в памяти, общий пароль для демо-пользователей.

use chrono::Utc;
use contracts::system::auth::{AuthStatusReport, LoginRequest, LoginResponse};
use contracts::system::users::User;

use crate::shared::api_error::ApiError;
use crate::shared::data::{MockStore, Session};
use crate::system::users::repository as users_repository;

/// Пароль всех демо-пользователей
pub const MOCK_PASSWORD: &str = "password";

/// Достаёт токен из заголовка `Authorization: Bearer <token>`
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub async fn login(store: &MockStore, request: LoginRequest) -> anyhow::Result<LoginResponse> {
    request.validate().map_err(ApiError::Validation)?;

    let invalid = || ApiError::Unauthorized("ชื่อผู้ใช้หรือรหัสผ่านไม่ถูกต้อง".into());
    let mut user = users_repository::get_by_username(store, &request.username)
        .await?
        .ok_or_else(invalid)?;
    if request.password != MOCK_PASSWORD {
        return Err(invalid().into());
    }
    if !user.is_active {
        return Err(ApiError::Forbidden("บัญชีผู้ใช้ถูกระงับ".into()).into());
    }

    let now = Utc::now();
    let token = uuid::Uuid::new_v4().simple().to_string();
    store.sessions.write().await.insert(
        token.clone(),
        Session {
            user_id: user.id.clone(),
            expires_at: now + store.session_ttl(),
        },
    );

    user.last_login_at = Some(now);
    users_repository::update(store, &user).await?;
    tracing::info!("User logged in: {}", user.username);

    Ok(LoginResponse {
        access_token: token,
        user: user.to_info(),
    })
}

pub async fn logout(store: &MockStore, token: &str) -> anyhow::Result<bool> {
    Ok(store.sessions.write().await.remove(token).is_some())
}

/// Пользователь по токену; просроченная сессия удаляется
pub async fn current_user(store: &MockStore, token: &str) -> anyhow::Result<Option<User>> {
    let session = store.sessions.read().await.get(token).cloned();
    let Some(session) = session else {
        return Ok(None);
    };
    if session.expires_at <= Utc::now() {
        store.sessions.write().await.remove(token);
        return Ok(None);
    }
    Ok(users_repository::get_by_id(store, &session.user_id)
        .await?
        .filter(|u| u.is_active))
}

/// Диагностика заголовка авторизации (GET /api/debug/auth-status)
pub async fn auth_status(store: &MockStore, header: Option<&str>) -> anyhow::Result<AuthStatusReport> {
    let has_header = header.is_some();
    let Some(token) = bearer_token(header) else {
        return Ok(AuthStatusReport {
            has_authorization_header: has_header,
            token_valid: false,
            is_admin: false,
            user: None,
            message: if has_header {
                "รูปแบบ Authorization header ไม่ถูกต้อง (ต้องเป็น Bearer <token>)".into()
            } else {
                "ไม่พบ Authorization header".into()
            },
        });
    };

    let user = current_user(store, token).await?;
    Ok(AuthStatusReport {
        has_authorization_header: true,
        token_valid: user.is_some(),
        is_admin: user.as_ref().is_some_and(|u| u.is_admin()),
        message: match &user {
            Some(u) if u.is_admin() => "เข้าสู่ระบบในฐานะผู้ดูแลระบบ".into(),
            Some(_) => "เข้าสู่ระบบแล้ว แต่ไม่มีสิทธิ์ผู้ดูแลระบบ".into(),
            None => "โทเค็นไม่ถูกต้องหรือหมดอายุ".into(),
        },
        user: user.map(|u| u.to_info()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_login_me_logout() {
        let store = MockStore::seeded(Utc::now());
        let response = login(&store, credentials("Admin", MOCK_PASSWORD)).await.unwrap();
        assert!(response.user.is_admin);

        let me = current_user(&store, &response.access_token).await.unwrap();
        assert_eq!(me.map(|u| u.username), Some("admin".to_string()));

        assert!(logout(&store, &response.access_token).await.unwrap());
        assert!(current_user(&store, &response.access_token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let store = MockStore::seeded(Utc::now());
        let err = login(&store, credentials("admin", "secret")).await.unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_expired_session() {
        let store = MockStore::seeded(Utc::now()).with_session_ttl(0);
        let response = login(&store, credentials("somchai", MOCK_PASSWORD)).await.unwrap();
        assert!(current_user(&store, &response.access_token).await.unwrap().is_none());
        assert!(store.sessions.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_auth_status_report() {
        let store = MockStore::seeded(Utc::now());
        let report = auth_status(&store, None).await.unwrap();
        assert!(!report.has_authorization_header);

        let report = auth_status(&store, Some("Token abc")).await.unwrap();
        assert!(report.has_authorization_header);
        assert!(!report.token_valid);

        let response = login(&store, credentials("manee", MOCK_PASSWORD)).await.unwrap();
        let header = format!("Bearer {}", response.access_token);
        let report = auth_status(&store, Some(&header)).await.unwrap();
        assert!(report.token_valid);
        assert!(!report.is_admin);
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(Some("Bearer abc")), Some("abc"));
        assert_eq!(bearer_token(Some("Bearer ")), None);
        assert_eq!(bearer_token(Some("abc")), None);
        assert_eq!(bearer_token(None), None);
    }
}
