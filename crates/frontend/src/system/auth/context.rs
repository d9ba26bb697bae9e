use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    /// Восстановление сессии из localStorage завершено
    pub initialized: bool,
}

impl AuthState {
    pub fn signed_in(access_token: String, user: UserInfo) -> Self {
        Self {
            access_token: Some(access_token),
            user_info: Some(user),
            initialized: true,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            initialized: true,
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user_info.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user_info.as_ref().map(|u| u.is_admin).unwrap_or(false)
    }

    pub fn display_name(&self) -> String {
        self.user_info
            .as_ref()
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "ผู้เยี่ยมชม".to_string())
    }
}

/// Состояние входа, которое передаётся через контекст.
/// Создаётся в `App`, `init()` вызывается один раз при старте.
#[derive(Clone, Copy)]
pub struct AuthContext {
    state: RwSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(AuthState::default()),
        }
    }

    /// Восстановить сессию: токен из localStorage проверяется через
    /// `/api/auth/me`; при ошибке токен удаляется.
    pub fn init(&self) {
        let state = self.state;
        let Some(token) = storage::get_access_token() else {
            state.set(AuthState::signed_out());
            return;
        };
        spawn_local(async move {
            match api::get_current_user().await {
                Ok(user) => {
                    log::info!("session restored for '{}'", user.username);
                    state.set(AuthState::signed_in(token, user));
                }
                Err(e) => {
                    log::warn!("stored session rejected: {}", e);
                    storage::clear_tokens();
                    state.set(AuthState::signed_out());
                }
            }
        });
    }

    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.with(|s| s.initialized)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.is_authenticated())
    }

    pub fn is_admin(&self) -> bool {
        self.state.with(|s| s.is_admin())
    }

    pub fn is_admin_untracked(&self) -> bool {
        self.state.with_untracked(|s| s.is_admin())
    }

    pub fn display_name(&self) -> String {
        self.state.with(|s| s.display_name())
    }

    pub fn user_info(&self) -> Option<UserInfo> {
        self.state.with(|s| s.user_info.clone())
    }

    pub fn username_untracked(&self) -> Option<String> {
        self.state
            .with_untracked(|s| s.user_info.as_ref().map(|u| u.username.clone()))
    }

    pub async fn sign_in(&self, username: String, password: String) -> Result<(), String> {
        let response = api::login(username, password).await?;
        storage::save_access_token(&response.access_token);
        log::info!("signed in as '{}'", response.user.username);
        self.state
            .set(AuthState::signed_in(response.access_token, response.user));
        Ok(())
    }

    /// Выход: сессия на сервере закрывается по возможности, локальное
    /// состояние очищается в любом случае
    pub async fn sign_out(&self) {
        if let Err(e) = api::logout().await {
            log::warn!("logout request failed: {}", e);
        }
        storage::clear_tokens();
        self.state.set(AuthState::signed_out());
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Hook to access auth context
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext not found in component tree")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_admin: bool) -> UserInfo {
        UserInfo {
            id: "u1".into(),
            username: "somchai".into(),
            full_name: Some("สมชาย ใจดี".into()),
            is_admin,
        }
    }

    #[test]
    fn test_default_state_is_not_initialized() {
        let state = AuthState::default();
        assert!(!state.initialized);
        assert!(!state.is_authenticated());
        assert_eq!(state.display_name(), "ผู้เยี่ยมชม");
    }

    #[test]
    fn test_signed_in_state() {
        let state = AuthState::signed_in("token".into(), user(false));
        assert!(state.initialized);
        assert!(state.is_authenticated());
        assert!(!state.is_admin());
        assert_eq!(state.display_name(), "สมชาย ใจดี");
    }

    #[test]
    fn test_sign_out_keeps_initialized_flag() {
        let state = AuthState::signed_out();
        assert!(state.initialized);
        assert!(!state.is_admin());
        assert_eq!(state.access_token, None);
    }

    #[test]
    fn test_admin_flag_comes_from_user() {
        assert!(AuthState::signed_in("t".into(), user(true)).is_admin());
    }
}
