use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err("กรุณากรอกชื่อผู้ใช้และรหัสผ่าน".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub is_admin: bool,
}

impl UserInfo {
    /// Имя для шапки: полное имя, если есть
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Ответ GET /api/debug/auth-status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusReport {
    pub has_authorization_header: bool,
    pub token_valid: bool,
    pub is_admin: bool,
    pub user: Option<UserInfo>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user = UserInfo {
            id: "u1".into(),
            username: "admin".into(),
            full_name: Some("  ".into()),
            is_admin: true,
        };
        assert_eq!(user.display_name(), "admin");
        user.full_name = Some("ผู้ดูแลระบบ".into());
        assert_eq!(user.display_name(), "ผู้ดูแลระบบ");
    }

    #[test]
    fn test_login_request_validation() {
        let req = LoginRequest {
            username: " ".into(),
            password: "password".into(),
        };
        assert!(req.validate().is_err());
    }
}
