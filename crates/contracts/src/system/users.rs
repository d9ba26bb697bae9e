use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::EntityMetadata;
use crate::system::auth::UserInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::Admin => "ผู้ดูแลระบบ",
            UserRole::User => "ผู้ใช้งาน",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            is_admin: self.is_admin(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: UserRole,
}

impl CreateUserDto {
    pub fn validate(&self) -> Result<(), String> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err("กรุณากรอกชื่อผู้ใช้".into());
        }
        if username.chars().any(char::is_whitespace) {
            return Err("ชื่อผู้ใช้ต้องไม่มีช่องว่าง".into());
        }
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !email.contains('@') {
                return Err("รูปแบบอีเมลไม่ถูกต้อง".into());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation() {
        let mut dto = CreateUserDto {
            username: "somchai".into(),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
        dto.username = "som chai".into();
        assert!(dto.validate().is_err());
        dto.username = "somchai".into();
        dto.email = Some("somchai.example.com".into());
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
    }
}
