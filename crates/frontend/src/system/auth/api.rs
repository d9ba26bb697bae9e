use contracts::system::auth::{AuthStatusReport, LoginRequest, LoginResponse, UserInfo};

use crate::shared::api_utils::api_url;
use crate::shared::http::{self, Method};

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    let request = LoginRequest { username, password };
    request.validate()?;
    http::send_json(Method::Post, &api_url("/api/auth/login"), &request).await
}

/// Drop the server-side session; the token is taken from storage
pub async fn logout() -> Result<(), String> {
    http::post_empty(&api_url("/api/auth/logout")).await
}

/// Get current user info for the stored token
pub async fn get_current_user() -> Result<UserInfo, String> {
    http::get_json(&api_url("/api/auth/me")).await
}

/// Debug: how the backend sees the current request
pub async fn auth_status() -> Result<AuthStatusReport, String> {
    http::get_json(&api_url("/api/debug/auth-status")).await
}
