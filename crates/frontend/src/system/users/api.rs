use contracts::system::users::{CreateUserDto, UpdateUserDto, User};

use crate::shared::api_utils::{api_url, path_segment};
use crate::shared::http::{self, Method};

fn user_url(id: &str) -> String {
    api_url(&format!("/api/admin/users/{}", path_segment(id)))
}

pub async fn fetch_users() -> Result<Vec<User>, String> {
    http::get_json(&api_url("/api/admin/users")).await
}

pub async fn fetch_user(id: &str) -> Result<User, String> {
    http::get_json(&user_url(id)).await
}

/// Новый пользователь входит с паролем по умолчанию
pub async fn create_user(dto: &CreateUserDto) -> Result<User, String> {
    http::send_json(Method::Post, &api_url("/api/admin/users"), dto).await
}

pub async fn update_user(id: &str, dto: &UpdateUserDto) -> Result<User, String> {
    http::send_json(Method::Put, &user_url(id), dto).await
}

pub async fn delete_user(id: &str) -> Result<(), String> {
    http::delete(&user_url(id)).await
}
