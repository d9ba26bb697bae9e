use contracts::domain::a002_office::{Office, OfficeDto};

use crate::shared::api_utils::{api_url, path_segment};
use crate::shared::http::{self, Method};

/// Активные офисы для выпадающих списков
pub async fn fetch_active() -> Result<Vec<Office>, String> {
    http::get_json(&api_url("/api/offices")).await
}

pub async fn fetch_all() -> Result<Vec<Office>, String> {
    http::get_json(&api_url("/api/admin/offices")).await
}

pub async fn fetch_by_id(id: &str) -> Result<Office, String> {
    http::get_json(&api_url(&format!("/api/admin/offices/{}", path_segment(id)))).await
}

/// Create when `dto.id` is empty, update otherwise
pub async fn save(dto: &OfficeDto) -> Result<Office, String> {
    match dto.id.as_deref() {
        Some(id) => {
            let url = api_url(&format!("/api/admin/offices/{}", path_segment(id)));
            http::send_json(Method::Put, &url, dto).await
        }
        None => http::send_json(Method::Post, &api_url("/api/admin/offices"), dto).await,
    }
}

pub async fn delete(id: &str) -> Result<(), String> {
    http::delete(&api_url(&format!("/api/admin/offices/{}", path_segment(id)))).await
}
