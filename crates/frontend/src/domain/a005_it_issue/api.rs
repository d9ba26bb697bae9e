use contracts::domain::a005_it_issue::{
    CreateItIssueDto, IssueFilter, ItIssue, UpdateIssueStatusDto,
};

use crate::shared::api_utils::{api_url, api_url_with_query, path_segment};
use crate::shared::http::{self, Method};

pub async fn list(filter: &IssueFilter) -> Result<Vec<ItIssue>, String> {
    http::get_json(&api_url_with_query("/api/it-issues", filter)?).await
}

pub async fn fetch_by_id(id: &str) -> Result<ItIssue, String> {
    http::get_json(&api_url(&format!("/api/it-issues/{}", path_segment(id)))).await
}

pub async fn create(dto: &CreateItIssueDto) -> Result<ItIssue, String> {
    http::send_json(Method::Post, &api_url("/api/it-issues"), dto).await
}

/// Смена статуса (admin); пустой `assigned_admin` сервер заполняет текущим пользователем
pub async fn update_status(id: &str, dto: &UpdateIssueStatusDto) -> Result<ItIssue, String> {
    let url = api_url(&format!("/api/admin/it-issues/{}/status", path_segment(id)));
    http::send_json(Method::Put, &url, dto).await
}
