use contracts::domain::a004_equipment_request::{
    CreateEquipmentRequestDto, EquipmentRequest, RequestKind, UpdateRequestStatusDto,
};
use serde::Serialize;

use crate::shared::api_utils::{api_url, api_url_with_query, path_segment};
use crate::shared::http::{self, Method};

#[derive(Serialize)]
struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<RequestKind>,
}

/// Заявки, новые сверху; `None` - все виды
pub async fn list(kind: Option<RequestKind>) -> Result<Vec<EquipmentRequest>, String> {
    http::get_json(&api_url_with_query(
        "/api/equipment-requests",
        &ListQuery { kind },
    )?)
    .await
}

pub async fn create(dto: &CreateEquipmentRequestDto) -> Result<EquipmentRequest, String> {
    http::send_json(Method::Post, &api_url("/api/equipment-requests"), dto).await
}

pub async fn update_status(
    id: &str,
    dto: &UpdateRequestStatusDto,
) -> Result<EquipmentRequest, String> {
    let url = api_url(&format!(
        "/api/admin/equipment-requests/{}/status",
        path_segment(id)
    ));
    http::send_json(Method::Put, &url, dto).await
}
