use contracts::system::maintenance::{FixReport, RenameItemRequest, RenameItemResult};

use crate::shared::api_utils::api_url;
use crate::shared::http::{self, Method};

/// Какую починку запускать
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixKind {
    ReturnIdMismatch,
    SerialNumberIndex,
}

impl FixKind {
    pub fn path(&self) -> &'static str {
        match self {
            FixKind::ReturnIdMismatch => "/api/admin/fix-return-id-mismatch",
            FixKind::SerialNumberIndex => "/api/admin/fix-serialnumber-index",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FixKind::ReturnIdMismatch => "ซ่อมรหัสอุปกรณ์ในรายการคืน",
            FixKind::SerialNumberIndex => "ซ่อมดัชนีหมายเลขซีเรียล",
        }
    }

    pub fn all() -> [FixKind; 2] {
        [FixKind::ReturnIdMismatch, FixKind::SerialNumberIndex]
    }
}

pub async fn run_fix(kind: FixKind) -> Result<FixReport, String> {
    http::send_json(Method::Post, &api_url(kind.path()), &serde_json::json!({})).await
}

pub async fn rename_item(request: &RenameItemRequest) -> Result<RenameItemResult, String> {
    http::send_json(Method::Post, &api_url("/api/admin/rename-item"), request).await
}
