use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Ошибка HTTP API. Тело ответа: `{ "error": true, "message": ... }`
///
/// Сервисы возвращают `anyhow::Result`; бизнес-ошибки кладутся внутрь как
/// `ApiError` и достаются обратно через downcast, всё остальное становится
/// `Internal`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api) => api,
            Err(other) => {
                tracing::error!("Internal error: {:#}", other);
                ApiError::Internal("เกิดข้อผิดพลาดภายในระบบ".into())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            tracing::warn!("{} {}", status.as_u16(), self);
        }
        let body = json!({
            "error": true,
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast_keeps_category() {
        let err: anyhow::Error = ApiError::Conflict("ชื่อซ้ำ".into()).into();
        let api = ApiError::from(err);
        assert_eq!(api.status(), StatusCode::CONFLICT);
        assert_eq!(api.to_string(), "ชื่อซ้ำ");
    }

    #[test]
    fn test_foreign_error_is_internal() {
        let api = ApiError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.to_string().contains("disk"));
    }

    #[tokio::test]
    async fn test_response_body_shape() {
        let response = ApiError::NotFound("ไม่พบข้อมูล".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "ไม่พบข้อมูล");
    }
}
