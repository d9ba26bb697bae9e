use axum::{
    body::Body,
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use contracts::system::users::User;

use super::service::{bearer_token, current_user};
use crate::shared::api_error::ApiError;
use crate::shared::data::get_store;

/// Заголовок копируется до первого await: `Body` не `Sync`
fn authorization_header(req: &Request<Body>) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
}

async fn authenticate(header: Option<String>) -> Result<User, ApiError> {
    let token = bearer_token(header.as_deref())
        .ok_or_else(|| ApiError::Unauthorized("กรุณาเข้าสู่ระบบ".into()))?;
    current_user(get_store(), token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("เซสชันหมดอายุ กรุณาเข้าสู่ระบบใหม่".into()))
}

/// Middleware that requires a valid session
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Response {
    let header = authorization_header(&req);
    match authenticate(header).await {
        Ok(user) => {
            req.extensions_mut().insert(user.to_info());
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}

/// Middleware that requires admin privileges
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Response {
    let header = authorization_header(&req);
    match authenticate(header).await {
        Ok(user) if user.is_admin() => {
            req.extensions_mut().insert(user.to_info());
            next.run(req).await
        }
        Ok(user) => {
            tracing::warn!("Admin route denied for {}", user.username);
            ApiError::Forbidden("ต้องใช้สิทธิ์ผู้ดูแลระบบ".into()).into_response()
        }
        Err(e) => e.into_response(),
    }
}
