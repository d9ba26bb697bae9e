use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use contracts::system::auth::UserInfo;

use crate::shared::api_error::ApiError;

/// Extractor for getting the current user set by the auth middleware
/// Usage in handlers: `async fn handler(CurrentUser(user): CurrentUser) -> Response`
pub struct CurrentUser(pub UserInfo);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserInfo>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ApiError::Unauthorized("กรุณาเข้าสู่ระบบ".into()))
    }
}
