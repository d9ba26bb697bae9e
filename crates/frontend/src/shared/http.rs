//! Thin wrappers over `gloo_net` used by every `api.rs` / `model.rs`.
//!
//! * the session token (if any) is sent as `Authorization: Bearer …`;
//! * a non-2xx response with the backend body `{ "error": true, "message": … }`
//!   becomes `Err(message)`;
//! * a 2xx body shaped like that error object is also treated as an error.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::system::auth::storage;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    message: String,
}

/// Returns the message if the body is an error-shaped payload
pub fn error_payload_message(text: &str) -> Option<String> {
    let body: ErrorBody = serde_json::from_str(text).ok()?;
    body.error.then_some(body.message)
}

fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))?;

    if let Some(message) = error_payload_message(&text) {
        return Err(if message.is_empty() {
            format!("HTTP {}", status)
        } else {
            message
        });
    }
    if !(200..300).contains(&status) {
        return Err(format!("HTTP {}", status));
    }

    serde_json::from_str::<T>(&text).map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = with_auth(Request::get(url))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response).await
}

#[derive(Debug, Clone, Copy)]
pub enum Method {
    Post,
    Put,
}

/// POST/PUT a JSON body and decode the JSON answer
pub async fn send_json<B, T>(method: Method, url: &str, body: &B) -> Result<T, String>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let builder = match method {
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
    };
    let response = with_auth(builder)
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response).await
}

/// POST without a body, ignoring any answer (logout)
pub async fn post_empty(url: &str) -> Result<(), String> {
    let response = with_auth(Request::post(url))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}

/// Raw GET: status and body text, for callers that classify the payload
/// themselves (breakdown cache)
pub async fn get_text(url: &str) -> Result<(u16, String), String> {
    let response = with_auth(Request::get(url))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))?;
    Ok((status, text))
}

/// DELETE; 204 is success, an error body is decoded like in `get_json`
pub async fn delete(url: &str) -> Result<(), String> {
    let response = with_auth(Request::delete(url))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    if response.ok() {
        return Ok(());
    }
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    Err(error_payload_message(&text).unwrap_or_else(|| format!("HTTP {}", status)))
}

/// DELETE that answers with a JSON body (remaining entries etc.)
pub async fn delete_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = with_auth(Request::delete(url))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_payload_detected() {
        assert_eq!(
            error_payload_message(r#"{"error":true,"message":"ไม่พบข้อมูล"}"#),
            Some("ไม่พบข้อมูล".to_string())
        );
    }

    #[test]
    fn test_regular_payload_is_not_error() {
        assert_eq!(error_payload_message(r#"{"itemName":"x","total":3}"#), None);
        assert_eq!(error_payload_message(r#"{"error":false,"message":"ok"}"#), None);
        assert_eq!(error_payload_message("[1,2,3]"), None);
        assert_eq!(error_payload_message("not json"), None);
    }
}
