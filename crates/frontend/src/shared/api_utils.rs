//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
///
/// # Example
/// ```ignore
/// let url = format!("{}/api/admin/offices/{}", api_base(), id);
/// ```
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
///
/// # Arguments
/// * `path` - The API path (should start with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Build a full API URL with a query string serialized from `query`.
/// Empty optional fields are skipped by `serde_qs`.
pub fn api_url_with_query<Q: serde::Serialize>(path: &str, query: &Q) -> Result<String, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("Failed to build query: {}", e))?;
    if qs.is_empty() {
        Ok(api_url(path))
    } else {
        Ok(format!("{}?{}", api_url(path), qs))
    }
}

/// Encode a single path segment (ids, config kinds)
pub fn path_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
