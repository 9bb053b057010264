//! http.rs

use crate::error::SettingsError;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Fixed header set for the order API: JSON content type plus the api key.
pub fn api_key_headers(api_key: &str) -> Result<HeaderMap, SettingsError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let key = HeaderValue::from_str(api_key).map_err(|_| SettingsError::InvalidApiKey)?;
    headers.insert(API_KEY_HEADER, key);
    Ok(headers)
}
