//! order_gateway.rs
//!
//! Where replayed orders go. The driver only sees `OrderGateway`; `HttpOrderGateway` is the real
//! POST to the order API.

use async_trait::async_trait;
use common_lib::error::SettingsError;
use common_lib::http::api_key_headers;
use common_lib::trade_struct::OrderPayload;
use reqwest::header::HeaderMap;
use thiserror::Error;

/// Whatever the server said, good or bad.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: String,
}

/// The request never produced a response (refused, reset, dns, ...).
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{0}")]
pub struct GatewayError(pub String);

#[async_trait]
pub trait OrderGateway {
    async fn submit(&self, payload: &OrderPayload) -> Result<GatewayResponse, GatewayError>;
}

pub struct HttpOrderGateway {
    client: reqwest::Client,
    url: String,
    headers: HeaderMap,
}

impl HttpOrderGateway {
    /// No timeout is set on the client; a hung server blocks the replay.
    pub fn new(url: &str, api_key: &str) -> Result<HttpOrderGateway, SettingsError> {
        Ok(HttpOrderGateway {
            client: reqwest::Client::new(),
            url: url.to_string(),
            headers: api_key_headers(api_key)?,
        })
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn submit(&self, payload: &OrderPayload) -> Result<GatewayResponse, GatewayError> {
        let response = self
            .client
            .post(&self.url)
            .headers(self.headers.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("[submit] reqwest error: {:?}", &e);
                GatewayError(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("[submit] could not read response body: {:?}", &e);
                String::new()
            }
        };
        Ok(GatewayResponse { status, body })
    }
}
