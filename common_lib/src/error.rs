//! error.rs
//!
//! Error taxonomy for the fetch, replay and render paths.

use thiserror::Error;

/// Anything that stops the analytics fetch from producing a dataset. The fetcher never
/// propagates these; they end up inside `FetchOutcome::Failed`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("could not read response body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("malformed trade csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("trade csv is missing the '{0}' column")]
    MissingColumn(String),
    #[error("unrecognised timestamp '{0}'")]
    Timestamp(String),
}

/// A field of an order row that could not be converted to its typed form.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum RowParseError {
    #[error("quantity '{0}' is not an integer")]
    Quantity(String),
    #[error("price '{0}' is not a number")]
    Price(String),
    #[error("unknown side '{0}'")]
    Side(String),
    #[error("unknown order type '{0}'")]
    OrderType(String),
}

#[derive(Debug, Error)]
#[error("chart rendering failed: {0}")]
pub struct ChartError(pub String);

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("api key is not a valid header value")]
    InvalidApiKey,
}
