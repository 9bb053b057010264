//! trade_data.rs

use crate::error::FetchError;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A single executed trade from the analytics export.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TradeRecord {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub quantity: f64,
    pub symbol: Option<String>,
}

impl TradeRecord {
    /// RFC 3339 first (what the order service exports), then naive date-times taken as UTC.
    pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, FetchError> {
        let text = text.trim();
        if let Ok(dtg) = DateTime::parse_from_rfc3339(text) {
            return Ok(dtg.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .map(|naive| naive.and_utc())
            .ok_or_else(|| FetchError::Timestamp(text.to_string()))
    }
}
