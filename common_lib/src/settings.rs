//! settings.rs
//!
//! Deployment targets for both utilities. Defaults point at a local order service; every field
//! can be overridden from the environment (or .env) with the `TRADE_TOOLS_` prefix, e.g.
//! `TRADE_TOOLS_ORDERS_URL=http://10.0.0.5:8080/api/orders`.

use crate::error::SettingsError;
use config::{Config, Environment};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "TRADE_TOOLS";

pub const DEFAULT_ANALYTICS_URL: &str = "http://localhost:8080/api/analytics/trades/csv";
pub const DEFAULT_ORDERS_URL: &str = "http://localhost:8080/api/orders";
pub const DEFAULT_API_KEY: &str = "test-api-key";
pub const DEFAULT_OUTPUT_PATH: &str = "analytics_report.png";
pub const DEFAULT_REPLAY_DELAY_MS: u64 = 50;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// GET target returning the trade history as csv
    pub analytics_url: String,
    /// POST target for order submission
    pub orders_url: String,
    /// value sent in the X-API-KEY header
    pub api_key: String,
    /// where the rendered report is written
    pub output_path: String,
    /// pause after each replayed order; 0 disables it
    pub replay_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            analytics_url: DEFAULT_ANALYTICS_URL.to_string(),
            orders_url: DEFAULT_ORDERS_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            replay_delay_ms: DEFAULT_REPLAY_DELAY_MS,
        }
    }
}

impl Settings {
    /// Defaults overlaid with `TRADE_TOOLS_*` from the process environment.
    pub fn load() -> Result<Settings, SettingsError> {
        Self::load_from(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    fn load_from(environment: Environment) -> Result<Settings, SettingsError> {
        let settings = Config::builder()
            .set_default("analytics_url", DEFAULT_ANALYTICS_URL)?
            .set_default("orders_url", DEFAULT_ORDERS_URL)?
            .set_default("api_key", DEFAULT_API_KEY)?
            .set_default("output_path", DEFAULT_OUTPUT_PATH)?
            .set_default("replay_delay_ms", DEFAULT_REPLAY_DELAY_MS)?
            .add_source(environment)
            .build()?
            .try_deserialize::<Settings>()?;
        tracing::debug!("[Settings::load] orders_url: {}, analytics_url: {}", &settings.orders_url, &settings.analytics_url);
        Ok(settings)
    }
}
