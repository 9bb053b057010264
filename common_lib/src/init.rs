//! init.rs
//!
//! Process start-up shared by both binaries: .env and tracing.

use std::path::Path;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

/// Load `<dir>/.env` (falling back to a .env found from the current directory upward) and
/// install the global tracing subscriber. `RUST_LOG` wins over the default `info` filter.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init(dir: &str) {
    // crate-local .env first, then the usual search upward from the working directory
    let env_path = Path::new(dir).join(".env");
    let env_loaded = match dotenvy::from_path(&env_path) {
        Ok(_) => Some(env_path.display().to_string()),
        Err(_) => dotenvy::dotenv().ok().map(|p| p.display().to_string()),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();

    match env_loaded {
        Some(path) => tracing::debug!("[init] loaded environment from {}", &path),
        None => tracing::debug!("[init] no .env found; using process environment"),
    }
}
