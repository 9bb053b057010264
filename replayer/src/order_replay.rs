//! order_replay.rs
//!
//! Sequential replay of an orders csv. Single forward pass: row i is submitted, classified and
//! logged before row i+1 is even parsed. Nothing is persisted, so an interrupted run starts over
//! from row 1 on the next invocation and will resubmit whatever already went through.

use crate::order_csv::load_orders;
use crate::order_gateway::{GatewayError, GatewayResponse, OrderGateway};
use common_lib::error::RowParseError;
use common_lib::trade_struct::{OrderPayload, OrderRow};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const SUCCESS_STATUS: u16 = 200;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("orders file not found (tried {tried:?})")]
    OrdersFileNotFound { tried: Vec<PathBuf> },
    #[error("could not open {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed orders csv: {0}")]
    Csv(#[from] csv::Error),
    /// Fatal: the run stops at this row and its tally is thrown away.
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: RowParseError,
    },
}

/// Exactly one of these per submitted row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Success,
    Rejected { status: u16, body: String },
    TransportError(String),
}

impl RowOutcome {
    /// Only HTTP 200 counts; 201, 202 and friends are rejections like any other status.
    pub fn classify(result: Result<GatewayResponse, GatewayError>) -> RowOutcome {
        match result {
            Ok(response) if response.status == SUCCESS_STATUS => RowOutcome::Success,
            Ok(response) => RowOutcome::Rejected { status: response.status, body: response.body },
            Err(e) => RowOutcome::TransportError(e.0),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RowOutcome::Success)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub success: usize,
    pub failed: usize,
}

impl ReplaySummary {
    pub fn total(&self) -> usize {
        self.success + self.failed
    }
}

pub struct OrderReplay<G: OrderGateway> {
    gateway: G,
    delay: Duration,
}

impl<G: OrderGateway> OrderReplay<G> {
    pub fn new(gateway: G, delay: Duration) -> OrderReplay<G> {
        OrderReplay { gateway, delay }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Load the orders file (see `load_orders` for path resolution) and replay it.
    pub async fn replay_file(&self, path: &Path, base_dir: Option<&Path>) -> Result<ReplaySummary, ReplayError> {
        tracing::info!("Loading orders from {}...", path.display());
        let (found, orders) = load_orders(path, base_dir)?;
        if found != path {
            tracing::info!("[replay_file] using {}", found.display());
        }
        self.replay(&orders).await
    }

    pub async fn replay(&self, orders: &[OrderRow]) -> Result<ReplaySummary, ReplayError> {
        let total = orders.len();
        tracing::info!("Found {} orders. Starting replay...", total);

        let mut summary = ReplaySummary::default();

        for (i, row) in orders.iter().enumerate() {
            let position = i + 1;
            let payload = OrderPayload::try_from(row).map_err(|source| {
                tracing::error!("[{}/{}] unreadable row {:?}: {}", position, total, row, &source);
                ReplayError::Row { row: position, source }
            })?;

            let outcome = RowOutcome::classify(self.gateway.submit(&payload).await);
            match &outcome {
                RowOutcome::Success => {
                    tracing::info!("[{}/{}] SUCCESS: {}", position, total, row);
                    summary.success += 1;
                }
                RowOutcome::Rejected { status, body } => {
                    tracing::info!("[{}/{}] FAILED ({}): {}", position, total, status, body);
                    summary.failed += 1;
                }
                RowOutcome::TransportError(message) => {
                    tracing::info!("[{}/{}] ERROR: {}", position, total, message);
                    summary.failed += 1;
                }
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        tracing::info!("{}", "-".repeat(30));
        tracing::info!("Replay Complete.");
        tracing::info!("Success: {}", summary.success);
        tracing::info!("Failed: {}", summary.failed);

        Ok(summary)
    }
}
