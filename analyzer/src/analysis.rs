//! analysis.rs

use crate::chart::ChartRenderer;
use chrono::{DateTime, Utc};
use common_lib::error::ChartError;
use common_lib::trade_data::TradeRecord;
use std::path::{Path, PathBuf};

/// Headline numbers for the fetched window, logged before the chart is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSummary {
    pub count: usize,
    pub first: DateTime<Utc>,
    pub last: DateTime<Utc>,
    pub min_price: f64,
    pub max_price: f64,
    pub last_price: f64,
    pub total_volume: f64,
    /// volume weighted average price; `None` when total volume is zero
    pub vwap: Option<f64>,
}

impl TradeSummary {
    /// Expects `trades` already sorted by timestamp.
    pub fn of(trades: &[TradeRecord]) -> Option<TradeSummary> {
        let first = trades.first()?;
        let last = trades.last()?;
        let total_volume: f64 = trades.iter().map(|t| t.quantity).sum();
        let notional: f64 = trades.iter().map(|t| t.price * t.quantity).sum();

        Some(TradeSummary {
            count: trades.len(),
            first: first.timestamp,
            last: last.timestamp,
            min_price: trades.iter().map(|t| t.price).fold(f64::INFINITY, f64::min),
            max_price: trades.iter().map(|t| t.price).fold(f64::NEG_INFINITY, f64::max),
            last_price: last.price,
            total_volume,
            vwap: if total_volume > 0.0 { Some(notional / total_volume) } else { None },
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// nothing fetched, or an empty export; nothing drawn, nothing written
    NoData,
    Rendered { path: PathBuf, summary: TradeSummary },
}

/// Sort by time and hand the series to the renderer. `None` and empty inputs are a quiet no-op.
pub fn analyze_and_plot<R: ChartRenderer>(
    trades: Option<Vec<TradeRecord>>,
    renderer: &R,
    output_path: &Path,
) -> Result<AnalysisOutcome, ChartError> {
    let mut trades = match trades {
        Some(trades) if !trades.is_empty() => trades,
        _ => {
            tracing::info!("No data to analyze.");
            return Ok(AnalysisOutcome::NoData);
        }
    };

    tracing::info!("Analyzing data...");
    trades.sort_by_key(|t| t.timestamp);

    let summary = match TradeSummary::of(&trades) {
        Some(summary) => summary,
        None => return Ok(AnalysisOutcome::NoData),
    };
    tracing::info!(
        "[analyze_and_plot] {} trades {} .. {}; price {} - {} (last {}); volume {}; vwap {}",
        summary.count,
        summary.first.to_rfc3339(),
        summary.last.to_rfc3339(),
        summary.min_price,
        summary.max_price,
        summary.last_price,
        summary.total_volume,
        summary.vwap.map(|v| format!("{:.4}", v)).unwrap_or_else(|| "n/a".to_string())
    );

    renderer.render(&trades, output_path)?;
    tracing::info!("Report saved to {}", output_path.display());

    Ok(AnalysisOutcome::Rendered { path: output_path.to_path_buf(), summary })
}
