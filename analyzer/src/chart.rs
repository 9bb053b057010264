//! chart.rs
//!
//! Two stacked panels on one PNG: price line on top, volume bars below, same time axis.

use chrono::{DateTime, Duration, Utc};
use common_lib::error::ChartError;
use common_lib::trade_data::TradeRecord;
use once_cell::sync::Lazy;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::ops::Range;
use std::path::Path;

pub const CHART_SIZE: (u32, u32) = (1200, 800);

/// Fixed bar width whatever the time density; about 0.0001 of a day.
pub const VOLUME_BAR_WIDTH_MS: i64 = 8_640;

const ORANGE: RGBColor = RGBColor(255, 165, 0);

/// Padding used when every trade sits on the same instant.
const SINGLE_INSTANT_PAD_SECS: i64 = 60;

const CHART_FONT: &str = "sans-serif";

/// plotters keeps one global font table; fill it once per process.
static FONT_REGISTERED: Lazy<Result<(), String>> = Lazy::new(|| {
    register_font(CHART_FONT, FontStyle::Normal, include_bytes!("../assets/DejaVuSans.ttf"))
        .map_err(|_| "embedded chart font could not be parsed".to_string())
});

pub trait ChartRenderer {
    /// `trades` arrive sorted ascending by timestamp and non-empty.
    fn render(&self, trades: &[TradeRecord], path: &Path) -> Result<(), ChartError>;
}

/// Axis ranges shared by both panels.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisRanges {
    pub time: Range<DateTime<Utc>>,
    pub price: Range<f64>,
    pub volume: Range<f64>,
}

impl AxisRanges {
    /// `None` for an empty series. Degenerate ranges (one instant, one price) are widened so the
    /// backend always has something to scale.
    pub fn of(trades: &[TradeRecord]) -> Option<AxisRanges> {
        let first = trades.first()?;
        let last = trades.last()?;

        let (mut start, mut end) = (first.timestamp, last.timestamp);
        if start >= end {
            start = start - Duration::seconds(SINGLE_INSTANT_PAD_SECS);
            end = end + Duration::seconds(SINGLE_INSTANT_PAD_SECS);
        }

        let min_price = trades.iter().map(|t| t.price).fold(f64::INFINITY, f64::min);
        let max_price = trades.iter().map(|t| t.price).fold(f64::NEG_INFINITY, f64::max);
        let pad = if max_price > min_price { (max_price - min_price) * 0.05 } else { min_price.abs().max(1.0) * 0.01 };

        let max_quantity = trades.iter().map(|t| t.quantity).fold(0.0, f64::max);
        let volume_top = if max_quantity > 0.0 { max_quantity * 1.1 } else { 1.0 };

        Some(AxisRanges {
            time: start..end,
            price: (min_price - pad)..(max_price + pad),
            volume: 0.0..volume_top,
        })
    }
}

/// PNG output through the plotters bitmap backend.
pub struct PlottersRenderer {
    pub size: (u32, u32),
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        PlottersRenderer { size: CHART_SIZE }
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, trades: &[TradeRecord], path: &Path) -> Result<(), ChartError> {
        let ranges = AxisRanges::of(trades).ok_or_else(|| ChartError("no trades to draw".to_string()))?;
        FONT_REGISTERED.clone().map_err(ChartError)?;
        draw(trades, &ranges, path, self.size).map_err(|e| ChartError(e.to_string()))
    }
}

fn draw(
    trades: &[TradeRecord],
    ranges: &AxisRanges,
    path: &Path,
    size: (u32, u32),
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let (upper, lower) = root.split_vertically((size.1 / 2) as i32);

    let mut price_chart = ChartBuilder::on(&upper)
        .caption("Trade Price History", (CHART_FONT, 22))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(ranges.time.clone(), ranges.price.clone())?;
    price_chart.configure_mesh().y_desc("Price").draw()?;
    price_chart
        .draw_series(LineSeries::new(trades.iter().map(|t| (t.timestamp, t.price)), &BLUE))?
        .label("Trade Price")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    price_chart.draw_series(trades.iter().map(|t| Circle::new((t.timestamp, t.price), 2, BLUE.filled())))?;
    price_chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    let half_bar = Duration::milliseconds(VOLUME_BAR_WIDTH_MS / 2);
    let mut volume_chart = ChartBuilder::on(&lower)
        .caption("Trade Volume", (CHART_FONT, 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(ranges.time.clone(), ranges.volume.clone())?;
    volume_chart.configure_mesh().y_desc("Quantity").x_desc("Time").draw()?;
    volume_chart
        .draw_series(trades.iter().map(|t| {
            Rectangle::new([(t.timestamp - half_bar, 0.0), (t.timestamp + half_bar, t.quantity)], ORANGE.filled())
        }))?
        .label("Volume")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], ORANGE.filled()));
    volume_chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
