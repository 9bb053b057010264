//! analyzer
//!
//! Fetch the trade history export, sort it and chart price and volume.

pub mod analysis;
pub mod chart;
pub mod fetcher;
