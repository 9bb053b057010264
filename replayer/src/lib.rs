//! replayer
//!
//! Replays a csv of orders, one at a time, against the order API.

pub mod order_csv;
pub mod order_gateway;
pub mod order_replay;
