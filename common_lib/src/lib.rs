//! common_lib/src/lib.rs

pub mod error;
pub mod http;
pub mod init;
pub mod settings;
pub mod trade_data;
pub mod trade_struct;
