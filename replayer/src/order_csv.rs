//! order_csv.rs
//!
//! Locating and reading the orders csv.

use crate::order_replay::ReplayError;
use common_lib::trade_struct::OrderRow;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

pub const DEFAULT_ORDERS_CSV: &str = "data/test_orders.csv";

/// Paths to try, in order, for the orders file.
///
/// An explicit base directory is authoritative. Without one the path is tried as given and then
/// once more from the parent directory, for operators running from inside a `scripts/`-style
/// subfolder.
pub fn candidate_paths(path: &Path, base_dir: Option<&Path>) -> Vec<PathBuf> {
    match base_dir {
        Some(base) => vec![base.join(path)],
        None if path.is_absolute() => vec![path.to_path_buf()],
        None => vec![path.to_path_buf(), Path::new("..").join(path)],
    }
}

/// Read every row of the orders csv into memory, preserving file order. Relative paths resolve
/// against the process working directory.
pub fn load_orders(path: &Path, base_dir: Option<&Path>) -> Result<(PathBuf, Vec<OrderRow>), ReplayError> {
    load_orders_from(Path::new(""), path, base_dir)
}

/// As `load_orders`, with relative candidates resolved against `cwd`. An empty `cwd` leaves them
/// relative, so the reported paths match what the operator typed.
pub fn load_orders_from(
    cwd: &Path,
    path: &Path,
    base_dir: Option<&Path>,
) -> Result<(PathBuf, Vec<OrderRow>), ReplayError> {
    let candidates: Vec<PathBuf> = candidate_paths(path, base_dir).iter().map(|c| cwd.join(c)).collect();
    for candidate in candidates.iter() {
        match File::open(candidate) {
            Ok(file) => {
                let orders = read_orders(file)?;
                return Ok((candidate.clone(), orders));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("[load_orders] not found at {}", candidate.display());
            }
            Err(e) => {
                return Err(ReplayError::Io { path: candidate.clone(), source: e });
            }
        }
    }
    Err(ReplayError::OrdersFileNotFound { tried: candidates })
}

/// Parse orders csv text; header `symbol,side,type,quantity,price`, fields trimmed.
pub fn read_orders<R: Read>(reader: R) -> Result<Vec<OrderRow>, ReplayError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut orders = vec![];
    for record in csv_reader.deserialize::<OrderRow>() {
        orders.push(record?);
    }
    Ok(orders)
}
