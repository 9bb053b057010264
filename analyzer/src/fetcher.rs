//! fetcher.rs
//!
//! GET the trade csv export. Failures never escape: they are logged and come back as
//! `FetchOutcome::Failed` so the caller can stop quietly.

use common_lib::error::FetchError;
use common_lib::trade_data::TradeRecord;
use serde::Deserialize;

const REQUIRED_COLUMNS: [&str; 3] = ["timestamp", "price", "quantity"];
const HEAD_ROWS: usize = 5;

#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(Vec<TradeRecord>),
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn into_trades(self) -> Option<Vec<TradeRecord>> {
        match self {
            FetchOutcome::Fetched(trades) => Some(trades),
            FetchOutcome::Failed(_) => None,
        }
    }
}

/// Columns beyond these (trade_id, buyer_order_id, ...) are ignored.
#[derive(Debug, Deserialize)]
struct TradeCsvRow {
    timestamp: String,
    price: f64,
    quantity: f64,
    #[serde(default)]
    symbol: Option<String>,
}

pub struct TradeFetcher {
    client: reqwest::Client,
    url: String,
}

impl TradeFetcher {
    pub fn new(url: &str) -> TradeFetcher {
        TradeFetcher { client: reqwest::Client::new(), url: url.to_string() }
    }

    pub async fn fetch(&self) -> FetchOutcome {
        tracing::info!("Fetching data from {}...", &self.url);
        match self.fetch_inner().await {
            Ok(trades) => {
                tracing::info!("Fetched {} trades.", trades.len());
                for trade in trades.iter().take(HEAD_ROWS) {
                    tracing::info!("  {}  price: {}  quantity: {}", trade.timestamp.to_rfc3339(), trade.price, trade.quantity);
                }
                FetchOutcome::Fetched(trades)
            }
            Err(e) => {
                tracing::error!("Error fetching data: {}", &e);
                FetchOutcome::Failed(e)
            }
        }
    }

    async fn fetch_inner(&self) -> Result<Vec<TradeRecord>, FetchError> {
        let response = self.client.get(&self.url).send().await.map_err(FetchError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let text = response.text().await.map_err(FetchError::Body)?;
        parse_trades_csv(&text)
    }
}

/// Typed parse of the export body. Needs a header with at least timestamp, price, quantity.
pub fn parse_trades_csv(text: &str) -> Result<Vec<TradeRecord>, FetchError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|column| !headers.iter().any(|h| h == **column)) {
        return Err(FetchError::MissingColumn(missing.to_string()));
    }

    let mut trades = vec![];
    for row in reader.deserialize::<TradeCsvRow>() {
        let row = row?;
        trades.push(TradeRecord {
            timestamp: TradeRecord::parse_timestamp(&row.timestamp)?,
            price: row.price,
            quantity: row.quantity,
            symbol: row.symbol,
        });
    }
    Ok(trades)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_order_service_export() {
        let text = "trade_id,symbol,price,quantity,buyer_order_id,seller_order_id,timestamp\n\
                    7f1c,AAPL,150.25,10,b1,s1,2024-03-01T10:00:05.500Z\n\
                    8a2d,AAPL,150.00,3,b2,s2,2024-03-01T10:00:01Z\n";
        let trades = parse_trades_csv(text).unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].price, 150.25);
        assert_eq!(trades[0].quantity, 10.0);
        assert_eq!(trades[0].symbol.as_deref(), Some("AAPL"));
        assert!(trades[1].timestamp < trades[0].timestamp);
    }

    #[test]
    fn minimal_columns_are_enough() {
        let trades = parse_trades_csv("timestamp,price,quantity\n2024-03-01 10:00:00,1.5,2\n").unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].symbol, None);
    }

    #[test]
    fn header_only_is_an_empty_dataset() {
        assert!(parse_trades_csv("timestamp,price,quantity\n").unwrap().is_empty());
    }

    #[test]
    fn missing_column_is_reported() {
        let result = parse_trades_csv("timestamp,price\n2024-03-01T10:00:00Z,1.0\n");
        assert!(matches!(result, Err(FetchError::MissingColumn(c)) if c == "quantity"));
    }

    #[test]
    fn empty_body_is_missing_columns() {
        assert!(matches!(parse_trades_csv(""), Err(FetchError::MissingColumn(_))));
    }

    #[test]
    fn bad_price_and_bad_timestamp_fail() {
        assert!(matches!(
            parse_trades_csv("timestamp,price,quantity\n2024-03-01T10:00:00Z,abc,1\n"),
            Err(FetchError::Csv(_))
        ));
        assert!(matches!(
            parse_trades_csv("timestamp,price,quantity\nnot-a-time,1.0,1\n"),
            Err(FetchError::Timestamp(_))
        ));
    }
}
