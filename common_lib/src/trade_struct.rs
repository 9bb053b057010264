//! trade_struct.rs
//!
//! Order instructions as read from a replay csv and the JSON body they turn into.

use crate::error::RowParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum OrderType {
    Market,
    Limit,
}

/// One line of the orders csv, untouched. Header: `symbol,side,type,quantity,price`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct OrderRow {
    pub symbol: String,
    pub side: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub quantity: String,
    #[serde(default)]
    pub price: String,
}

/// POST body for the order API.
///
/// `price` is left out of the JSON entirely for rows with an empty price column; the server
/// reads an absent price as a market order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OrderPayload {
    pub symbol: String,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl TryFrom<&OrderRow> for OrderPayload {
    type Error = RowParseError;

    fn try_from(row: &OrderRow) -> Result<Self, Self::Error> {
        let side = OrderSide::from_str(row.side.trim()).map_err(|_| RowParseError::Side(row.side.clone()))?;
        let order_type =
            OrderType::from_str(row.order_type.trim()).map_err(|_| RowParseError::OrderType(row.order_type.clone()))?;
        let quantity = row
            .quantity
            .trim()
            .parse::<i64>()
            .map_err(|_| RowParseError::Quantity(row.quantity.clone()))?;

        let price = match row.price.trim() {
            "" => None,
            p => match p.parse::<f64>() {
                // "NaN" and "inf" parse, but serde_json would send them as null
                Ok(price) if price.is_finite() => Some(price),
                _ => return Err(RowParseError::Price(row.price.clone())),
            },
        };

        Ok(OrderPayload {
            symbol: row.symbol.trim().to_string(),
            side,
            order_type,
            quantity,
            price,
        })
    }
}

impl fmt::Display for OrderRow {
    /// The row as written in the file: `sell AAPL 5 @ 150.00`, or `buy AAPL 10 @ MKT` with no price.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let price = match self.price.trim() {
            "" => "MKT",
            p => p,
        };
        write!(f, "{} {} {} @ {}", self.side.trim(), self.symbol.trim(), self.quantity.trim(), price)
    }
}
