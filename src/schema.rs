use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Daily price history for a single stock, as served by
/// `GET {base}/stock/{SYMBOL}`.
///
/// The backend relays the upstream vendor format: a `"TimeSeries (Daily)"`
/// object mapping date strings to per-day bars. The map is unordered as
/// received; ordering is imposed later by [`candle_points`].
///
/// [`candle_points`]: crate::transform::candle_points
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct TimeSeriesPayload {
    #[serde(rename = "TimeSeries (Daily)")]
    pub series: Option<HashMap<String, DailyBar>>,
}

/// One day of prices; all four fields arrive as strings.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DailyBar {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
}

/// Portfolio valuation for a user, as served by
/// `GET {base}/api/portfolio?user={username}`.
///
/// The shape is owned by the backend and not contractual, so every field is
/// optional; an unrecognised payload deserializes to an empty portfolio
/// rather than failing the fetch.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct PortfolioPayload {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub total_stock_value: Option<f64>,
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Holding {
    pub symbol: String,
    #[serde(default)]
    pub stock_value: Option<f64>,
}
