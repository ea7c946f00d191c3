//! Background fetch tasks feeding the view state.
//!
//! The three endpoint fetches are fired concurrently and independently; each
//! task reports exactly one [`FetchUpdate`] over the channel. Errors are
//! already logged inside [`ApiClient`], so a failure here just becomes a
//! `Failed` update for the pending-count bookkeeping.

use crate::client::ApiClient;
use crate::state::{Endpoint, FetchUpdate, StockSymbol};
use crate::transform;
use tokio::sync::mpsc::UnboundedSender;

/// Fire the full batch for a symbol: stock series, homepage, portfolio.
pub fn spawn_all(
    client: &ApiClient,
    symbol: StockSymbol,
    username: &str,
    generation: u64,
    tx: &UnboundedSender<FetchUpdate>,
) {
    spawn_series(client, symbol, generation, tx);
    spawn_homepage(client, generation, tx);
    spawn_portfolio(client, username, generation, tx);
}

pub fn spawn_series(
    client: &ApiClient,
    symbol: StockSymbol,
    generation: u64,
    tx: &UnboundedSender<FetchUpdate>,
) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let update = match client.fetch_stock_series(symbol.ticker()).await {
            Ok(payload) => FetchUpdate::Series {
                generation,
                candles: transform::candle_points(Some(&payload)),
            },
            Err(_) => FetchUpdate::Failed {
                generation,
                endpoint: Endpoint::StockSeries,
            },
        };
        let _ = tx.send(update);
    });
}

pub fn spawn_homepage(client: &ApiClient, generation: u64, tx: &UnboundedSender<FetchUpdate>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let update = match client.fetch_homepage().await {
            Ok(text) => FetchUpdate::Homepage { generation, text },
            Err(_) => FetchUpdate::Failed {
                generation,
                endpoint: Endpoint::Homepage,
            },
        };
        let _ = tx.send(update);
    });
}

pub fn spawn_portfolio(
    client: &ApiClient,
    username: &str,
    generation: u64,
    tx: &UnboundedSender<FetchUpdate>,
) {
    let client = client.clone();
    let username = username.to_string();
    let tx = tx.clone();
    tokio::spawn(async move {
        let update = match client.fetch_portfolio(&username).await {
            Ok(payload) => FetchUpdate::Portfolio { generation, payload },
            Err(_) => FetchUpdate::Failed {
                generation,
                endpoint: Endpoint::Portfolio,
            },
        };
        let _ = tx.send(update);
    });
}
