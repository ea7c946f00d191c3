use crate::schema::PortfolioPayload;
use crate::transform::CandlePoint;
use std::fmt;

/// The fixed set of tickers offered by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockSymbol {
    Msft,
    Aapl,
    Googl,
    Tsla,
    Nvda,
}

impl StockSymbol {
    pub const ALL: [StockSymbol; 5] = [
        StockSymbol::Msft,
        StockSymbol::Aapl,
        StockSymbol::Googl,
        StockSymbol::Tsla,
        StockSymbol::Nvda,
    ];

    pub fn ticker(self) -> &'static str {
        match self {
            StockSymbol::Msft => "MSFT",
            StockSymbol::Aapl => "AAPL",
            StockSymbol::Googl => "GOOGL",
            StockSymbol::Tsla => "TSLA",
            StockSymbol::Nvda => "NVDA",
        }
    }

    pub fn company(self) -> &'static str {
        match self {
            StockSymbol::Msft => "Microsoft",
            StockSymbol::Aapl => "Apple",
            StockSymbol::Googl => "Google",
            StockSymbol::Tsla => "Tesla",
            StockSymbol::Nvda => "Nvidia",
        }
    }

    /// Case-insensitive ticker lookup.
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_uppercase();
        Self::ALL.into_iter().find(|s| s.ticker() == upper)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for StockSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

/// Which of the three backend endpoints a fetch targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    StockSeries,
    Homepage,
    Portfolio,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::StockSeries => "stock series",
            Endpoint::Homepage => "homepage",
            Endpoint::Portfolio => "portfolio",
        })
    }
}

/// Outcome of one background fetch, tagged with the generation it was
/// issued under so stale responses can be discarded.
#[derive(Debug)]
pub enum FetchUpdate {
    Series {
        generation: u64,
        candles: Vec<CandlePoint>,
    },
    Homepage {
        generation: u64,
        text: String,
    },
    Portfolio {
        generation: u64,
        payload: PortfolioPayload,
    },
    /// The fetch failed; the error was logged at the fetch site. The
    /// corresponding store field keeps its previous value.
    Failed {
        generation: u64,
        endpoint: Endpoint,
    },
}

impl FetchUpdate {
    fn generation(&self) -> u64 {
        match self {
            FetchUpdate::Series { generation, .. }
            | FetchUpdate::Homepage { generation, .. }
            | FetchUpdate::Portfolio { generation, .. }
            | FetchUpdate::Failed { generation, .. } => *generation,
        }
    }
}

/// The view state behind the UI: selected symbol plus the last-applied
/// result of each of the three fetches.
///
/// Each fetch writes to its own field, so the three completions may arrive
/// in any order. Selecting a symbol bumps the generation; in-flight
/// responses from an older generation are dropped on arrival instead of
/// overwriting the newer selection.
#[derive(Debug)]
pub struct Store {
    pub symbol: StockSymbol,
    pub candles: Vec<CandlePoint>,
    pub homepage: Option<String>,
    pub portfolio: Option<PortfolioPayload>,
    generation: u64,
    pending: u8,
}

impl Store {
    pub fn new(symbol: StockSymbol) -> Self {
        Self {
            symbol,
            candles: Vec::new(),
            homepage: None,
            portfolio: None,
            generation: 0,
            pending: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Any fetches still outstanding for the current generation?
    pub fn loading(&self) -> bool {
        self.pending > 0
    }

    /// Record a new selection and open a fresh batch of three fetches.
    /// Returns the generation the batch must be tagged with.
    pub fn select_symbol(&mut self, symbol: StockSymbol) -> u64 {
        self.symbol = symbol;
        self.generation += 1;
        self.pending = 3;
        self.generation
    }

    /// Register `count` extra fetches against the current generation
    /// (e.g. a manual portfolio refresh).
    pub fn begin_refresh(&mut self, count: u8) -> u64 {
        self.pending = self.pending.saturating_add(count);
        self.generation
    }

    /// Apply one fetch outcome to its slice of the state.
    pub fn apply(&mut self, update: FetchUpdate) {
        if update.generation() != self.generation {
            log::debug!(
                "discarding stale update (generation {} != {}): {update:?}",
                update.generation(),
                self.generation
            );
            return;
        }
        self.pending = self.pending.saturating_sub(1);

        match update {
            FetchUpdate::Series { candles, .. } => self.candles = candles,
            FetchUpdate::Homepage { text, .. } => self.homepage = Some(text),
            FetchUpdate::Portfolio { payload, .. } => self.portfolio = Some(payload),
            FetchUpdate::Failed { endpoint, .. } => {
                log::debug!("{endpoint} fetch failed; keeping previous state");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candle(day: u32) -> CandlePoint {
        CandlePoint {
            dated: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
        }
    }

    #[test]
    fn symbol_cycling_wraps() {
        assert_eq!(StockSymbol::Msft.next(), StockSymbol::Aapl);
        assert_eq!(StockSymbol::Nvda.next(), StockSymbol::Msft);
        assert_eq!(StockSymbol::Msft.prev(), StockSymbol::Nvda);
    }

    #[test]
    fn symbol_parse_is_case_insensitive() {
        assert_eq!(StockSymbol::parse("msft"), Some(StockSymbol::Msft));
        assert_eq!(StockSymbol::parse(" GOOGL "), Some(StockSymbol::Googl));
        assert_eq!(StockSymbol::parse("IBM"), None);
    }

    #[test]
    fn current_generation_updates_apply() {
        let mut store = Store::new(StockSymbol::Msft);
        let generation = store.select_symbol(StockSymbol::Msft);
        assert!(store.loading());

        store.apply(FetchUpdate::Series {
            generation,
            candles: vec![candle(2)],
        });
        store.apply(FetchUpdate::Homepage {
            generation,
            text: "welcome".to_string(),
        });
        store.apply(FetchUpdate::Portfolio {
            generation,
            payload: PortfolioPayload::default(),
        });

        assert_eq!(store.candles.len(), 1);
        assert_eq!(store.homepage.as_deref(), Some("welcome"));
        assert!(store.portfolio.is_some());
        assert!(!store.loading());
    }

    #[test]
    fn stale_generation_updates_are_discarded() {
        let mut store = Store::new(StockSymbol::Msft);
        let old = store.select_symbol(StockSymbol::Msft);

        // user switches to AAPL before the MSFT responses land
        let _new = store.select_symbol(StockSymbol::Aapl);

        store.apply(FetchUpdate::Series {
            generation: old,
            candles: vec![candle(2)],
        });
        store.apply(FetchUpdate::Homepage {
            generation: old,
            text: "stale".to_string(),
        });

        assert!(store.candles.is_empty());
        assert!(store.homepage.is_none());
        assert!(store.loading());
    }

    #[test]
    fn failed_fetch_keeps_previous_field() {
        let mut store = Store::new(StockSymbol::Msft);
        let generation = store.select_symbol(StockSymbol::Msft);
        store.apply(FetchUpdate::Series {
            generation,
            candles: vec![candle(2)],
        });

        let generation = store.select_symbol(StockSymbol::Aapl);
        store.apply(FetchUpdate::Failed {
            generation,
            endpoint: Endpoint::StockSeries,
        });

        // previous series stays on screen; nothing is cleared
        assert_eq!(store.candles.len(), 1);
        assert_eq!(store.symbol, StockSymbol::Aapl);
    }

    #[test]
    fn one_failure_does_not_block_the_others() {
        let mut store = Store::new(StockSymbol::Msft);
        let generation = store.select_symbol(StockSymbol::Msft);

        store.apply(FetchUpdate::Failed {
            generation,
            endpoint: Endpoint::Portfolio,
        });
        store.apply(FetchUpdate::Series {
            generation,
            candles: vec![candle(3)],
        });
        store.apply(FetchUpdate::Homepage {
            generation,
            text: "ok".to_string(),
        });

        assert_eq!(store.candles.len(), 1);
        assert_eq!(store.homepage.as_deref(), Some("ok"));
        assert!(store.portfolio.is_none());
        assert!(!store.loading());
    }

    #[test]
    fn manual_refresh_shares_the_generation() {
        let mut store = Store::new(StockSymbol::Msft);
        let batch = store.select_symbol(StockSymbol::Msft);
        let refresh = store.begin_refresh(1);
        assert_eq!(batch, refresh);
        assert!(store.loading());
    }
}
