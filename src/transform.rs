use crate::schema::TimeSeriesPayload;
use chrono::NaiveDate;

/// One candle of the chart series, derived from a single payload entry.
///
/// The four values are parsed from the backend's string fields; malformed
/// numbers become `NaN` rather than raising an error, and the renderer is
/// expected to cope.
#[derive(Debug, Clone, PartialEq)]
pub struct CandlePoint {
    pub dated: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

fn parse_price(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

/// Flatten a raw [`TimeSeriesPayload`] into chart-ready candles.
///
/// Returns an empty vec for an absent payload or series. Output is sorted
/// ascending by date regardless of the map's iteration order. Entries whose
/// date key does not parse are skipped with a warning.
pub fn candle_points(payload: Option<&TimeSeriesPayload>) -> Vec<CandlePoint> {
    let Some(series) = payload.and_then(|p| p.series.as_ref()) else {
        return Vec::new();
    };

    let mut points: Vec<CandlePoint> = series
        .iter()
        .filter_map(|(key, bar)| {
            let dated = match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
                Ok(dated) => dated,
                Err(e) => {
                    log::warn!("skipping series entry with unparseable date {key:?}: {e}");
                    return None;
                }
            };
            Some(CandlePoint {
                dated,
                open: parse_price(&bar.open),
                high: parse_price(&bar.high),
                low: parse_price(&bar.low),
                close: parse_price(&bar.close),
            })
        })
        .collect();

    points.sort_by_key(|point| point.dated);
    points
}
