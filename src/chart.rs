//! Candlestick chart rendered as text.
//!
//! One terminal column per candle, drawn row by row with box-drawing
//! glyphs. Three vertical zones per candle: upper wick, body, lower wick,
//! with 0.25/0.75 fractional thresholds for sub-cell precision. The chart
//! is redrawn from the series on every frame; nothing is retained between
//! frames.

use crate::transform::CandlePoint;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const GLYPH_VOID: char = ' ';
const GLYPH_BODY: char = '┃';
const GLYPH_HALF_BODY_BOTTOM: char = '╻';
const GLYPH_HALF_BODY_TOP: char = '╹';
const GLYPH_WICK: char = '│';
const GLYPH_BODY_TO_WICK_TOP: char = '╽';
const GLYPH_BODY_TO_WICK_BOTTOM: char = '╿';
const GLYPH_UPPER_WICK: char = '╷';
const GLYPH_LOWER_WICK: char = '╵';

const BULLISH: Color = Color::Green;
const BEARISH: Color = Color::Red;

/// Columns reserved for the price axis, including the separator.
const Y_AXIS_WIDTH: u16 = 10;
/// A date label every this many candles on the x axis.
const LABEL_STEP: usize = 10;

pub struct CandleChart<'a> {
    candles: &'a [CandlePoint],
    min_price: f64,
    max_price: f64,
    height: u16,
    width: u16,
}

impl<'a> CandleChart<'a> {
    pub fn new(candles: &'a [CandlePoint], area: Rect) -> Self {
        let (min_price, max_price) = price_bounds(candles);
        Self {
            candles,
            min_price,
            max_price,
            // borders above and below, plus one x-axis line
            height: area.height.saturating_sub(3),
            width: area.width.saturating_sub(Y_AXIS_WIDTH + 2),
        }
    }

    /// The newest candles that fit on screen, one column each.
    fn visible(&self) -> &[CandlePoint] {
        let max = self.width as usize;
        if self.candles.len() <= max {
            self.candles
        } else {
            &self.candles[self.candles.len() - max..]
        }
    }

    fn price_to_row(&self, price: f64) -> f64 {
        if self.max_price == self.min_price {
            return self.height as f64 / 2.0;
        }
        (price - self.min_price) / (self.max_price - self.min_price) * self.height as f64
    }

    /// Pick the glyph for one candle at one row (row 1 = bottom).
    fn glyph(&self, candle: &CandlePoint, row: u16) -> char {
        if !(candle.open.is_finite()
            && candle.high.is_finite()
            && candle.low.is_finite()
            && candle.close.is_finite())
        {
            // NaN values come from malformed payload fields; draw nothing
            return GLYPH_VOID;
        }

        let row = row as f64;
        let high = self.price_to_row(candle.high);
        let low = self.price_to_row(candle.low);
        let body_top = self.price_to_row(candle.open.max(candle.close));
        let body_bottom = self.price_to_row(candle.open.min(candle.close));

        if high.ceil() >= row && row >= body_top.floor() {
            // upper wick zone
            if body_top - row > 0.75 {
                GLYPH_BODY
            } else if body_top - row > 0.25 {
                if high - row > 0.75 {
                    GLYPH_BODY_TO_WICK_TOP
                } else {
                    GLYPH_HALF_BODY_BOTTOM
                }
            } else if high - row > 0.75 {
                GLYPH_WICK
            } else if high - row > 0.25 {
                GLYPH_UPPER_WICK
            } else {
                GLYPH_VOID
            }
        } else if body_top.floor() >= row && row >= body_bottom.ceil() {
            // body zone
            GLYPH_BODY
        } else if body_bottom.ceil() >= row && row >= low.floor() {
            // lower wick zone
            if body_bottom - row < 0.25 {
                GLYPH_BODY
            } else if body_bottom - row < 0.75 {
                if low - row < 0.25 {
                    GLYPH_BODY_TO_WICK_BOTTOM
                } else {
                    GLYPH_HALF_BODY_TOP
                }
            } else if low - row < 0.25 {
                GLYPH_WICK
            } else if low - row < 0.75 {
                GLYPH_LOWER_WICK
            } else {
                GLYPH_VOID
            }
        } else {
            GLYPH_VOID
        }
    }

    fn axis_label(&self, row: u16) -> String {
        if row % 4 == 0 {
            let price = self.min_price
                + row as f64 * (self.max_price - self.min_price) / self.height.max(1) as f64;
            format!("{price:>8.2} │")
        } else {
            format!("{:>8} │", "")
        }
    }

    fn x_axis(&self, visible: &[CandlePoint]) -> Line<'static> {
        let mut text = " ".repeat(Y_AXIS_WIDTH as usize);
        let mut written = 0;
        for (i, candle) in visible.iter().enumerate() {
            if i % LABEL_STEP != 0 || i < written {
                continue;
            }
            text.push_str(&" ".repeat(i - written));
            let label = candle.dated.format("%m-%d").to_string();
            written = i + label.len();
            text.push_str(&label);
        }
        Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let visible = self.visible();
        let mut lines = Vec::with_capacity(self.height as usize + 1);

        for row in (1..=self.height).rev() {
            let mut spans = vec![Span::styled(
                self.axis_label(row),
                Style::default().fg(Color::DarkGray),
            )];
            for candle in visible {
                let color = if candle.close >= candle.open { BULLISH } else { BEARISH };
                spans.push(Span::styled(
                    self.glyph(candle, row).to_string(),
                    Style::default().fg(color),
                ));
            }
            lines.push(Line::from(spans));
        }

        lines.push(self.x_axis(visible));
        lines
    }
}

/// Min/max over all finite highs and lows, padded by a 2% margin.
fn price_bounds(candles: &[CandlePoint]) -> (f64, f64) {
    let max = candles
        .iter()
        .map(|c| c.high)
        .filter(|h| h.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    let min = candles
        .iter()
        .map(|c| c.low)
        .filter(|l| l.is_finite())
        .fold(f64::INFINITY, f64::min);

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let margin = (max - min) * 0.02;
    ((min - margin).max(0.0), max + margin)
}

/// Draw the chart widget for the current series.
pub fn render(frame: &mut Frame, area: Rect, candles: &[CandlePoint], title: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "));

    if candles.is_empty() {
        let placeholder = Paragraph::new("no price data loaded")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let chart = CandleChart::new(candles, area);
    frame.render_widget(Paragraph::new(chart.lines()).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candle(day: u32, open: f64, high: f64, low: f64, close: f64) -> CandlePoint {
        CandlePoint {
            dated: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open,
            high,
            low,
            close,
        }
    }

    fn chart(candles: &[CandlePoint]) -> CandleChart<'_> {
        // 13 rows tall -> height 10 after borders and x axis
        CandleChart::new(candles, Rect::new(0, 0, 80, 13))
    }

    #[test]
    fn bounds_add_margin_and_skip_nan() {
        let candles = vec![
            candle(2, 5.0, 10.0, 2.0, 6.0),
            candle(3, f64::NAN, f64::NAN, f64::NAN, f64::NAN),
        ];
        let (min, max) = price_bounds(&candles);
        assert!(min < 2.0 && min > 1.5);
        assert!(max > 10.0 && max < 10.5);
    }

    #[test]
    fn bounds_of_all_nan_series_are_sane() {
        let candles = vec![candle(2, f64::NAN, f64::NAN, f64::NAN, f64::NAN)];
        assert_eq!(price_bounds(&candles), (0.0, 1.0));
    }

    #[test]
    fn glyphs_follow_the_three_zones() {
        let candles = vec![candle(3, 2.0, 9.9, 0.1, 8.0)];
        // fixed bounds so prices map 1:1 onto rows
        let chart = CandleChart {
            candles: &candles,
            min_price: 0.0,
            max_price: 10.0,
            height: 10,
            width: 60,
        };
        let subject = &candles[0];

        assert_eq!(chart.glyph(subject, 5), GLYPH_BODY);
        assert_eq!(chart.glyph(subject, 9), GLYPH_WICK);
        assert_eq!(chart.glyph(subject, 1), GLYPH_WICK);
    }

    #[test]
    fn nan_candle_renders_blank() {
        let candles = vec![
            candle(2, 1.0, 2.0, 0.5, 1.5),
            candle(3, f64::NAN, 2.0, 0.5, 1.5),
        ];
        let chart = chart(&candles);
        for row in 1..=10 {
            assert_eq!(chart.glyph(&candles[1], row), GLYPH_VOID);
        }
    }

    #[test]
    fn lines_cover_height_plus_axis() {
        let candles = vec![candle(2, 1.0, 2.0, 0.5, 1.5)];
        let chart = chart(&candles);
        assert_eq!(chart.lines().len(), 11);
    }

    #[test]
    fn x_axis_labels_start_at_first_candle() {
        let candles: Vec<CandlePoint> =
            (1..=20).map(|d| candle(d, 1.0, 2.0, 0.5, 1.5)).collect();
        let chart = chart(&candles);
        let axis = chart.x_axis(chart.visible());
        let text: String = axis.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.trim_start().starts_with("01-01"));
        assert!(text.contains("01-11"));
    }

    #[test]
    fn visible_keeps_the_newest_candles() {
        let candles: Vec<CandlePoint> =
            (1..=25).map(|d| candle(d, 1.0, 2.0, 0.5, 1.5)).collect();
        // width 5 + axis + borders
        let chart = CandleChart::new(&candles, Rect::new(0, 0, Y_AXIS_WIDTH + 2 + 5, 13));
        let visible = chart.visible();
        assert_eq!(visible.len(), 5);
        assert_eq!(visible[0].dated, NaiveDate::from_ymd_opt(2024, 1, 21).unwrap());
    }
}
