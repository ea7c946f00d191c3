//! Terminal layout: header, symbol selector, homepage blurb, candlestick
//! chart, portfolio panel, footer.

use crate::chart;
use crate::markup;
use crate::state::{StockSymbol, Store};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, store: &Store, portfolio_url: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // symbol selector
            Constraint::Length(4), // homepage blurb
            Constraint::Min(10),   // chart
            Constraint::Length(6), // portfolio
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    draw_header(frame, store, chunks[0]);
    draw_selector(frame, store, chunks[1]);
    draw_homepage(frame, store, chunks[2]);
    chart::render(
        frame,
        chunks[3],
        &store.candles,
        &format!("{} Daily Prices", store.symbol.ticker()),
    );
    draw_portfolio(frame, store, portfolio_url, chunks[4]);
    draw_footer(frame, chunks[5]);
}

fn draw_header(frame: &mut Frame, store: &Store, area: Rect) {
    let mut spans = vec![Span::styled(
        "WealthWise",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if store.loading() {
        spans.push(Span::styled(
            "  fetching…",
            Style::default().fg(Color::DarkGray),
        ));
    }
    let header = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_selector(frame: &mut Frame, store: &Store, area: Rect) {
    let titles: Vec<Line> = StockSymbol::ALL
        .iter()
        .enumerate()
        .map(|(i, symbol)| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", i + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(format!("{} ({})", symbol.company(), symbol.ticker())),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(store.symbol.index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title(" Stock "));
    frame.render_widget(tabs, area);
}

fn draw_homepage(frame: &mut Frame, store: &Store, area: Rect) {
    // markup is untrusted; only its plain-text projection is displayed
    let text = match &store.homepage {
        Some(markup) => markup::plain_text(markup),
        None => String::new(),
    };
    let blurb = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Homepage "));
    frame.render_widget(blurb, area);
}

fn draw_portfolio(frame: &mut Frame, store: &Store, portfolio_url: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Portfolio — {portfolio_url} "));

    let lines = match &store.portfolio {
        Some(payload) => {
            let mut lines = Vec::new();
            let user = payload.user_id.as_deref().unwrap_or("?");
            match payload.total_stock_value {
                Some(total) => lines.push(Line::from(vec![
                    Span::raw(format!("{user}: total ")),
                    Span::styled(
                        format!("${total:.2}"),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])),
                None => lines.push(Line::from(format!("{user}: no valuation"))),
            }
            for holding in &payload.holdings {
                let value = holding
                    .stock_value
                    .map(|v| format!("${v:.2}"))
                    .unwrap_or_else(|| "-".to_string());
                lines.push(Line::from(format!("  {:<6} {value}", holding.symbol)));
            }
            lines
        }
        None => vec![Line::from(Span::styled(
            "no portfolio loaded — press p to fetch",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::raw("WealthWise 2024"),
        Span::styled(
            "   q quit · ←/→/1-5 symbol · p portfolio",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
