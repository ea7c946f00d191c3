//! Terminal lifecycle and the event loop.
//!
//! Single-threaded cooperative scheduling: the loop `select!`s over key
//! events and fetch results. The three fetches of a batch run concurrently
//! and each resolves on its own; the store's generation tag decides whether
//! a result still applies (see [`Store::apply`]).
//!
//! [`Store::apply`]: crate::state::Store::apply

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::client::ApiClient;
use crate::fetch;
use crate::state::{FetchUpdate, StockSymbol, Store};
use crate::ui;

pub async fn run(client: ApiClient, initial: StockSymbol) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, client, initial).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: ApiClient,
    initial: StockSymbol,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let username = client.config().username.clone();
    let portfolio_url = client.portfolio_url(&username);
    let mut store = Store::new(initial);

    // mount: fire the first batch
    select_symbol(&mut store, initial, &client, &username, &tx);

    let mut events = EventStream::new();
    loop {
        terminal.draw(|frame| ui::draw(frame, &store, &portfolio_url))?;

        tokio::select! {
            Some(update) = rx.recv() => store.apply(update),

            maybe_event = events.next() => {
                let Some(event) = maybe_event else { break };
                let Event::Key(key) = event? else { continue };
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Right | KeyCode::Tab => {
                        let next = store.symbol.next();
                        select_symbol(&mut store, next, &client, &username, &tx);
                    }
                    KeyCode::Left => {
                        let prev = store.symbol.prev();
                        select_symbol(&mut store, prev, &client, &username, &tx);
                    }
                    KeyCode::Char(c @ '1'..='5') => {
                        if let Some(symbol) = StockSymbol::from_index(c as usize - '1' as usize) {
                            select_symbol(&mut store, symbol, &client, &username, &tx);
                        }
                    }
                    // the "view portfolio" affordance: re-request on demand
                    KeyCode::Char('p') => {
                        let generation = store.begin_refresh(1);
                        fetch::spawn_portfolio(&client, &username, generation, &tx);
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

fn select_symbol(
    store: &mut Store,
    symbol: StockSymbol,
    client: &ApiClient,
    username: &str,
    tx: &UnboundedSender<FetchUpdate>,
) {
    log::info!("selected {symbol}; requesting series, homepage and portfolio");
    let generation = store.select_symbol(symbol);
    fetch::spawn_all(client, symbol, username, generation, tx);
}
