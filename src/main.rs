use anyhow::Result;
use clap::Parser;

use wealthwise_term::{app, cli::Cli, client::ApiClient, config::Config, state::StockSymbol};

fn preprocess() {
    dotenv::dotenv().ok();
    env_logger::init();
}

#[tokio::main]
async fn main() -> Result<()> {
    preprocess();

    let cli = Cli::parse();
    log::info!("Command line input recorded: {cli:#?}");

    let mut config = Config::from_env();
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(user) = &cli.user {
        config = config.with_username(user);
    }

    let initial = StockSymbol::parse(&cli.symbol).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown ticker {:?}; expected one of MSFT, AAPL, GOOGL, TSLA, NVDA",
            cli.symbol
        )
    })?;

    let client = ApiClient::new(config)?;
    app::run(client, initial).await
}
