use clap::Parser;

/// Terminal dashboard for the WealthWise stock backend.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL; overrides the WEALTHWISE_API_URL environment
    /// variable (default http://localhost:5000).
    #[arg(long)]
    pub base_url: Option<String>,

    /// Portfolio username.
    #[arg(long)]
    pub user: Option<String>,

    /// Initial ticker: MSFT, AAPL, GOOGL, TSLA or NVDA.
    #[arg(long, default_value = "MSFT")]
    pub symbol: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_overrides() {
        let cli = Cli::parse_from(["wealthwise-term"]);
        assert!(cli.base_url.is_none());
        assert!(cli.user.is_none());
        assert_eq!(cli.symbol, "MSFT");

        let cli = Cli::parse_from([
            "wealthwise-term",
            "--base-url",
            "http://api:5000",
            "--user",
            "alice",
            "--symbol",
            "tsla",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("http://api:5000"));
        assert_eq!(cli.user.as_deref(), Some("alice"));
        assert_eq!(cli.symbol, "tsla");
    }
}
