/// Fallback address of the WealthWise backend, used when neither the
/// `WEALTHWISE_API_URL` environment variable nor `--base-url` is set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// The backend's demo portfolio user.
pub const DEFAULT_USERNAME: &str = "testUser";

/// Backend connection settings, resolved once at startup and injected into
/// [`ApiClient`]; nothing else reads the environment.
///
/// [`ApiClient`]: crate::client::ApiClient
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub username: String,
}

impl Config {
    pub fn new(base_url: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
        }
    }

    /// Read `WEALTHWISE_API_URL` (populated by `dotenv` in `main`), falling
    /// back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("WEALTHWISE_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url, DEFAULT_USERNAME)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_USERNAME)
    }
}
