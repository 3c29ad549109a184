//! Application configuration. Backend endpoint, fixture mode, paths.

use serde::Deserialize;

/// Default backend when `LEGALLENS_API_BASE_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Fixture analysis completes after this many milliseconds.
pub const DEFAULT_FIXTURE_DELAY_MS: u64 = 2000;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Backend base URL (no trailing slash needed). Read from LEGALLENS_API_BASE_URL.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Use canned analysis instead of the backend. Read from LEGALLENS_FIXTURE_MODE.
    #[serde(default)]
    pub fixture_mode: Option<bool>,

    /// Simulated analysis latency in fixture mode. Read from LEGALLENS_FIXTURE_DELAY_MS.
    #[serde(default)]
    pub fixture_delay_ms: Option<u64>,

    /// Directory for exported reports. Read from LEGALLENS_REPORTS_DIR.
    #[serde(default)]
    pub reports_dir: Option<String>,

    /// Optional whole-request timeout for backend calls. Unset = no timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("LEGALLENS").try_parsing(true));
        if let Ok(path) = std::env::var("LEGALLENS_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the backend base URL without a trailing slash.
    pub fn api_base_url_or_default(&self) -> String {
        self.api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// Fixture mode is on when asked for explicitly, or when no backend URL is configured.
    pub fn is_fixture_mode(&self) -> bool {
        self.fixture_mode.unwrap_or(self.api_base_url.is_none())
    }

    pub fn fixture_delay_ms_or_default(&self) -> u64 {
        self.fixture_delay_ms.unwrap_or(DEFAULT_FIXTURE_DELAY_MS)
    }

    pub fn reports_dir_or_default(&self) -> String {
        self.reports_dir
            .clone()
            .unwrap_or_else(|| "./reports".to_string())
    }
}
