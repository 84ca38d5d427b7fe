use std::{env, fs, path::PathBuf, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache TTL in seconds (default: 86,400)
    pub cache_ttl_seconds: u64,
    /// Seconds between expired-entry sweeps (default: 600)
    pub cache_sweep_interval_seconds: u64,
    /// Where the cache snapshot is read from and written to (default: "goodreads.cache")
    pub cache_snapshot_path: PathBuf,
    /// Base URL of the reading API (default: "https://www.goodreads.com")
    pub goodreads_api_url: String,
    /// Developer key for the reading API
    pub goodreads_key: String,
    /// Path prefix every route is mounted under (default: "")
    pub root_url: String,
    /// Upper bound on a single timeline request in seconds (default: 30)
    pub fetch_timeout_seconds: u64,
    /// Only count reviews with a positive read count (default: false)
    pub require_read_count: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 86,400)
    /// - `CACHE_SWEEP_INTERVAL_SECONDS` - Sweep interval (default: 600)
    /// - `CACHE_SNAPSHOT_PATH` - Snapshot file (default: "goodreads.cache")
    /// - `GOODREADS_API_URL` - API base URL (default: "https://www.goodreads.com")
    /// - `GOODREADS_KEY` - API key (default: contents of `goodreads.key`)
    /// - `ROOT_URL` - Route prefix (default: contents of `.root`, or none)
    /// - `FETCH_TIMEOUT_SECONDS` - Timeline request timeout (default: 30)
    /// - `TIMELINE_REQUIRE_READ_COUNT` - Drop reviews with a zero read count (default: false)
    pub fn from_env() -> Self {
        Self {
            cache_ttl_seconds: parse_var("CACHE_TTL_SECONDS").unwrap_or(86_400),
            cache_sweep_interval_seconds: parse_var("CACHE_SWEEP_INTERVAL_SECONDS")
                .unwrap_or(600),
            cache_snapshot_path: env::var("CACHE_SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("goodreads.cache")),
            goodreads_api_url: env::var("GOODREADS_API_URL")
                .unwrap_or_else(|_| "https://www.goodreads.com".to_string()),
            goodreads_key: env::var("GOODREADS_KEY")
                .ok()
                .or_else(|| read_trimmed("goodreads.key"))
                .unwrap_or_default(),
            root_url: normalize_root(
                &env::var("ROOT_URL")
                    .ok()
                    .or_else(|| read_trimmed(".root"))
                    .unwrap_or_default(),
            ),
            fetch_timeout_seconds: parse_var("FETCH_TIMEOUT_SECONDS").unwrap_or(30),
            require_read_count: parse_var("TIMELINE_REQUIRE_READ_COUNT").unwrap_or(false),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Get the sweep interval as a Duration.
    ///
    /// Clamped to at least one second; `tokio::time::interval` rejects zero.
    pub fn cache_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cache_sweep_interval_seconds.max(1))
    }

    /// Get the timeline request timeout as a Duration.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }

    /// Prefixes `path` with the configured root.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.root_url, path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: 86_400,
            cache_sweep_interval_seconds: 600,
            cache_snapshot_path: PathBuf::from("goodreads.cache"),
            goodreads_api_url: "https://www.goodreads.com".to_string(),
            goodreads_key: String::new(),
            root_url: String::new(),
            fetch_timeout_seconds: 30,
            require_read_count: false,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn read_trimmed(path: &str) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|contents| contents.trim().to_string())
        .filter(|contents| !contents.is_empty())
}

/// Turns `timelines/` or `/timelines` into `/timelines`; `/` and `` into ``.
fn normalize_root(root: &str) -> String {
    let trimmed = root.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
