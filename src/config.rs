use serde::Deserialize;

impl Config {
    pub fn init() -> Result<Self, config::ConfigError> {
        // get config toml dir from env, with default
        let config_path = std::env::var("CINESCRAPE_CONFIG_PATH")
            .unwrap_or_else(|_| String::from("./config.toml"));

        let config = config::Config::builder()
            // Add in config toml
            .add_source(config::File::with_name(&config_path).required(false))
            // Add in settings from the environment (with a prefix of CINESCRAPE)
            .add_source(config::Environment::with_prefix("CINESCRAPE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

// ================================================================================================
// Models
// ================================================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

// ===============================================================================
// Logs
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

// ===============================================================================
// Scrape
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    /// WebDriver endpoint (e.g. a local chromedriver/geckodriver).
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
    /// Search page template; `{genre}`, `{from}` and `{to}` are substituted.
    #[serde(default = "default_search_url")]
    pub search_url: String,
    #[serde(default = "default_release_from")]
    pub release_from: String,
    #[serde(default = "default_release_to")]
    pub release_to: String,
    #[serde(default = "default_genres")]
    pub genres: Vec<String>,
    #[serde(default)]
    pub headless: bool,
    /// Settle time after opening a search page.
    #[serde(default = "default_page_settle_secs")]
    pub page_settle_secs: u64,
    /// Settle time after scrolling the load-more trigger into view.
    #[serde(default = "default_scroll_settle_secs")]
    pub scroll_settle_secs: u64,
    /// Settle time after clicking the load-more trigger.
    #[serde(default = "default_load_settle_secs")]
    pub load_settle_secs: u64,
    /// Bounded wait for the load-more trigger; elapsing it means the
    /// genre's list is exhausted, not an error.
    #[serde(default = "default_load_more_timeout_secs")]
    pub load_more_timeout_secs: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            search_url: default_search_url(),
            release_from: default_release_from(),
            release_to: default_release_to(),
            genres: default_genres(),
            headless: false,
            page_settle_secs: default_page_settle_secs(),
            scroll_settle_secs: default_scroll_settle_secs(),
            load_settle_secs: default_load_settle_secs(),
            load_more_timeout_secs: default_load_more_timeout_secs(),
        }
    }
}

impl ScrapeConfig {
    pub fn genre_url(&self, genre: &str) -> String {
        self.search_url
            .replace("{genre}", genre)
            .replace("{from}", &self.release_from)
            .replace("{to}", &self.release_to)
    }
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_search_url() -> String {
    "https://www.imdb.com/search/title/?title_type=feature&release_date={from},{to}&genres={genre}&sort=alpha,asc"
        .to_string()
}

fn default_release_from() -> String {
    "2024-01-01".to_string()
}

fn default_release_to() -> String {
    "2024-12-31".to_string()
}

fn default_genres() -> Vec<String> {
    [
        "action", "adventure", "animation", "biography", "comedy", "crime",
        "documentary", "drama", "family", "fantasy", "history", "horror",
        "music", "musical", "mystery", "romance", "sci-fi", "sport",
        "thriller", "war", "western",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_page_settle_secs() -> u64 { 3 }
fn default_scroll_settle_secs() -> u64 { 1 }
fn default_load_settle_secs() -> u64 { 2 }
fn default_load_more_timeout_secs() -> u64 { 10 }

// ===============================================================================
// Output
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the per-genre tables are written to and merged from.
    #[serde(default = "default_output_dir")]
    pub dir: String,
    /// Path of the merged dataset.
    #[serde(default = "default_merged_path")]
    pub merged_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            merged_path: default_merged_path(),
        }
    }
}

fn default_output_dir() -> String {
    "movie_data".to_string()
}

fn default_merged_path() -> String {
    "movies.csv".to_string()
}

// ===============================================================================
// Dashboard
// ===============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Dataset to serve; defaults to `output.merged_path`.
    #[serde(default)]
    pub dataset: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            dataset: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}
