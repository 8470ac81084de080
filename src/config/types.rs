use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Epaper-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub publication: PublicationConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// The publication and edition being harvested
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PublicationConfig {
    /// Origin of the e-paper site; relative image references resolve against it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Regional edition name used in every locator
    pub edition: String,

    /// Prefix of the archive file name
    pub slug: String,
}

impl Default for PublicationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://epaper.gujaratsamachar.com".to_string(),
            edition: "ahmedabad".to_string(),
            slug: "gujarat_samachar".to_string(),
        }
    }
}

/// What the walk does after a page fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageErrorPolicy {
    /// Stop the whole run on the first failed page
    #[default]
    Abort,
    /// Record the failure and continue with the next page number
    Skip,
}

/// How archive entries are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageNaming {
    /// `{date}_{page}_{article}_{n}.jpeg`, one entry per image
    #[default]
    Indexed,
    /// `{date}_{page}_{article}.jpeg`; later images of an article overwrite earlier ones
    PerArticle,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Consecutive 404 responses after which a page is considered exhausted
    #[serde(rename = "miss-threshold")]
    pub miss_threshold: u32,

    /// Hard upper bound on pages walked per run
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Minimum time between navigation requests (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    #[serde(rename = "on-page-error")]
    pub on_page_error: PageErrorPolicy,

    #[serde(rename = "image-naming")]
    pub image_naming: ImageNaming,

    /// How many days back from today a date may be requested
    #[serde(rename = "date-window-days")]
    pub date_window_days: u32,
}

impl CrawlerConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            miss_threshold: 100,
            max_pages: 30,
            request_delay_ms: 600,
            on_page_error: PageErrorPolicy::Abort,
            image_naming: ImageNaming::Indexed,
            date_window_days: 30,
        }
    }
}

/// Transport configuration shared by every request in a run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    #[serde(rename = "accept-language")]
    pub accept_language: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// Extra attempts after a transport failure (timeouts, refused connections)
    #[serde(rename = "transport-retries")]
    pub transport_retries: u32,

    /// Delay before the first retry; doubles on each further attempt (milliseconds)
    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/124.0 Safari/537.36"
                .to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            timeout_secs: 10,
            max_redirects: 10,
            transport_retries: 2,
            retry_backoff_ms: 1000,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the archive is written into
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
        }
    }
}
