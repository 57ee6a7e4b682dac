use serde::Deserialize;

/// Main configuration structure for Forager
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub download: DownloadConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Maximum number of pages visited per manufacturer domain
    #[serde(rename = "max-pages-per-domain")]
    pub max_pages_per_domain: u32,

    /// Politeness delay between successive fetches to the same domain (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,

    /// Maximum fetch attempts per page before giving up
    #[serde(rename = "fetch-retries")]
    pub fetch_retries: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// Maximum number of domain crawls running at once
    #[serde(rename = "max-concurrent-domains")]
    pub max_concurrent_domains: u32,

    /// User-Agent header sent with every crawl request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

/// Image download configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadConfig {
    /// Directory under which per-manufacturer image folders are created
    #[serde(rename = "download-dir")]
    pub download_dir: String,

    /// Path to the SQLite provenance manifest
    #[serde(rename = "manifest-path")]
    pub manifest_path: String,

    /// Maximum number of image downloads running at once
    #[serde(rename = "max-concurrent-downloads")]
    pub max_concurrent_downloads: u32,
}
