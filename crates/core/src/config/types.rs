use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration. Every section has defaults, so an empty file is valid.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub farewell: FarewellConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Movie catalog (YTS list_movies API) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Endpoint URL
    #[serde(default = "default_catalog_url")]
    pub url: String,
    /// Results per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Request timeout in seconds (default: 5)
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u32,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// Only list releases with this quality (e.g. "1080p")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// "desc" or "asc"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_rt_ratings: Option<bool>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: default_catalog_url(),
            page_size: default_page_size(),
            timeout_secs: default_request_timeout(),
            sort_by: default_sort_by(),
            quality: None,
            minimum_rating: None,
            genre: None,
            order_by: None,
            with_rt_ratings: None,
        }
    }
}

fn default_catalog_url() -> String {
    "https://yts.mx/api/v2/list_movies.json".to_string()
}

fn default_page_size() -> u32 {
    15
}

fn default_request_timeout() -> u32 {
    5
}

fn default_sort_by() -> String {
    "year".to_string()
}

/// Download and transfer engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadConfig {
    /// Destination directory (default: current directory)
    #[serde(default = "default_download_path")]
    pub path: PathBuf,
    /// Minimum spacing between progress redraws in milliseconds
    #[serde(default = "default_throttle_ms")]
    pub throttle_ms: u64,
    /// How often the engine is sampled for progress (milliseconds)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_true")]
    pub enable_dht: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listen_port: Option<u16>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            path: default_download_path(),
            throttle_ms: default_throttle_ms(),
            poll_interval_ms: default_poll_interval(),
            enable_dht: true,
            listen_port: None,
        }
    }
}

fn default_download_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_throttle_ms() -> u64 {
    1000
}

fn default_poll_interval() -> u64 {
    250
}

fn default_true() -> bool {
    true
}

/// What an out-of-range entry does once every result has been shown.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustedPolicy {
    /// Ask for the movie number again.
    #[default]
    Reprompt,
    /// Discard the results and ask for a new query.
    RestartQuery,
}

/// Interactive selection configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SelectionConfig {
    #[serde(default)]
    pub exhausted_invalid: ExhaustedPolicy,
}

/// Exit message configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FarewellConfig {
    /// Fetch and show a dad joke after a completed download
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_joke_url")]
    pub url: String,
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u32,
}

impl Default for FarewellConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: default_joke_url(),
            timeout_secs: default_request_timeout(),
        }
    }
}

fn default_joke_url() -> String {
    "https://icanhazdadjoke.com/".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.catalog.url, "https://yts.mx/api/v2/list_movies.json");
        assert_eq!(config.catalog.page_size, 15);
        assert_eq!(config.catalog.timeout_secs, 5);
        assert_eq!(config.catalog.sort_by, "year");
        assert!(config.catalog.quality.is_none());
        assert_eq!(config.download.path, PathBuf::from("."));
        assert_eq!(config.download.throttle_ms, 1000);
        assert!(config.download.enable_dht);
        assert_eq!(config.selection.exhausted_invalid, ExhaustedPolicy::Reprompt);
        assert!(config.farewell.enabled);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_deserialize_catalog_filters() {
        let toml = r#"
[catalog]
page_size = 20
quality = "1080p"
minimum_rating = 7
genre = "sci-fi"
order_by = "desc"
with_rt_ratings = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.catalog.page_size, 20);
        assert_eq!(config.catalog.quality.as_deref(), Some("1080p"));
        assert_eq!(config.catalog.minimum_rating, Some(7));
        assert_eq!(config.catalog.genre.as_deref(), Some("sci-fi"));
        assert_eq!(config.catalog.order_by.as_deref(), Some("desc"));
        assert_eq!(config.catalog.with_rt_ratings, Some(true));
        // untouched fields keep their defaults
        assert_eq!(config.catalog.timeout_secs, 5);
    }

    #[test]
    fn test_deserialize_exhausted_policy() {
        let toml = r#"
[selection]
exhausted_invalid = "restart_query"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.selection.exhausted_invalid,
            ExhaustedPolicy::RestartQuery
        );
    }

    #[test]
    fn test_deserialize_unknown_policy_fails() {
        let toml = r#"
[selection]
exhausted_invalid = "shrug"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_download_section() {
        let toml = r#"
[download]
path = "/media/movies"
throttle_ms = 500
listen_port = 4240
enable_dht = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.download.path, PathBuf::from("/media/movies"));
        assert_eq!(config.download.throttle_ms, 500);
        assert_eq!(config.download.listen_port, Some(4240));
        assert!(!config.download.enable_dht);
        assert_eq!(config.download.poll_interval_ms, 250);
    }
}
