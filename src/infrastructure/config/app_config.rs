//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use crate::application::carousel::{
    AUTOPLAY_INTERVAL, CarouselSettings, INTERACTION_COOLDOWN, SWIPE_THRESHOLD, WHEEL_IDLE_RESET,
    WHEEL_THRESHOLD,
};
use crate::application::services::ImageUrlTransformer;
use crate::application::services::result_cache::{DEFAULT_KEY_PREFIX, DEFAULT_TTL};
use crate::application::use_cases::FEATURED_PRODUCTS_KEY;
use crate::domain::entities::DEFAULT_MOBILE_BREAKPOINT;
use crate::infrastructure::api::DEFAULT_API_BASE;
use crate::infrastructure::navigation::DEFAULT_STOREFRONT_URL;

pub(super) const APP_NAME: &str = "vitrine";
pub(super) const APP_QUALIFIER: &str = "com";
pub(super) const APP_ORGANIZATION: &str = "vitrine";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "VITRINE_API_URL";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Skip the cached result and fetch fresh data on start.
    #[serde(skip)]
    pub refresh: bool,

    /// Viewport width used instead of the terminal width.
    #[serde(skip)]
    pub viewport_width: Option<u32>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Enable mouse support.
    #[serde(default = "default_true")]
    pub mouse: bool,

    /// Storefront API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Result cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Carousel behavior.
    #[serde(default)]
    pub carousel: CarouselConfig,

    /// Image sizing.
    #[serde(default)]
    pub images: ImagesConfig,
}

/// Storefront API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// REST API base URL.
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// Storefront origin used for product pages.
    #[serde(default = "default_storefront_url")]
    pub storefront_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            storefront_url: default_storefront_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Result cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding the store file. Defaults to the platform cache dir.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Freshness window in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Prefix of every stored key.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Dataset key of the featured products.
    #[serde(default = "default_dataset_key")]
    pub key: String,
}

impl CacheConfig {
    /// Freshness window.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            ttl_secs: default_ttl_secs(),
            key_prefix: default_key_prefix(),
            key: default_dataset_key(),
        }
    }
}

/// Carousel configuration. Durations are in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Mobile autoplay period.
    #[serde(default = "default_autoplay_ms")]
    pub autoplay_interval_ms: u64,

    /// Autoplay suppression after manual input.
    #[serde(default = "default_cooldown_ms")]
    pub interaction_cooldown_ms: u64,

    /// Accumulated wheel delta per step.
    #[serde(default = "default_wheel_threshold")]
    pub wheel_threshold: f64,

    /// Idle gap that drops a partial wheel accumulation.
    #[serde(default = "default_wheel_idle_ms")]
    pub wheel_idle_reset_ms: u64,

    /// Horizontal travel per swipe.
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f64,

    /// Width below which the layout is mobile.
    #[serde(default = "default_breakpoint")]
    pub mobile_breakpoint: u32,

    /// Animate item transitions.
    #[serde(default = "default_true")]
    pub animations: bool,

    /// Transition duration.
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u32,
}

impl CarouselConfig {
    /// Converts to engine settings.
    #[must_use]
    pub const fn settings(&self) -> CarouselSettings {
        CarouselSettings {
            autoplay_interval: Duration::from_millis(self.autoplay_interval_ms),
            interaction_cooldown: Duration::from_millis(self.interaction_cooldown_ms),
            wheel_threshold: self.wheel_threshold,
            wheel_idle_reset: Duration::from_millis(self.wheel_idle_reset_ms),
            swipe_threshold: self.swipe_threshold,
            mobile_breakpoint: self.mobile_breakpoint,
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: default_autoplay_ms(),
            interaction_cooldown_ms: default_cooldown_ms(),
            wheel_threshold: default_wheel_threshold(),
            wheel_idle_reset_ms: default_wheel_idle_ms(),
            swipe_threshold: default_swipe_threshold(),
            mobile_breakpoint: default_breakpoint(),
            animations: true,
            transition_ms: default_transition_ms(),
        }
    }
}

/// Image sizing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Component default width on mobile.
    #[serde(default = "default_mobile_width")]
    pub mobile_width: u32,

    /// Component default width on desktop.
    #[serde(default = "default_desktop_width")]
    pub desktop_width: u32,
}

impl ImagesConfig {
    /// Builds the URL transformer.
    #[must_use]
    pub const fn transformer(&self) -> ImageUrlTransformer {
        ImageUrlTransformer::new(self.mobile_width, self.desktop_width)
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            mobile_width: default_mobile_width(),
            desktop_width: default_desktop_width(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_api_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_storefront_url() -> String {
    DEFAULT_STOREFRONT_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_ttl_secs() -> u64 {
    DEFAULT_TTL.as_secs()
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

fn default_dataset_key() -> String {
    FEATURED_PRODUCTS_KEY.to_string()
}

#[allow(clippy::cast_possible_truncation)]
const fn default_autoplay_ms() -> u64 {
    AUTOPLAY_INTERVAL.as_millis() as u64
}

#[allow(clippy::cast_possible_truncation)]
const fn default_cooldown_ms() -> u64 {
    INTERACTION_COOLDOWN.as_millis() as u64
}

const fn default_wheel_threshold() -> f64 {
    WHEEL_THRESHOLD
}

#[allow(clippy::cast_possible_truncation)]
const fn default_wheel_idle_ms() -> u64 {
    WHEEL_IDLE_RESET.as_millis() as u64
}

const fn default_swipe_threshold() -> f64 {
    SWIPE_THRESHOLD
}

const fn default_breakpoint() -> u32 {
    DEFAULT_MOBILE_BREAKPOINT
}

const fn default_transition_ms() -> u32 {
    500
}

const fn default_mobile_width() -> u32 {
    400
}

const fn default_desktop_width() -> u32 {
    600
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = args.api_url {
            self.api.base_url = api_url;
        }
        if let Some(storefront_url) = args.storefront_url {
            self.api.storefront_url = storefront_url;
        }
        if let Some(width) = args.viewport_width {
            self.viewport_width = Some(width);
        }
        if let Some(cache_dir) = args.cache_dir {
            self.cache.dir = Some(cache_dir);
        }
        if let Some(mouse) = args.mouse {
            self.mouse = mouse;
        }
        self.refresh |= args.refresh;
    }

    /// Applies the API URL from the environment, if set.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            self.api.base_url = url;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("vitrine.log"))
    }

    /// Returns default cache directory.
    #[must_use]
    pub fn default_cache_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.cache_dir().to_path_buf())
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns effective cache directory.
    #[must_use]
    pub fn effective_cache_dir(&self) -> Option<PathBuf> {
        self.cache.dir.clone().or_else(Self::default_cache_dir)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            refresh: false,
            viewport_width: None,
            log_level: LogLevel::Info,
            mouse: true,
            api: ApiConfig::default(),
            cache: CacheConfig::default(),
            carousel: CarouselConfig::default(),
            images: ImagesConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"

            [api]
            base_url = "https://shop.example.com/api"

            [cache]
            ttl_secs = 60

            [carousel]
            autoplay_interval_ms = 4000
            animations = false
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.api.base_url, "https://shop.example.com/api");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert_eq!(config.cache.ttl(), Duration::from_secs(60));
        assert_eq!(config.cache.key, FEATURED_PRODUCTS_KEY);
        assert_eq!(
            config.carousel.settings().autoplay_interval,
            Duration::from_millis(4000)
        );
        assert!(!config.carousel.animations);
        assert_eq!(config.images.mobile_width, 400);
    }

    #[test]
    fn test_defaults_match_engine_constants() {
        let config = AppConfig::default();
        let settings = config.carousel.settings();
        let defaults = CarouselSettings::default();

        assert_eq!(settings.autoplay_interval, defaults.autoplay_interval);
        assert_eq!(settings.interaction_cooldown, defaults.interaction_cooldown);
        assert_eq!(settings.wheel_idle_reset, defaults.wheel_idle_reset);
        assert_eq!(settings.mobile_breakpoint, defaults.mobile_breakpoint);
        assert_eq!(config.cache.ttl(), DEFAULT_TTL);
    }

    #[test]
    fn test_merge_with_args() {
        let args = CliArgs::parse_from([
            "vitrine",
            "--api-url",
            "http://127.0.0.1:8080/api",
            "--viewport-width",
            "375",
            "--refresh",
            "--log-level",
            "warn",
        ]);
        let mut config = AppConfig::default();

        config.merge_with_args(args);

        assert_eq!(config.api.base_url, "http://127.0.0.1:8080/api");
        assert_eq!(config.viewport_width, Some(375));
        assert!(config.refresh);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.api.storefront_url, DEFAULT_STOREFRONT_URL);
    }

    #[test]
    fn test_round_trip_keeps_runtime_fields_out_of_file() {
        let mut config = AppConfig::default();
        config.refresh = true;
        config.viewport_width = Some(1024);

        let content = toml::to_string_pretty(&config).unwrap();

        assert!(!content.contains("refresh"));
        assert!(!content.contains("viewport_width"));
        assert!(content.contains("[carousel]"));
    }
}
