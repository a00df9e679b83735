//! Centralized configuration management for contentdesk

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Result, Context};
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8000/";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the content backend
    pub api_url: String,
    /// Directory holding contentdesk.log
    pub log_dir: PathBuf,
    /// HTTP client configuration
    pub http: HttpConfig,
    /// Terminal UI configuration
    pub ui: UiConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

/// Terminal UI timing
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// How long transient notifications stay in the status bar
    pub notification_seconds: u64,
    /// Input poll interval (milliseconds)
    pub tick_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_seconds: 4,
            tick_ms: 100,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_dir: PathBuf::from("."),
            http: HttpConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

fn default_user_agent() -> String {
    concat!("contentdesk/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var("CONTENTDESK_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let log_dir = std::env::var("CONTENTDESK_LOG_DIR")
            .unwrap_or_else(|_| ".".to_string())
            .into();

        let http = HttpConfig {
            timeout_seconds: parse_env_var("CONTENTDESK_HTTP_TIMEOUT_SECONDS")?.unwrap_or(30),
            user_agent: std::env::var("CONTENTDESK_USER_AGENT")
                .unwrap_or_else(|_| default_user_agent()),
        };

        let ui = UiConfig {
            notification_seconds: parse_env_var("CONTENTDESK_NOTIFICATION_SECONDS")?.unwrap_or(4),
            tick_ms: parse_env_var("CONTENTDESK_TICK_MS")?.unwrap_or(100),
        };

        Ok(Config {
            api_url,
            log_dir,
            http,
            ui,
        })
    }

    /// Replace the backend URL, e.g. from a command line flag
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Get notification lifetime as Duration
    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.ui.notification_seconds)
    }

    /// Get input poll interval as Duration
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.ui.tick_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_url)
            .with_context(|| format!("Invalid API URL: {}", self.api_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(anyhow::anyhow!(
                "API URL must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if !self.log_dir.is_dir() {
            return Err(anyhow::anyhow!(
                "Log directory does not exist: {}",
                self.log_dir.display()
            ));
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}
