use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use reqwest::Url;

use crate::matching::config::{DEFAULT_AI_THRESHOLD, DEFAULT_CONCURRENCY_LIMIT};
use crate::matching::{InferenceConfig, MatchingConfig};

pub const DEFAULT_INFERENCE_BASE_URL: &str = "https://api.openai.com/v1/";
pub const DEFAULT_INFERENCE_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_INFERENCE_TIMEOUT_MS: u64 = 30_000;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub matching: MatchingConfig,
    /// `None` when no API key is configured; the engine then runs algorithmic only.
    pub inference: Option<InferenceConfig>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            matching: load_matching()?,
            inference: load_inference()?,
        })
    }
}

fn load_matching() -> Result<MatchingConfig, ConfigError> {
    let ai_enabled = match optional_var("JOBMATCH_AI_ENABLED") {
        None => true,
        Some(value) => parse_flag(&value).ok_or(ConfigError::InvalidFlag {
            name: "JOBMATCH_AI_ENABLED",
            value,
        })?,
    };

    let ai_threshold = match optional_var("JOBMATCH_AI_THRESHOLD") {
        None => DEFAULT_AI_THRESHOLD,
        Some(value) => value
            .parse::<u8>()
            .ok()
            .filter(|threshold| *threshold <= 100)
            .ok_or(ConfigError::InvalidThreshold)?,
    };

    let concurrency_limit = match optional_var("JOBMATCH_CONCURRENCY_LIMIT") {
        None => DEFAULT_CONCURRENCY_LIMIT,
        Some(value) => value
            .parse::<usize>()
            .ok()
            .filter(|limit| *limit >= 1)
            .ok_or(ConfigError::InvalidConcurrencyLimit)?,
    };

    Ok(MatchingConfig {
        ai_enabled,
        ai_threshold,
        concurrency_limit,
    })
}

fn load_inference() -> Result<Option<InferenceConfig>, ConfigError> {
    let Some(api_key) = optional_var("JOBMATCH_INFERENCE_API_KEY") else {
        return Ok(None);
    };

    let mut base_url = optional_var("JOBMATCH_INFERENCE_BASE_URL")
        .unwrap_or_else(|| DEFAULT_INFERENCE_BASE_URL.to_string());
    if !base_url.ends_with('/') {
        base_url.push('/');
    }
    let base_url = Url::parse(&base_url).map_err(|_| ConfigError::InvalidBaseUrl {
        value: base_url.clone(),
    })?;

    let model = optional_var("JOBMATCH_INFERENCE_MODEL")
        .unwrap_or_else(|| DEFAULT_INFERENCE_MODEL.to_string());

    let timeout_ms = match optional_var("JOBMATCH_INFERENCE_TIMEOUT_MS") {
        None => DEFAULT_INFERENCE_TIMEOUT_MS,
        Some(value) => value
            .parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or(ConfigError::InvalidTimeout)?,
    };

    Ok(Some(InferenceConfig {
        api_key,
        base_url,
        model,
        timeout: Duration::from_millis(timeout_ms),
    }))
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidFlag { name: &'static str, value: String },
    InvalidThreshold,
    InvalidConcurrencyLimit,
    InvalidBaseUrl { value: String },
    InvalidTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be true or false, got '{value}'")
            }
            ConfigError::InvalidThreshold => {
                write!(f, "JOBMATCH_AI_THRESHOLD must be an integer between 0 and 100")
            }
            ConfigError::InvalidConcurrencyLimit => {
                write!(f, "JOBMATCH_CONCURRENCY_LIMIT must be a positive integer")
            }
            ConfigError::InvalidBaseUrl { value } => {
                write!(f, "JOBMATCH_INFERENCE_BASE_URL '{value}' is not a valid URL")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "JOBMATCH_INFERENCE_TIMEOUT_MS must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
