use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::outcomes::StatisticsSource;

const DEFAULT_CASES_PER_CATEGORY: usize = 500;

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

/// Top-level configuration for the scoring service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub statistics: StatisticsSource,
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
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            statistics: load_statistics_source()?,
        })
    }
}

fn load_statistics_source() -> Result<StatisticsSource, ConfigError> {
    let mode = env::var("STATISTICS_SOURCE").unwrap_or_else(|_| "synthetic".to_string());
    match mode.trim().to_ascii_lowercase().as_str() {
        "reference" => Ok(StatisticsSource::Reference),
        "synthetic" => {
            let cases_per_category = match env::var("CORPUS_CASES_PER_CATEGORY") {
                Ok(raw) => raw
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|count| *count > 0)
                    .ok_or(ConfigError::InvalidCorpusSize { value: raw })?,
                Err(_) => DEFAULT_CASES_PER_CATEGORY,
            };
            let seed = match env::var("CORPUS_SEED") {
                Ok(raw) => Some(
                    raw.trim()
                        .parse::<u64>()
                        .map_err(|_| ConfigError::InvalidCorpusSeed { value: raw })?,
                ),
                Err(_) => None,
            };
            Ok(StatisticsSource::Synthetic {
                cases_per_category,
                seed,
            })
        }
        _ => Err(ConfigError::UnknownStatisticsSource { value: mode }),
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
    pub ansi: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidCorpusSize { value: String },
    InvalidCorpusSeed { value: String },
    UnknownStatisticsSource { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidCorpusSize { value } => write!(
                f,
                "CORPUS_CASES_PER_CATEGORY must be a positive integer, got '{value}'"
            ),
            ConfigError::InvalidCorpusSeed { value } => {
                write!(f, "CORPUS_SEED must be an unsigned 64-bit integer, got '{value}'")
            }
            ConfigError::UnknownStatisticsSource { value } => write!(
                f,
                "STATISTICS_SOURCE must be 'reference' or 'synthetic', got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidCorpusSize { .. }
            | ConfigError::InvalidCorpusSeed { .. }
            | ConfigError::UnknownStatisticsSource { .. } => None,
        }
    }
}
