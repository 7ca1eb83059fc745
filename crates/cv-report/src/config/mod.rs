use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::report::ExportFormat;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

/// Top-level configuration for the report service and CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub export: ExportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: AppEnvironment::Development,
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            telemetry: TelemetryConfig {
                log_level: DEFAULT_LOG_LEVEL.to_string(),
            },
            export: ExportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read `.env` (when present) and the `APP_*` process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, falling back to defaults
    /// for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let environment = lookup("APP_ENV")
            .map(|value| AppEnvironment::parse(&value))
            .unwrap_or(defaults.environment);

        let host = lookup("APP_HOST").unwrap_or(defaults.server.host);
        let port = match lookup("APP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort)?,
            None => defaults.server.port,
        };

        let log_level = lookup("APP_LOG_LEVEL").unwrap_or(defaults.telemetry.log_level);

        let format = match lookup("APP_EXPORT_FORMAT") {
            Some(raw) => raw
                .parse::<ExportFormat>()
                .map_err(|_| ConfigError::InvalidExportFormat { value: raw })?,
            None => defaults.export.format,
        };
        let directory = lookup("APP_EXPORT_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.export.directory);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            export: ExportConfig { format, directory },
        })
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

/// Where and how CLI exports are written.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Html,
            directory: PathBuf::from("."),
        }
    }
}

impl ExportConfig {
    pub fn target_path(&self, file_name: &str) -> PathBuf {
        self.directory.join(file_name)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidExportFormat { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidExportFormat { value } => write!(
                f,
                "APP_EXPORT_FORMAT '{}' must be one of html, markdown, csv, json",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort | ConfigError::InvalidExportFormat { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_EXPORT_FORMAT",
            "APP_EXPORT_DIR",
        ] {
            env::remove_var(key);
        }

        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.export.format, ExportFormat::Html);
        assert_eq!(config.export.directory, PathBuf::from("."));
    }

    #[test]
    fn reads_export_settings() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("APP_ENV", "ci"),
            ("APP_EXPORT_FORMAT", "Markdown"),
            ("APP_EXPORT_DIR", "/tmp/reports"),
        ]))
        .expect("config loads");

        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.export.format, ExportFormat::Markdown);
        assert_eq!(
            config.export.target_path("report.md"),
            PathBuf::from("/tmp/reports/report.md")
        );
    }

    #[test]
    fn rejects_unknown_export_format() {
        let err = AppConfig::from_lookup(lookup_from(&[("APP_EXPORT_FORMAT", "pdf")]))
            .expect_err("pdf is not an export format");
        match err {
            ConfigError::InvalidExportFormat { value } => assert_eq!(value, "pdf"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_invalid_port() {
        let err = AppConfig::from_lookup(lookup_from(&[("APP_PORT", "http")]))
            .expect_err("port must be numeric");
        assert!(matches!(err, ConfigError::InvalidPort));
    }

    #[test]
    fn accepts_localhost_host() {
        let config = AppConfig::from_lookup(lookup_from(&[("APP_HOST", "localhost")]))
            .expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }
}
