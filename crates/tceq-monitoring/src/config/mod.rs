use chrono::NaiveDate;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the report.
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

/// Top-level configuration for a report run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub report: ReportConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_dir = path_var("REPORT_DATA_DIR", "data")?;
        let output_dir = path_var("REPORT_OUTPUT_DIR", "output")?;

        let as_of = match env::var("REPORT_AS_OF") {
            Ok(value) if !value.trim().is_empty() => Some(
                NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                    .map_err(|source| ConfigError::InvalidAsOf { value, source })?,
            ),
            _ => None,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            report: ReportConfig {
                data_dir,
                output_dir,
                as_of,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn path_var(name: &'static str, default: &str) -> Result<PathBuf, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::EmptyPath { var: name }),
        Ok(value) => Ok(PathBuf::from(value.trim())),
        Err(_) => Ok(PathBuf::from(default)),
    }
}

/// Where the datasets come from and where rendered charts go.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Reference date for dropping the incomplete trailing year. `None` means today.
    pub as_of: Option<NaiveDate>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyPath {
        var: &'static str,
    },
    InvalidAsOf {
        value: String,
        source: chrono::ParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPath { var } => write!(f, "{var} must not be empty when set"),
            ConfigError::InvalidAsOf { value, .. } => {
                write!(f, "REPORT_AS_OF must be a YYYY-MM-DD date, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::EmptyPath { .. } => None,
            ConfigError::InvalidAsOf { source, .. } => Some(source),
        }
    }
}
