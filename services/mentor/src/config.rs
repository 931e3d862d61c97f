use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// JSON catalog to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
    pub progress_path: PathBuf,
    pub log_level: Level,
    /// Abort startup when the catalog's prerequisite graph has a cycle.
    pub validate_catalog: bool,
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue(
            var.to_string(),
            format!("'{}' is not a boolean", value),
        )),
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let catalog_path = match std::env::var("CATALOG_PATH") {
            Ok(path) if path.trim().is_empty() => {
                return Err(ConfigError::InvalidValue(
                    "CATALOG_PATH".to_string(),
                    "path must not be empty".to_string(),
                ));
            }
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => None,
        };

        let progress_path = std::env::var("PROGRESS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./progress.json"));

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let validate_catalog = match std::env::var("VALIDATE_CATALOG") {
            Ok(value) => parse_bool("VALIDATE_CATALOG", &value)?,
            Err(_) => true,
        };

        Ok(Self {
            catalog_path,
            progress_path,
            log_level,
            validate_catalog,
        })
    }
}
