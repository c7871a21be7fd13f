//! TOML configuration file parsing and loading
//!
//! Resolves the console configuration from the config file and command line,
//! with command line values taking precedence. A user-specified config file
//! must exist; the default path is used only when present.

use std::path::PathBuf;
use std::time::Duration;

use crate::app::cli::args::Args;
use crate::scanner::types::Platform;
use crate::validation::transport::{EndpointConfig, DEFAULT_TIMEOUT};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Could not read configuration file {path}: {cause}")]
    Unreadable { path: String, cause: String },

    #[error("Could not parse configuration file {path}: {cause}")]
    Unparseable { path: String, cause: String },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing configuration: {message}")]
    Missing { message: String },
}

impl crate::core::error_handling::ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        true // Config problems are always fixable by the operator
    }

    fn user_message(&self) -> Option<&str> {
        None // Display uses the full error text
    }
}

/// Fully resolved console configuration
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub primary_url: String,
    pub secondary_url: String,
    pub timeout: Duration,
    pub device: Option<String>,
    pub platform: Platform,
    pub log_level: Option<String>,
}

impl ConsoleConfig {
    /// Resolve configuration from file and arguments
    pub async fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let table = Self::load_table(args.config_file.clone()).await?;
        let get_str = |key: &str| -> Option<String> {
            table
                .as_ref()
                .and_then(|t| t.get(key))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };

        let primary_url = args
            .primary_url
            .clone()
            .or_else(|| get_str("primary-url"))
            .ok_or_else(|| ConfigError::Missing {
                message: "no primary validation endpoint configured \
                          (--primary-url or primary-url in the config file)"
                    .to_string(),
            })?;
        let secondary_url = args
            .secondary_url
            .clone()
            .or_else(|| get_str("secondary-url"))
            .ok_or_else(|| ConfigError::Missing {
                message: "no secondary validation endpoint configured \
                          (--secondary-url or secondary-url in the config file)"
                    .to_string(),
            })?;

        let timeout_secs = match args.timeout_secs {
            Some(secs) => Some(secs),
            None => {
                let from_file = table
                    .as_ref()
                    .and_then(|t| t.get("timeout-secs"))
                    .and_then(|v| v.as_integer());
                match from_file {
                    Some(secs) if secs > 0 => Some(secs as u64),
                    Some(secs) => {
                        return Err(ConfigError::Invalid {
                            message: format!("timeout-secs must be positive, got {}", secs),
                        });
                    }
                    None => None,
                }
            }
        };
        if timeout_secs == Some(0) {
            return Err(ConfigError::Invalid {
                message: "timeout-secs must be positive".to_string(),
            });
        }

        let platform = match args.platform {
            Some(arg) => Platform::from(arg),
            None => match get_str("platform").as_deref() {
                Some("mobile") => Platform::Mobile,
                Some("desktop") | None => Platform::Desktop,
                Some(other) => {
                    return Err(ConfigError::Invalid {
                        message: format!(
                            "platform must be 'mobile' or 'desktop', got '{}'",
                            other
                        ),
                    });
                }
            },
        };

        Ok(Self {
            primary_url,
            secondary_url,
            timeout: timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            device: args.device.clone().or_else(|| get_str("device")),
            platform,
            log_level: args.log_level.clone().or_else(|| get_str("log-level")),
        })
    }

    pub fn endpoints(&self) -> EndpointConfig {
        EndpointConfig::new(self.primary_url.clone(), self.secondary_url.clone())
            .with_timeout(self.timeout)
    }

    async fn load_table(config_file: Option<PathBuf>) -> Result<Option<toml::Table>, ConfigError> {
        let config_path = match config_file {
            Some(path) => {
                // User specified a config file - it must exist
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Some(path)
            }
            None => {
                // Use default config path if it exists
                let default_path =
                    dirs::config_dir().map(|d| d.join("Gatescan").join("gatescan.toml"));
                match default_path {
                    Some(path) if path.exists() => Some(path),
                    _ => None,
                }
            }
        };

        let Some(path) = config_path else {
            return Ok(None);
        };

        let contents =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| ConfigError::Unreadable {
                    path: path.display().to_string(),
                    cause: err.to_string(),
                })?;
        let table = toml::from_str::<toml::Table>(&contents).map_err(|err| {
            ConfigError::Unparseable {
                path: path.display().to_string(),
                cause: err.to_string(),
            }
        })?;
        Ok(Some(table))
    }
}
