//! Configuration management for the CLI.
//!
//! Settings come from built-in defaults, an optional `review-lens.toml` (or
//! `config/*`) file, and `REVIEW_LENS_*` environment variables, in that order
//! of precedence.

use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Analysis defaults
    pub analysis: AnalysisConfig,
    /// Logging setup
    pub logging: LoggingConfig,
}

/// Defaults for the analysis pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Keywords reported per sentiment bucket when the CLI flag is absent
    pub top_n: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, or error
    pub level: String,
    /// Optional log file; JSON-formatted when set
    pub file_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig {
                top_n: crate::session::DEFAULT_TOP_N,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, optional files, and environment
    pub fn load() -> Result<Self> {
        let defaults = Self::default();
        let config = Config::builder()
            .set_default("analysis.top_n", defaults.analysis.top_n as u64)?
            .set_default("logging.level", defaults.logging.level)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("review-lens").required(false))
            .add_source(Environment::with_prefix("REVIEW_LENS").separator("_"))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize configuration: {e}"))?;

        app_config.validate()?;
        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            ));
        }
        Ok(())
    }
}
