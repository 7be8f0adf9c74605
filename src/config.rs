//! Configuration management for ocr-aggregate.
//!
//! A config file is optional; every field has a default. `prefer` discovers
//! `ocr-aggregate.*` files in the standard locations; the discovered file is
//! then parsed with serde according to its extension.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::aggregation::{AggregationConfig, Aggregator, PAGE_PLACEHOLDER};
use crate::services::batch::{BatchAggregator, BatchConfig};
use crate::services::quality::QualityThresholds;

/// File stem searched for during discovery.
pub const CONFIG_FILE_STEM: &str = "ocr-aggregate";

/// Environment variable overriding `batch.workers`.
pub const ENV_WORKERS: &str = "OCRAGG_WORKERS";

/// Environment variable overriding `aggregation.same_line_tolerance`.
pub const ENV_LINE_TOLERANCE: &str = "OCRAGG_LINE_TOLERANCE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Ordering, classification, and page assembly.
    #[serde(default)]
    pub aggregation: AggregationConfig,
    /// Recommendation thresholds.
    #[serde(default)]
    pub quality: QualityThresholds,
    /// Batch concurrency.
    #[serde(default)]
    pub batch: BatchConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `explicit` when given, otherwise from the
    /// first discovered config file, otherwise defaults. Environment
    /// overrides are applied last and the result is validated.
    pub async fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => discover_config_file().await,
        };

        let config = match path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load_from_path(&path).await?
            }
            None => Self::default(),
        };

        let config = config.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    /// The format follows the extension: TOML, YAML, otherwise JSON.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = Self::parse(&contents, path)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let config = match ext {
            "toml" => toml::from_str(contents)?,
            "yaml" | "yml" => serde_yaml::from_str(contents)?,
            _ => serde_json::from_str(contents)?,
        };
        Ok(config)
    }

    /// Apply `OCRAGG_*` environment variables.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(value) = lookup(ENV_WORKERS) {
            self.batch.workers = value.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{ENV_WORKERS} must be a positive integer, got {value:?}"))
            })?;
            tracing::debug!("Using {} from environment: {}", ENV_WORKERS, self.batch.workers);
        }

        if let Some(value) = lookup(ENV_LINE_TOLERANCE) {
            self.aggregation.same_line_tolerance = value.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{ENV_LINE_TOLERANCE} must be a number, got {value:?}"))
            })?;
            tracing::debug!(
                "Using {} from environment: {}",
                ENV_LINE_TOLERANCE,
                self.aggregation.same_line_tolerance
            );
        }

        Ok(self)
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tolerance = self.aggregation.same_line_tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "aggregation.same_line_tolerance must be a non-negative number, got {tolerance}"
            )));
        }

        let marker = &self.aggregation.page_marker;
        if marker.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "aggregation.page_marker must not be empty".to_string(),
            ));
        }
        if !marker.contains(PAGE_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "aggregation.page_marker must contain {PAGE_PLACEHOLDER}, got {marker:?}"
            )));
        }

        let quality = &self.quality;
        let ratios = [
            ("aggregation.mixed_ratio_threshold", self.aggregation.mixed_ratio_threshold),
            ("quality.coherence_threshold", quality.coherence_threshold),
            ("quality.readability_threshold", quality.readability_threshold),
            ("quality.completeness_threshold", quality.completeness_threshold),
            ("quality.confidence_threshold", quality.confidence_threshold),
            ("quality.mixed_pages_ratio", quality.mixed_pages_ratio),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        if self.batch.workers == 0 {
            return Err(ConfigError::Invalid(
                "batch.workers must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Build an aggregator from this configuration.
    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new(self.aggregation.clone(), self.quality.clone())
    }

    /// Build a batch service from this configuration.
    pub fn batch_aggregator(&self) -> BatchAggregator {
        BatchAggregator::new(self.aggregator(), self.batch.clone())
    }
}

/// Discover a config file using prefer. `None` when no file is found.
pub async fn discover_config_file() -> Option<PathBuf> {
    match prefer::load(CONFIG_FILE_STEM).await {
        Ok(found) => found.source_path().map(|path| path.to_path_buf()),
        Err(_) => {
            tracing::debug!("No {} config file found, using defaults", CONFIG_FILE_STEM);
            None
        }
    }
}
