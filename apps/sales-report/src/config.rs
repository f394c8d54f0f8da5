//! Report configuration.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied in main.rs)          │
//! │     --format table                                                     │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     SALES_REPORT_PRICE_SOURCE=catalog                                  │
//! │     SALES_REPORT_STRICT=true                                           │
//! │     SALES_REPORT_FORMAT=table                                          │
//! │                                                                         │
//! │  3. TOML Config File (path in SALES_REPORT_CONFIG)                     │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     line_item pricing, not strict, JSON output                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! price_source = "catalog"   # line_item | catalog
//! strict = true              # warn on discounts outside 0-100
//! format = "table"           # json | table
//! ```

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use sales_core::PriceSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const CONFIG_PATH_ENV: &str = "SALES_REPORT_CONFIG";
pub const PRICE_SOURCE_ENV: &str = "SALES_REPORT_PRICE_SOURCE";
pub const STRICT_ENV: &str = "SALES_REPORT_STRICT";
pub const FORMAT_ENV: &str = "SALES_REPORT_FORMAT";

// =============================================================================
// Output Format
// =============================================================================

/// How the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Pretty-printed JSON array, one object per seller.
    #[default]
    Json,
    /// Human-readable table.
    Table,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(ConfigError::InvalidValue(FORMAT_ENV.to_string())),
        }
    }
}

// =============================================================================
// Report Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Which price line-item revenue is computed from.
    pub price_source: PriceSource,

    /// Warn about discounts outside 0-100 before computing.
    pub strict: bool,

    pub format: OutputFormat,
}

impl ReportConfig {
    /// Loads from the TOML file named by `SALES_REPORT_CONFIG` (if any), then
    /// applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        Self::load_with(path.as_deref(), |key| env::var(key).ok())
    }

    /// Same as [`ReportConfig::load`] with an explicit file and variable lookup.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => {
                info!(?path, "Loading report config from file");
                let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                toml::from_str(&contents)?
            }
            None => ReportConfig::default(),
        };

        config.apply_env_overrides(lookup)?;
        Ok(config)
    }

    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup(PRICE_SOURCE_ENV) {
            self.price_source = source
                .parse()
                .map_err(|_| ConfigError::InvalidValue(PRICE_SOURCE_ENV.to_string()))?;
            debug!(price_source = %self.price_source, "Overriding price source from environment");
        }

        if let Some(strict) = lookup(STRICT_ENV) {
            self.strict = parse_bool(&strict)
                .ok_or_else(|| ConfigError::InvalidValue(STRICT_ENV.to_string()))?;
        }

        if let Some(format) = lookup(FORMAT_ENV) {
            self.format = format.parse()?;
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ReportConfig::load_with(None, vars(&[])).unwrap();
        assert_eq!(config.price_source, PriceSource::LineItem);
        assert!(!config.strict);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_env_overrides() {
        let config = ReportConfig::load_with(
            None,
            vars(&[
                (PRICE_SOURCE_ENV, "catalog"),
                (STRICT_ENV, "yes"),
                (FORMAT_ENV, "TABLE"),
            ]),
        )
        .unwrap();

        assert_eq!(config.price_source, PriceSource::Catalog);
        assert!(config.strict);
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn test_invalid_env_value() {
        let err = ReportConfig::load_with(None, vars(&[(STRICT_ENV, "maybe")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for SALES_REPORT_STRICT");

        let err = ReportConfig::load_with(None, vars(&[(PRICE_SOURCE_ENV, "msrp")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key) if key == PRICE_SOURCE_ENV));
    }

    #[test]
    fn test_toml_parsing() {
        let config: ReportConfig = toml::from_str("price_source = \"catalog\"\nformat = \"table\"").unwrap();
        assert_eq!(config.price_source, PriceSource::Catalog);
        assert_eq!(config.format, OutputFormat::Table);
        assert!(!config.strict);

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("price_source = \"catalog\""));
    }

    #[test]
    fn test_file_then_env() {
        let path = env::temp_dir().join(format!("sales-report-{}.toml", std::process::id()));
        std::fs::write(&path, "strict = true\nformat = \"table\"\n").unwrap();

        let config = ReportConfig::load_with(Some(&path), vars(&[(FORMAT_ENV, "json")])).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(config.strict);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_file() {
        let err = ReportConfig::load_with(Some(Path::new("/nonexistent/sales.toml")), vars(&[]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
