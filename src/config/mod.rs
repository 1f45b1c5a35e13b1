//! Configuration module for raven-iq.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use raven_iq::config::{load_or_default, AppConfig};
//!
//! let config = AppConfig::default();
//! let estimator = config.estimator()?;
//!
//! // Explicit paths must exist and parse; discovered files fall back to defaults
//! let missing = std::path::Path::new("/nonexistent/raven-iq.yaml");
//! assert!(load_or_default(Some(missing)).is_err());
//! # let _ = estimator;
//! # Ok::<(), raven_iq::IqError>(())
//! ```
//!
//! # Configuration File
//!
//! Place a `.raven-iq.yaml` file in your project root or `~/.config/raven-iq/`:
//!
//! ```yaml
//! scoring:
//!   default_test_level: full
//! output:
//!   format: json
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AppConfig, ClassificationBandConfig, OutputConfig, PercentileConfig, PercentileStepConfig,
    ScoringConfig, TablesConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    ConfigFileError, discover_config_file, generate_example_config, generate_full_example_config,
    load_config_file, load_or_default, user_config_dir,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.raven-iq.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> crate::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        let value: serde_json::Value = serde_json::from_str(&schema).unwrap();
        let properties = &value["properties"];
        assert!(properties.get("scoring").is_some());
        assert!(properties.get("output").is_some());
        assert!(schema.contains("default_test_level"));
    }
}
