//! Configuration types for loading and resolving model schemas.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources. Every field has a default, so an empty document is a
//! valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining validation and output settings.
//! - [`ValidationConfig`] - Controls which checks run when a snapshot is loaded.
//! - [`OutputConfig`] - Controls how resolved models are rendered.
//!
//! # Example
//!
//! ```
//! # use ddags::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.validation().validate_on_load());
//! assert!(!config.output().pretty());
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Validation configuration section.
    #[serde(default)]
    validation: ValidationConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    ///
    /// # Arguments
    ///
    /// * `validation` - Checks to run while loading a snapshot.
    /// * `output` - Rendering options for resolved models.
    pub fn new(validation: ValidationConfig, output: OutputConfig) -> Self {
        Self { validation, output }
    }

    /// Returns the validation configuration.
    pub fn validation(&self) -> &ValidationConfig {
        &self.validation
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

fn enabled() -> bool {
    true
}

/// Checks performed while a snapshot is loaded into a session.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    /// Validate every model's attributes once all models are registered.
    #[serde(default = "enabled")]
    validate_on_load: bool,

    /// Reject reference attributes that point at their own model.
    #[serde(default = "enabled")]
    reject_self_references: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            validate_on_load: true,
            reject_self_references: true,
        }
    }
}

impl ValidationConfig {
    /// Creates a new [`ValidationConfig`].
    pub fn new(validate_on_load: bool, reject_self_references: bool) -> Self {
        Self {
            validate_on_load,
            reject_self_references,
        }
    }

    pub fn validate_on_load(&self) -> bool {
        self.validate_on_load
    }

    pub fn reject_self_references(&self) -> bool {
        self.reject_self_references
    }
}

/// Rendering options for resolved models.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    #[serde(default)]
    pretty: bool,
}

impl OutputConfig {
    /// Creates a new [`OutputConfig`].
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }
}
