//! Configuration structures for the harness.
//!
//! This module defines:
//! - [`HarnessConfig`]: top-level configuration, loadable from a TOML file
//! - [`EngineConfig`]: Wasmtime engine settings (allocation strategy)

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{HarnessError, LanguageHint};

/// Top-level harness configuration.
///
/// Can be loaded from a TOML file or built up in code. Everything has a
/// sensible default; an empty file is a valid configuration.
///
/// # Example
///
/// ```toml
/// default_language = "generic"
///
/// [engine]
/// pooling_allocator = false
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HarnessConfig {
    /// Wasmtime engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Profile to use when the caller supplies no language hint.
    #[serde(default)]
    pub default_language: LanguageHint,
}

impl HarnessConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed.
    pub fn from_toml(content: &str) -> Result<Self, HarnessError> {
        toml::from_str(content).map_err(|e| HarnessError::invalid_config(e.to_string()))
    }
}

/// Wasmtime engine configuration.
///
/// These settings affect only how the engine allocates instances; they never
/// change execution semantics. There is no fuel, epoch, or timeout setting:
/// the harness imposes no limit on a running module, and a module containing
/// an infinite loop blocks its execution indefinitely.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Enable the pooling allocator for fast instance creation.
    ///
    /// Off by default: the pool caps each instance's linear memory at
    /// `instance_memory_mb`, which is wrong for arbitrary caller-supplied
    /// modules. Turn it on for high-throughput batch runs of known modules.
    #[serde(default = "defaults::pooling_allocator")]
    pub pooling_allocator: bool,

    /// Maximum concurrent instances in the pool.
    ///
    /// Only effective when `pooling_allocator` is enabled.
    #[serde(default = "defaults::max_instances")]
    pub max_instances: u32,

    /// Memory per pooled instance slot in megabytes.
    ///
    /// Only effective when `pooling_allocator` is enabled.
    #[serde(default = "defaults::instance_memory_mb")]
    pub instance_memory_mb: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pooling_allocator: defaults::pooling_allocator(),
            max_instances: defaults::max_instances(),
            instance_memory_mb: defaults::instance_memory_mb(),
        }
    }
}

/// Default value functions for serde.
mod defaults {
    pub const fn pooling_allocator() -> bool {
        false
    }

    pub const fn max_instances() -> u32 {
        100
    }

    pub const fn instance_memory_mb() -> u32 {
        64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();

        assert!(!config.engine.pooling_allocator);
        assert_eq!(config.engine.max_instances, 100);
        assert_eq!(config.engine.instance_memory_mb, 64);
        assert_eq!(config.default_language, LanguageHint::Generic);
    }

    #[test]
    fn test_config_serialization() {
        let config = HarnessConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: HarnessConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            config.engine.max_instances,
            deserialized.engine.max_instances
        );
        assert_eq!(config.default_language, deserialized.default_language);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = HarnessConfig::from_toml(
            r#"
            default_language = "python"

            [engine]
            max_instances = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.default_language, LanguageHint::Python);
        assert_eq!(config.engine.max_instances, 500);
        // Defaults for unspecified fields
        assert!(!config.engine.pooling_allocator);
        assert_eq!(config.engine.instance_memory_mb, 64);
    }

    #[test]
    fn test_from_toml_empty() {
        let config = HarnessConfig::from_toml("").unwrap();
        assert_eq!(config.default_language, LanguageHint::Generic);
    }

    #[test]
    fn test_from_toml_invalid() {
        let result = HarnessConfig::from_toml("default_language = \"fortran\"");
        assert!(matches!(
            result.unwrap_err(),
            HarnessError::InvalidConfig { .. }
        ));
    }
}
