//! Wasmtime engine configuration and creation.
//!
//! The [`WasmEngine`] is the foundation of the harness. It is:
//! - Thread-safe and shared across back-to-back executions
//! - Configured for async instantiation and invocation (the caller suspends
//!   while the engine works)
//! - Optionally backed by the pooling allocator for batch workloads
//!
//! There is no fuel metering and no epoch interruption: the harness imposes
//! no timeout on a running module.

use std::sync::Arc;

use tracing::info;
use wasmtime::{Config, Engine, InstanceAllocationStrategy, PoolingAllocationConfig};

use wasm_harness_common::{EngineConfig, HarnessError};

/// Thread-safe WebAssembly engine wrapper.
///
/// Wraps a Wasmtime [`Engine`] configured for one-shot module execution.
/// The engine is shared across all executions and contains no per-execution
/// state; every execution gets its own store and instance.
#[derive(Clone)]
pub struct WasmEngine {
    engine: Arc<Engine>,
    config: EngineConfig,
}

impl WasmEngine {
    /// Create a new WebAssembly engine with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the Wasmtime configuration is invalid or the
    /// pooling allocator cannot be initialized.
    pub fn new(config: &EngineConfig) -> Result<Self, HarnessError> {
        let mut wasmtime_config = Config::new();

        // Async support: instantiation and entry-point calls suspend the
        // calling task instead of blocking it
        wasmtime_config.async_support(true);

        wasmtime_config.cranelift_opt_level(wasmtime::OptLevel::Speed);

        if config.pooling_allocator {
            let pooling_config = Self::create_pooling_config(config);

            wasmtime_config
                .allocation_strategy(InstanceAllocationStrategy::Pooling(pooling_config));

            info!(
                max_instances = config.max_instances,
                instance_memory_mb = config.instance_memory_mb,
                "Pooling allocator enabled"
            );
        }

        let engine = Engine::new(&wasmtime_config).map_err(|e| {
            HarnessError::invalid_config(format!("Failed to create Wasmtime engine: {e}"))
        })?;

        info!("Wasmtime engine initialized");

        Ok(Self {
            engine: Arc::new(engine),
            config: config.clone(),
        })
    }

    /// Create pooling allocation configuration.
    fn create_pooling_config(config: &EngineConfig) -> PoolingAllocationConfig {
        let mut pooling = PoolingAllocationConfig::default();

        pooling.total_core_instances(config.max_instances);
        pooling.total_memories(config.max_instances);
        pooling.total_tables(config.max_instances);

        let max_memory_bytes = (config.instance_memory_mb as usize) * 1024 * 1024;
        pooling.max_memory_size(max_memory_bytes);

        pooling
    }

    /// Get a reference to the inner Wasmtime engine.
    pub fn inner(&self) -> &Engine {
        &self.engine
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Check if the pooling allocator is enabled.
    pub fn is_pooling_enabled(&self) -> bool {
        self.config.pooling_allocator
    }
}

impl std::fmt::Debug for WasmEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WasmEngine")
            .field("pooling_allocator", &self.config.pooling_allocator)
            .field("max_instances", &self.config.max_instances)
            .field("instance_memory_mb", &self.config.instance_memory_mb)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_creation_default() {
        let config = EngineConfig::default();
        let engine = WasmEngine::new(&config);

        assert!(engine.is_ok());
        let engine = engine.unwrap();
        assert!(!engine.is_pooling_enabled());
    }

    #[test]
    fn test_engine_creation_pooling() {
        let config = EngineConfig {
            pooling_allocator: true,
            ..Default::default()
        };
        let engine = WasmEngine::new(&config);

        assert!(engine.is_ok());
        let engine = engine.unwrap();
        assert!(engine.is_pooling_enabled());
    }

    #[test]
    fn test_engine_debug() {
        let config = EngineConfig::default();
        let engine = WasmEngine::new(&config).unwrap();

        let debug_str = format!("{engine:?}");
        assert!(debug_str.contains("WasmEngine"));
        assert!(debug_str.contains("pooling_allocator"));
    }
}
