//! WebAssembly module compilation.
//!
//! This module provides [`CompiledModule`], a wrapper around Wasmtime's
//! [`Module`] that validates the module header before compiling and carries a
//! content hash of the original bytes for tracing.
//!
//! A `CompiledModule` lives for exactly one execution attempt; the harness
//! never caches or reuses compiled modules across executions.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::Instant;

use tracing::{debug, instrument};
use wasmtime::{Engine, Module};

use wasm_harness_common::HarnessError;

/// A compiled WebAssembly module.
///
/// Wraps a Wasmtime [`Module`] together with a content hash of the raw bytes
/// it was compiled from. The wrapper is cheap to clone; the underlying module
/// is reference-counted inside Wasmtime.
#[derive(Clone)]
pub struct CompiledModule {
    inner: Module,
    content_hash: String,
}

impl CompiledModule {
    /// Compile a module from raw WebAssembly bytes.
    ///
    /// The header is validated before the bytes are handed to Wasmtime so
    /// that obviously-malformed buffers fail with a clear message.
    ///
    /// # Errors
    ///
    /// Returns a `Compile` error if the buffer is not a valid module.
    #[instrument(skip(engine, bytes), fields(bytes_len = bytes.len()))]
    pub fn from_bytes(engine: &Engine, bytes: &[u8]) -> Result<Self, HarnessError> {
        let start = Instant::now();

        Self::validate_wasm_header(bytes)?;

        let module = Module::new(engine, bytes)
            .map_err(|e| HarnessError::compile(format!("module compilation failed: {e}")))?;

        let content_hash = compute_hash(bytes);

        debug!(
            content_hash = %content_hash,
            duration_ms = start.elapsed().as_millis(),
            "Module compiled"
        );

        Ok(Self {
            inner: module,
            content_hash,
        })
    }

    /// Compile a module from WAT (WebAssembly Text Format).
    ///
    /// This is primarily for testing purposes.
    ///
    /// # Errors
    ///
    /// Returns a `Compile` error if the WAT is invalid.
    #[instrument(skip(engine, wat))]
    pub fn from_wat(engine: &Engine, wat: &str) -> Result<Self, HarnessError> {
        let module = Module::new(engine, wat)
            .map_err(|e| HarnessError::compile(format!("WAT compilation failed: {e}")))?;

        Ok(Self {
            inner: module,
            content_hash: compute_hash(wat.as_bytes()),
        })
    }

    /// Get the content hash of the original bytes.
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Get the inner Wasmtime module.
    pub fn as_module(&self) -> &Module {
        &self.inner
    }

    /// Validate the WebAssembly header (magic number and length).
    fn validate_wasm_header(bytes: &[u8]) -> Result<(), HarnessError> {
        if bytes.len() < 8 {
            return Err(HarnessError::compile("invalid module: buffer too small"));
        }

        // Magic number: \0asm
        if &bytes[0..4] != b"\0asm" {
            return Err(HarnessError::compile("invalid module: bad magic number"));
        }

        Ok(())
    }
}

impl std::fmt::Debug for CompiledModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledModule")
            .field("content_hash", &self.content_hash)
            .finish_non_exhaustive()
    }
}

/// Compute a hash of the given bytes.
fn compute_hash(bytes: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
