//! Common types, errors, and configuration for wasm-harness.
//!
//! This crate provides shared functionality used across the wasm-harness
//! workspace:
//! - Error types using `thiserror` for type-safe error handling
//! - Configuration structures for engine settings
//! - The [`LanguageHint`] vocabulary shared by config, host, and runner

pub mod config;
pub mod error;
pub mod language;

pub use config::{EngineConfig, HarnessConfig};
pub use error::{ErrorKind, HarnessError};
pub use language::LanguageHint;
