//! Execution dispatcher for wasm-harness.
//!
//! This crate ties the core runtime and the host imports together into the
//! caller-facing API:
//!
//! ```ignore
//! use wasm_harness_common::{EngineConfig, LanguageHint};
//! use wasm_harness_runner::Harness;
//!
//! let harness = Harness::new(&EngineConfig::default())?;
//! let report = harness.execute(&wasm_bytes, LanguageHint::Generic).await;
//! for entry in &report.logs {
//!     println!("[{}] {}", entry.kind, entry.message);
//! }
//! ```
//!
//! Each call to [`Harness::execute`] is one fully independent execution:
//! fresh linker, fresh store, fresh instance, all discarded when the report
//! is produced.

pub mod harness;
pub mod report;

pub use harness::Harness;
pub use report::{ExecutionOutcome, ExecutionReport};
