//! Core Wasmtime runtime for wasm-harness.
//!
//! This crate provides the fundamental WebAssembly execution capabilities:
//! - [`WasmEngine`]: configured Wasmtime engine shared across executions
//! - [`CompiledModule`]: compiled WebAssembly module wrapper
//! - [`RunContext`] and [`LogSink`]: per-execution state and the ordered
//!   diagnostic stream
//! - [`locator`]: entry-point location among conventional export names
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     WasmEngine                          │
//! │  (Shared across executions, thread-safe)                │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                   CompiledModule                        │
//! │  (One execution attempt, never cached)                  │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │             Store<RunContext> + Instance                │
//! │  (Per-execution, isolated)                              │
//! │  - Linear memory                                        │
//! │  - Log sink                                             │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod engine;
pub mod locator;
pub mod module;
pub mod store;

pub use engine::WasmEngine;
pub use module::CompiledModule;
pub use store::{LogEntry, LogKind, LogSink, RunContext};
