//! Host import implementations for wasm-harness.
//!
//! This crate provides the host side of the harness's guest-facing ABI:
//! one `env` namespace with logging imports (`log`, `console_log`, `print`)
//! and `abort`, all reading from the guest's own exported linear memory.
//!
//! # Modules
//!
//! - [`memory`]: the string bridge (bounds-checked, lossy UTF-8 reads)
//! - [`profile`]: the declarative `LanguageHint` → import/entry-point table
//! - [`linker`]: registration of profile imports and import validation

pub mod linker;
pub mod memory;
pub mod profile;

pub use linker::{register_profile, validate_imports};
pub use profile::Profile;
