//! Error types for the harness.
//!
//! This module defines the error hierarchy using `thiserror`:
//! - [`HarnessError`]: everything that can go wrong while executing a module
//! - [`ErrorKind`]: the coarse classification attached to execution outcomes
//!
//! Every [`HarnessError`] is recovered at the execution dispatcher boundary;
//! none propagate to the caller as uncaught faults.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while compiling, instantiating, or invoking a module.
///
/// The first six variants correspond one-to-one with the failure kinds a
/// caller can observe in an execution outcome. `InvalidConfig` and `Io` cover
/// harness-side concerns (engine setup, configuration files) and surface
/// before any execution starts.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// The module buffer could not be compiled (malformed binary,
    /// unsupported feature).
    #[error("compilation failed: {reason}")]
    Compile {
        /// Description of the compilation failure.
        reason: String,
    },

    /// The compiled module could not be instantiated (unsatisfied import,
    /// linking mismatch).
    #[error("instantiation failed: {reason}")]
    Instantiate {
        /// Description of the instantiation failure.
        reason: String,
    },

    /// The module declares an import the harness cannot provide: a namespace
    /// other than `env`, or a non-function import (memory, table, global).
    #[error("unsupported import: {namespace}::{name}")]
    UnsupportedImport {
        /// Namespace (module field) of the declared import.
        namespace: String,
        /// Name of the declared import.
        name: String,
    },

    /// None of the conventional entry point names is exported.
    #[error("no entry point found (tried: {candidates})")]
    NoEntryPoint {
        /// Comma-separated candidate names that were tried.
        candidates: String,
    },

    /// The module trapped at runtime (out-of-bounds access, unreachable).
    #[error("wasm trap: {message}")]
    Trap {
        /// Description of the trap.
        message: String,
        /// Trap code if wasmtime could classify it.
        code: Option<String>,
    },

    /// A diagnostic import was called but the instance exports no linear
    /// memory to read the message from.
    #[error("module exports no linear memory named 'memory'")]
    MemoryUnavailable,

    /// The guest passed a pointer/length pair outside its own memory.
    #[error("memory read out of bounds: ptr={ptr} len={len} memory_size={memory_size}")]
    OutOfBounds {
        /// Byte offset passed by the guest.
        ptr: u32,
        /// Byte length passed by the guest.
        len: u32,
        /// Current size of the guest memory in bytes.
        memory_size: usize,
    },

    /// Invalid harness configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// I/O failure (configuration file, module file).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Coarse failure classification attached to execution outcomes.
///
/// `UnsupportedImport` folds into [`ErrorKind::Instantiate`]: both mean the
/// module cannot be brought to a runnable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Compilation failed.
    Compile,
    /// Instantiation failed (including unsupported imports).
    Instantiate,
    /// No conventional entry point exported.
    NoEntryPoint,
    /// Runtime trap during invocation.
    Trap,
    /// No exported linear memory for string passing.
    MemoryUnavailable,
    /// Guest pointer/length outside its memory.
    OutOfBounds,
    /// Harness-side failure (configuration, I/O).
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Compile => "compile",
            ErrorKind::Instantiate => "instantiate",
            ErrorKind::NoEntryPoint => "no_entry_point",
            ErrorKind::Trap => "trap",
            ErrorKind::MemoryUnavailable => "memory_unavailable",
            ErrorKind::OutOfBounds => "out_of_bounds",
            ErrorKind::Internal => "internal",
        };
        f.write_str(name)
    }
}

impl HarnessError {
    /// Create a new `Compile` error.
    pub fn compile(reason: impl Into<String>) -> Self {
        Self::Compile {
            reason: reason.into(),
        }
    }

    /// Create a new `Instantiate` error.
    pub fn instantiate(reason: impl Into<String>) -> Self {
        Self::Instantiate {
            reason: reason.into(),
        }
    }

    /// Create a new `UnsupportedImport` error.
    pub fn unsupported_import(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnsupportedImport {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Create a new `NoEntryPoint` error from the candidate list that was tried.
    pub fn no_entry_point(candidates: &[&str]) -> Self {
        Self::NoEntryPoint {
            candidates: candidates.join(", "),
        }
    }

    /// Create a new `InvalidConfig` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// The [`ErrorKind`] this error is reported under.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Compile { .. } => ErrorKind::Compile,
            Self::Instantiate { .. } | Self::UnsupportedImport { .. } => ErrorKind::Instantiate,
            Self::NoEntryPoint { .. } => ErrorKind::NoEntryPoint,
            Self::Trap { .. } => ErrorKind::Trap,
            Self::MemoryUnavailable => ErrorKind::MemoryUnavailable,
            Self::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            Self::InvalidConfig { .. } | Self::Io(_) => ErrorKind::Internal,
        }
    }

    /// Returns `true` if this error came from the module's own behavior at
    /// runtime rather than from its shape (trap or bad string passing).
    pub fn is_runtime(&self) -> bool {
        matches!(
            self,
            Self::Trap { .. } | Self::MemoryUnavailable | Self::OutOfBounds { .. }
        )
    }

    /// Returns `true` if this error means the module never reached a
    /// runnable state.
    pub fn is_link_failure(&self) -> bool {
        matches!(
            self,
            Self::Compile { .. } | Self::Instantiate { .. } | Self::UnsupportedImport { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HarnessError::compile("bad magic number");
        assert_eq!(err.to_string(), "compilation failed: bad magic number");

        let err = HarnessError::unsupported_import("wasi_snapshot_preview1", "fd_write");
        assert_eq!(
            err.to_string(),
            "unsupported import: wasi_snapshot_preview1::fd_write"
        );

        let err = HarnessError::no_entry_point(&["main", "helloWorld", "run"]);
        assert_eq!(
            err.to_string(),
            "no entry point found (tried: main, helloWorld, run)"
        );
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(HarnessError::compile("x").kind(), ErrorKind::Compile);
        assert_eq!(HarnessError::instantiate("x").kind(), ErrorKind::Instantiate);
        // UnsupportedImport is an instantiation failure as far as callers see
        assert_eq!(
            HarnessError::unsupported_import("host", "f").kind(),
            ErrorKind::Instantiate
        );
        assert_eq!(HarnessError::MemoryUnavailable.kind(), ErrorKind::MemoryUnavailable);
        assert_eq!(
            HarnessError::OutOfBounds {
                ptr: 0,
                len: 1,
                memory_size: 0
            }
            .kind(),
            ErrorKind::OutOfBounds
        );
        assert_eq!(
            HarnessError::Trap {
                message: "unreachable".into(),
                code: None
            }
            .kind(),
            ErrorKind::Trap
        );
    }

    #[test]
    fn test_is_runtime() {
        assert!(HarnessError::MemoryUnavailable.is_runtime());
        assert!(
            HarnessError::Trap {
                message: "t".into(),
                code: None
            }
            .is_runtime()
        );
        assert!(!HarnessError::compile("x").is_runtime());
    }

    #[test]
    fn test_is_link_failure() {
        assert!(HarnessError::compile("x").is_link_failure());
        assert!(HarnessError::unsupported_import("host", "f").is_link_failure());
        assert!(!HarnessError::MemoryUnavailable.is_link_failure());
    }

    #[test]
    fn test_error_kind_serialization() {
        let json = serde_json::to_string(&ErrorKind::NoEntryPoint).unwrap();
        assert_eq!(json, "\"no_entry_point\"");
        let kind: ErrorKind = serde_json::from_str("\"trap\"").unwrap();
        assert_eq!(kind, ErrorKind::Trap);
    }
}
