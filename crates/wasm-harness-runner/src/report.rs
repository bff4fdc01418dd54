//! Execution outcomes and reports.
//!
//! An [`ExecutionOutcome`] is the tagged success/failure result produced
//! exactly once per execution. The [`ExecutionReport`] bundles it with the
//! full ordered log sink contents and tracing metadata for the caller to
//! render as it sees fit.

use serde::Serialize;

use wasm_harness_common::ErrorKind;
use wasm_harness_core::LogEntry;

/// Result of executing one module buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExecutionOutcome {
    /// The entry point ran to completion.
    Success {
        /// Fixed human-readable confirmation message.
        message: String,
    },

    /// Execution failed at some stage.
    Failure {
        /// Coarse failure classification.
        kind: ErrorKind,
        /// Descriptive message for display.
        message: String,
    },
}

impl ExecutionOutcome {
    /// Returns `true` if execution succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success { .. })
    }

    /// Returns `true` if execution failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, ExecutionOutcome::Failure { .. })
    }

    /// The failure kind, if this is a failure.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ExecutionOutcome::Success { .. } => None,
            ExecutionOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    /// The human-readable message, success or failure.
    pub fn message(&self) -> &str {
        match self {
            ExecutionOutcome::Success { message } | ExecutionOutcome::Failure { message, .. } => {
                message
            }
        }
    }
}

/// Everything one execution hands back to the caller.
///
/// The log entries accumulated before a failure are always present;
/// diagnostics emitted before a crash are never discarded. Whether logs
/// accumulate across executions is caller policy; the harness returns a
/// fresh set per run.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    /// Unique run identifier (also used in tracing output).
    pub run_id: String,

    /// The tagged result of this execution.
    pub outcome: ExecutionOutcome,

    /// Ordered diagnostics the module emitted through its imports.
    pub logs: Vec<LogEntry>,

    /// Wall-clock duration of the execution in milliseconds.
    pub duration_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_success() {
        let outcome = ExecutionOutcome::Success {
            message: "module executed successfully".into(),
        };
        assert!(outcome.is_success());
        assert!(!outcome.is_failure());
        assert_eq!(outcome.kind(), None);
        assert_eq!(outcome.message(), "module executed successfully");
    }

    #[test]
    fn test_outcome_failure() {
        let outcome = ExecutionOutcome::Failure {
            kind: ErrorKind::Trap,
            message: "wasm trap: unreachable".into(),
        };
        assert!(outcome.is_failure());
        assert_eq!(outcome.kind(), Some(ErrorKind::Trap));
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = ExecutionOutcome::Failure {
            kind: ErrorKind::NoEntryPoint,
            message: "no entry point found".into(),
        };
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["status"], "failure");
        assert_eq!(json["kind"], "no_entry_point");
    }
}
