//! Per-execution context, log sink, and store management.
//!
//! This module provides:
//! - [`RunContext`]: store data for a single execution, accessible from host
//!   functions through [`wasmtime::Caller`]
//! - [`LogSink`], [`LogEntry`], [`LogKind`]: the ordered diagnostic stream a
//!   module emits through its imports
//!
//! Exactly one [`RunContext`] exists per execution; it is created fresh for
//! each module buffer and consumed when the sink is handed back to the
//! caller. Nothing here is shared between executions.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::info;
use wasmtime::Store;

use crate::WasmEngine;

/// Per-execution state.
///
/// Host functions reach this through `Caller::data_mut` while the guest is
/// running; the dispatcher extracts the accumulated sink afterwards with
/// [`Store::into_data`].
pub struct RunContext {
    /// Unique run identifier for tracing.
    pub run_id: String,

    /// Diagnostics emitted by the guest via its imports.
    sink: LogSink,

    /// Execution start time.
    start_time: Instant,
}

/// An ordered, append-only sequence of guest diagnostics.
///
/// No deduplication and no size bound (bounded only by guest behavior).
/// Entries are never mutated or removed during an execution; the harness
/// never clears the sink mid-execution.
#[derive(Debug, Default)]
pub struct LogSink {
    entries: Vec<LogEntry>,
}

/// A single decoded diagnostic from guest code.
///
/// Sequence position is implicit in the order of the sink's entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// What produced this entry.
    pub kind: LogKind,

    /// Decoded message content.
    pub message: String,
}

/// The source of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// A string the guest passed through a logging import (`log`,
    /// `console_log`, `print`).
    Diagnostic,
    /// A notice recorded when the guest called `abort`.
    Abort,
}

impl std::fmt::Display for LogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogKind::Diagnostic => write!(f, "log"),
            LogKind::Abort => write!(f, "abort"),
        }
    }
}

impl LogSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Entries are never reordered or dropped.
    pub fn append(&mut self, kind: LogKind, message: String) {
        self.entries.push(LogEntry { kind, message });
    }

    /// The entries accumulated so far, in emission order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the sink, yielding the ordered entries.
    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

impl RunContext {
    /// Create a new context for one execution.
    pub fn new(run_id: String) -> Self {
        Self {
            run_id,
            sink: LogSink::new(),
            start_time: Instant::now(),
        }
    }

    /// Record a guest diagnostic.
    ///
    /// The entry is appended to the sink and also emitted through `tracing`
    /// for host-side observability.
    pub fn record(&mut self, kind: LogKind, message: String) {
        info!(run_id = %self.run_id, guest_log = true, kind = %kind, "{message}");
        self.sink.append(kind, message);
    }

    /// The sink accumulated so far.
    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    /// Elapsed time since the execution started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Consume the context, yielding the ordered log entries.
    pub fn into_logs(self) -> Vec<LogEntry> {
        self.sink.into_entries()
    }
}

/// Create a fresh store for one execution.
///
/// Each execution owns its store exclusively; stores are never reused.
pub fn create_store(engine: &WasmEngine, run_id: String) -> Store<RunContext> {
    Store::new(engine.inner(), RunContext::new(run_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_context_creation() {
        let ctx = RunContext::new("run-123".into());

        assert_eq!(ctx.run_id, "run-123");
        assert!(ctx.sink().is_empty());
    }

    #[test]
    fn test_sink_preserves_order() {
        let mut ctx = RunContext::new("test".into());

        ctx.record(LogKind::Diagnostic, "first".into());
        ctx.record(LogKind::Diagnostic, "second".into());
        ctx.record(LogKind::Abort, "abort called".into());

        let entries = ctx.sink().entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].message, "second");
        assert_eq!(entries[2].kind, LogKind::Abort);
    }

    #[test]
    fn test_sink_allows_duplicates() {
        let mut sink = LogSink::new();
        sink.append(LogKind::Diagnostic, "same".into());
        sink.append(LogKind::Diagnostic, "same".into());

        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_into_logs() {
        let mut ctx = RunContext::new("test".into());
        ctx.record(LogKind::Diagnostic, "hello".into());

        let logs = ctx.into_logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].message, "hello");
        assert_eq!(logs[0].kind, LogKind::Diagnostic);
    }

    #[test]
    fn test_log_kind_display() {
        assert_eq!(LogKind::Diagnostic.to_string(), "log");
        assert_eq!(LogKind::Abort.to_string(), "abort");
    }

    #[test]
    fn test_store_creation() {
        let engine = WasmEngine::new(&wasm_harness_common::EngineConfig::default()).unwrap();
        let store = create_store(&engine, "test-123".into());

        assert_eq!(store.data().run_id, "test-123");
    }
}
