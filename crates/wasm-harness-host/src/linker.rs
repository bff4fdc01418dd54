//! Host import registration for Wasmtime linkers.
//!
//! This module builds the host side of a module's import surface from a
//! language [`Profile`]: every logging name the profile offers is wired to
//! the string bridge and the per-execution log sink, and `abort` (where
//! offered) records an abort notice. It also validates a compiled module's
//! declared imports before instantiation is attempted.

use tracing::warn;
use wasmtime::{Caller, ExternType, Linker, Module};

use wasm_harness_common::HarnessError;
use wasm_harness_core::{LogKind, RunContext};

use crate::memory::read_guest_string;
use crate::profile::{ENV_NAMESPACE, Profile};

/// Register the host functions a profile offers on a core module linker.
///
/// All logging imports share one implementation: read the `(ptr, len)`
/// string through the bridge, append it to the sink. Offering several names
/// at once is harmless; a given module calls only the one its toolchain
/// emitted.
///
/// # Errors
///
/// Returns an error if function registration fails (duplicate definition).
pub fn register_profile(
    linker: &mut Linker<RunContext>,
    profile: &Profile,
) -> Result<(), HarnessError> {
    for name in profile.log_imports {
        linker.func_wrap(ENV_NAMESPACE, name, log_import).map_err(|e| {
            HarnessError::invalid_config(format!("failed to register env::{name}: {e}"))
        })?;
    }

    if profile.provide_abort {
        linker
            .func_wrap(ENV_NAMESPACE, "abort", abort_import)
            .map_err(|e| {
                HarnessError::invalid_config(format!("failed to register env::abort: {e}"))
            })?;
    }

    Ok(())
}

/// Reject imports the harness can never satisfy.
///
/// The harness provides functions in the `env` namespace and nothing else:
/// no foreign namespaces, no imported memories, tables, or globals. An `env`
/// function the selected profile does not offer is left for the linker to
/// report at instantiation, where the message names the exact import.
///
/// # Errors
///
/// Returns `UnsupportedImport` naming the first offending import.
pub fn validate_imports(module: &Module) -> Result<(), HarnessError> {
    for import in module.imports() {
        if import.module() != ENV_NAMESPACE {
            return Err(HarnessError::unsupported_import(
                import.module(),
                import.name(),
            ));
        }

        if !matches!(import.ty(), ExternType::Func(_)) {
            return Err(HarnessError::unsupported_import(
                import.module(),
                import.name(),
            ));
        }
    }

    Ok(())
}

/// Shared implementation behind `log`, `console_log`, and `print`.
///
/// String-bridge failures propagate as host errors through wasmtime and are
/// classified back into harness errors at the dispatcher boundary.
fn log_import(mut caller: Caller<'_, RunContext>, ptr: u32, len: u32) -> wasmtime::Result<()> {
    let message = read_guest_string(&mut caller, ptr, len)?;
    caller.data_mut().record(LogKind::Diagnostic, message);
    Ok(())
}

/// Implementation of `env::abort`.
///
/// Records an abort notice instead of reading guest memory; the original
/// convention passes no pointer. Aborting does not terminate execution on
/// its own.
fn abort_import(mut caller: Caller<'_, RunContext>) {
    warn!(run_id = %caller.data().run_id, "Guest called abort");
    caller
        .data_mut()
        .record(LogKind::Abort, "abort called".to_string());
}
