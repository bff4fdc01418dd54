//! Entry point location.
//!
//! Different source toolchains export their "run me" function under
//! different names. The locator walks an ordered candidate list over an
//! instantiated module's exports and returns the first match, typed to the
//! no-argument, no-result signature the dispatcher invokes.

use tracing::debug;
use wasmtime::{Instance, Store, TypedFunc};

use crate::store::RunContext;
use wasm_harness_common::HarnessError;

/// Locate the entry point among `candidates`, first present wins.
///
/// # Errors
///
/// Returns `NoEntryPoint` if none of the candidate names is exported, or if
/// the first exported candidate does not have the `() -> ()` signature the
/// harness can invoke.
pub fn locate_entry(
    instance: &Instance,
    store: &mut Store<RunContext>,
    candidates: &[&str],
) -> Result<TypedFunc<(), ()>, HarnessError> {
    for name in candidates {
        let Some(func) = instance.get_func(&mut *store, name) else {
            continue;
        };

        debug!(entry_point = %name, "Entry point located");

        return func.typed::<(), ()>(&*store).map_err(|_| HarnessError::NoEntryPoint {
            candidates: format!("{name} (exported, but not callable with no arguments)"),
        });
    }

    Err(HarnessError::no_entry_point(candidates))
}
