//! The execution dispatcher.
//!
//! [`Harness`] drives the complete lifecycle of running one module buffer:
//!
//! 1. Compile the buffer
//! 2. Validate declared imports and build the host side per profile
//! 3. Instantiate with a fresh store
//! 4. Locate the entry point among the profile's candidate names
//! 5. Invoke it and classify any failure
//!
//! The first failing step terminates the execution; log entries accumulated
//! before the failure are preserved in the returned report. The dispatcher
//! never returns an error to the caller: every failure becomes an
//! [`ExecutionOutcome::Failure`].

use tracing::{debug, error, info, instrument};
use uuid::Uuid;
use wasmtime::{Linker, Store, Trap};

use wasm_harness_common::{EngineConfig, HarnessError, LanguageHint};
use wasm_harness_core::locator::locate_entry;
use wasm_harness_core::store::create_store;
use wasm_harness_core::{CompiledModule, RunContext, WasmEngine};
use wasm_harness_host::{Profile, register_profile, validate_imports};

use crate::report::{ExecutionOutcome, ExecutionReport};

/// Fixed confirmation message for successful executions.
const SUCCESS_MESSAGE: &str = "module executed successfully";

/// Toolchain-agnostic module execution harness.
///
/// Holds the shared engine; everything else (linker, store, instance) is
/// allocated fresh per execution and dropped when it returns, so
/// back-to-back executions are fully independent. The harness is
/// `Send + Sync` and can be shared across tasks.
pub struct Harness {
    engine: WasmEngine,
}

impl Harness {
    /// Create a harness with the given engine configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the Wasmtime engine cannot be created.
    pub fn new(config: &EngineConfig) -> Result<Self, HarnessError> {
        Ok(Self {
            engine: WasmEngine::new(config)?,
        })
    }

    /// Execute one module buffer under the given language hint.
    ///
    /// Never fails from the caller's perspective: compilation errors, link
    /// failures, missing entry points, traps, and bad string passing all
    /// fold into the report's outcome. Diagnostics emitted before a failure
    /// are returned alongside it.
    #[instrument(skip(self, bytes), fields(bytes_len = bytes.len(), hint = %hint))]
    pub async fn execute(&self, bytes: &[u8], hint: LanguageHint) -> ExecutionReport {
        let run_id = Uuid::new_v4().to_string();
        let mut store = create_store(&self.engine, run_id.clone());

        let outcome = match self.run(bytes, hint, &mut store).await {
            Ok(()) => {
                info!(
                    run_id = %run_id,
                    duration_ms = store.data().elapsed().as_millis(),
                    "Execution completed"
                );
                ExecutionOutcome::Success {
                    message: SUCCESS_MESSAGE.to_string(),
                }
            }
            Err(err) => {
                error!(run_id = %run_id, kind = %err.kind(), "Execution failed: {err}");
                ExecutionOutcome::Failure {
                    kind: err.kind(),
                    message: err.to_string(),
                }
            }
        };

        let context = store.into_data();
        let duration_ms = context.elapsed().as_millis();

        ExecutionReport {
            run_id,
            outcome,
            logs: context.into_logs(),
            duration_ms,
        }
    }

    /// The fallible pipeline behind [`Harness::execute`].
    async fn run(
        &self,
        bytes: &[u8],
        hint: LanguageHint,
        store: &mut Store<RunContext>,
    ) -> Result<(), HarnessError> {
        let module = CompiledModule::from_bytes(self.engine.inner(), bytes)?;
        let profile = Profile::for_hint(hint);

        debug!(content_hash = %module.content_hash(), "Resolving imports");

        // Foreign-namespace and non-function imports fail here with a
        // precise name; an env function a narrower profile doesn't offer
        // fails inside instantiate with the linker's message.
        validate_imports(module.as_module())?;

        let mut linker: Linker<RunContext> = Linker::new(self.engine.inner());
        register_profile(&mut linker, profile)?;

        let instance = linker
            .instantiate_async(&mut *store, module.as_module())
            .await
            .map_err(classify_guest_error(|e| {
                HarnessError::instantiate(e.to_string())
            }))?;

        debug!("Module instantiated, locating entry point");

        let entry = locate_entry(&instance, store, profile.entry_candidates)?;

        entry
            .call_async(&mut *store, ())
            .await
            .map_err(classify_guest_error(trap_error))?;

        Ok(())
    }

    /// The engine shared across executions.
    pub fn engine(&self) -> &WasmEngine {
        &self.engine
    }
}

impl std::fmt::Debug for Harness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harness")
            .field("engine", &self.engine)
            .finish()
    }
}

/// Classify a wasmtime error from instantiation or invocation.
///
/// Host-raised harness errors (string-bridge failures) travel through
/// wasmtime's error chain; they are recovered by downcast so the caller sees
/// `MemoryUnavailable`/`OutOfBounds` rather than a generic trap. Anything
/// else goes through `fallback`.
fn classify_guest_error<F>(fallback: F) -> impl FnOnce(wasmtime::Error) -> HarnessError
where
    F: FnOnce(wasmtime::Error) -> HarnessError,
{
    move |err| match err.downcast::<HarnessError>() {
        Ok(host_err) => host_err,
        Err(err) => fallback(err),
    }
}

/// Build a `Trap` error from a guest runtime fault.
fn trap_error(err: wasmtime::Error) -> HarnessError {
    let code = err.downcast_ref::<Trap>().map(|trap| format!("{trap:?}"));
    HarnessError::Trap {
        message: err.to_string(),
        code,
    }
}
