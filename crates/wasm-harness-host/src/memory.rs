//! The string bridge: reading guest strings out of linear memory.
//!
//! Diagnostic imports receive a `(ptr, len)` pair naming a byte range in the
//! guest's own exported memory. The guest is untrusted, so the range is
//! bounds-checked before slicing; decoding is permissive (replacement
//! characters for malformed UTF-8) because a garbled diagnostic must never
//! turn into an execution failure on its own.
//!
//! The memory is looked up through [`Caller::get_export`] at call time, not
//! at import-registration time: the import closures are built before the
//! instance (and therefore its memory) exists, and `Caller` is the
//! indirection that resolves the live instance once the guest actually
//! calls in.

use std::ops::Range;

use wasmtime::{Caller, Extern};

use wasm_harness_common::HarnessError;
use wasm_harness_core::RunContext;

/// The conventional name modules export their linear memory under.
pub const MEMORY_EXPORT: &str = "memory";

/// Read the UTF-8 string occupying `[ptr, ptr + len)` of the caller's
/// exported memory.
///
/// # Errors
///
/// - `MemoryUnavailable` if the instance exports no linear memory named
///   `memory`
/// - `OutOfBounds` if the range overflows or exceeds the current memory size
pub fn read_guest_string(
    caller: &mut Caller<'_, RunContext>,
    ptr: u32,
    len: u32,
) -> Result<String, HarnessError> {
    let memory = caller
        .get_export(MEMORY_EXPORT)
        .and_then(Extern::into_memory)
        .ok_or(HarnessError::MemoryUnavailable)?;

    let data = memory.data(&caller);
    let range = checked_range(ptr, len, data.len())?;

    Ok(String::from_utf8_lossy(&data[range]).into_owned())
}

/// Validate that `[ptr, ptr + len)` lies within a memory of `memory_size`
/// bytes.
///
/// Checked before slicing: the guest may pass arbitrary offsets.
fn checked_range(ptr: u32, len: u32, memory_size: usize) -> Result<Range<usize>, HarnessError> {
    let start = ptr as usize;
    let end = start
        .checked_add(len as usize)
        .filter(|&end| end <= memory_size)
        .ok_or(HarnessError::OutOfBounds {
            ptr,
            len,
            memory_size,
        })?;

    Ok(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_range_in_bounds() {
        assert_eq!(checked_range(0, 10, 100).unwrap(), 0..10);
        assert_eq!(checked_range(90, 10, 100).unwrap(), 90..100);
        assert_eq!(checked_range(100, 0, 100).unwrap(), 100..100);
    }

    #[test]
    fn test_checked_range_past_end() {
        let err = checked_range(95, 10, 100).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::OutOfBounds {
                ptr: 95,
                len: 10,
                memory_size: 100
            }
        ));
    }

    #[test]
    fn test_checked_range_overflow() {
        // ptr + len wraps past usize::MAX on 32-bit pointers; the check must
        // not panic or wrap
        let err = checked_range(u32::MAX, u32::MAX, 100).unwrap_err();
        assert!(matches!(err, HarnessError::OutOfBounds { .. }));
    }

    #[test]
    fn test_checked_range_empty_memory() {
        assert!(checked_range(0, 1, 0).is_err());
        assert_eq!(checked_range(0, 0, 0).unwrap(), 0..0);
    }
}
