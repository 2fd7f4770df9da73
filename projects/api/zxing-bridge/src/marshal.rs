//! Copying engine-owned memory into host values.
//!
//! Every string or array the engine hands back is owned by the caller and must
//! go back through the engine's `free`. [`EngineAlloc`] pairs the pointer with
//! that release so it happens on every exit path.

use crate::engine::Engine;
use crate::error::{BridgeError, BridgeResult};
use crate::last_error::engine_failure;
use core::ffi::{CStr, c_char, c_int, c_void};
use std::ffi::CString;

/// An engine-allocated buffer released with the engine's `free` on drop.
pub(crate) struct EngineAlloc {
    engine: Engine,
    ptr: *mut c_void,
}

impl EngineAlloc {
    /// Takes ownership of `ptr`. Returns [`None`] for null.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or an allocation returned by `engine` that is not
    /// freed elsewhere.
    pub(crate) unsafe fn new<T>(engine: Engine, ptr: *mut T) -> Option<Self> {
        if ptr.is_null() {
            None
        } else {
            Some(Self {
                engine,
                ptr: ptr.cast(),
            })
        }
    }

    #[inline]
    pub(crate) fn as_ptr<T>(&self) -> *const T {
        self.ptr.cast()
    }
}

impl Drop for EngineAlloc {
    fn drop(&mut self) {
        // SAFETY: `ptr` came from this engine and is freed exactly once.
        unsafe { (self.engine.api().free)(self.ptr) };
    }
}

/// Copies an engine-owned C string into a [`String`] and frees it.
///
/// Invalid UTF-8 is replaced rather than rejected; the engine emits UTF-8.
///
/// # Safety
///
/// Same contract as [`EngineAlloc::new`]; a non-null `ptr` must be NUL-terminated.
pub(crate) unsafe fn take_string(engine: Engine, ptr: *mut c_char) -> Option<String> {
    // SAFETY: forwarded from the caller.
    let alloc = unsafe { EngineAlloc::new(engine, ptr) }?;
    // SAFETY: non-null and NUL-terminated per the contract; freed after the copy.
    let text = unsafe { CStr::from_ptr(alloc.as_ptr::<c_char>()) };
    Some(text.to_string_lossy().into_owned())
}

/// Copies `len` engine-owned elements into a [`Vec`] and frees the array.
///
/// A null array gives `Ok(None)`. A negative `len` is reported as a failure of
/// `operation`; the array is freed either way.
///
/// # Safety
///
/// Same contract as [`EngineAlloc::new`]; a non-null `ptr` must point at `len`
/// initialised elements.
pub(crate) unsafe fn take_array<T: Copy>(
    engine: Engine,
    ptr: *mut T,
    len: c_int,
    operation: &'static str,
) -> BridgeResult<Option<Vec<T>>> {
    // SAFETY: forwarded from the caller.
    let alloc = unsafe { EngineAlloc::new(engine, ptr) };
    let Ok(len) = usize::try_from(len) else {
        log::warn!("{operation} reported a negative length {len}");
        return Err(engine_failure(engine, operation));
    };
    let Some(alloc) = alloc else {
        return Ok(None);
    };
    if len == 0 {
        return Ok(Some(Vec::new()));
    }
    // SAFETY: non-null and holding `len` elements per the contract.
    let items = unsafe { core::slice::from_raw_parts(alloc.as_ptr::<T>(), len) };
    Ok(Some(items.to_vec()))
}

/// Duplicates `text` into a NUL-terminated buffer for the boundary.
pub(crate) fn to_c_string(text: &str, what: &str) -> BridgeResult<CString> {
    CString::new(text).map_err(|e| {
        BridgeError::invalid(format!(
            "{what} contains a NUL byte at offset {}",
            e.nul_position()
        ))
    })
}

/// Converts a host size to the boundary's `int`.
pub(crate) fn to_c_int(value: usize, what: &str) -> BridgeResult<c_int> {
    c_int::try_from(value)
        .map_err(|_| BridgeError::invalid(format!("{what} {value} exceeds the engine's limit")))
}
