//! Single-owner native handles.

use crate::engine::Engine;
use crate::error::{BridgeError, BridgeResult};
use core::ptr::NonNull;

/// Owns one native pointer and releases it exactly once.
///
/// After [`close`](Self::close) the pointer is gone, further closes are no-ops
/// and every accessor returns [`BridgeError::UsageError`]. `Drop` closes too, as a
/// backstop for handles the caller never closed.
pub(crate) struct NativeHandle<T> {
    engine: Engine,
    ptr: Option<NonNull<T>>,
    release: unsafe extern "C" fn(*mut T),
    kind: &'static str,
}

impl<T> NativeHandle<T> {
    /// Takes ownership of `ptr`, or returns [`None`] if it is null.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must be owned by the caller and `release` must be the
    /// engine's destructor for it.
    pub(crate) unsafe fn adopt(
        engine: Engine,
        ptr: *mut T,
        release: unsafe extern "C" fn(*mut T),
        kind: &'static str,
    ) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self {
            engine,
            ptr: Some(ptr),
            release,
            kind,
        })
    }

    #[inline]
    pub(crate) fn engine(&self) -> Engine {
        self.engine
    }

    #[inline]
    pub(crate) fn kind(&self) -> &'static str {
        self.kind
    }

    #[inline]
    pub(crate) fn is_closed(&self) -> bool {
        self.ptr.is_none()
    }

    /// The live pointer, or a usage error once closed.
    #[inline]
    pub(crate) fn get(&self) -> BridgeResult<NonNull<T>> {
        self.ptr.ok_or(BridgeError::UsageError(self.kind))
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&self) -> BridgeResult<*mut T> {
        Ok(self.get()?.as_ptr())
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> BridgeResult<*const T> {
        Ok(self.get()?.as_ptr().cast_const())
    }

    /// Releases the native object. Idempotent.
    pub(crate) fn close(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            log::trace!("releasing {} {ptr:p}", self.kind);
            // SAFETY: `ptr` was taken out of `self`, so it is released once.
            unsafe { (self.release)(ptr.as_ptr()) };
        }
    }
}

impl<T> Drop for NativeHandle<T> {
    fn drop(&mut self) {
        self.close();
    }
}
