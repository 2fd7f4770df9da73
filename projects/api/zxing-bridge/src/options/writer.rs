//! Options for rendering a barcode.

use super::primitive_accessors;
use crate::engine::Engine;
use crate::error::{BridgeError, BridgeResult};
use crate::handle::NativeHandle;
use crate::last_error::construction_failure;
use core::ffi::c_int;
use zxing_bridge_sys::ZXing_WriterOptions;

/// Parameters for [`Barcode::to_image`](crate::Barcode::to_image) and
/// [`Barcode::to_svg`](crate::Barcode::to_svg).
pub struct WriterOptions {
    handle: NativeHandle<ZXing_WriterOptions>,
}

// SAFETY: the native object is exclusively owned and has no thread affinity.
unsafe impl Send for WriterOptions {}

impl WriterOptions {
    /// Creates options with the engine defaults.
    pub fn new(engine: Engine) -> BridgeResult<Self> {
        let api = engine.api();
        // SAFETY: a non-null result is a fresh object owned by us.
        let handle = unsafe {
            NativeHandle::adopt(
                engine,
                (api.writer_options_new)(),
                api.writer_options_delete,
                "writer options",
            )
        };
        handle
            .map(|handle| Self { handle })
            .ok_or_else(|| construction_failure(engine, "writer options"))
    }

    primitive_accessors! {
        /// Pixels per module. 0 lets the engine pick.
        scale, set_scale: c_int => writer_options_get_scale, writer_options_set_scale;
        /// Print the human readable text below linear symbols.
        add_hrt, set_add_hrt: bool => writer_options_get_add_hrt, writer_options_set_add_hrt;
        /// Surround the symbol with its quiet zone.
        add_quiet_zones, set_add_quiet_zones: bool
            => writer_options_get_add_quiet_zones, writer_options_set_add_quiet_zones;
    }

    /// Clockwise rotation in degrees.
    pub fn rotate(&self) -> BridgeResult<c_int> {
        let ptr = self.handle.as_ptr()?;
        // SAFETY: the handle is live for the duration of the call.
        Ok(unsafe { (self.handle.engine().api().writer_options_get_rotate)(ptr) })
    }

    /// Sets the rotation: 0, 90, 180 or 270 degrees.
    pub fn set_rotate(&mut self, degrees: c_int) -> BridgeResult<()> {
        let ptr = self.handle.as_mut_ptr()?;
        if !matches!(degrees, 0 | 90 | 180 | 270) {
            return Err(BridgeError::invalid(format!(
                "rotation must be 0, 90, 180 or 270 degrees, got {degrees}"
            )));
        }
        // SAFETY: the handle is live and exclusively borrowed.
        unsafe { (self.handle.engine().api().writer_options_set_rotate)(ptr, degrees) };
        Ok(())
    }

    /// Releases the native object. Idempotent.
    pub fn close(&mut self) {
        self.handle.close();
    }

    /// True once the options have been closed.
    pub fn is_closed(&self) -> bool {
        self.handle.is_closed()
    }

    /// The engine these options belong to.
    pub fn engine(&self) -> Engine {
        self.handle.engine()
    }

    pub(crate) fn as_ptr(&self) -> BridgeResult<*const ZXing_WriterOptions> {
        self.handle.as_ptr()
    }
}

impl core::fmt::Debug for WriterOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WriterOptions")
            .field("scale", &self.scale().ok())
            .field("rotate", &self.rotate().ok())
            .field("closed", &self.is_closed())
            .finish()
    }
}
