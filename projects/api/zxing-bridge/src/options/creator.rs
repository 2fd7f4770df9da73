//! Options for creating a barcode from a payload.

use crate::engine::Engine;
use crate::error::{BridgeError, BridgeResult};
use crate::format::BarcodeFormat;
use crate::handle::NativeHandle;
use crate::last_error::{construction_failure, engine_failure};
use crate::marshal::{take_string, to_c_string};
use zxing_bridge_sys::ZXing_CreatorOptions;

/// Parameters for [`Engine::create_barcode`](crate::Engine::create_barcode).
///
/// Carries exactly one concrete target format and a format-specific options
/// string such as `"ecLevel=H"` or `"eci=utf8"`, interpreted by the engine.
pub struct CreatorOptions {
    handle: NativeHandle<ZXing_CreatorOptions>,
}

// SAFETY: the native object is exclusively owned and has no thread affinity.
unsafe impl Send for CreatorOptions {}

fn check_format(format: BarcodeFormat) -> BridgeResult<()> {
    if !format.is_concrete() {
        return Err(BridgeError::invalid(format!(
            "{format} is not a single barcode format"
        )));
    }
    if !format.matches(BarcodeFormat::ALL_CREATABLE) {
        return Err(BridgeError::invalid(format!("{format} can not be created")));
    }
    Ok(())
}

impl CreatorOptions {
    /// Creates options targeting `format`.
    ///
    /// Filters such as [`BarcodeFormat::ALL_MATRIX`], [`BarcodeFormat::NONE`],
    /// unknown codes and read-only formats outside
    /// [`BarcodeFormat::ALL_CREATABLE`] are rejected before the engine is called.
    pub fn new(engine: Engine, format: BarcodeFormat) -> BridgeResult<Self> {
        check_format(format)?;
        let api = engine.api();
        // SAFETY: a non-null result is a fresh object owned by us.
        let handle = unsafe {
            NativeHandle::adopt(
                engine,
                (api.creator_options_new)(format.raw()),
                api.creator_options_delete,
                "creator options",
            )
        };
        handle
            .map(|handle| Self { handle })
            .ok_or_else(|| construction_failure(engine, "creator options"))
    }

    /// Target format.
    pub fn format(&self) -> BridgeResult<BarcodeFormat> {
        let ptr = self.handle.as_ptr()?;
        // SAFETY: the handle is live for the duration of the call.
        let raw = unsafe { (self.handle.engine().api().creator_options_get_format)(ptr) };
        Ok(BarcodeFormat::from_raw(raw))
    }

    /// Changes the target format. Same rules as [`new`](Self::new).
    pub fn set_format(&mut self, format: BarcodeFormat) -> BridgeResult<()> {
        let ptr = self.handle.as_mut_ptr()?;
        check_format(format)?;
        // SAFETY: the handle is live and exclusively borrowed.
        unsafe { (self.handle.engine().api().creator_options_set_format)(ptr, format.raw()) };
        Ok(())
    }

    /// Format-specific options string; empty by default.
    pub fn options(&self) -> BridgeResult<String> {
        let ptr = self.handle.as_ptr()?;
        let engine = self.handle.engine();
        // SAFETY: the handle is live; the returned copy is owned by us.
        let text = unsafe { take_string(engine, (engine.api().creator_options_get_options)(ptr)) };
        text.ok_or_else(|| engine_failure(engine, "read creator options string"))
    }

    /// Sets the format-specific options string. It must not contain NUL.
    pub fn set_options(&mut self, options: &str) -> BridgeResult<()> {
        let ptr = self.handle.as_mut_ptr()?;
        let options = to_c_string(options, "options string")?;
        // SAFETY: the handle is live; the engine copies the string.
        unsafe { (self.handle.engine().api().creator_options_set_options)(ptr, options.as_ptr()) };
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

    pub(crate) fn as_ptr(&self) -> BridgeResult<*const ZXing_CreatorOptions> {
        self.handle.as_ptr()
    }
}

impl core::fmt::Debug for CreatorOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CreatorOptions")
            .field("format", &self.format().ok())
            .field("closed", &self.is_closed())
            .finish()
    }
}
