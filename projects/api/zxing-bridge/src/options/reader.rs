//! Decode options.

use super::{native_enum, primitive_accessors};
use crate::engine::Engine;
use crate::error::{BridgeError, BridgeResult};
use crate::format::BarcodeFormat;
use crate::handle::NativeHandle;
use crate::last_error::{construction_failure, take_last_error};
use crate::marshal::{take_array, to_c_int};
use core::ffi::c_int;
use derive_enum_all_values::AllValues;
use zxing_bridge_sys::*;

/// Thresholding strategy used to turn gray pixels into black and white.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AllValues)]
pub enum Binarizer {
    /// Threshold against the local average; the engine default.
    #[default]
    LocalAverage = ZXing_Binarizer_LocalAverage,
    /// Single threshold from the global histogram.
    GlobalHistogram = ZXing_Binarizer_GlobalHistogram,
    /// Fixed threshold at 127.
    FixedThreshold = ZXing_Binarizer_FixedThreshold,
    /// Any non-zero value is white. For already binarized input.
    BoolCast = ZXing_Binarizer_BoolCast,
}

native_enum!(Binarizer: ZXing_Binarizer, "binarizer");

/// What to do with EAN-2/EAN-5 add-on symbols next to EAN/UPC codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AllValues)]
pub enum EanAddOnSymbol {
    /// Ignore add-ons.
    #[default]
    Ignore = ZXing_EanAddOnSymbol_Ignore,
    /// Read add-ons when present.
    Read = ZXing_EanAddOnSymbol_Read,
    /// Only report symbols that carry an add-on.
    Require = ZXing_EanAddOnSymbol_Require,
}

native_enum!(EanAddOnSymbol: ZXing_EanAddOnSymbol, "EAN add-on policy");

/// How decoded bytes are turned into [`Barcode::text`](crate::Barcode::text).
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AllValues)]
pub enum TextMode {
    /// Bytes decoded with the detected character set.
    Plain = ZXing_TextMode_Plain,
    /// ECI-annotated text.
    Eci = ZXing_TextMode_ECI,
    /// Human readable interpretation; the engine default.
    #[default]
    Hri = ZXing_TextMode_HRI,
    /// Hex dump of the bytes.
    Hex = ZXing_TextMode_Hex,
    /// Non-printable characters escaped.
    Escaped = ZXing_TextMode_Escaped,
}

native_enum!(TextMode: ZXing_TextMode, "text mode");

/// Parameters for [`Engine::read_barcodes`](crate::Engine::read_barcodes).
///
/// A fresh object carries the engine defaults. One object may be reused across
/// any number of decode calls; it is independent of their results.
pub struct ReaderOptions {
    handle: NativeHandle<ZXing_ReaderOptions>,
}

// SAFETY: the native object is exclusively owned and has no thread affinity.
unsafe impl Send for ReaderOptions {}

impl ReaderOptions {
    /// Creates options with the engine defaults.
    pub fn new(engine: Engine) -> BridgeResult<Self> {
        let api = engine.api();
        // SAFETY: a non-null result is a fresh object owned by us.
        let handle = unsafe {
            NativeHandle::adopt(
                engine,
                (api.reader_options_new)(),
                api.reader_options_delete,
                "reader options",
            )
        };
        handle
            .map(|handle| Self { handle })
            .ok_or_else(|| construction_failure(engine, "reader options"))
    }

    primitive_accessors! {
        /// Spend more time looking for symbols.
        try_harder, set_try_harder: bool
            => reader_options_get_try_harder, reader_options_set_try_harder;
        /// Also try the image rotated by 90/180/270 degrees.
        try_rotate, set_try_rotate: bool
            => reader_options_get_try_rotate, reader_options_set_try_rotate;
        /// Also try the inverted image (light symbols on dark ground).
        try_invert, set_try_invert: bool
            => reader_options_get_try_invert, reader_options_set_try_invert;
        /// Also try downscaled copies of large images.
        try_downscale, set_try_downscale: bool
            => reader_options_get_try_downscale, reader_options_set_try_downscale;
        /// The image holds exactly one unrotated, unskewed symbol with quiet zone.
        is_pure, set_is_pure: bool
            => reader_options_get_is_pure, reader_options_set_is_pure;
        /// Validate optional check digits (Code39, ITF).
        validate_optional_checksum, set_validate_optional_checksum: bool
            => reader_options_get_validate_optional_checksum,
               reader_options_set_validate_optional_checksum;
        /// Report symbols that failed to decode, with their error, instead of
        /// dropping them.
        return_errors, set_return_errors: bool
            => reader_options_get_return_errors, reader_options_set_return_errors;
        /// Scan lines a linear symbol must be found on to be reported.
        min_line_count, set_min_line_count: c_int
            => reader_options_get_min_line_count, reader_options_set_min_line_count;
        /// Stop after this many symbols.
        max_number_of_symbols, set_max_number_of_symbols: c_int
            => reader_options_get_max_number_of_symbols,
               reader_options_set_max_number_of_symbols;
    }

    /// Thresholding strategy.
    pub fn binarizer(&self) -> BridgeResult<Binarizer> {
        let ptr = self.handle.as_ptr()?;
        // SAFETY: the handle is live for the duration of the call.
        Binarizer::from_raw(unsafe { (self.api().reader_options_get_binarizer)(ptr) })
    }

    /// Sets the thresholding strategy.
    pub fn set_binarizer(&mut self, value: Binarizer) -> BridgeResult<()> {
        let ptr = self.handle.as_mut_ptr()?;
        // SAFETY: the handle is live and exclusively borrowed.
        unsafe { (self.api().reader_options_set_binarizer)(ptr, value.raw()) };
        Ok(())
    }

    /// EAN add-on policy.
    pub fn ean_add_on_symbol(&self) -> BridgeResult<EanAddOnSymbol> {
        let ptr = self.handle.as_ptr()?;
        // SAFETY: the handle is live for the duration of the call.
        EanAddOnSymbol::from_raw(unsafe { (self.api().reader_options_get_ean_add_on_symbol)(ptr) })
    }

    /// Sets the EAN add-on policy.
    pub fn set_ean_add_on_symbol(&mut self, value: EanAddOnSymbol) -> BridgeResult<()> {
        let ptr = self.handle.as_mut_ptr()?;
        // SAFETY: the handle is live and exclusively borrowed.
        unsafe { (self.api().reader_options_set_ean_add_on_symbol)(ptr, value.raw()) };
        Ok(())
    }

    /// Text rendering of decoded content.
    pub fn text_mode(&self) -> BridgeResult<TextMode> {
        let ptr = self.handle.as_ptr()?;
        // SAFETY: the handle is live for the duration of the call.
        TextMode::from_raw(unsafe { (self.api().reader_options_get_text_mode)(ptr) })
    }

    /// Sets the text rendering of decoded content.
    pub fn set_text_mode(&mut self, value: TextMode) -> BridgeResult<()> {
        let ptr = self.handle.as_mut_ptr()?;
        // SAFETY: the handle is live and exclusively borrowed.
        unsafe { (self.api().reader_options_set_text_mode)(ptr, value.raw()) };
        Ok(())
    }

    /// Formats the reader looks for. Empty means every readable format.
    pub fn formats(&self) -> BridgeResult<Vec<BarcodeFormat>> {
        let ptr = self.handle.as_ptr()?;
        let engine = self.handle.engine();
        let mut count: c_int = 0;
        // SAFETY: the handle is live and `count` is a valid out-parameter.
        let codes = unsafe { (self.api().reader_options_get_formats)(ptr, &mut count) };

        if codes.is_null() {
            // An empty set comes back as null too; only a pending message marks failure.
            return match take_last_error(engine) {
                Some(message) => Err(BridgeError::EngineFailure {
                    operation: "read format set",
                    message,
                }),
                None => Ok(Vec::new()),
            };
        }

        // SAFETY: non-null array of `count` codes owned by us.
        let codes =
            unsafe { take_array(engine, codes, count, "read format set") }?.unwrap_or_default();
        Ok(codes.into_iter().map(BarcodeFormat::from_raw).collect())
    }

    /// Restricts the formats the reader looks for. An empty slice selects all.
    pub fn set_formats(&mut self, formats: &[BarcodeFormat]) -> BridgeResult<()> {
        let ptr = self.handle.as_mut_ptr()?;
        let codes: Vec<ZXing_BarcodeFormat> = formats.iter().map(|f| f.raw()).collect();
        let count = to_c_int(codes.len(), "format count")?;
        let codes_ptr = if codes.is_empty() {
            core::ptr::null()
        } else {
            codes.as_ptr()
        };
        // SAFETY: the handle is live; the engine copies `count` codes.
        unsafe { (self.api().reader_options_set_formats)(ptr, codes_ptr, count) };
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

    #[inline]
    fn api(&self) -> &'static ZXingApi {
        self.handle.engine().api()
    }

    pub(crate) fn as_ptr(&self) -> BridgeResult<*const ZXing_ReaderOptions> {
        self.handle.as_ptr()
    }
}

impl core::fmt::Debug for ReaderOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReaderOptions")
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
