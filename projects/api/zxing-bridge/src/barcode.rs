//! Decoded and created symbols.

use crate::engine::Engine;
use crate::error::{BridgeError, BridgeResult};
use crate::format::BarcodeFormat;
use crate::handle::NativeHandle;
use crate::last_error::{engine_failure, take_last_error};
use crate::marshal::{take_array, take_string, to_c_string};
use crate::options::native_enum;
use core::ffi::{c_char, c_int};
use core::fmt::{self, Display, Formatter};
use derive_enum_all_values::AllValues;
use zxing_bridge_sys::*;

/// Classification of decoded content.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
pub enum ContentType {
    /// Printable text.
    Text = ZXing_ContentType_Text,
    /// Arbitrary bytes.
    Binary = ZXing_ContentType_Binary,
    /// Text and binary segments.
    Mixed = ZXing_ContentType_Mixed,
    /// GS1 element strings.
    Gs1 = ZXing_ContentType_GS1,
    /// ISO/IEC 15434 formatted data.
    Iso15434 = ZXing_ContentType_ISO15434,
    /// Bytes tagged with an ECI the engine does not know.
    UnknownEci = ZXing_ContentType_UnknownECI,
}

native_enum!(ContentType: ZXing_ContentType, "content type");

/// Why a located symbol could not be decoded.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AllValues)]
pub enum ErrorType {
    /// Decoded successfully.
    #[default]
    None = ZXing_ErrorType_None,
    /// The symbol structure is broken.
    Format = ZXing_ErrorType_Format,
    /// A checksum did not match.
    Checksum = ZXing_ErrorType_Checksum,
    /// The symbol uses a feature the engine does not support.
    Unsupported = ZXing_ErrorType_Unsupported,
}

native_enum!(ErrorType: ZXing_ErrorType, "error type");

/// Per-symbol decode error. Only reported when
/// [`return_errors`](crate::ReaderOptions::set_return_errors) is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BarcodeError {
    /// What went wrong; [`ErrorType::None`] for a good symbol.
    pub kind: ErrorType,
    /// Engine description, empty for a good symbol.
    pub message: String,
}

impl BarcodeError {
    /// True if the symbol decoded without error.
    pub fn is_none(&self) -> bool {
        self.kind == ErrorType::None
    }
}

impl Display for BarcodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (self.kind, self.message.is_empty()) {
            (ErrorType::None, _) => f.write_str("none"),
            (kind, true) => write!(f, "{kind:?}"),
            (kind, false) => write!(f, "{kind:?}: {}", self.message),
        }
    }
}

/// A point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointI {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl From<ZXing_PointI> for PointI {
    fn from(point: ZXing_PointI) -> Self {
        Self {
            x: point.x,
            y: point.y,
        }
    }
}

impl Display for PointI {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Corners of a symbol, clockwise from its own top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    #[allow(missing_docs)]
    pub top_left: PointI,
    #[allow(missing_docs)]
    pub top_right: PointI,
    #[allow(missing_docs)]
    pub bottom_right: PointI,
    #[allow(missing_docs)]
    pub bottom_left: PointI,
}

impl From<ZXing_Position> for Position {
    fn from(position: ZXing_Position) -> Self {
        Self {
            top_left: position.top_left.into(),
            top_right: position.top_right.into(),
            bottom_right: position.bottom_right.into(),
            bottom_left: position.bottom_left.into(),
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.top_left, self.top_right, self.bottom_right, self.bottom_left
        )
    }
}

/// One symbol, either found by a decode or made by
/// [`Engine::create_barcode`](crate::Engine::create_barcode).
///
/// A `Barcode` owns its native object and only reads it, so it can be shared
/// between threads. Every accessor fails with
/// [`UsageError`](crate::BridgeError::UsageError) after [`close`](Self::close).
pub struct Barcode {
    handle: NativeHandle<ZXing_Barcode>,
}

// SAFETY: the native object is immutable once produced, and all accessors only
// read it. Release needs `&mut self` or ownership.
unsafe impl Send for Barcode {}
unsafe impl Sync for Barcode {}

macro_rules! scalar_accessors {
    ($($(#[$meta:meta])* $name:ident: $ty:ty => $native:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&self) -> BridgeResult<$ty> {
                let ptr = self.handle.as_ptr()?;
                // SAFETY: the handle is live for the duration of the call.
                Ok(unsafe { (self.api().$native)(ptr) })
            }
        )*
    };
}

macro_rules! string_accessors {
    ($($(#[$meta:meta])* $name:ident => $native:ident, $operation:literal;)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&self) -> BridgeResult<String> {
                let ptr = self.handle.as_ptr()?;
                // SAFETY: the handle is live; the returned copy is owned by us.
                unsafe { self.take_string((self.api().$native)(ptr), $operation) }
            }
        )*
    };
}

impl Barcode {
    /// Takes ownership of a native barcode, or returns [`None`] for null.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must be a barcode owned by the caller and created by `engine`.
    pub(crate) unsafe fn adopt(engine: Engine, ptr: *mut ZXing_Barcode) -> Option<Self> {
        // SAFETY: forwarded from the caller.
        unsafe { NativeHandle::adopt(engine, ptr, engine.api().barcode_delete, "barcode") }
            .map(|handle| Self { handle })
    }

    scalar_accessors! {
        /// False if the symbol was located but could not be decoded.
        is_valid: bool => barcode_is_valid;
        /// Rotation of the symbol in degrees.
        orientation: c_int => barcode_orientation;
        /// True if the content carries ECI markers.
        has_eci: bool => barcode_has_eci;
        /// True if the symbol was found light on dark.
        is_inverted: bool => barcode_is_inverted;
        /// True if the symbol was found mirrored.
        is_mirrored: bool => barcode_is_mirrored;
        /// Scan lines a linear symbol was found on.
        line_count: c_int => barcode_line_count;
        /// Index within a structured-append sequence, -1 if not part of one.
        sequence_index: c_int => barcode_sequence_index;
        /// Number of symbols in the structured-append sequence, -1 if none.
        sequence_size: c_int => barcode_sequence_size;
    }

    string_accessors! {
        /// Decoded text, rendered per the reader's text mode.
        text => barcode_text, "read barcode text";
        /// Symbology identifier, e.g. `]Q1`.
        symbology_identifier => barcode_symbology_identifier, "read symbology identifier";
        /// Structured-append sequence id; empty if not part of a sequence.
        sequence_id => barcode_sequence_id, "read sequence id";
    }

    /// Concrete format, e.g. `EAN8`.
    pub fn format(&self) -> BridgeResult<BarcodeFormat> {
        let ptr = self.handle.as_ptr()?;
        // SAFETY: the handle is live for the duration of the call.
        Ok(BarcodeFormat::from_raw(unsafe { (self.api().barcode_format)(ptr) }))
    }

    /// Symbology group, e.g. `EANUPC` for an `EAN8`.
    pub fn symbology(&self) -> BridgeResult<BarcodeFormat> {
        let ptr = self.handle.as_ptr()?;
        // SAFETY: the handle is live for the duration of the call.
        Ok(BarcodeFormat::from_raw(unsafe { (self.api().barcode_symbology)(ptr) }))
    }

    /// Classification of the content.
    pub fn content_type(&self) -> BridgeResult<ContentType> {
        let ptr = self.handle.as_ptr()?;
        // SAFETY: the handle is live for the duration of the call.
        ContentType::from_raw(unsafe { (self.api().barcode_content_type)(ptr) })
    }

    /// Raw decoded bytes.
    pub fn bytes(&self) -> BridgeResult<Vec<u8>> {
        let ptr = self.handle.as_ptr()?;
        let mut len: c_int = 0;
        // SAFETY: the handle is live and `len` is a valid out-parameter.
        let bytes = unsafe { (self.api().barcode_bytes)(ptr, &mut len) };
        // SAFETY: `bytes` is null or `len` bytes owned by us.
        unsafe { self.take_bytes(bytes, len, "read barcode bytes") }
    }

    /// Raw bytes including ECI designators.
    pub fn bytes_eci(&self) -> BridgeResult<Vec<u8>> {
        let ptr = self.handle.as_ptr()?;
        let mut len: c_int = 0;
        // SAFETY: the handle is live and `len` is a valid out-parameter.
        let bytes = unsafe { (self.api().barcode_bytes_eci)(ptr, &mut len) };
        // SAFETY: `bytes` is null or `len` bytes owned by us.
        unsafe { self.take_bytes(bytes, len, "read barcode ECI bytes") }
    }

    /// Corners of the symbol in the decoded image.
    pub fn position(&self) -> BridgeResult<Position> {
        let ptr = self.handle.as_ptr()?;
        // SAFETY: the handle is live for the duration of the call.
        Ok(unsafe { (self.api().barcode_position)(ptr) }.into())
    }

    /// Decode error for this symbol; [`ErrorType::None`] for a good one.
    pub fn error(&self) -> BridgeResult<BarcodeError> {
        let ptr = self.handle.as_ptr()?;
        // SAFETY: the handle is live for the duration of the call.
        let kind = ErrorType::from_raw(unsafe { (self.api().barcode_error_type)(ptr) })?;
        // SAFETY: as above; the returned copy is owned by us.
        let message =
            unsafe { self.take_string((self.api().barcode_error_msg)(ptr), "read error message") }?;
        Ok(BarcodeError { kind, message })
    }

    /// All extra metadata as a JSON object string, e.g. `{"Version":"2"}`.
    /// Empty when there is none.
    pub fn extra(&self) -> BridgeResult<String> {
        let ptr = self.handle.as_ptr()?;
        // SAFETY: a null key requests the whole blob; the copy is owned by us.
        unsafe { self.take_string((self.api().barcode_extra)(ptr, core::ptr::null()), "read extra") }
    }

    /// One extra metadata value, e.g. `"Version"` or `"EcLevel"`. Empty when absent.
    pub fn extra_value(&self, key: &str) -> BridgeResult<String> {
        let ptr = self.handle.as_ptr()?;
        let key = to_c_string(key, "extra key")?;
        // SAFETY: the handle is live and `key` is NUL-terminated; the copy is owned by us.
        unsafe { self.take_string((self.api().barcode_extra)(ptr, key.as_ptr()), "read extra value") }
    }

    /// Releases the native object. Idempotent.
    pub fn close(&mut self) {
        self.handle.close();
    }

    /// True once the barcode has been closed.
    pub fn is_closed(&self) -> bool {
        self.handle.is_closed()
    }

    /// The engine this barcode belongs to.
    pub fn engine(&self) -> Engine {
        self.handle.engine()
    }

    pub(crate) fn as_ptr(&self) -> BridgeResult<*const ZXing_Barcode> {
        self.handle.as_ptr()
    }

    #[inline]
    fn api(&self) -> &'static ZXingApi {
        self.handle.engine().api()
    }

    /// # Safety
    ///
    /// `ptr` must be null or an engine-allocated string owned by us.
    unsafe fn take_string(&self, ptr: *mut c_char, operation: &'static str) -> BridgeResult<String> {
        let engine = self.handle.engine();
        // SAFETY: forwarded from the caller.
        unsafe { take_string(engine, ptr) }.ok_or_else(|| engine_failure(engine, operation))
    }

    /// # Safety
    ///
    /// `ptr` must be null or `len` engine-allocated bytes owned by us.
    unsafe fn take_bytes(
        &self,
        ptr: *mut u8,
        len: c_int,
        operation: &'static str,
    ) -> BridgeResult<Vec<u8>> {
        let engine = self.handle.engine();
        // SAFETY: forwarded from the caller.
        if let Some(bytes) = unsafe { take_array(engine, ptr, len, operation) }? {
            return Ok(bytes);
        }
        // Zero-length content may come back without a buffer; a pending message
        // still marks the null as a failure.
        match take_last_error(engine) {
            Some(message) => Err(BridgeError::EngineFailure { operation, message }),
            None if len == 0 => Ok(Vec::new()),
            None => Err(engine_failure(engine, operation)),
        }
    }
}

impl Display for Barcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match (self.format(), self.text()) {
            (Ok(format), Ok(text)) => write!(f, "{format}: {text}"),
            _ => f.write_str("<closed barcode>"),
        }
    }
}

impl fmt::Debug for Barcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Barcode")
            .field("format", &self.format().ok())
            .field("closed", &self.is_closed())
            .finish()
    }
}
