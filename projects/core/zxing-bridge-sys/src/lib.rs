#![doc = include_str!("../README.MD")]
#![no_std]
#![allow(non_camel_case_types, non_upper_case_globals)]

use core::ffi::{c_char, c_int, c_void};

/// Function table over the linked native library.
#[cfg(feature = "link")]
pub mod linked;

macro_rules! opaque {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[repr(C)]
            pub struct $name {
                _opaque: [u8; 0],
                _marker: core::marker::PhantomData<(*mut u8, core::marker::PhantomPinned)>,
            }
        )*
    };
}

opaque! {
    /// Non-owning view over caller pixel memory.
    ZXing_ImageView,
    /// Engine-owned raster produced by rendering.
    ZXing_Image,
    /// Decode parameters.
    ZXing_ReaderOptions,
    /// Parameters for creating a barcode from a payload.
    ZXing_CreatorOptions,
    /// Parameters for rendering a barcode.
    ZXing_WriterOptions,
    /// A single decoded or created symbol.
    ZXing_Barcode,
    /// A collection of decoded symbols.
    ZXing_Barcodes,
}

/// Bit-packed pixel layout code: byte 3 holds the channel count, bytes 2..0 the
/// red, green and blue byte indices.
pub type ZXing_ImageFormat = u32;
pub const ZXing_ImageFormat_None: ZXing_ImageFormat = 0;
pub const ZXing_ImageFormat_Lum: ZXing_ImageFormat = 0x0100_0000;
pub const ZXing_ImageFormat_LumA: ZXing_ImageFormat = 0x0200_0000;
pub const ZXing_ImageFormat_RGB: ZXing_ImageFormat = 0x0300_0102;
pub const ZXing_ImageFormat_BGR: ZXing_ImageFormat = 0x0302_0100;
pub const ZXing_ImageFormat_RGBA: ZXing_ImageFormat = 0x0400_0102;
pub const ZXing_ImageFormat_ARGB: ZXing_ImageFormat = 0x0401_0203;
pub const ZXing_ImageFormat_BGRA: ZXing_ImageFormat = 0x0402_0100;
pub const ZXing_ImageFormat_ABGR: ZXing_ImageFormat = 0x0403_0201;

/// 16-bit barcode format code: low byte symbology character, high byte variant
/// character.
pub type ZXing_BarcodeFormat = u32;
pub const ZXing_BarcodeFormat_None: ZXing_BarcodeFormat = 0;
pub const ZXing_BarcodeFormat_Invalid: ZXing_BarcodeFormat = 0xFFFF;

pub type ZXing_ContentType = c_int;
pub const ZXing_ContentType_Text: ZXing_ContentType = 0;
pub const ZXing_ContentType_Binary: ZXing_ContentType = 1;
pub const ZXing_ContentType_Mixed: ZXing_ContentType = 2;
pub const ZXing_ContentType_GS1: ZXing_ContentType = 3;
pub const ZXing_ContentType_ISO15434: ZXing_ContentType = 4;
pub const ZXing_ContentType_UnknownECI: ZXing_ContentType = 5;

pub type ZXing_ErrorType = c_int;
pub const ZXing_ErrorType_None: ZXing_ErrorType = 0;
pub const ZXing_ErrorType_Format: ZXing_ErrorType = 1;
pub const ZXing_ErrorType_Checksum: ZXing_ErrorType = 2;
pub const ZXing_ErrorType_Unsupported: ZXing_ErrorType = 3;

pub type ZXing_Binarizer = c_int;
pub const ZXing_Binarizer_LocalAverage: ZXing_Binarizer = 0;
pub const ZXing_Binarizer_GlobalHistogram: ZXing_Binarizer = 1;
pub const ZXing_Binarizer_FixedThreshold: ZXing_Binarizer = 2;
pub const ZXing_Binarizer_BoolCast: ZXing_Binarizer = 3;

pub type ZXing_EanAddOnSymbol = c_int;
pub const ZXing_EanAddOnSymbol_Ignore: ZXing_EanAddOnSymbol = 0;
pub const ZXing_EanAddOnSymbol_Read: ZXing_EanAddOnSymbol = 1;
pub const ZXing_EanAddOnSymbol_Require: ZXing_EanAddOnSymbol = 2;

pub type ZXing_TextMode = c_int;
pub const ZXing_TextMode_Plain: ZXing_TextMode = 0;
pub const ZXing_TextMode_ECI: ZXing_TextMode = 1;
pub const ZXing_TextMode_HRI: ZXing_TextMode = 2;
pub const ZXing_TextMode_Hex: ZXing_TextMode = 3;
pub const ZXing_TextMode_Escaped: ZXing_TextMode = 4;

/// Integer pixel coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ZXing_PointI {
    pub x: c_int,
    pub y: c_int,
}

/// Corner points of a symbol, clockwise from top-left.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ZXing_Position {
    pub top_left: ZXing_PointI,
    pub top_right: ZXing_PointI,
    pub bottom_right: ZXing_PointI,
    pub bottom_left: ZXing_PointI,
}

/// Every C entry point the safe layer uses, as plain function pointers.
///
/// Field names are the C names without the `ZXing_` prefix, in snake case.
/// A table is usually obtained from [`linked::API`](crate::linked) but any set
/// of functions honouring the zxing-cpp C contract works, which is how the safe
/// layer is tested without the native library.
///
/// Ownership rules of the C API apply unchanged: every `*mut` returned by a
/// `*_new`/`create_*`/`read_*`/`write_*` function is owned by the caller and goes
/// back through the matching `*_delete`; every returned `char*`/array is released
/// with [`free`](ZXingApi::free).
#[derive(Debug, Clone, Copy)]
pub struct ZXingApi {
    // ImageView
    pub image_view_new_checked: unsafe extern "C" fn(
        data: *const u8,
        size: c_int,
        width: c_int,
        height: c_int,
        format: ZXing_ImageFormat,
        row_stride: c_int,
        pix_stride: c_int,
    ) -> *mut ZXing_ImageView,
    pub image_view_delete: unsafe extern "C" fn(iv: *mut ZXing_ImageView),
    pub image_view_crop: unsafe extern "C" fn(
        iv: *mut ZXing_ImageView,
        left: c_int,
        top: c_int,
        width: c_int,
        height: c_int,
    ),
    pub image_view_rotate: unsafe extern "C" fn(iv: *mut ZXing_ImageView, degree: c_int),

    // Image
    pub image_delete: unsafe extern "C" fn(img: *mut ZXing_Image),
    pub image_data: unsafe extern "C" fn(img: *const ZXing_Image) -> *const u8,
    pub image_width: unsafe extern "C" fn(img: *const ZXing_Image) -> c_int,
    pub image_height: unsafe extern "C" fn(img: *const ZXing_Image) -> c_int,
    pub image_format: unsafe extern "C" fn(img: *const ZXing_Image) -> ZXing_ImageFormat,

    // ReaderOptions
    pub reader_options_new: unsafe extern "C" fn() -> *mut ZXing_ReaderOptions,
    pub reader_options_delete: unsafe extern "C" fn(opts: *mut ZXing_ReaderOptions),
    pub reader_options_set_try_harder: unsafe extern "C" fn(opts: *mut ZXing_ReaderOptions, v: bool),
    pub reader_options_set_try_rotate: unsafe extern "C" fn(opts: *mut ZXing_ReaderOptions, v: bool),
    pub reader_options_set_try_invert: unsafe extern "C" fn(opts: *mut ZXing_ReaderOptions, v: bool),
    pub reader_options_set_try_downscale:
        unsafe extern "C" fn(opts: *mut ZXing_ReaderOptions, v: bool),
    pub reader_options_set_is_pure: unsafe extern "C" fn(opts: *mut ZXing_ReaderOptions, v: bool),
    pub reader_options_set_validate_optional_checksum:
        unsafe extern "C" fn(opts: *mut ZXing_ReaderOptions, v: bool),
    pub reader_options_set_return_errors:
        unsafe extern "C" fn(opts: *mut ZXing_ReaderOptions, v: bool),
    pub reader_options_set_formats: unsafe extern "C" fn(
        opts: *mut ZXing_ReaderOptions,
        formats: *const ZXing_BarcodeFormat,
        count: c_int,
    ),
    pub reader_options_set_binarizer:
        unsafe extern "C" fn(opts: *mut ZXing_ReaderOptions, v: ZXing_Binarizer),
    pub reader_options_set_ean_add_on_symbol:
        unsafe extern "C" fn(opts: *mut ZXing_ReaderOptions, v: ZXing_EanAddOnSymbol),
    pub reader_options_set_text_mode:
        unsafe extern "C" fn(opts: *mut ZXing_ReaderOptions, v: ZXing_TextMode),
    pub reader_options_set_min_line_count:
        unsafe extern "C" fn(opts: *mut ZXing_ReaderOptions, v: c_int),
    pub reader_options_set_max_number_of_symbols:
        unsafe extern "C" fn(opts: *mut ZXing_ReaderOptions, v: c_int),
    pub reader_options_get_try_harder: unsafe extern "C" fn(opts: *const ZXing_ReaderOptions) -> bool,
    pub reader_options_get_try_rotate: unsafe extern "C" fn(opts: *const ZXing_ReaderOptions) -> bool,
    pub reader_options_get_try_invert: unsafe extern "C" fn(opts: *const ZXing_ReaderOptions) -> bool,
    pub reader_options_get_try_downscale:
        unsafe extern "C" fn(opts: *const ZXing_ReaderOptions) -> bool,
    pub reader_options_get_is_pure: unsafe extern "C" fn(opts: *const ZXing_ReaderOptions) -> bool,
    pub reader_options_get_validate_optional_checksum:
        unsafe extern "C" fn(opts: *const ZXing_ReaderOptions) -> bool,
    pub reader_options_get_return_errors:
        unsafe extern "C" fn(opts: *const ZXing_ReaderOptions) -> bool,
    pub reader_options_get_formats: unsafe extern "C" fn(
        opts: *const ZXing_ReaderOptions,
        count: *mut c_int,
    ) -> *mut ZXing_BarcodeFormat,
    pub reader_options_get_binarizer:
        unsafe extern "C" fn(opts: *const ZXing_ReaderOptions) -> ZXing_Binarizer,
    pub reader_options_get_ean_add_on_symbol:
        unsafe extern "C" fn(opts: *const ZXing_ReaderOptions) -> ZXing_EanAddOnSymbol,
    pub reader_options_get_text_mode:
        unsafe extern "C" fn(opts: *const ZXing_ReaderOptions) -> ZXing_TextMode,
    pub reader_options_get_min_line_count:
        unsafe extern "C" fn(opts: *const ZXing_ReaderOptions) -> c_int,
    pub reader_options_get_max_number_of_symbols:
        unsafe extern "C" fn(opts: *const ZXing_ReaderOptions) -> c_int,

    // Barcode
    pub barcode_is_valid: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> bool,
    pub barcode_error_type: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> ZXing_ErrorType,
    pub barcode_error_msg: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> *mut c_char,
    pub barcode_format: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> ZXing_BarcodeFormat,
    pub barcode_symbology: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> ZXing_BarcodeFormat,
    pub barcode_content_type: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> ZXing_ContentType,
    pub barcode_bytes: unsafe extern "C" fn(bc: *const ZXing_Barcode, len: *mut c_int) -> *mut u8,
    pub barcode_bytes_eci:
        unsafe extern "C" fn(bc: *const ZXing_Barcode, len: *mut c_int) -> *mut u8,
    pub barcode_text: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> *mut c_char,
    pub barcode_symbology_identifier: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> *mut c_char,
    pub barcode_position: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> ZXing_Position,
    pub barcode_orientation: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> c_int,
    pub barcode_has_eci: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> bool,
    pub barcode_is_inverted: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> bool,
    pub barcode_is_mirrored: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> bool,
    pub barcode_line_count: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> c_int,
    pub barcode_sequence_index: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> c_int,
    pub barcode_sequence_size: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> c_int,
    pub barcode_sequence_id: unsafe extern "C" fn(bc: *const ZXing_Barcode) -> *mut c_char,
    pub barcode_extra:
        unsafe extern "C" fn(bc: *const ZXing_Barcode, key: *const c_char) -> *mut c_char,
    pub barcode_delete: unsafe extern "C" fn(bc: *mut ZXing_Barcode),

    // Barcodes
    pub barcodes_delete: unsafe extern "C" fn(bcs: *mut ZXing_Barcodes),
    pub barcodes_size: unsafe extern "C" fn(bcs: *const ZXing_Barcodes) -> c_int,
    pub barcodes_move: unsafe extern "C" fn(bcs: *mut ZXing_Barcodes, i: c_int) -> *mut ZXing_Barcode,

    // Reading
    pub read_barcodes: unsafe extern "C" fn(
        iv: *const ZXing_ImageView,
        opts: *const ZXing_ReaderOptions,
    ) -> *mut ZXing_Barcodes,

    // CreatorOptions
    pub creator_options_new:
        unsafe extern "C" fn(format: ZXing_BarcodeFormat) -> *mut ZXing_CreatorOptions,
    pub creator_options_delete: unsafe extern "C" fn(opts: *mut ZXing_CreatorOptions),
    pub creator_options_set_format:
        unsafe extern "C" fn(opts: *mut ZXing_CreatorOptions, format: ZXing_BarcodeFormat),
    pub creator_options_get_format:
        unsafe extern "C" fn(opts: *const ZXing_CreatorOptions) -> ZXing_BarcodeFormat,
    pub creator_options_set_options:
        unsafe extern "C" fn(opts: *mut ZXing_CreatorOptions, options: *const c_char),
    pub creator_options_get_options:
        unsafe extern "C" fn(opts: *const ZXing_CreatorOptions) -> *mut c_char,

    // WriterOptions
    pub writer_options_new: unsafe extern "C" fn() -> *mut ZXing_WriterOptions,
    pub writer_options_delete: unsafe extern "C" fn(opts: *mut ZXing_WriterOptions),
    pub writer_options_set_scale: unsafe extern "C" fn(opts: *mut ZXing_WriterOptions, scale: c_int),
    pub writer_options_get_scale: unsafe extern "C" fn(opts: *const ZXing_WriterOptions) -> c_int,
    pub writer_options_set_rotate:
        unsafe extern "C" fn(opts: *mut ZXing_WriterOptions, rotate: c_int),
    pub writer_options_get_rotate: unsafe extern "C" fn(opts: *const ZXing_WriterOptions) -> c_int,
    pub writer_options_set_add_hrt: unsafe extern "C" fn(opts: *mut ZXing_WriterOptions, v: bool),
    pub writer_options_get_add_hrt: unsafe extern "C" fn(opts: *const ZXing_WriterOptions) -> bool,
    pub writer_options_set_add_quiet_zones:
        unsafe extern "C" fn(opts: *mut ZXing_WriterOptions, v: bool),
    pub writer_options_get_add_quiet_zones:
        unsafe extern "C" fn(opts: *const ZXing_WriterOptions) -> bool,

    // Creating & writing
    pub create_barcode_from_text: unsafe extern "C" fn(
        data: *const c_char,
        size: c_int,
        opts: *const ZXing_CreatorOptions,
    ) -> *mut ZXing_Barcode,
    pub create_barcode_from_bytes: unsafe extern "C" fn(
        data: *const c_void,
        size: c_int,
        opts: *const ZXing_CreatorOptions,
    ) -> *mut ZXing_Barcode,
    pub write_barcode_to_svg: unsafe extern "C" fn(
        bc: *const ZXing_Barcode,
        opts: *const ZXing_WriterOptions,
    ) -> *mut c_char,
    pub write_barcode_to_image: unsafe extern "C" fn(
        bc: *const ZXing_Barcode,
        opts: *const ZXing_WriterOptions,
    ) -> *mut ZXing_Image,

    // BarcodeFormat
    pub barcode_formats_list: unsafe extern "C" fn(
        filter: ZXing_BarcodeFormat,
        count: *mut c_int,
    ) -> *mut ZXing_BarcodeFormat,
    pub barcode_format_to_string: unsafe extern "C" fn(format: ZXing_BarcodeFormat) -> *mut c_char,
    pub barcode_format_from_string:
        unsafe extern "C" fn(name: *const c_char) -> ZXing_BarcodeFormat,

    // Misc
    pub last_error_msg: unsafe extern "C" fn() -> *mut c_char,
    pub version: unsafe extern "C" fn() -> *const c_char,
    pub free: unsafe extern "C" fn(ptr: *mut c_void),
}
