//! Linked declarations of the zxing-cpp C API.

#![allow(non_snake_case)]

use crate::*;
use core::ffi::{c_char, c_int, c_void};

unsafe extern "C" {
    fn ZXing_ImageView_new_checked(data: *const u8, size: c_int, width: c_int, height: c_int, format: ZXing_ImageFormat, row_stride: c_int, pix_stride: c_int) -> *mut ZXing_ImageView;
    fn ZXing_ImageView_delete(iv: *mut ZXing_ImageView);
    fn ZXing_ImageView_crop(iv: *mut ZXing_ImageView, left: c_int, top: c_int, width: c_int, height: c_int);
    fn ZXing_ImageView_rotate(iv: *mut ZXing_ImageView, degree: c_int);
    fn ZXing_Image_delete(img: *mut ZXing_Image);
    fn ZXing_Image_data(img: *const ZXing_Image) -> *const u8;
    fn ZXing_Image_width(img: *const ZXing_Image) -> c_int;
    fn ZXing_Image_height(img: *const ZXing_Image) -> c_int;
    fn ZXing_Image_format(img: *const ZXing_Image) -> ZXing_ImageFormat;
    fn ZXing_ReaderOptions_new() -> *mut ZXing_ReaderOptions;
    fn ZXing_ReaderOptions_delete(opts: *mut ZXing_ReaderOptions);
    fn ZXing_ReaderOptions_setTryHarder(opts: *mut ZXing_ReaderOptions, v: bool);
    fn ZXing_ReaderOptions_setTryRotate(opts: *mut ZXing_ReaderOptions, v: bool);
    fn ZXing_ReaderOptions_setTryInvert(opts: *mut ZXing_ReaderOptions, v: bool);
    fn ZXing_ReaderOptions_setTryDownscale(opts: *mut ZXing_ReaderOptions, v: bool);
    fn ZXing_ReaderOptions_setIsPure(opts: *mut ZXing_ReaderOptions, v: bool);
    fn ZXing_ReaderOptions_setValidateOptionalChecksum(opts: *mut ZXing_ReaderOptions, v: bool);
    fn ZXing_ReaderOptions_setReturnErrors(opts: *mut ZXing_ReaderOptions, v: bool);
    fn ZXing_ReaderOptions_setFormats(opts: *mut ZXing_ReaderOptions, formats: *const ZXing_BarcodeFormat, count: c_int);
    fn ZXing_ReaderOptions_setBinarizer(opts: *mut ZXing_ReaderOptions, v: ZXing_Binarizer);
    fn ZXing_ReaderOptions_setEanAddOnSymbol(opts: *mut ZXing_ReaderOptions, v: ZXing_EanAddOnSymbol);
    fn ZXing_ReaderOptions_setTextMode(opts: *mut ZXing_ReaderOptions, v: ZXing_TextMode);
    fn ZXing_ReaderOptions_setMinLineCount(opts: *mut ZXing_ReaderOptions, v: c_int);
    fn ZXing_ReaderOptions_setMaxNumberOfSymbols(opts: *mut ZXing_ReaderOptions, v: c_int);
    fn ZXing_ReaderOptions_getTryHarder(opts: *const ZXing_ReaderOptions) -> bool;
    fn ZXing_ReaderOptions_getTryRotate(opts: *const ZXing_ReaderOptions) -> bool;
    fn ZXing_ReaderOptions_getTryInvert(opts: *const ZXing_ReaderOptions) -> bool;
    fn ZXing_ReaderOptions_getTryDownscale(opts: *const ZXing_ReaderOptions) -> bool;
    fn ZXing_ReaderOptions_getIsPure(opts: *const ZXing_ReaderOptions) -> bool;
    fn ZXing_ReaderOptions_getValidateOptionalChecksum(opts: *const ZXing_ReaderOptions) -> bool;
    fn ZXing_ReaderOptions_getReturnErrors(opts: *const ZXing_ReaderOptions) -> bool;
    fn ZXing_ReaderOptions_getFormats(opts: *const ZXing_ReaderOptions, count: *mut c_int) -> *mut ZXing_BarcodeFormat;
    fn ZXing_ReaderOptions_getBinarizer(opts: *const ZXing_ReaderOptions) -> ZXing_Binarizer;
    fn ZXing_ReaderOptions_getEanAddOnSymbol(opts: *const ZXing_ReaderOptions) -> ZXing_EanAddOnSymbol;
    fn ZXing_ReaderOptions_getTextMode(opts: *const ZXing_ReaderOptions) -> ZXing_TextMode;
    fn ZXing_ReaderOptions_getMinLineCount(opts: *const ZXing_ReaderOptions) -> c_int;
    fn ZXing_ReaderOptions_getMaxNumberOfSymbols(opts: *const ZXing_ReaderOptions) -> c_int;
    fn ZXing_Barcode_isValid(bc: *const ZXing_Barcode) -> bool;
    fn ZXing_Barcode_errorType(bc: *const ZXing_Barcode) -> ZXing_ErrorType;
    fn ZXing_Barcode_errorMsg(bc: *const ZXing_Barcode) -> *mut c_char;
    fn ZXing_Barcode_format(bc: *const ZXing_Barcode) -> ZXing_BarcodeFormat;
    fn ZXing_Barcode_symbology(bc: *const ZXing_Barcode) -> ZXing_BarcodeFormat;
    fn ZXing_Barcode_contentType(bc: *const ZXing_Barcode) -> ZXing_ContentType;
    fn ZXing_Barcode_bytes(bc: *const ZXing_Barcode, len: *mut c_int) -> *mut u8;
    fn ZXing_Barcode_bytesECI(bc: *const ZXing_Barcode, len: *mut c_int) -> *mut u8;
    fn ZXing_Barcode_text(bc: *const ZXing_Barcode) -> *mut c_char;
    fn ZXing_Barcode_symbologyIdentifier(bc: *const ZXing_Barcode) -> *mut c_char;
    fn ZXing_Barcode_position(bc: *const ZXing_Barcode) -> ZXing_Position;
    fn ZXing_Barcode_orientation(bc: *const ZXing_Barcode) -> c_int;
    fn ZXing_Barcode_hasECI(bc: *const ZXing_Barcode) -> bool;
    fn ZXing_Barcode_isInverted(bc: *const ZXing_Barcode) -> bool;
    fn ZXing_Barcode_isMirrored(bc: *const ZXing_Barcode) -> bool;
    fn ZXing_Barcode_lineCount(bc: *const ZXing_Barcode) -> c_int;
    fn ZXing_Barcode_sequenceIndex(bc: *const ZXing_Barcode) -> c_int;
    fn ZXing_Barcode_sequenceSize(bc: *const ZXing_Barcode) -> c_int;
    fn ZXing_Barcode_sequenceId(bc: *const ZXing_Barcode) -> *mut c_char;
    fn ZXing_Barcode_extra(bc: *const ZXing_Barcode, key: *const c_char) -> *mut c_char;
    fn ZXing_Barcode_delete(bc: *mut ZXing_Barcode);
    fn ZXing_Barcodes_delete(bcs: *mut ZXing_Barcodes);
    fn ZXing_Barcodes_size(bcs: *const ZXing_Barcodes) -> c_int;
    fn ZXing_Barcodes_move(bcs: *mut ZXing_Barcodes, i: c_int) -> *mut ZXing_Barcode;
    fn ZXing_ReadBarcodes(iv: *const ZXing_ImageView, opts: *const ZXing_ReaderOptions) -> *mut ZXing_Barcodes;
    fn ZXing_CreatorOptions_new(format: ZXing_BarcodeFormat) -> *mut ZXing_CreatorOptions;
    fn ZXing_CreatorOptions_delete(opts: *mut ZXing_CreatorOptions);
    fn ZXing_CreatorOptions_setFormat(opts: *mut ZXing_CreatorOptions, format: ZXing_BarcodeFormat);
    fn ZXing_CreatorOptions_getFormat(opts: *const ZXing_CreatorOptions) -> ZXing_BarcodeFormat;
    fn ZXing_CreatorOptions_setOptions(opts: *mut ZXing_CreatorOptions, options: *const c_char);
    fn ZXing_CreatorOptions_getOptions(opts: *const ZXing_CreatorOptions) -> *mut c_char;
    fn ZXing_WriterOptions_new() -> *mut ZXing_WriterOptions;
    fn ZXing_WriterOptions_delete(opts: *mut ZXing_WriterOptions);
    fn ZXing_WriterOptions_setScale(opts: *mut ZXing_WriterOptions, scale: c_int);
    fn ZXing_WriterOptions_getScale(opts: *const ZXing_WriterOptions) -> c_int;
    fn ZXing_WriterOptions_setRotate(opts: *mut ZXing_WriterOptions, rotate: c_int);
    fn ZXing_WriterOptions_getRotate(opts: *const ZXing_WriterOptions) -> c_int;
    fn ZXing_WriterOptions_setAddHRT(opts: *mut ZXing_WriterOptions, v: bool);
    fn ZXing_WriterOptions_getAddHRT(opts: *const ZXing_WriterOptions) -> bool;
    fn ZXing_WriterOptions_setAddQuietZones(opts: *mut ZXing_WriterOptions, v: bool);
    fn ZXing_WriterOptions_getAddQuietZones(opts: *const ZXing_WriterOptions) -> bool;
    fn ZXing_CreateBarcodeFromText(data: *const c_char, size: c_int, opts: *const ZXing_CreatorOptions) -> *mut ZXing_Barcode;
    fn ZXing_CreateBarcodeFromBytes(data: *const c_void, size: c_int, opts: *const ZXing_CreatorOptions) -> *mut ZXing_Barcode;
    fn ZXing_WriteBarcodeToSVG(bc: *const ZXing_Barcode, opts: *const ZXing_WriterOptions) -> *mut c_char;
    fn ZXing_WriteBarcodeToImage(bc: *const ZXing_Barcode, opts: *const ZXing_WriterOptions) -> *mut ZXing_Image;
    fn ZXing_BarcodeFormatsList(filter: ZXing_BarcodeFormat, count: *mut c_int) -> *mut ZXing_BarcodeFormat;
    fn ZXing_BarcodeFormatToString(format: ZXing_BarcodeFormat) -> *mut c_char;
    fn ZXing_BarcodeFormatFromString(name: *const c_char) -> ZXing_BarcodeFormat;
    fn ZXing_LastErrorMsg() -> *mut c_char;
    fn ZXing_Version() -> *const c_char;
    fn ZXing_free(ptr: *mut c_void);
}

/// Table over the linked native library.
pub static API: ZXingApi = ZXingApi {
    image_view_new_checked: ZXing_ImageView_new_checked,
    image_view_delete: ZXing_ImageView_delete,
    image_view_crop: ZXing_ImageView_crop,
    image_view_rotate: ZXing_ImageView_rotate,
    image_delete: ZXing_Image_delete,
    image_data: ZXing_Image_data,
    image_width: ZXing_Image_width,
    image_height: ZXing_Image_height,
    image_format: ZXing_Image_format,
    reader_options_new: ZXing_ReaderOptions_new,
    reader_options_delete: ZXing_ReaderOptions_delete,
    reader_options_set_try_harder: ZXing_ReaderOptions_setTryHarder,
    reader_options_set_try_rotate: ZXing_ReaderOptions_setTryRotate,
    reader_options_set_try_invert: ZXing_ReaderOptions_setTryInvert,
    reader_options_set_try_downscale: ZXing_ReaderOptions_setTryDownscale,
    reader_options_set_is_pure: ZXing_ReaderOptions_setIsPure,
    reader_options_set_validate_optional_checksum: ZXing_ReaderOptions_setValidateOptionalChecksum,
    reader_options_set_return_errors: ZXing_ReaderOptions_setReturnErrors,
    reader_options_set_formats: ZXing_ReaderOptions_setFormats,
    reader_options_set_binarizer: ZXing_ReaderOptions_setBinarizer,
    reader_options_set_ean_add_on_symbol: ZXing_ReaderOptions_setEanAddOnSymbol,
    reader_options_set_text_mode: ZXing_ReaderOptions_setTextMode,
    reader_options_set_min_line_count: ZXing_ReaderOptions_setMinLineCount,
    reader_options_set_max_number_of_symbols: ZXing_ReaderOptions_setMaxNumberOfSymbols,
    reader_options_get_try_harder: ZXing_ReaderOptions_getTryHarder,
    reader_options_get_try_rotate: ZXing_ReaderOptions_getTryRotate,
    reader_options_get_try_invert: ZXing_ReaderOptions_getTryInvert,
    reader_options_get_try_downscale: ZXing_ReaderOptions_getTryDownscale,
    reader_options_get_is_pure: ZXing_ReaderOptions_getIsPure,
    reader_options_get_validate_optional_checksum: ZXing_ReaderOptions_getValidateOptionalChecksum,
    reader_options_get_return_errors: ZXing_ReaderOptions_getReturnErrors,
    reader_options_get_formats: ZXing_ReaderOptions_getFormats,
    reader_options_get_binarizer: ZXing_ReaderOptions_getBinarizer,
    reader_options_get_ean_add_on_symbol: ZXing_ReaderOptions_getEanAddOnSymbol,
    reader_options_get_text_mode: ZXing_ReaderOptions_getTextMode,
    reader_options_get_min_line_count: ZXing_ReaderOptions_getMinLineCount,
    reader_options_get_max_number_of_symbols: ZXing_ReaderOptions_getMaxNumberOfSymbols,
    barcode_is_valid: ZXing_Barcode_isValid,
    barcode_error_type: ZXing_Barcode_errorType,
    barcode_error_msg: ZXing_Barcode_errorMsg,
    barcode_format: ZXing_Barcode_format,
    barcode_symbology: ZXing_Barcode_symbology,
    barcode_content_type: ZXing_Barcode_contentType,
    barcode_bytes: ZXing_Barcode_bytes,
    barcode_bytes_eci: ZXing_Barcode_bytesECI,
    barcode_text: ZXing_Barcode_text,
    barcode_symbology_identifier: ZXing_Barcode_symbologyIdentifier,
    barcode_position: ZXing_Barcode_position,
    barcode_orientation: ZXing_Barcode_orientation,
    barcode_has_eci: ZXing_Barcode_hasECI,
    barcode_is_inverted: ZXing_Barcode_isInverted,
    barcode_is_mirrored: ZXing_Barcode_isMirrored,
    barcode_line_count: ZXing_Barcode_lineCount,
    barcode_sequence_index: ZXing_Barcode_sequenceIndex,
    barcode_sequence_size: ZXing_Barcode_sequenceSize,
    barcode_sequence_id: ZXing_Barcode_sequenceId,
    barcode_extra: ZXing_Barcode_extra,
    barcode_delete: ZXing_Barcode_delete,
    barcodes_delete: ZXing_Barcodes_delete,
    barcodes_size: ZXing_Barcodes_size,
    barcodes_move: ZXing_Barcodes_move,
    read_barcodes: ZXing_ReadBarcodes,
    creator_options_new: ZXing_CreatorOptions_new,
    creator_options_delete: ZXing_CreatorOptions_delete,
    creator_options_set_format: ZXing_CreatorOptions_setFormat,
    creator_options_get_format: ZXing_CreatorOptions_getFormat,
    creator_options_set_options: ZXing_CreatorOptions_setOptions,
    creator_options_get_options: ZXing_CreatorOptions_getOptions,
    writer_options_new: ZXing_WriterOptions_new,
    writer_options_delete: ZXing_WriterOptions_delete,
    writer_options_set_scale: ZXing_WriterOptions_setScale,
    writer_options_get_scale: ZXing_WriterOptions_getScale,
    writer_options_set_rotate: ZXing_WriterOptions_setRotate,
    writer_options_get_rotate: ZXing_WriterOptions_getRotate,
    writer_options_set_add_hrt: ZXing_WriterOptions_setAddHRT,
    writer_options_get_add_hrt: ZXing_WriterOptions_getAddHRT,
    writer_options_set_add_quiet_zones: ZXing_WriterOptions_setAddQuietZones,
    writer_options_get_add_quiet_zones: ZXing_WriterOptions_getAddQuietZones,
    create_barcode_from_text: ZXing_CreateBarcodeFromText,
    create_barcode_from_bytes: ZXing_CreateBarcodeFromBytes,
    write_barcode_to_svg: ZXing_WriteBarcodeToSVG,
    write_barcode_to_image: ZXing_WriteBarcodeToImage,
    barcode_formats_list: ZXing_BarcodeFormatsList,
    barcode_format_to_string: ZXing_BarcodeFormatToString,
    barcode_format_from_string: ZXing_BarcodeFormatFromString,
    last_error_msg: ZXing_LastErrorMsg,
    version: ZXing_Version,
    free: ZXing_free,
};
