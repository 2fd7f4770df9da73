//! Shared test helpers: an in-process engine honouring the C contract.
//!
//! Every allocation the fake hands out is tracked per test thread, so tests
//! can assert that the safe layer released exactly what it received. Failure
//! knobs are thread-local and one-shot.

#![allow(clippy::missing_safety_doc)]

use crate::barcode::{ContentType, ErrorType};
use crate::engine::Engine;
use crate::format::BarcodeFormat;
use crate::pixel::ImageFormat;
use core::ffi::{CStr, c_char, c_int, c_void};
use std::alloc::Layout;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::ThreadId;
use zxing_bridge_sys::*;

pub(crate) use ffi::FAKE_API;

/// The fake engine.
pub(crate) fn fake_engine() -> Engine {
    // SAFETY: the fake table implements the ownership rules of the C API.
    unsafe { Engine::from_api(&FAKE_API) }
}

enum Kind {
    Bytes(Layout),
    Object(&'static str),
}

struct Allocation {
    thread: ThreadId,
    kind: Kind,
}

static LIVE: Mutex<BTreeMap<usize, Allocation>> = Mutex::new(BTreeMap::new());
static DOUBLE_FREES: Mutex<Vec<(ThreadId, usize)>> = Mutex::new(Vec::new());

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn current() -> ThreadId {
    std::thread::current().id()
}

fn track(addr: usize, kind: Kind) {
    lock(&LIVE).insert(
        addr,
        Allocation {
            thread: current(),
            kind,
        },
    );
}

/// Removes `addr` from the registry; a miss is recorded as a double free.
fn untrack(addr: usize) -> Option<Kind> {
    let removed = lock(&LIVE).remove(&addr);
    if removed.is_none() {
        lock(&DOUBLE_FREES).push((current(), addr));
    }
    removed.map(|allocation| allocation.kind)
}

/// Number of fake allocations made by this thread that are still alive.
pub(crate) fn live_allocations() -> usize {
    let thread = current();
    lock(&LIVE).values().filter(|a| a.thread == thread).count()
}

/// Addresses this thread released more than once (or never received).
pub(crate) fn double_frees() -> Vec<usize> {
    let thread = current();
    lock(&DOUBLE_FREES)
        .iter()
        .filter(|(owner, _)| *owner == thread)
        .map(|(_, addr)| *addr)
        .collect()
}

fn alloc_bytes(bytes: &[u8], align: usize) -> *mut u8 {
    let layout = Layout::from_size_align(bytes.len().max(1), align).unwrap();
    // SAFETY: the layout has a non-zero size.
    let ptr = unsafe { std::alloc::alloc(layout) };
    assert!(!ptr.is_null(), "fake engine out of memory");
    // SAFETY: `ptr` holds at least `bytes.len()` bytes.
    unsafe { ptr.copy_from_nonoverlapping(bytes.as_ptr(), bytes.len()) };
    track(ptr as usize, Kind::Bytes(layout));
    ptr
}

fn alloc_c_string(text: &str) -> *mut c_char {
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(0);
    alloc_bytes(&bytes, 1).cast()
}

fn alloc_u32s(values: &[u32]) -> *mut u32 {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
    alloc_bytes(&bytes, align_of::<u32>()).cast()
}

fn new_object<T, U>(value: T, kind: &'static str) -> *mut U {
    let ptr = Box::into_raw(Box::new(value));
    track(ptr as usize, Kind::Object(kind));
    ptr.cast()
}

unsafe fn delete_object<T, U>(ptr: *mut U) {
    if ptr.is_null() {
        return;
    }
    if untrack(ptr as usize).is_some() {
        // SAFETY: tracked objects were created by `new_object::<T, _>`.
        drop(unsafe { Box::from_raw(ptr.cast::<T>()) });
    }
}

unsafe fn object<'a, T, U>(ptr: *const U) -> &'a T {
    // SAFETY: callers pass live pointers from `new_object::<T, _>`.
    unsafe { &*ptr.cast::<T>() }
}

unsafe fn object_mut<'a, T, U>(ptr: *mut U) -> &'a mut T {
    // SAFETY: callers pass live pointers from `new_object::<T, _>`.
    unsafe { &mut *ptr.cast::<T>() }
}

/// A NUL-terminated string owned by the caller, released with `free`.
pub(crate) fn fake_c_string(text: &str) -> *mut c_char {
    alloc_c_string(text)
}

/// An array owned by the caller, released with `free`.
pub(crate) fn fake_array(values: &[u32]) -> *mut u32 {
    alloc_u32s(values)
}

#[derive(Default)]
struct Knobs {
    last_error: Option<String>,
    fail_next: HashMap<&'static str, Option<String>>,
    fail_move_at: Option<(usize, String)>,
    scripted: Option<Vec<FakeBarcode>>,
    render_format: Option<ZXing_ImageFormat>,
    reported_len: Option<c_int>,
    calls: HashMap<&'static str, usize>,
    rendered: Vec<Raster>,
}

struct Raster {
    width: c_int,
    height: c_int,
    pixels: Vec<u8>,
    barcode: FakeBarcode,
}

thread_local! {
    static KNOBS: RefCell<Knobs> = RefCell::new(Knobs::default());
}

fn with_knobs<R>(f: impl FnOnce(&mut Knobs) -> R) -> R {
    KNOBS.with_borrow_mut(f)
}

fn set_error(message: impl Into<String>) {
    with_knobs(|knobs| knobs.last_error = Some(message.into()));
}

/// Counts a call to `name`; false if a failure was scheduled for it.
fn enter(name: &'static str) -> bool {
    with_knobs(|knobs| {
        *knobs.calls.entry(name).or_default() += 1;
        match knobs.fail_next.remove(name) {
            Some(message) => {
                knobs.last_error = message;
                false
            }
            None => true,
        }
    })
}

/// Leaves `message` on this thread's error channel.
pub(crate) fn set_fake_error(message: &str) {
    set_error(message);
}

/// Makes the next call to `name` fail, leaving `message` (if any) on the
/// error channel.
pub(crate) fn fail_next(name: &'static str, message: Option<&str>) {
    with_knobs(|knobs| {
        knobs.fail_next.insert(name, message.map(str::to_owned));
    });
}

/// Makes moving element `index` out of the next result collection fail.
pub(crate) fn fail_move_at(index: usize, message: &str) {
    with_knobs(|knobs| knobs.fail_move_at = Some((index, message.to_owned())));
}

/// The next decode returns exactly these symbols, whatever the image shows.
pub(crate) fn script_results(barcodes: Vec<FakeBarcode>) {
    with_knobs(|knobs| knobs.scripted = Some(barcodes));
}

/// The next rendered raster reports `format` instead of luminance.
pub(crate) fn render_format(format: ImageFormat) {
    with_knobs(|knobs| knobs.render_format = Some(format.raw()));
}

/// The next array the fake hands back reports `len` elements, whatever it holds.
pub(crate) fn report_length(len: c_int) {
    with_knobs(|knobs| knobs.reported_len = Some(len));
}

fn reported_len(actual: usize) -> c_int {
    with_knobs(|knobs| knobs.reported_len.take()).unwrap_or(actual as c_int)
}

/// How often this thread called `name`.
pub(crate) fn fake_call_count(name: &'static str) -> usize {
    with_knobs(|knobs| knobs.calls.get(name).copied().unwrap_or(0))
}

/// Everything a fake barcode reports.
#[derive(Debug, Clone)]
pub(crate) struct FakeBarcode {
    pub format: BarcodeFormat,
    pub content_type: ContentType,
    pub text: String,
    pub bytes: Vec<u8>,
    pub symbology_identifier: String,
    pub orientation: c_int,
    pub has_eci: bool,
    pub is_inverted: bool,
    pub is_mirrored: bool,
    pub line_count: c_int,
    pub sequence_index: c_int,
    pub sequence_size: c_int,
    pub sequence_id: String,
    pub extra: Vec<(String, String)>,
    pub valid: bool,
    pub error: (ErrorType, String),
    pub position: ZXing_Position,
}

impl Default for FakeBarcode {
    fn default() -> Self {
        Self {
            format: BarcodeFormat::QR_CODE,
            content_type: ContentType::Text,
            text: String::new(),
            bytes: Vec::new(),
            symbology_identifier: String::new(),
            orientation: 0,
            has_eci: false,
            is_inverted: false,
            is_mirrored: false,
            line_count: 1,
            sequence_index: -1,
            sequence_size: -1,
            sequence_id: String::new(),
            extra: Vec::new(),
            valid: true,
            error: (ErrorType::None, String::new()),
            position: ZXing_Position::default(),
        }
    }
}

impl FakeBarcode {
    /// A valid text symbol.
    pub(crate) fn text(format: BarcodeFormat, text: &str) -> Self {
        Self {
            format,
            text: text.to_owned(),
            bytes: text.as_bytes().to_vec(),
            ..Self::default()
        }
    }
}

/// A barcode object owned by the caller, released with `Barcode_delete`.
pub(crate) fn fake_barcode(barcode: FakeBarcode) -> *mut ZXing_Barcode {
    new_object(barcode, "barcode")
}

struct FakeView {
    data: *const u8,
    width: c_int,
    height: c_int,
    format: ZXing_ImageFormat,
    row_stride: c_int,
    pix_stride: c_int,
    rotation: c_int,
}

impl FakeView {
    fn channels(&self) -> usize {
        (self.format >> 24) as usize
    }

    /// Visible pixels, tightly packed, in memory order.
    fn gather(&self) -> Vec<u8> {
        let channels = self.channels();
        let mut pixels = Vec::with_capacity(self.width as usize * self.height as usize * channels);
        for y in 0..self.height as usize {
            for x in 0..self.width as usize {
                let offset = y * self.row_stride as usize + x * self.pix_stride as usize;
                // SAFETY: the view was validated against its buffer on creation
                // and cropping only shrinks it.
                let pixel = unsafe { core::slice::from_raw_parts(self.data.add(offset), channels) };
                pixels.extend_from_slice(pixel);
            }
        }
        pixels
    }
}

/// What the fake engine currently sees through a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FakeViewState {
    pub data_ptr: *const u8,
    pub pixels: Vec<u8>,
    pub width: c_int,
    pub height: c_int,
    pub format: ZXing_ImageFormat,
    pub row_stride: c_int,
    pub rotation: c_int,
}

pub(crate) fn fake_view_state(view: *const ZXing_ImageView) -> FakeViewState {
    // SAFETY: tests pass pointers of open views.
    let view = unsafe { object::<FakeView, _>(view) };
    let (width, height) = match view.rotation {
        90 | 270 => (view.height, view.width),
        _ => (view.width, view.height),
    };
    FakeViewState {
        data_ptr: view.data,
        pixels: view.gather(),
        width,
        height,
        format: view.format,
        row_stride: view.row_stride,
        rotation: view.rotation,
    }
}

struct FakeReaderOptions {
    try_harder: bool,
    try_rotate: bool,
    try_invert: bool,
    try_downscale: bool,
    is_pure: bool,
    validate_optional_checksum: bool,
    return_errors: bool,
    formats: Vec<ZXing_BarcodeFormat>,
    binarizer: ZXing_Binarizer,
    ean_add_on_symbol: ZXing_EanAddOnSymbol,
    text_mode: ZXing_TextMode,
    min_line_count: c_int,
    max_number_of_symbols: c_int,
}

impl Default for FakeReaderOptions {
    fn default() -> Self {
        Self {
            try_harder: true,
            try_rotate: true,
            try_invert: true,
            try_downscale: true,
            is_pure: false,
            validate_optional_checksum: false,
            return_errors: false,
            formats: Vec::new(),
            binarizer: ZXing_Binarizer_LocalAverage,
            ean_add_on_symbol: ZXing_EanAddOnSymbol_Ignore,
            text_mode: ZXing_TextMode_HRI,
            min_line_count: 2,
            max_number_of_symbols: 0xFF,
        }
    }
}

struct FakeCreatorOptions {
    format: ZXing_BarcodeFormat,
    options: String,
}

struct FakeWriterOptions {
    scale: c_int,
    rotate: c_int,
    add_hrt: bool,
    add_quiet_zones: bool,
}

struct FakeImage {
    width: c_int,
    height: c_int,
    format: ZXing_ImageFormat,
    pixels: Vec<u8>,
}

struct FakeBarcodes {
    slots: Vec<*mut ZXing_Barcode>,
}

/// Deterministic module pattern; the same payload always renders the same way.
fn module_is_dark(bytes: &[u8], x: usize, y: usize) -> bool {
    let mut hash = 0xcbf2_9ce4_8422_2325u64;
    for &byte in bytes.iter().chain(&(x as u32).to_le_bytes()).chain(&(y as u32).to_le_bytes()) {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash & 1 == 1
}

fn render(barcode: &FakeBarcode, writer: Option<&FakeWriterOptions>) -> FakeImage {
    let scale = writer.map_or(1, |w| w.scale.max(1)) as usize;
    let quiet = writer.is_none_or(|w| w.add_quiet_zones);
    let rotate = writer.map_or(0, |w| w.rotate);

    let (modules_x, modules_y, margin) = if barcode.format.matches(BarcodeFormat::ALL_MATRIX) {
        (21, 21, 4)
    } else {
        (11 * barcode.bytes.len() + 35, 10, 10)
    };
    let margin = if quiet { margin } else { 0 };
    let width = (modules_x + 2 * margin) * scale;
    let height = (modules_y + 2 * margin) * scale;

    let mut pixels = vec![255u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let (mx, my) = (x / scale, y / scale);
            let inside = (margin..margin + modules_x).contains(&mx)
                && (margin..margin + modules_y).contains(&my);
            if inside && module_is_dark(&barcode.bytes, mx - margin, my - margin) {
                pixels[y * width + x] = 0;
            }
        }
    }

    let (width, height, pixels) = match rotate {
        90 | 270 => {
            let mut turned = vec![255u8; width * height];
            for y in 0..height {
                for x in 0..width {
                    turned[x * height + y] = pixels[y * width + x];
                }
            }
            (height, width, turned)
        }
        _ => (width, height, pixels),
    };

    FakeImage {
        width: width as c_int,
        height: height as c_int,
        format: ZXing_ImageFormat_Lum,
        pixels,
    }
}

fn decode(view: &FakeView, options: Option<&FakeReaderOptions>) -> Vec<FakeBarcode> {
    let mut found = with_knobs(|knobs| knobs.scripted.take()).unwrap_or_else(|| {
        if view.channels() != 1 {
            return Vec::new();
        }
        let pixels = view.gather();
        with_knobs(|knobs| {
            knobs
                .rendered
                .iter()
                .filter(|r| r.width == view.width && r.height == view.height && r.pixels == pixels)
                .map(|r| r.barcode.clone())
                .take(1)
                .collect()
        })
    });

    if let Some(options) = options {
        if !options.formats.is_empty() {
            found.retain(|b| {
                options
                    .formats
                    .iter()
                    .any(|f| b.format.matches(BarcodeFormat::from_raw(*f)))
            });
        }
        if options.max_number_of_symbols > 0 {
            found.truncate(options.max_number_of_symbols as usize);
        }
    }
    found
}

mod ffi {
    use super::*;

    macro_rules! getters {
        ($($name:ident: $obj:ty, $native:ty => $ret:ty, |$it:ident| $body:expr;)*) => {
            $(
                unsafe extern "C" fn $name(ptr: *const $native) -> $ret {
                    // SAFETY: the safe layer only passes live handles.
                    let $it = unsafe { object::<$obj, _>(ptr) };
                    $body
                }
            )*
        };
    }

    macro_rules! setters {
        ($($name:ident: $obj:ty, $native:ty, $value:ty => $field:ident;)*) => {
            $(
                unsafe extern "C" fn $name(ptr: *mut $native, value: $value) {
                    // SAFETY: the safe layer only passes live, exclusively borrowed handles.
                    let it = unsafe { object_mut::<$obj, _>(ptr) };
                    it.$field = value;
                }
            )*
        };
    }

    // ImageView

    unsafe extern "C" fn image_view_new_checked(
        data: *const u8,
        size: c_int,
        width: c_int,
        height: c_int,
        format: ZXing_ImageFormat,
        row_stride: c_int,
        pix_stride: c_int,
    ) -> *mut ZXing_ImageView {
        if !enter("ImageView_new_checked") {
            return core::ptr::null_mut();
        }
        let channels = (format >> 24) as c_int;
        let problem = if data.is_null() || width <= 0 || height <= 0 {
            Some("ImageView: invalid data or size")
        } else if pix_stride < channels {
            Some("ImageView: pixel stride is smaller than the pixel size")
        } else if row_stride < width * pix_stride {
            Some("ImageView: row stride is smaller than one row")
        } else if i64::from(size)
            < i64::from(height - 1) * i64::from(row_stride) + i64::from(width * pix_stride)
        {
            Some("ImageView: buffer too small")
        } else {
            None
        };
        if let Some(problem) = problem {
            set_error(problem);
            return core::ptr::null_mut();
        }

        let view = FakeView {
            data,
            width,
            height,
            format,
            row_stride,
            pix_stride,
            rotation: 0,
        };
        new_object(view, "image view")
    }

    unsafe extern "C" fn image_view_delete(iv: *mut ZXing_ImageView) {
        unsafe { delete_object::<FakeView, _>(iv) }
    }

    unsafe extern "C" fn image_view_crop(
        iv: *mut ZXing_ImageView,
        left: c_int,
        top: c_int,
        width: c_int,
        height: c_int,
    ) {
        // SAFETY: live, exclusively borrowed view.
        let view = unsafe { object_mut::<FakeView, _>(iv) };
        let left = left.clamp(0, view.width - 1);
        let top = top.clamp(0, view.height - 1);
        let width = if width <= 0 { view.width - left } else { width.min(view.width - left) };
        let height = if height <= 0 { view.height - top } else { height.min(view.height - top) };

        let offset = top as usize * view.row_stride as usize + left as usize * view.pix_stride as usize;
        // SAFETY: the offset stays inside the validated buffer.
        view.data = unsafe { view.data.add(offset) };
        view.width = width;
        view.height = height;
    }

    unsafe extern "C" fn image_view_rotate(iv: *mut ZXing_ImageView, degree: c_int) {
        // SAFETY: live, exclusively borrowed view.
        let view = unsafe { object_mut::<FakeView, _>(iv) };
        view.rotation = (view.rotation + degree).rem_euclid(360);
    }

    // Image

    unsafe extern "C" fn image_delete(img: *mut ZXing_Image) {
        unsafe { delete_object::<FakeImage, _>(img) }
    }

    getters! {
        image_data: FakeImage, ZXing_Image => *const u8, |it| it.pixels.as_ptr();
        image_width: FakeImage, ZXing_Image => c_int, |it| it.width;
        image_height: FakeImage, ZXing_Image => c_int, |it| it.height;
        image_format: FakeImage, ZXing_Image => ZXing_ImageFormat, |it| it.format;
    }

    // ReaderOptions

    unsafe extern "C" fn reader_options_new() -> *mut ZXing_ReaderOptions {
        if !enter("ReaderOptions_new") {
            return core::ptr::null_mut();
        }
        new_object(FakeReaderOptions::default(), "reader options")
    }

    unsafe extern "C" fn reader_options_delete(opts: *mut ZXing_ReaderOptions) {
        unsafe { delete_object::<FakeReaderOptions, _>(opts) }
    }

    setters! {
        reader_options_set_try_harder: FakeReaderOptions, ZXing_ReaderOptions, bool => try_harder;
        reader_options_set_try_rotate: FakeReaderOptions, ZXing_ReaderOptions, bool => try_rotate;
        reader_options_set_try_invert: FakeReaderOptions, ZXing_ReaderOptions, bool => try_invert;
        reader_options_set_try_downscale: FakeReaderOptions, ZXing_ReaderOptions, bool => try_downscale;
        reader_options_set_is_pure: FakeReaderOptions, ZXing_ReaderOptions, bool => is_pure;
        reader_options_set_validate_optional_checksum:
            FakeReaderOptions, ZXing_ReaderOptions, bool => validate_optional_checksum;
        reader_options_set_return_errors: FakeReaderOptions, ZXing_ReaderOptions, bool => return_errors;
        reader_options_set_binarizer:
            FakeReaderOptions, ZXing_ReaderOptions, ZXing_Binarizer => binarizer;
        reader_options_set_ean_add_on_symbol:
            FakeReaderOptions, ZXing_ReaderOptions, ZXing_EanAddOnSymbol => ean_add_on_symbol;
        reader_options_set_text_mode:
            FakeReaderOptions, ZXing_ReaderOptions, ZXing_TextMode => text_mode;
        reader_options_set_min_line_count:
            FakeReaderOptions, ZXing_ReaderOptions, c_int => min_line_count;
        reader_options_set_max_number_of_symbols:
            FakeReaderOptions, ZXing_ReaderOptions, c_int => max_number_of_symbols;
    }

    unsafe extern "C" fn reader_options_set_formats(
        opts: *mut ZXing_ReaderOptions,
        formats: *const ZXing_BarcodeFormat,
        count: c_int,
    ) {
        // SAFETY: live, exclusively borrowed options.
        let options = unsafe { object_mut::<FakeReaderOptions, _>(opts) };
        options.formats = if formats.is_null() || count <= 0 {
            Vec::new()
        } else {
            // SAFETY: the caller passes `count` readable elements.
            unsafe { core::slice::from_raw_parts(formats, count as usize) }.to_vec()
        };
    }

    getters! {
        reader_options_get_try_harder: FakeReaderOptions, ZXing_ReaderOptions => bool, |it| it.try_harder;
        reader_options_get_try_rotate: FakeReaderOptions, ZXing_ReaderOptions => bool, |it| it.try_rotate;
        reader_options_get_try_invert: FakeReaderOptions, ZXing_ReaderOptions => bool, |it| it.try_invert;
        reader_options_get_try_downscale:
            FakeReaderOptions, ZXing_ReaderOptions => bool, |it| it.try_downscale;
        reader_options_get_is_pure: FakeReaderOptions, ZXing_ReaderOptions => bool, |it| it.is_pure;
        reader_options_get_validate_optional_checksum:
            FakeReaderOptions, ZXing_ReaderOptions => bool, |it| it.validate_optional_checksum;
        reader_options_get_return_errors:
            FakeReaderOptions, ZXing_ReaderOptions => bool, |it| it.return_errors;
        reader_options_get_binarizer:
            FakeReaderOptions, ZXing_ReaderOptions => ZXing_Binarizer, |it| it.binarizer;
        reader_options_get_ean_add_on_symbol:
            FakeReaderOptions, ZXing_ReaderOptions => ZXing_EanAddOnSymbol, |it| it.ean_add_on_symbol;
        reader_options_get_text_mode:
            FakeReaderOptions, ZXing_ReaderOptions => ZXing_TextMode, |it| it.text_mode;
        reader_options_get_min_line_count:
            FakeReaderOptions, ZXing_ReaderOptions => c_int, |it| it.min_line_count;
        reader_options_get_max_number_of_symbols:
            FakeReaderOptions, ZXing_ReaderOptions => c_int, |it| it.max_number_of_symbols;
    }

    unsafe extern "C" fn reader_options_get_formats(
        opts: *const ZXing_ReaderOptions,
        count: *mut c_int,
    ) -> *mut ZXing_BarcodeFormat {
        // SAFETY: live options and a writable count.
        let options = unsafe { object::<FakeReaderOptions, _>(opts) };
        unsafe { *count = options.formats.len() as c_int };
        if options.formats.is_empty() {
            core::ptr::null_mut()
        } else {
            alloc_u32s(&options.formats)
        }
    }

    // Barcode

    getters! {
        barcode_is_valid: FakeBarcode, ZXing_Barcode => bool, |it| it.valid;
        barcode_error_type: FakeBarcode, ZXing_Barcode => ZXing_ErrorType, |it| it.error.0.raw();
        barcode_error_msg: FakeBarcode, ZXing_Barcode => *mut c_char, |it| alloc_c_string(&it.error.1);
        barcode_format: FakeBarcode, ZXing_Barcode => ZXing_BarcodeFormat, |it| it.format.raw();
        barcode_symbology:
            FakeBarcode, ZXing_Barcode => ZXing_BarcodeFormat, |it| it.format.symbology().raw();
        barcode_content_type:
            FakeBarcode, ZXing_Barcode => ZXing_ContentType, |it| it.content_type.raw();
        barcode_symbology_identifier:
            FakeBarcode, ZXing_Barcode => *mut c_char, |it| alloc_c_string(&it.symbology_identifier);
        barcode_position: FakeBarcode, ZXing_Barcode => ZXing_Position, |it| it.position;
        barcode_orientation: FakeBarcode, ZXing_Barcode => c_int, |it| it.orientation;
        barcode_has_eci: FakeBarcode, ZXing_Barcode => bool, |it| it.has_eci;
        barcode_is_inverted: FakeBarcode, ZXing_Barcode => bool, |it| it.is_inverted;
        barcode_is_mirrored: FakeBarcode, ZXing_Barcode => bool, |it| it.is_mirrored;
        barcode_line_count: FakeBarcode, ZXing_Barcode => c_int, |it| it.line_count;
        barcode_sequence_index: FakeBarcode, ZXing_Barcode => c_int, |it| it.sequence_index;
        barcode_sequence_size: FakeBarcode, ZXing_Barcode => c_int, |it| it.sequence_size;
        barcode_sequence_id:
            FakeBarcode, ZXing_Barcode => *mut c_char, |it| alloc_c_string(&it.sequence_id);
    }

    unsafe extern "C" fn barcode_text(bc: *const ZXing_Barcode) -> *mut c_char {
        if !enter("Barcode_text") {
            return core::ptr::null_mut();
        }
        // SAFETY: live barcode.
        alloc_c_string(&unsafe { object::<FakeBarcode, _>(bc) }.text)
    }

    unsafe extern "C" fn barcode_bytes(bc: *const ZXing_Barcode, len: *mut c_int) -> *mut u8 {
        // SAFETY: a writable length.
        unsafe { *len = 0 };
        if !enter("Barcode_bytes") {
            return core::ptr::null_mut();
        }
        // SAFETY: live barcode.
        let barcode = unsafe { object::<FakeBarcode, _>(bc) };
        unsafe { *len = reported_len(barcode.bytes.len()) };
        alloc_bytes(&barcode.bytes, 1)
    }

    unsafe extern "C" fn barcode_bytes_eci(bc: *const ZXing_Barcode, len: *mut c_int) -> *mut u8 {
        unsafe { barcode_bytes(bc, len) }
    }

    unsafe extern "C" fn barcode_extra(bc: *const ZXing_Barcode, key: *const c_char) -> *mut c_char {
        // SAFETY: live barcode.
        let barcode = unsafe { object::<FakeBarcode, _>(bc) };
        if key.is_null() {
            let fields: Vec<String> = barcode
                .extra
                .iter()
                .map(|(k, v)| format!("\"{k}\":\"{v}\""))
                .collect();
            return alloc_c_string(&format!("{{{}}}", fields.join(",")));
        }
        // SAFETY: a non-null key is NUL-terminated.
        let key = unsafe { CStr::from_ptr(key) }.to_string_lossy();
        let value = barcode
            .extra
            .iter()
            .find(|(k, _)| *k == key)
            .map_or("", |(_, v)| v.as_str());
        alloc_c_string(value)
    }

    unsafe extern "C" fn barcode_delete(bc: *mut ZXing_Barcode) {
        unsafe { delete_object::<FakeBarcode, _>(bc) }
    }

    // Barcodes

    unsafe extern "C" fn barcodes_delete(bcs: *mut ZXing_Barcodes) {
        if bcs.is_null() {
            return;
        }
        // SAFETY: live collection.
        let slots = core::mem::take(&mut unsafe { object_mut::<FakeBarcodes, _>(bcs) }.slots);
        for slot in slots {
            unsafe { barcode_delete(slot) };
        }
        unsafe { delete_object::<FakeBarcodes, _>(bcs) }
    }

    getters! {
        barcodes_size: FakeBarcodes, ZXing_Barcodes => c_int, |it| it.slots.len() as c_int;
    }

    unsafe extern "C" fn barcodes_move(bcs: *mut ZXing_Barcodes, i: c_int) -> *mut ZXing_Barcode {
        let scheduled = with_knobs(|knobs| match knobs.fail_move_at.take() {
            Some((index, message)) if index as c_int == i => Some(message),
            other => {
                knobs.fail_move_at = other;
                None
            }
        });
        if let Some(message) = scheduled {
            set_error(message);
            return core::ptr::null_mut();
        }
        // SAFETY: live collection.
        let collection = unsafe { object_mut::<FakeBarcodes, _>(bcs) };
        match collection.slots.get_mut(i as usize) {
            Some(slot) => core::mem::replace(slot, core::ptr::null_mut()),
            None => {
                set_error("index out of range");
                core::ptr::null_mut()
            }
        }
    }

    // Reading

    unsafe extern "C" fn read_barcodes(
        iv: *const ZXing_ImageView,
        opts: *const ZXing_ReaderOptions,
    ) -> *mut ZXing_Barcodes {
        if !enter("ReadBarcodes") {
            return core::ptr::null_mut();
        }
        if iv.is_null() {
            set_error("ImageView param is NULL");
            return core::ptr::null_mut();
        }
        // SAFETY: live view and live (or null) options.
        let view = unsafe { object::<FakeView, _>(iv) };
        let options = (!opts.is_null()).then(|| unsafe { object::<FakeReaderOptions, _>(opts) });

        let slots = decode(view, options).into_iter().map(fake_barcode).collect();
        new_object(FakeBarcodes { slots }, "barcodes")
    }

    // CreatorOptions

    unsafe extern "C" fn creator_options_new(format: ZXing_BarcodeFormat) -> *mut ZXing_CreatorOptions {
        if !enter("CreatorOptions_new") {
            return core::ptr::null_mut();
        }
        let options = FakeCreatorOptions {
            format,
            options: String::new(),
        };
        new_object(options, "creator options")
    }

    unsafe extern "C" fn creator_options_delete(opts: *mut ZXing_CreatorOptions) {
        unsafe { delete_object::<FakeCreatorOptions, _>(opts) }
    }

    setters! {
        creator_options_set_format:
            FakeCreatorOptions, ZXing_CreatorOptions, ZXing_BarcodeFormat => format;
    }

    getters! {
        creator_options_get_format:
            FakeCreatorOptions, ZXing_CreatorOptions => ZXing_BarcodeFormat, |it| it.format;
        creator_options_get_options:
            FakeCreatorOptions, ZXing_CreatorOptions => *mut c_char, |it| alloc_c_string(&it.options);
    }

    unsafe extern "C" fn creator_options_set_options(
        opts: *mut ZXing_CreatorOptions,
        options: *const c_char,
    ) {
        // SAFETY: live options and a NUL-terminated string.
        let text = unsafe { CStr::from_ptr(options) }.to_string_lossy().into_owned();
        let it = unsafe { object_mut::<FakeCreatorOptions, _>(opts) };
        it.options = text;
    }

    // WriterOptions

    unsafe extern "C" fn writer_options_new() -> *mut ZXing_WriterOptions {
        if !enter("WriterOptions_new") {
            return core::ptr::null_mut();
        }
        let options = FakeWriterOptions {
            scale: 0,
            rotate: 0,
            add_hrt: false,
            add_quiet_zones: true,
        };
        new_object(options, "writer options")
    }

    unsafe extern "C" fn writer_options_delete(opts: *mut ZXing_WriterOptions) {
        unsafe { delete_object::<FakeWriterOptions, _>(opts) }
    }

    setters! {
        writer_options_set_scale: FakeWriterOptions, ZXing_WriterOptions, c_int => scale;
        writer_options_set_rotate: FakeWriterOptions, ZXing_WriterOptions, c_int => rotate;
        writer_options_set_add_hrt: FakeWriterOptions, ZXing_WriterOptions, bool => add_hrt;
        writer_options_set_add_quiet_zones:
            FakeWriterOptions, ZXing_WriterOptions, bool => add_quiet_zones;
    }

    getters! {
        writer_options_get_scale: FakeWriterOptions, ZXing_WriterOptions => c_int, |it| it.scale;
        writer_options_get_rotate: FakeWriterOptions, ZXing_WriterOptions => c_int, |it| it.rotate;
        writer_options_get_add_hrt: FakeWriterOptions, ZXing_WriterOptions => bool, |it| it.add_hrt;
        writer_options_get_add_quiet_zones:
            FakeWriterOptions, ZXing_WriterOptions => bool, |it| it.add_quiet_zones;
    }

    // Creating & writing

    unsafe fn create(
        data: *const u8,
        size: c_int,
        opts: *const ZXing_CreatorOptions,
        content_type: ContentType,
    ) -> *mut ZXing_Barcode {
        if !enter("CreateBarcode") {
            return core::ptr::null_mut();
        }
        if opts.is_null() || data.is_null() || size <= 0 {
            set_error("invalid creator input");
            return core::ptr::null_mut();
        }
        // SAFETY: live options and `size` readable bytes.
        let options = unsafe { object::<FakeCreatorOptions, _>(opts) };
        let bytes = unsafe { core::slice::from_raw_parts(data, size as usize) }.to_vec();

        let barcode = FakeBarcode {
            format: BarcodeFormat::from_raw(options.format),
            content_type,
            text: String::from_utf8_lossy(&bytes).into_owned(),
            bytes,
            ..FakeBarcode::default()
        };
        fake_barcode(barcode)
    }

    unsafe extern "C" fn create_barcode_from_text(
        data: *const c_char,
        size: c_int,
        opts: *const ZXing_CreatorOptions,
    ) -> *mut ZXing_Barcode {
        unsafe { create(data.cast(), size, opts, ContentType::Text) }
    }

    unsafe extern "C" fn create_barcode_from_bytes(
        data: *const c_void,
        size: c_int,
        opts: *const ZXing_CreatorOptions,
    ) -> *mut ZXing_Barcode {
        unsafe { create(data.cast(), size, opts, ContentType::Binary) }
    }

    unsafe extern "C" fn write_barcode_to_svg(
        bc: *const ZXing_Barcode,
        opts: *const ZXing_WriterOptions,
    ) -> *mut c_char {
        if !enter("WriteBarcodeToSVG") {
            return core::ptr::null_mut();
        }
        // SAFETY: live barcode and live (or null) options.
        let barcode = unsafe { object::<FakeBarcode, _>(bc) };
        let writer = (!opts.is_null()).then(|| unsafe { object::<FakeWriterOptions, _>(opts) });
        let image = render(barcode, writer);
        alloc_c_string(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\"><desc>{}</desc></svg>",
            image.width, image.height, barcode.text
        ))
    }

    unsafe extern "C" fn write_barcode_to_image(
        bc: *const ZXing_Barcode,
        opts: *const ZXing_WriterOptions,
    ) -> *mut ZXing_Image {
        if !enter("WriteBarcodeToImage") {
            return core::ptr::null_mut();
        }
        // SAFETY: live barcode and live (or null) options.
        let barcode = unsafe { object::<FakeBarcode, _>(bc) };
        let writer = (!opts.is_null()).then(|| unsafe { object::<FakeWriterOptions, _>(opts) });

        let mut image = render(barcode, writer);
        with_knobs(|knobs| {
            knobs.rendered.push(Raster {
                width: image.width,
                height: image.height,
                pixels: image.pixels.clone(),
                barcode: barcode.clone(),
            });
            if let Some(format) = knobs.render_format.take() {
                image.format = format;
            }
        });
        new_object(image, "image")
    }

    // BarcodeFormat

    unsafe extern "C" fn barcode_formats_list(
        filter: ZXing_BarcodeFormat,
        count: *mut c_int,
    ) -> *mut ZXing_BarcodeFormat {
        // SAFETY: a writable count.
        unsafe { *count = 0 };
        if !enter("BarcodeFormatsList") {
            return core::ptr::null_mut();
        }
        let filter = BarcodeFormat::from_raw(filter);
        let codes: Vec<ZXing_BarcodeFormat> = crate::format::list_formats(filter)
            .into_iter()
            .map(BarcodeFormat::raw)
            .collect();
        unsafe { *count = reported_len(codes.len()) };
        alloc_u32s(&codes)
    }

    unsafe extern "C" fn barcode_format_to_string(format: ZXing_BarcodeFormat) -> *mut c_char {
        match BarcodeFormat::from_raw(format).name() {
            Some(name) => alloc_c_string(name),
            None => {
                set_error("Invalid BarcodeFormat");
                core::ptr::null_mut()
            }
        }
    }

    unsafe extern "C" fn barcode_format_from_string(name: *const c_char) -> ZXing_BarcodeFormat {
        // SAFETY: a NUL-terminated name.
        let name = unsafe { CStr::from_ptr(name) }.to_string_lossy();
        match BarcodeFormat::parse(&name) {
            Ok(format) => format.raw(),
            Err(_) => {
                set_error(format!("This is not a valid barcode format: '{name}'"));
                ZXing_BarcodeFormat_Invalid
            }
        }
    }

    // Misc

    unsafe extern "C" fn last_error_msg() -> *mut c_char {
        match with_knobs(|knobs| knobs.last_error.take()) {
            Some(message) if !message.is_empty() => alloc_c_string(&message),
            _ => core::ptr::null_mut(),
        }
    }

    unsafe extern "C" fn version() -> *const c_char {
        c"2.3.0-fake".as_ptr()
    }

    unsafe extern "C" fn free(ptr: *mut c_void) {
        if ptr.is_null() {
            return;
        }
        match untrack(ptr as usize) {
            // SAFETY: byte allocations come from `alloc_bytes` with this layout.
            Some(Kind::Bytes(layout)) => unsafe { std::alloc::dealloc(ptr.cast(), layout) },
            // Handles must go through their own delete function.
            Some(Kind::Object(_)) => lock(&DOUBLE_FREES).push((current(), ptr as usize)),
            None => {}
        }
    }

    pub(crate) static FAKE_API: ZXingApi = ZXingApi {
        image_view_new_checked,
        image_view_delete,
        image_view_crop,
        image_view_rotate,
        image_delete,
        image_data,
        image_width,
        image_height,
        image_format,
        reader_options_new,
        reader_options_delete,
        reader_options_set_try_harder,
        reader_options_set_try_rotate,
        reader_options_set_try_invert,
        reader_options_set_try_downscale,
        reader_options_set_is_pure,
        reader_options_set_validate_optional_checksum,
        reader_options_set_return_errors,
        reader_options_set_formats,
        reader_options_set_binarizer,
        reader_options_set_ean_add_on_symbol,
        reader_options_set_text_mode,
        reader_options_set_min_line_count,
        reader_options_set_max_number_of_symbols,
        reader_options_get_try_harder,
        reader_options_get_try_rotate,
        reader_options_get_try_invert,
        reader_options_get_try_downscale,
        reader_options_get_is_pure,
        reader_options_get_validate_optional_checksum,
        reader_options_get_return_errors,
        reader_options_get_formats,
        reader_options_get_binarizer,
        reader_options_get_ean_add_on_symbol,
        reader_options_get_text_mode,
        reader_options_get_min_line_count,
        reader_options_get_max_number_of_symbols,
        barcode_is_valid,
        barcode_error_type,
        barcode_error_msg,
        barcode_format,
        barcode_symbology,
        barcode_content_type,
        barcode_bytes,
        barcode_bytes_eci,
        barcode_text,
        barcode_symbology_identifier,
        barcode_position,
        barcode_orientation,
        barcode_has_eci,
        barcode_is_inverted,
        barcode_is_mirrored,
        barcode_line_count,
        barcode_sequence_index,
        barcode_sequence_size,
        barcode_sequence_id,
        barcode_extra,
        barcode_delete,
        barcodes_delete,
        barcodes_size,
        barcodes_move,
        read_barcodes,
        creator_options_new,
        creator_options_delete,
        creator_options_set_format,
        creator_options_get_format,
        creator_options_set_options,
        creator_options_get_options,
        writer_options_new,
        writer_options_delete,
        writer_options_set_scale,
        writer_options_get_scale,
        writer_options_set_rotate,
        writer_options_get_rotate,
        writer_options_set_add_hrt,
        writer_options_get_add_hrt,
        writer_options_set_add_quiet_zones,
        writer_options_get_add_quiet_zones,
        create_barcode_from_text,
        create_barcode_from_bytes,
        write_barcode_to_svg,
        write_barcode_to_image,
        barcode_formats_list,
        barcode_format_to_string,
        barcode_format_from_string,
        last_error_msg,
        version,
        free,
    };
}
