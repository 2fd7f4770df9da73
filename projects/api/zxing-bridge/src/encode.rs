//! Creating barcodes and rendering them.

use crate::allocate::copy_align_64;
use crate::barcode::Barcode;
use crate::engine::Engine;
use crate::error::{BridgeError, BridgeResult};
use crate::handle::NativeHandle;
use crate::last_error::engine_failure;
use crate::marshal::{take_string, to_c_int, to_c_string};
use crate::options::{CreatorOptions, WriterOptions};
use crate::pixel::ImageFormat;
use zxing_bridge_sys::{ZXing_Image, ZXing_WriterOptions};

/// Content of a barcode to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    /// Text. Must not contain NUL; use [`Payload::Bytes`] for binary content.
    Text(&'a str),
    /// Arbitrary non-empty bytes, NUL included.
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for Payload<'a> {
    fn from(text: &'a str) -> Self {
        Payload::Text(text)
    }
}

impl<'a> From<&'a [u8]> for Payload<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Payload::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Payload<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Payload::Bytes(bytes)
    }
}

/// An 8-bit grayscale raster with tightly packed rows (`row length == width`).
///
/// The pixel buffer always holds exactly `width * height` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RenderedImage {
    /// Wraps `width * height` row-major luminance bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> BridgeResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(BridgeError::invalid(format!(
                "{width}x{height} raster needs {expected} bytes, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major luminance bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Gives up the pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Converts into an [`image::GrayImage`] without copying.
    #[cfg(feature = "image")]
    pub fn into_gray_image(self) -> BridgeResult<image::GrayImage> {
        let (width, height, len) = (self.width, self.height, self.pixels.len());
        image::GrayImage::from_raw(width, height, self.pixels).ok_or_else(|| {
            BridgeError::invalid(format!("{width}x{height} raster holds {len} bytes"))
        })
    }
}

impl Engine {
    /// Creates a barcode holding `payload` in the format chosen by `options`.
    ///
    /// Text is rejected locally if it contains NUL; empty byte payloads are
    /// rejected locally as well. Byte payloads are duplicated into an aligned
    /// buffer for the duration of the call.
    pub fn create_barcode<'p>(
        &self,
        payload: impl Into<Payload<'p>>,
        options: &CreatorOptions,
    ) -> BridgeResult<Barcode> {
        let options_ptr = options.as_ptr()?;
        let api = self.api();

        let created = match payload.into() {
            Payload::Text(text) => {
                let text = to_c_string(text, "text payload (use a byte payload for binary data)")?;
                let len = to_c_int(text.as_bytes().len(), "payload length")?;
                // SAFETY: `text` is NUL-terminated and outlives the call.
                unsafe { (api.create_barcode_from_text)(text.as_ptr(), len, options_ptr) }
            }
            Payload::Bytes(bytes) => {
                if bytes.is_empty() {
                    return Err(BridgeError::invalid("byte payload is empty"));
                }
                let len = to_c_int(bytes.len(), "payload length")?;
                let copy = copy_align_64(bytes)?;
                // SAFETY: `copy` holds `len` bytes and outlives the call.
                unsafe { (api.create_barcode_from_bytes)(copy.as_ptr().cast(), len, options_ptr) }
            }
        };

        // SAFETY: a non-null result is a fresh barcode owned by us.
        unsafe { Barcode::adopt(*self, created) }
            .ok_or_else(|| engine_failure(*self, "create barcode"))
    }
}

fn writer_ptr(options: Option<&WriterOptions>) -> BridgeResult<*const ZXing_WriterOptions> {
    match options {
        Some(options) => options.as_ptr(),
        None => Ok(core::ptr::null()),
    }
}

impl Barcode {
    /// Renders the barcode as an 8-bit grayscale raster.
    ///
    /// `None` options use the engine defaults. The native raster is released
    /// before this returns; a raster in any format other than 8-bit luminance
    /// is reported as [`BridgeError::UnsupportedFormat`] and nothing is copied.
    pub fn to_image(&self, options: Option<&WriterOptions>) -> BridgeResult<RenderedImage> {
        let barcode = self.as_ptr()?;
        let options = writer_ptr(options)?;
        let engine = self.engine();
        let api = engine.api();

        // SAFETY: both pointers are live (or null options) for the call.
        let raw = unsafe { (api.write_barcode_to_image)(barcode, options) };
        // SAFETY: a non-null raster is owned by us.
        let image: NativeHandle<ZXing_Image> =
            unsafe { NativeHandle::adopt(engine, raw, api.image_delete, "rendered image") }
                .ok_or_else(|| engine_failure(engine, "render barcode"))?;
        let ptr = image.as_ptr()?;

        // SAFETY: the raster is live until `image` drops.
        let (width, height, format) = unsafe {
            (
                (api.image_width)(ptr),
                (api.image_height)(ptr),
                (api.image_format)(ptr),
            )
        };

        if ImageFormat::from_raw(format) != Some(ImageFormat::Lum) {
            return Err(BridgeError::UnsupportedFormat(format!(
                "rendered image has pixel format 0x{format:08X}, expected 8-bit luminance"
            )));
        }

        let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(BridgeError::UnsupportedFormat(format!(
                "rendered image has invalid size {width}x{height}"
            )));
        };
        let len = width as usize * height as usize;

        // SAFETY: the raster is live until `image` drops.
        let data = unsafe { (api.image_data)(ptr) };
        if data.is_null() {
            return Err(engine_failure(engine, "read rendered pixels"));
        }
        // SAFETY: a Lum raster holds `width * height` tightly packed bytes.
        let pixels = unsafe { core::slice::from_raw_parts(data, len) }.to_vec();

        log::debug!("rendered {width}x{height} barcode raster");
        RenderedImage::new(width, height, pixels)
    }

    /// Renders the barcode as an SVG document.
    pub fn to_svg(&self, options: Option<&WriterOptions>) -> BridgeResult<String> {
        let barcode = self.as_ptr()?;
        let options = writer_ptr(options)?;
        let engine = self.engine();

        // SAFETY: both pointers are live (or null options) for the call; the
        // returned string is owned by us.
        let svg = unsafe { take_string(engine, (engine.api().write_barcode_to_svg)(barcode, options)) };
        svg.ok_or_else(|| engine_failure(engine, "render barcode as SVG"))
    }
}
