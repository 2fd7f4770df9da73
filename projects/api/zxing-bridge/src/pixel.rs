//! Pixel formats and buffer geometry.

use crate::error::{BridgeError, BridgeResult};
use crate::marshal::to_c_int;
use bitfield::bitfield;
use derive_enum_all_values::AllValues;
use zxing_bridge_sys::*;

/// Byte layout of a pixel, using the engine's codes.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
pub enum ImageFormat {
    /// 8-bit luminance.
    Lum = ZXing_ImageFormat_Lum,
    /// 8-bit luminance followed by 8-bit alpha.
    LumA = ZXing_ImageFormat_LumA,
    /// Red, green, blue.
    Rgb = ZXing_ImageFormat_RGB,
    /// Blue, green, red.
    Bgr = ZXing_ImageFormat_BGR,
    /// Red, green, blue, alpha.
    Rgba = ZXing_ImageFormat_RGBA,
    /// Alpha, red, green, blue.
    Argb = ZXing_ImageFormat_ARGB,
    /// Blue, green, red, alpha.
    Bgra = ZXing_ImageFormat_BGRA,
    /// Alpha, blue, green, red.
    Abgr = ZXing_ImageFormat_ABGR,
}

bitfield! {
    /// The engine's packed pixel format code.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ImageFormatCode(u32);
    impl Debug;
    u8;
    /// Number of bytes per pixel.
    pub channels, _: 31, 24;
    /// Byte index of red (luminance for gray formats).
    pub red_index, _: 23, 16;
    /// Byte index of green.
    pub green_index, _: 15, 8;
    /// Byte index of blue.
    pub blue_index, _: 7, 0;
}

impl ImageFormat {
    /// Maps a raw engine code back to a format.
    pub fn from_raw(raw: ZXing_ImageFormat) -> Option<Self> {
        Self::all_values()
            .iter()
            .copied()
            .find(|format| format.raw() == raw)
    }

    /// The raw engine code.
    #[inline]
    pub fn raw(self) -> ZXing_ImageFormat {
        self as ZXing_ImageFormat
    }

    /// The decoded bit layout of this format.
    #[inline]
    pub fn code(self) -> ImageFormatCode {
        ImageFormatCode(self.raw())
    }

    /// Bytes per pixel in a tightly packed buffer.
    #[inline]
    pub fn channels(self) -> usize {
        usize::from(self.code().channels())
    }
}

/// Geometry of a pixel buffer.
///
/// Strides are in bytes. The last row only needs `width * pix_stride` bytes, so
/// the minimum buffer length is `(height - 1) * row_stride + width * pix_stride`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel format.
    pub format: ImageFormat,
    /// Distance in bytes between the starts of consecutive rows.
    pub row_stride: usize,
    /// Distance in bytes between consecutive pixels in a row.
    pub pix_stride: usize,
}

impl PixelLayout {
    /// A layout with no padding between pixels or rows.
    pub fn packed(width: u32, height: u32, format: ImageFormat) -> Self {
        let pix_stride = format.channels();
        Self {
            width,
            height,
            format,
            row_stride: width as usize * pix_stride,
            pix_stride,
        }
    }

    /// Replaces the row stride.
    pub fn with_row_stride(mut self, row_stride: usize) -> Self {
        self.row_stride = row_stride;
        self
    }

    /// Replaces the pixel stride.
    pub fn with_pix_stride(mut self, pix_stride: usize) -> Self {
        self.pix_stride = pix_stride;
        self
    }

    /// Minimum buffer length for this geometry, or [`None`] on overflow.
    pub fn required_len(&self) -> Option<usize> {
        if self.width == 0 || self.height == 0 {
            return Some(0);
        }
        let last_row = (self.width as usize).checked_mul(self.pix_stride)?;
        (self.height as usize - 1)
            .checked_mul(self.row_stride)?
            .checked_add(last_row)
    }

    /// Checks this geometry against a buffer of `len` bytes.
    ///
    /// Only consistency is checked here; whether the pixel stride suits the
    /// format is left to the engine.
    pub fn validate(&self, len: usize) -> BridgeResult<()> {
        if len == 0 {
            return Err(BridgeError::invalid("pixel buffer is empty"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(BridgeError::invalid(format!(
                "image size {}x{} has no pixels",
                self.width, self.height
            )));
        }
        if self.pix_stride == 0 {
            return Err(BridgeError::invalid("pixel stride must be at least 1"));
        }

        let min_row = (self.width as usize)
            .checked_mul(self.pix_stride)
            .ok_or_else(|| BridgeError::invalid("row size overflows"))?;
        if self.row_stride < min_row {
            return Err(BridgeError::invalid(format!(
                "row stride {} is smaller than width {} x pixel stride {}",
                self.row_stride, self.width, self.pix_stride
            )));
        }

        let required = self
            .required_len()
            .ok_or_else(|| BridgeError::invalid("image size overflows"))?;
        if len < required {
            return Err(BridgeError::invalid(format!(
                "pixel buffer holds {len} bytes but {}x{} with row stride {} needs {required}",
                self.width, self.height, self.row_stride
            )));
        }

        to_c_int(len, "buffer length")?;
        to_c_int(self.width as usize, "width")?;
        to_c_int(self.height as usize, "height")?;
        to_c_int(self.row_stride, "row stride")?;
        to_c_int(self.pix_stride, "pixel stride")?;
        Ok(())
    }
}
