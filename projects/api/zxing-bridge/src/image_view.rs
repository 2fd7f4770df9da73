//! Pixel buffers handed to the engine for decoding.
//!
//! An [`ImageView`] pairs a native view handle with the memory it reads from.
//! The memory is either:
//!
//! - **borrowed** from the caller ([`ImageView::borrowed`]); the view's lifetime
//!   is tied to the buffer, so the compiler rejects code that frees the buffer
//!   while the view is alive,
//! - an **aligned copy** owned by the view ([`ImageView::copied`]), or
//! - a **converted** grayscale buffer produced from a host image whose layout
//!   the engine cannot read directly ([`ImageView::from_image`]).
//!
//! # Safety contract for raw memory
//!
//! [`ImageView::from_raw_parts`] is the single escape hatch: it accepts memory the
//! borrow checker cannot see (e.g. a frame owned by another native library). The
//! caller must keep that memory valid and unmodified until the view is closed
//! or dropped. Violating this lets the engine read freed memory during decode.

use crate::allocate::copy_align_64;
use crate::engine::Engine;
use crate::error::{BridgeError, BridgeResult};
use crate::handle::NativeHandle;
use crate::last_error::engine_failure;
use crate::marshal::to_c_int;
use crate::pixel::{ImageFormat, PixelLayout};
use core::marker::PhantomData;
use safe_allocator_api::RawAlloc;
use zxing_bridge_sys::ZXing_ImageView;

/// Whether [`ImageView::new`] borrows the caller's buffer or copies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ownership {
    /// Zero-copy; the buffer must outlive the view.
    #[default]
    Borrow,
    /// Duplicate the buffer; the copy is freed with the view.
    Copy,
}

enum PixelStorage {
    Borrowed,
    Aligned(RawAlloc),
    #[cfg(feature = "image")]
    Converted(Vec<u8>),
}

/// The luma plane of a planar luma-chroma frame (YUV/YCbCr).
///
/// The engine only needs luminance, so the plane is viewed in place. `left`
/// and `top` select a sub-rectangle of the plane.
#[derive(Debug, Clone, Copy)]
pub struct LumaPlane<'a> {
    /// The whole Y plane.
    pub data: &'a [u8],
    /// Bytes between the starts of consecutive rows.
    pub stride: usize,
    /// First column of the visible rectangle.
    pub left: u32,
    /// First row of the visible rectangle.
    pub top: u32,
    /// Width of the visible rectangle.
    pub width: u32,
    /// Height of the visible rectangle.
    pub height: u32,
}

/// A native view over pixel memory.
///
/// Release is explicit through [`close`](Self::close) and idempotent; dropping
/// the view closes it as well. The native handle is always destroyed before any
/// owned buffer is freed.
pub struct ImageView<'a> {
    // Declared before `storage` so the native view is dropped first.
    handle: NativeHandle<ZXing_ImageView>,
    storage: PixelStorage,
    layout: PixelLayout,
    _buffer: PhantomData<&'a [u8]>,
}

// SAFETY: the view exclusively owns its native handle and storage; borrowed
// memory is only read. Mutation requires `&mut self`.
unsafe impl Send for ImageView<'_> {}

impl<'a> ImageView<'a> {
    /// Creates a view over `data`, borrowing or copying it.
    pub fn new(
        engine: Engine,
        data: &'a [u8],
        layout: PixelLayout,
        ownership: Ownership,
    ) -> BridgeResult<Self> {
        match ownership {
            Ownership::Borrow => Self::borrowed(engine, data, layout),
            Ownership::Copy => ImageView::copied(engine, data, layout),
        }
    }

    /// Creates a zero-copy view over `data`.
    pub fn borrowed(engine: Engine, data: &'a [u8], layout: PixelLayout) -> BridgeResult<Self> {
        layout.validate(data.len())?;
        Self::create(engine, data.as_ptr(), data.len(), layout, PixelStorage::Borrowed)
    }

    /// Creates a view over memory the borrow checker cannot track.
    ///
    /// # Safety
    ///
    /// `data` must point at `len` readable bytes that stay valid and unmodified
    /// until the returned view is closed or dropped.
    pub unsafe fn from_raw_parts(
        engine: Engine,
        data: *const u8,
        len: usize,
        layout: PixelLayout,
    ) -> BridgeResult<Self> {
        if data.is_null() {
            return Err(BridgeError::invalid("pixel buffer pointer is null"));
        }
        layout.validate(len)?;
        Self::create(engine, data, len, layout, PixelStorage::Borrowed)
    }

    /// Creates a view over the luma plane of a planar frame, without copying.
    pub fn from_luma_plane(engine: Engine, plane: LumaPlane<'a>) -> BridgeResult<Self> {
        let fits = (plane.left as usize)
            .checked_add(plane.width as usize)
            .is_some_and(|right| right <= plane.stride);
        if !fits {
            return Err(BridgeError::invalid(format!(
                "{} columns from column {} are wider than the plane stride {}",
                plane.width, plane.left, plane.stride
            )));
        }

        let offset = (plane.top as usize)
            .checked_mul(plane.stride)
            .and_then(|row| row.checked_add(plane.left as usize))
            .filter(|offset| *offset < plane.data.len())
            .ok_or_else(|| {
                BridgeError::invalid(format!(
                    "origin ({}, {}) lies outside the luma plane",
                    plane.left, plane.top
                ))
            })?;

        let layout = PixelLayout::packed(plane.width, plane.height, ImageFormat::Lum)
            .with_row_stride(plane.stride);
        Self::borrowed(engine, &plane.data[offset..], layout)
    }

    fn create(
        engine: Engine,
        data: *const u8,
        len: usize,
        layout: PixelLayout,
        storage: PixelStorage,
    ) -> BridgeResult<Self> {
        // SAFETY: `layout.validate(len)` succeeded in every caller, so all values
        // fit the boundary and `data` covers the geometry.
        let handle = unsafe {
            (engine.api().image_view_new_checked)(
                data,
                to_c_int(len, "buffer length")?,
                to_c_int(layout.width as usize, "width")?,
                to_c_int(layout.height as usize, "height")?,
                layout.format.raw(),
                to_c_int(layout.row_stride, "row stride")?,
                to_c_int(layout.pix_stride, "pixel stride")?,
            )
        };

        // SAFETY: a non-null result is a fresh view owned by us.
        let adopted = unsafe {
            NativeHandle::adopt(engine, handle, engine.api().image_view_delete, "image view")
        };
        let Some(handle) = adopted else {
            let error = engine_failure(engine, "create image view");
            drop(storage);
            return Err(error);
        };

        Ok(Self {
            handle,
            storage,
            layout,
            _buffer: PhantomData,
        })
    }

    /// Geometry the view was created with. [`crop`](Self::crop) and
    /// [`rotate`](Self::rotate) change what the engine sees, not this value.
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// True if the view owns its pixel memory.
    pub fn owns_pixels(&self) -> bool {
        !matches!(self.storage, PixelStorage::Borrowed)
    }

    /// True once the view has been closed.
    pub fn is_closed(&self) -> bool {
        self.handle.is_closed()
    }

    /// Restricts the view to a rectangle, in place.
    ///
    /// A `width` or `height` of 0 extends to the edge. The engine clamps the
    /// rectangle to the image.
    pub fn crop(&mut self, left: u32, top: u32, width: u32, height: u32) -> BridgeResult<()> {
        let handle = self.handle.as_mut_ptr()?;
        let (left, top) = (to_c_int(left as usize, "left")?, to_c_int(top as usize, "top")?);
        let (width, height) = (
            to_c_int(width as usize, "width")?,
            to_c_int(height as usize, "height")?,
        );
        // SAFETY: the handle is live and exclusively borrowed.
        unsafe { (self.engine().api().image_view_crop)(handle, left, top, width, height) };
        Ok(())
    }

    /// Rotates the view clockwise by a multiple of 90 degrees, in place.
    pub fn rotate(&mut self, degrees: i32) -> BridgeResult<()> {
        if degrees % 90 != 0 {
            return Err(BridgeError::invalid(format!(
                "rotation {degrees} is not a multiple of 90 degrees"
            )));
        }
        let handle = self.handle.as_mut_ptr()?;
        // SAFETY: the handle is live and exclusively borrowed.
        unsafe { (self.engine().api().image_view_rotate)(handle, degrees.rem_euclid(360)) };
        Ok(())
    }

    /// Destroys the native view, then frees any owned pixels. Idempotent.
    pub fn close(&mut self) {
        self.handle.close();
        self.storage = PixelStorage::Borrowed;
    }

    /// The engine this view belongs to.
    pub fn engine(&self) -> Engine {
        self.handle.engine()
    }

    pub(crate) fn as_ptr(&self) -> BridgeResult<*const ZXing_ImageView> {
        self.handle.as_ptr()
    }
}

impl ImageView<'static> {
    /// Creates a view over an aligned copy of `data`.
    ///
    /// The geometry is checked before anything is allocated. If the engine
    /// rejects the view, the copy is freed before the error is returned.
    pub fn copied(engine: Engine, data: &[u8], layout: PixelLayout) -> BridgeResult<Self> {
        layout.validate(data.len())?;
        let copy = copy_align_64(data)?;
        let ptr = copy.as_ptr();
        log::debug!("copying {} byte pixel buffer for image view", data.len());
        Self::create(engine, ptr, data.len(), layout, PixelStorage::Aligned(copy))
    }
}

#[cfg(feature = "image")]
mod host {
    use super::*;
    use image::DynamicImage;

    impl<'a> ImageView<'a> {
        /// Creates a view over a host image.
        ///
        /// 8-bit gray, gray+alpha, RGB and RGBA images are viewed in place. Any
        /// other layout (16-bit or float channels, future variants) is first
        /// converted to 8-bit luminance with [`DynamicImage::to_luma8`], which
        /// costs one allocation and one copy owned by the view.
        ///
        /// 16-bit RGB and RGBA images are converted too, never borrowed. The
        /// engine's pixel formats index 8-bit channels, so a view over 16-bit
        /// samples would read low and high bytes as separate channels and
        /// decode the wrong luminance.
        pub fn from_image(engine: Engine, image: &'a DynamicImage) -> BridgeResult<Self> {
            let (data, format) = match image {
                DynamicImage::ImageLuma8(buffer) => (buffer.as_raw().as_slice(), ImageFormat::Lum),
                DynamicImage::ImageLumaA8(buffer) => {
                    (buffer.as_raw().as_slice(), ImageFormat::LumA)
                }
                DynamicImage::ImageRgb8(buffer) => (buffer.as_raw().as_slice(), ImageFormat::Rgb),
                DynamicImage::ImageRgba8(buffer) => {
                    (buffer.as_raw().as_slice(), ImageFormat::Rgba)
                }
                other => return Self::from_converted(engine, other),
            };

            let layout = PixelLayout::packed(image.width(), image.height(), format);
            Self::borrowed(engine, data, layout)
        }

        fn from_converted(engine: Engine, image: &DynamicImage) -> BridgeResult<Self> {
            log::debug!(
                "converting {:?} image to 8-bit luminance for decoding",
                image.color()
            );
            let gray = image.to_luma8();
            let layout = PixelLayout::packed(gray.width(), gray.height(), ImageFormat::Lum);
            let pixels = gray.into_raw();
            layout.validate(pixels.len())?;

            // The Vec's heap buffer does not move when the Vec itself is moved
            // into the view.
            let (ptr, len) = (pixels.as_ptr(), pixels.len());
            Self::create(engine, ptr, len, layout, PixelStorage::Converted(pixels))
        }
    }
}

impl Drop for ImageView<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

impl core::fmt::Debug for ImageView<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ImageView")
            .field("layout", &self.layout)
            .field("owns_pixels", &self.owns_pixels())
            .field("closed", &self.is_closed())
            .finish()
    }
}
