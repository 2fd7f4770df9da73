//! Detecting barcodes in images.

use crate::barcode::Barcode;
use crate::engine::Engine;
use crate::error::{BridgeError, BridgeResult};
use crate::handle::NativeHandle;
use crate::image_view::{ImageView, LumaPlane};
use crate::last_error::engine_failure;
use crate::options::ReaderOptions;
use core::ffi::c_int;
use zxing_bridge_sys::ZXing_Barcodes;

/// What to decode: an existing view or a host image converted on the fly.
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'v, 'a> {
    /// A view the caller already built. It stays open after the call.
    View(&'v ImageView<'a>),
    /// A host image; a temporary view is built and closed around the call.
    #[cfg(feature = "image")]
    Image(&'a image::DynamicImage),
    /// The luma plane of a planar frame; viewed in place for the call.
    LumaPlane(LumaPlane<'a>),
}

impl<'v, 'a> From<&'v ImageView<'a>> for ImageSource<'v, 'a> {
    fn from(view: &'v ImageView<'a>) -> Self {
        ImageSource::View(view)
    }
}

#[cfg(feature = "image")]
impl<'a> From<&'a image::DynamicImage> for ImageSource<'_, 'a> {
    fn from(image: &'a image::DynamicImage) -> Self {
        ImageSource::Image(image)
    }
}

impl<'a> From<LumaPlane<'a>> for ImageSource<'_, 'a> {
    fn from(plane: LumaPlane<'a>) -> Self {
        ImageSource::LumaPlane(plane)
    }
}

/// The transient native result container.
///
/// Elements are moved out one by one, which empties their slot in the
/// container, so deleting the shell afterwards only frees what was not moved.
struct BarcodeCollection {
    handle: NativeHandle<ZXing_Barcodes>,
}

impl BarcodeCollection {
    fn len(&self) -> BridgeResult<usize> {
        let ptr = self.handle.as_ptr()?;
        let engine = self.handle.engine();
        // SAFETY: the handle is live for the duration of the call.
        let size = unsafe { (engine.api().barcodes_size)(ptr) };
        usize::try_from(size).map_err(|_| engine_failure(engine, "count barcodes"))
    }

    /// Moves every element into its own [`Barcode`].
    fn drain(&mut self) -> BridgeResult<Vec<Barcode>> {
        let len = self.len()?;
        let ptr = self.handle.as_mut_ptr()?;
        let engine = self.handle.engine();

        let mut barcodes = Vec::with_capacity(len);
        for index in 0..len {
            let index = c_int::try_from(index)
                .map_err(|_| BridgeError::invalid("barcode index exceeds the engine's limit"))?;
            // SAFETY: the handle is live and `index` is in range.
            let moved = unsafe { (engine.api().barcodes_move)(ptr, index) };
            // SAFETY: a non-null moved element is owned by us from here on.
            match unsafe { Barcode::adopt(engine, moved) } {
                Some(barcode) => barcodes.push(barcode),
                // Already-moved barcodes drop with `barcodes`; the rest go with the shell.
                None => return Err(engine_failure(engine, "move barcode out of results")),
            }
        }
        Ok(barcodes)
    }

    fn close(&mut self) {
        self.handle.close();
    }
}

/// Runs one decode over an open view.
pub(crate) fn read_view(
    view: &ImageView<'_>,
    options: Option<&ReaderOptions>,
) -> BridgeResult<Vec<Barcode>> {
    let engine = view.engine();
    let view_ptr = view.as_ptr()?;
    let options_ptr = match options {
        Some(options) => options.as_ptr()?,
        // The engine applies its defaults for a null options pointer.
        None => core::ptr::null(),
    };

    // SAFETY: both pointers are live (or null options) for the whole call; the
    // borrows keep their owners from closing them meanwhile.
    let results = unsafe { (engine.api().read_barcodes)(view_ptr, options_ptr) };
    // SAFETY: a non-null collection is owned by us.
    let handle = unsafe {
        NativeHandle::adopt(engine, results, engine.api().barcodes_delete, "barcode results")
    };
    let Some(handle) = handle else {
        return Err(engine_failure(engine, "read barcodes"));
    };

    let mut collection = BarcodeCollection { handle };
    let barcodes = collection.drain();
    collection.close();

    if let Ok(barcodes) = &barcodes {
        log::debug!("decoded {} barcode(s)", barcodes.len());
    }
    barcodes
}

impl Engine {
    /// Detects and decodes every barcode in `source`.
    ///
    /// `None` options use the engine defaults. An image without any symbol
    /// yields an empty vector, not an error. Symbols that failed to decode are
    /// only returned when [`ReaderOptions::set_return_errors`] is enabled and
    /// carry their problem in [`Barcode::error`].
    ///
    /// Views built internally for host images or luma planes are closed before
    /// this returns, whether decoding succeeded or not.
    pub fn read_barcodes<'v, 'a>(
        &self,
        source: impl Into<ImageSource<'v, 'a>>,
        options: Option<&ReaderOptions>,
    ) -> BridgeResult<Vec<Barcode>>
    where
        'a: 'v,
    {
        let mut view = match source.into() {
            ImageSource::View(view) => return read_view(view, options),
            #[cfg(feature = "image")]
            ImageSource::Image(image) => ImageView::from_image(*self, image)?,
            ImageSource::LumaPlane(plane) => ImageView::from_luma_plane(*self, plane)?,
        };

        let result = read_view(&view, options);
        view.close();
        result
    }
}
