#![doc = include_str!("../README.MD")]
#![warn(missing_docs)]

//! Safe, owned wrappers over the zxing-cpp C API.
//!
//! Every native object (image view, option bags, barcode, rendered raster)
//! is held by exactly one Rust value that releases it on drop or on an
//! explicit `close()`. Engine failures come back as [`BridgeError`] carrying
//! the message the engine left on its per-thread error channel.
//!
//! # Example
//!
//! ```ignore
//! use zxing_bridge::{BarcodeFormat, CreatorOptions, Engine, WriterOptions};
//!
//! let engine = Engine::linked();
//! let options = CreatorOptions::new(engine, BarcodeFormat::QR_CODE)?;
//! let barcode = engine.create_barcode("HELLO", &options)?;
//!
//! let mut writer = WriterOptions::new(engine)?;
//! writer.set_scale(4)?;
//! let raster = barcode.to_image(Some(&writer))?;
//!
//! let image = image::DynamicImage::ImageLuma8(raster.into_gray_image()?);
//! let decoded = engine.read_barcodes(&image, None)?;
//! assert_eq!(decoded[0].text()?, "HELLO");
//! ```

pub mod allocate;
pub mod barcode;
pub mod decode;
pub mod encode;
pub mod engine;
pub mod error;
pub mod format;
pub mod image_view;
pub mod last_error;
pub mod options;
pub mod pixel;

mod handle;
mod marshal;

#[cfg(test)]
mod test_prelude;

pub use barcode::{Barcode, BarcodeError, ContentType, ErrorType, PointI, Position};
pub use decode::ImageSource;
pub use encode::{Payload, RenderedImage};
pub use engine::Engine;
pub use error::{BridgeError, BridgeResult, ErrorKind};
pub use format::{BarcodeFormat, formats_to_string, list_formats, parse_formats};
pub use image_view::{ImageView, LumaPlane, Ownership};
pub use last_error::take_last_error;
pub use options::{
    Binarizer, CreatorOptions, EanAddOnSymbol, ReaderOptions, TextMode, WriterOptions,
};
pub use pixel::{ImageFormat, PixelLayout};

/// Decodes with the linked engine. See [`Engine::read_barcodes`].
#[cfg(feature = "link")]
pub fn read_barcodes<'v, 'a>(
    source: impl Into<ImageSource<'v, 'a>>,
    options: Option<&ReaderOptions>,
) -> BridgeResult<Vec<Barcode>>
where
    'a: 'v,
{
    Engine::linked().read_barcodes(source, options)
}

/// Creates a barcode with the linked engine. See [`Engine::create_barcode`].
#[cfg(feature = "link")]
pub fn create_barcode<'p>(
    payload: impl Into<Payload<'p>>,
    options: &CreatorOptions,
) -> BridgeResult<Barcode> {
    Engine::linked().create_barcode(payload, options)
}

/// Version of the linked engine.
#[cfg(feature = "link")]
pub fn version() -> Option<String> {
    Engine::linked().version()
}
