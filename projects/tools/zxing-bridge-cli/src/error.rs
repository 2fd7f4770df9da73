use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Bridge(#[from] zxing_bridge::BridgeError),
    #[error("unknown barcode format '{name}', creatable formats are: {creatable}")]
    NotCreatable { name: String, creatable: String },
}
