use crate::error::CliError;
use argh::FromArgs;
use std::fs;
use std::path::PathBuf;
use zxing_bridge::{BarcodeFormat, CreatorOptions, Engine, WriterOptions, formats_to_string};

#[derive(FromArgs, Debug)]
/// Create a barcode and save it as SVG (".svg") or PNG (anything else)
#[argh(subcommand, name = "write")]
pub struct WriteCmd {
    /// content to encode
    #[argh(positional)]
    pub text: String,

    /// barcode format, e.g. QRCode, EAN-13, DataMatrix
    #[argh(positional)]
    pub format: String,

    /// output file
    #[argh(positional)]
    pub output: PathBuf,
}

/// Resolves `name` against what the linked engine can create.
fn creatable_format(engine: Engine, name: &str) -> Result<BarcodeFormat, CliError> {
    let creatable = engine.list_formats(BarcodeFormat::ALL_CREATABLE)?;
    match BarcodeFormat::parse(name) {
        Ok(format) if creatable.contains(&format) => Ok(format),
        _ => Err(CliError::NotCreatable {
            name: name.to_owned(),
            creatable: formats_to_string(&creatable),
        }),
    }
}

pub fn handle_write_command(cmd: WriteCmd) -> Result<(), CliError> {
    let engine = Engine::linked();
    let format = creatable_format(engine, &cmd.format)?;

    let options = CreatorOptions::new(engine, format)?;
    let barcode = engine.create_barcode(cmd.text.as_str(), &options)?;
    let mut writer = WriterOptions::new(engine)?;

    let is_svg = cmd
        .output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        writer.set_add_hrt(true)?;
        fs::write(&cmd.output, barcode.to_svg(Some(&writer))?)?;
    } else {
        writer.set_scale(4)?;
        let raster = barcode.to_image(Some(&writer))?;
        log::info!("Rendered {}x{} raster", raster.width(), raster.height());
        raster
            .into_gray_image()?
            .save_with_format(&cmd.output, image::ImageFormat::Png)?;
    }

    println!("Wrote {format} barcode to {}", cmd.output.display());
    Ok(())
}
