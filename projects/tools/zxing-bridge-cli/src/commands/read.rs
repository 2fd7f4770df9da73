use crate::error::CliError;
use argh::FromArgs;
use std::path::PathBuf;
use zxing_bridge::{Barcode, Engine, ReaderOptions, TextMode, parse_formats};

#[derive(FromArgs, Debug)]
/// Decode every barcode in an image
#[argh(subcommand, name = "read")]
pub struct ReadCmd {
    /// image file to scan
    #[argh(positional)]
    pub image: PathBuf,

    /// formats to look for, e.g. "QRCode, EAN-13" [default: all]
    #[argh(option)]
    pub formats: Option<String>,

    /// skip the slower detection passes (harder search, inversion, rotation, downscaling)
    #[argh(switch)]
    pub fast: bool,
}

pub fn handle_read_command(cmd: ReadCmd) -> Result<(), CliError> {
    let engine = Engine::linked();
    let image = image::open(&cmd.image)?;
    log::info!(
        "Scanning {} ({}x{})",
        cmd.image.display(),
        image.width(),
        image.height()
    );

    let mut options = ReaderOptions::new(engine)?;
    options.set_text_mode(TextMode::Hri)?;
    options.set_return_errors(true)?;
    if let Some(formats) = &cmd.formats {
        options.set_formats(&parse_formats(formats)?)?;
    }
    if cmd.fast {
        options.set_try_harder(false)?;
        options.set_try_invert(false)?;
        options.set_try_rotate(false)?;
        options.set_try_downscale(false)?;
    }

    let barcodes = engine.read_barcodes(&image, Some(&options))?;
    if barcodes.is_empty() {
        println!("No barcode found.");
        return Ok(());
    }

    for (index, barcode) in barcodes.iter().enumerate() {
        if index > 0 {
            println!();
        }
        print_barcode(barcode)?;
    }

    Ok(())
}

fn print_barcode(barcode: &Barcode) -> Result<(), CliError> {
    let bytes = barcode
        .bytes()?
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect::<Vec<_>>()
        .join(" ");

    println!("Text       : {}", barcode.text()?);
    println!("Bytes      : {bytes}");
    println!("Format     : {}", barcode.format()?);
    println!("Content    : {:?}", barcode.content_type()?);
    println!("Identifier : {}", barcode.symbology_identifier()?);

    let error = barcode.error()?;
    if !error.is_none() {
        println!("Error      : {error}");
    }

    println!("Rotation   : {}", barcode.orientation()?);
    println!("Position   : {}", barcode.position()?);

    let extra = barcode.extra()?;
    if !extra.is_empty() && extra != "{}" {
        println!("Extra      : {extra}");
    }

    Ok(())
}
