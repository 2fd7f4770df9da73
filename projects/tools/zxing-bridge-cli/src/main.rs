#![cfg(not(tarpaulin_include))]

mod commands;
mod error;

use argh::FromArgs;
use core::error::Error;

#[derive(FromArgs, Debug)]
/// Read and write barcodes with the zxing-cpp engine
struct TopLevel {
    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Commands {
    Read(commands::read::ReadCmd),
    Write(commands::write::WriteCmd),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli: TopLevel = argh::from_env();

    match cli.command {
        Commands::Read(cmd) => {
            commands::read::handle_read_command(cmd)?;
        }
        Commands::Write(cmd) => {
            commands::write::handle_write_command(cmd)?;
        }
    }

    Ok(())
}
