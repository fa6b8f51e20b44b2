use clap::{Parser, Subcommand};
use digipin_rs::{
    DigiPinError, approx_cell_size_meters, get_digi_pin, get_lat_lng_from_digi_pin,
};

#[derive(Parser)]
#[command(name = "digipin", about = "Global digital address (DIGIPIN) codec", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a latitude/longitude into a DIGIPIN code
    Encode {
        lat: f64,
        lon: f64,
        /// Code length in symbols
        #[arg(long, default_value_t = 10)]
        levels: i32,
    },
    /// Decode a DIGIPIN code to the center of its cell
    Decode {
        code: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Approximate cell size in meters at a given level count
    Size { levels: i32 },
}

fn main() -> Result<(), DigiPinError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Encode { lat, lon, levels } => {
            println!("{}", get_digi_pin(&(lat, lon), levels)?);
        }
        Command::Decode { code, json } => {
            let center = get_lat_lng_from_digi_pin(&code)?;
            if json {
                let rendered = serde_json::to_string(&center)
                    .map_err(|e| DigiPinError::IoError(e.to_string()))?;
                println!("{}", rendered);
            } else {
                println!("{:.8} {:.8}", center.latitude, center.longitude);
            }
        }
        Command::Size { levels } => {
            println!("{:.6}", approx_cell_size_meters(levels)?);
        }
    }

    Ok(())
}
