// nametag-pdf: Generate printable name tag sheets from an attendee table

use clap::Parser;
use log::LevelFilter;

use nametag_pdf::config::DEFAULT_OUTPUT;
use nametag_pdf::{generate_name_tags, AppError, NameTagConfig};

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate printable name tags with profile QR codes")]
struct Args {
    /// Attendee table (CSV with 성함 and 인스타그램ID columns)
    input: String,

    /// Output PDF filename
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: String,
}

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .format_timestamp(None)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args = Args::parse();
    let config = NameTagConfig::default();

    let summary = generate_name_tags(&args.input, &args.output, &config)?;

    println!("✓ Generated: {}", args.output);
    println!("  Attendees: {}", summary.attendees);
    println!("  Pages: {}", summary.pages);

    Ok(())
}
