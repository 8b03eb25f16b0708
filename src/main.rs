use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod config;
mod crop;
mod error;
mod generate;
mod types;

#[derive(Parser)]
#[command(name = "cosmetics-gallery")]
#[command(about = "Cosmetics screenshot gallery site generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the static HTML site in output/ directory
    Generate {
        /// Gallery config file
        #[arg(short, long, default_value = "gallery.yaml")]
        config: String,
        /// Use URLs instead of local files, where possible
        #[arg(short, long)]
        urls: bool,
        /// Width of inlined thumbnails
        #[arg(short, long, default_value_t = 800)]
        width: u32,
        /// Height of inlined thumbnails
        #[arg(short = 'e', long, default_value_t = 450)]
        height: u32,
        /// Output more status messages while processing
        #[arg(short, long)]
        verbose: bool,
    },
    /// Crop thumbnail cells out of raw menu screenshots
    Crop {
        /// Directory to scan for screenshot*.png files
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Clean generated files (output/ and thumbs/ folders)
    Clean,
}

fn run_clean() -> Result<()> {
    println!("Cleaning generated files...");

    for dir in ["output", "thumbs"] {
        let path = std::path::Path::new(dir);
        if path.exists() {
            fs::remove_dir_all(path)?;
            println!("  Removed {}/", dir);
        }
    }

    println!("Clean complete!");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            urls,
            width,
            height,
            verbose,
        } => generate::run_generate(&generate::GenerateOpts {
            root: PathBuf::from("."),
            config_file: config,
            use_urls: urls,
            thumb_size: (width, height),
            verbose,
        }),
        Commands::Crop { dir } => crop::run_crop(&dir),
        Commands::Clean => run_clean(),
    }
}
