//! Bango CLI: command-line interface for auction poster composition.
//!
//! Usage:
//!   bango generate [OPTIONS]   Generate localized poster text
//!   bango preview [OPTIONS]    Write an SVG preview
//!   bango export [OPTIONS]     Export the poster to PNG
//!   bango check                Check system capabilities

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use bango_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "bango",
    about = "Compose bilingual commodity auction posters",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Poster state JSON to start from (defaults to the built-in poster)
    #[arg(short, long, global = true)]
    state: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate auction text and merge it into the poster state
    Generate {
        /// Region name; repeat for several regions
        #[arg(short, long = "location", required = true)]
        locations: Vec<String>,

        /// Crop name, e.g. "CHICK PEA"
        #[arg(short, long)]
        crop: String,

        /// Auction date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Auction start time (HH:MM); defaults to the configured time
        #[arg(short, long)]
        time: Option<String>,

        /// Language: sw or en
        #[arg(long)]
        lang: Option<String>,

        /// Also replace the footer logos with the sponsors of the crop
        #[arg(long)]
        with_logos: bool,

        /// Where to write the resulting state JSON (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write an SVG preview at a viewport size
    Preview {
        /// Output SVG path
        #[arg(short, long, default_value = "preview.svg")]
        output: PathBuf,

        /// Viewport edge length in pixels
        #[arg(long, default_value = "480")]
        viewport: u32,

        /// Embed local images into the SVG
        #[arg(long)]
        inline: bool,
    },

    /// Export the poster to PNG
    Export {
        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Pixel multiplier over the 1000x1000 canvas
        #[arg(long)]
        scale: Option<f64>,

        /// Rasterizer program
        #[arg(long)]
        rasterizer: Option<String>,

        /// Base directory for relative image paths
        #[arg(long)]
        asset_root: Option<PathBuf>,

        /// Background image to upload before exporting
        #[arg(long)]
        background: Option<PathBuf>,

        /// Top-left logo to upload before exporting
        #[arg(long)]
        top_left_logo: Option<PathBuf>,

        /// Top-right logo to upload before exporting
        #[arg(long)]
        top_right_logo: Option<PathBuf>,
    },

    /// Check system capabilities
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    bango_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Generate {
            locations,
            crop,
            date,
            time,
            lang,
            with_logos,
            output,
        } => commands::generate::run(
            &config,
            cli.state,
            commands::generate::GenerateArgs {
                locations,
                crop,
                date,
                time,
                lang,
                with_logos,
            },
            output,
        ),
        Commands::Preview {
            output,
            viewport,
            inline,
        } => commands::preview::run(&config, cli.state, output, viewport, inline).await,
        Commands::Export {
            output_dir,
            scale,
            rasterizer,
            asset_root,
            background,
            top_left_logo,
            top_right_logo,
        } => {
            commands::export::run(
                &config,
                cli.state,
                commands::export::ExportArgs {
                    output_dir,
                    scale,
                    rasterizer,
                    asset_root,
                    background,
                    top_left_logo,
                    top_right_logo,
                },
            )
            .await
        }
        Commands::Check => commands::check::run(&config),
    }
}
