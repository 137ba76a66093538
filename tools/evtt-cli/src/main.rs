//! evtt CLI — export animation markers to event tracks.
//!
//! Usage:
//!   evtt export <SCENE>     Export the active clip's markers to a .evtt file
//!   evtt name <SCENE>       Print the default output file name
//!   evtt info <TRACK>       Show event track information
//!   evtt validate <TRACK>   Check an event track for format problems
//!   evtt config             Show or initialize configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use evtt_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "evtt",
    about = "Export animation markers to runtime event tracks",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the active clip's markers to an event track
    Export {
        /// Path to the scene snapshot (JSON)
        scene: PathBuf,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the track to stdout instead of writing a file
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the default output file name for a scene
    Name {
        /// Path to the scene snapshot (JSON)
        scene: PathBuf,
    },

    /// Show event track information
    Info {
        /// Path to the .evtt file
        path: PathBuf,
    },

    /// Validate an event track
    Validate {
        /// Path to the .evtt file
        path: PathBuf,
    },

    /// Show the active configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    // Initialize logging
    let logging = evtt_common::logging::effective_config(&config.logging, cli.verbose);
    evtt_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Export {
            scene,
            output,
            dry_run,
        } => commands::export::run(scene, output, dry_run, &config),
        Commands::Name { scene } => commands::name::run(scene, &config),
        Commands::Info { path } => commands::info::run(path),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Config { init } => commands::config::run(init, &config),
    }
}
