//! CLI frontend for the Lantern text-adventure engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lantern",
    about = "Lantern: a text-adventure world engine",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a world file and summarize its contents
    Check {
        /// World data file (JSON)
        #[arg(short, long)]
        world: PathBuf,
    },

    /// Play a world interactively on stdin/stdout
    Play {
        /// World data file (JSON)
        #[arg(short, long)]
        world: PathBuf,

        /// Directory for save files (default: saves are kept in memory)
        #[arg(long)]
        save_dir: Option<PathBuf>,

        /// Save slot name
        #[arg(long, default_value = "lantern-save")]
        slot: String,

        /// Start in this scene instead of the world's start scene
        #[arg(long)]
        start: Option<String>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { world } => commands::check::run(&world),
        Commands::Play {
            world,
            save_dir,
            slot,
            start,
        } => commands::play::run(&world, save_dir, &slot, start.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
