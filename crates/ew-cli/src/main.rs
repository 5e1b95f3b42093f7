//! Terminal front end for Emberwake.

mod commands;
mod terminal;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ew_campaign::config::DEFAULT_SAVE_FILE;

#[derive(Parser)]
#[command(
    name = "emberwake",
    about = "Emberwake, a text adventure of gated roads, riddles, and monsters",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start or resume a campaign
    Play {
        /// Content file (JSON); the built-in content is used when omitted
        #[arg(short, long)]
        content: Option<PathBuf>,

        /// RNG seed for a reproducible run (random when omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Save file
        #[arg(long, default_value = DEFAULT_SAVE_FILE)]
        save: PathBuf,

        /// Player name; asked for at start when omitted
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Validate a content file and the standard world
    Check {
        /// Content file (JSON); the built-in content is checked when omitted
        #[arg(short, long)]
        content: Option<PathBuf>,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            content,
            seed,
            save,
            name,
        } => commands::play::run(content.as_deref(), seed, save, name),
        Commands::Check { content } => commands::check::run(content.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
