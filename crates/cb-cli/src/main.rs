//! CLI frontend for the chaos bag.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::BagArgs;

#[derive(Parser)]
#[command(
    name = "chaosbag",
    about = "Chaos bag: weighted token draws with scenario presets, sounds, and a serial trigger",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw tokens and show how often each came up
    Draw {
        /// Number of draws
        #[arg(short = 'n', long, default_value = "1")]
        times: u32,

        #[command(flatten)]
        bag: BagArgs,
    },

    /// Show the active token counts and the odds of each token
    Counts {
        #[command(flatten)]
        bag: BagArgs,
    },

    /// List the scenarios in a preset file
    Scenarios {
        /// Preset file (JSON)
        #[arg(short, long)]
        presets: PathBuf,
    },

    /// List the difficulties of a scenario
    Difficulties {
        /// Scenario id
        scenario: String,

        /// Preset file (JSON)
        #[arg(short, long)]
        presets: PathBuf,
    },

    /// Start an interactive session (type 'help' inside)
    Play {
        #[command(flatten)]
        bag: BagArgs,

        /// Directory with <token>.mp3 files (default: resources/ next to the binary)
        #[arg(long)]
        sounds: Option<PathBuf>,

        /// External player command line instead of built-in playback; the sound path is appended
        #[arg(long)]
        player: Option<String>,

        /// Do not play sounds
        #[arg(short, long)]
        mute: bool,

        /// Serial port to watch for draw triggers (e.g. /dev/ttyUSB0)
        #[arg(short, long)]
        listen: Option<PathBuf>,

        /// Seconds to ignore further triggers after one is accepted
        #[arg(long, default_value = "3")]
        debounce: f64,
    },

    /// List serial ports that look like USB adapters
    Ports,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Draw { times, bag } => commands::draw::run(&bag, times),
        Commands::Counts { bag } => commands::counts::run(&bag),
        Commands::Scenarios { presets } => commands::scenarios::run(&presets),
        Commands::Difficulties { scenario, presets } => {
            commands::scenarios::difficulties(&presets, &scenario)
        }
        Commands::Play {
            bag,
            sounds,
            player,
            mute,
            listen,
            debounce,
        } => commands::play::run(
            &bag,
            commands::play::PlayOptions {
                sounds,
                player,
                mute,
                listen,
                debounce,
            },
        ),
        Commands::Ports => commands::ports::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
