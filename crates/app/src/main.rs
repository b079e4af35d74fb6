mod scan;
mod simulate;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use shuffle_viewer_core::{Playlist, TransitionMode, ViewerConfig};
use tracing_subscriber::EnvFilter;

fn main() -> shuffle_viewer_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.mode)?;

    match cli.command {
        Commands::Scan { dir } => run_scan(&dir),
        Commands::Simulate { dir, steps, seed } => run_simulate(config, &dir, steps, seed),
    }
}

fn load_config(
    path: Option<&Path>,
    mode: Option<Mode>,
) -> shuffle_viewer_core::Result<ViewerConfig> {
    let mut config = match path {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    match mode {
        Some(Mode::Instant) => {
            config.sync.transition_mode = TransitionMode::Instant;
            config.sync.secondary_audible = true;
        }
        Some(Mode::Crossfade) => {
            config.sync.transition_mode = TransitionMode::Crossfade;
            config.sync.secondary_audible = false;
        }
        None => {}
    }
    Ok(config)
}

fn run_scan(dir: &Path) -> shuffle_viewer_core::Result<()> {
    tracing::info!(?dir, "scanning folder");
    let files = scan::select_folder(dir);
    let total = files.len();

    let mut playlist = Playlist::new();
    playlist.set_entries(files);
    playlist.shuffle();
    tracing::info!(total, videos = playlist.len(), "scan complete");

    for (index, entry) in playlist.entries().iter().enumerate() {
        println!(
            "{:>4} / {}  {}  ({})",
            index + 1,
            playlist.len(),
            entry.name(),
            entry.mime()
        );
    }
    Ok(())
}

fn run_simulate(
    config: ViewerConfig,
    dir: &Path,
    steps: usize,
    seed: Option<u64>,
) -> shuffle_viewer_core::Result<()> {
    tracing::info!(?dir, steps, mode = ?config.sync.transition_mode, "running headless session");
    let summary = simulate::run(config, scan::select_folder(dir), steps, seed)?;
    tracing::info!(
        videos = summary.videos,
        visited = summary.visited.len(),
        acquired = summary.acquired,
        released = summary.released,
        "simulation finished"
    );
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Shuffled local video viewer", long_about = None)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Override the layer transition variant.
    #[arg(short, long, global = true, value_enum)]
    mode: Option<Mode>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Instant,
    Crossfade,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Filter and shuffle the videos of a folder and print the play order.
    Scan {
        /// Folder to scan recursively.
        dir: PathBuf,
    },
    /// Drive a headless viewing session over a folder.
    Simulate {
        /// Folder to scan recursively.
        dir: PathBuf,
        /// Number of scripted gesture rounds.
        #[arg(short, long, default_value_t = 8)]
        steps: usize,
        /// Seed for a reproducible shuffle.
        #[arg(long)]
        seed: Option<u64>,
    },
}
