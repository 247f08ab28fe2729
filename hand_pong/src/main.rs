//! Hand Pong: Pong steered by hand angle, with finger-count menus and math
//! challenges. Landmark frames come from an external hand tracker as JSON
//! lines; render snapshots go to stdout as JSON lines.

mod app;
mod keys;
mod logging;
mod record;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_core::{Config, GameEngine};
use hand_input::{HandController, JsonLinesSource, RecordingSession, TrackingConfig};
use tracing::info;

use crate::app::App;
use crate::keys::KeyScript;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a session from a landmark stream
    Play {
        /// Landmark JSON lines, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Player 2 key script, one line per frame
        #[arg(long)]
        keys: Option<PathBuf>,

        /// Write a JSON snapshot per frame to stdout
        #[arg(long)]
        snapshots: bool,

        /// RNG seed for serves, math tasks and powerups
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Record raw and smoothed hand angles to CSV
    Record {
        /// Landmark JSON lines, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Target angles in degrees, one sample each
        #[arg(long, value_delimiter = ',', default_value = "0,45,90,135,180")]
        angles: Vec<f32>,

        /// Seconds recorded per target angle
        #[arg(long, default_value_t = 10.0)]
        duration: f32,

        /// CSV output path
        #[arg(long, short, default_value = "angle_data.csv")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.json_logs);

    match cli.command {
        Command::Play {
            input,
            keys,
            snapshots,
            seed,
        } => play(&input, keys, snapshots, seed),
        Command::Record {
            input,
            angles,
            duration,
            output,
        } => {
            let mut source = JsonLinesSource::open(&input).context("camera unavailable")?;
            let session = RecordingSession::new(angles, duration);
            record::record_to_file(&mut source, session, &output)?;
            Ok(())
        }
    }
}

fn play(input: &str, keys: Option<PathBuf>, snapshots: bool, seed: u64) -> Result<()> {
    let mut source = JsonLinesSource::open(input).context("camera unavailable")?;
    let mut keys = match keys {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening key script {}", path.display()))?;
            KeyScript::new(BufReader::new(file))
        }
        None => KeyScript::idle(),
    };

    let engine = GameEngine::new(Config::new(), seed).context("invalid game configuration")?;
    let controller = HandController::new(TrackingConfig::new()).context("invalid tracking configuration")?;
    let mut app = App::new(engine, controller);
    info!(seed, snapshots, "starting session");

    let out = snapshots.then(|| io::BufWriter::new(io::stdout().lock()));
    let summary = app.run(&mut source, &mut keys, out)?;
    info!(frames = summary.frames, phase = ?summary.final_phase, "goodbye");
    Ok(())
}
