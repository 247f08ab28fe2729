//! `record` subcommand: capture raw and smoothed angles for a list of
//! target angles and write them as CSV.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use game_core::Params;
use hand_input::{write_csv, LandmarkSource, Recorder, RecordingSession, TrackingConfig};
use tracing::info;

/// Record a session and write it to `writer`. Returns the row count.
pub fn record_session<W: Write>(
    source: &mut dyn LandmarkSource,
    session: RecordingSession,
    writer: W,
) -> Result<usize> {
    let dt = 1.0 / Params::FPS as f32;
    let samples = session.target_angles.len();
    let mut recorder = Recorder::new(session, TrackingConfig::new()).context("invalid tracking configuration")?;

    let rows = recorder.run(source, dt).context("recording angles")?;
    let written = write_csv(rows, writer).context("writing angle CSV")?;
    info!(samples, rows = written, complete = recorder.is_done(), "recording finished");
    Ok(written)
}

/// Record into a file at `path`
pub fn record_to_file(source: &mut dyn LandmarkSource, session: RecordingSession, path: &Path) -> Result<usize> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let written = record_session(source, session, BufWriter::new(file))?;
    if written > 0 {
        info!(path = %path.display(), "angle data saved");
    }
    Ok(written)
}
