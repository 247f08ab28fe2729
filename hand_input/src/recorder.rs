//! Angle recorder for offline filter evaluation
//!
//! For each target angle: the filter is reset, a countdown runs, then every
//! frame with a detected hand is logged as raw vs. smoothed angle for the
//! configured duration. Rows are written out as CSV.

use std::io::Write;

use tracing::{debug, info, warn};

use crate::angle::hand_angle;
use crate::config::TrackingConfig;
use crate::error::InputError;
use crate::filter::Ema;
use crate::landmarks::LandmarkFrame;
use crate::source::LandmarkSource;

pub const CSV_HEADER: &str = "timestamp,sample_id,target_angle,raw_angle,filtered_angle";

/// Smoothing used for the recorded filtered angle
pub const RECORDER_ALPHA: f32 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSession {
    pub target_angles: Vec<f32>,
    pub duration_per_sample: f32,
    pub countdown: f32,
}

impl RecordingSession {
    pub fn new(target_angles: Vec<f32>, duration_per_sample: f32) -> Self {
        Self {
            target_angles,
            duration_per_sample,
            countdown: 3.0,
        }
    }
}

/// One CSV row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSample {
    /// Seconds since the session started recording
    pub timestamp: f32,
    /// 1-based
    pub sample_id: usize,
    pub target_angle: f32,
    pub raw_angle: f32,
    pub filtered_angle: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage {
    Countdown { sample: usize, remaining: f32 },
    Recording { sample: usize, elapsed: f32 },
    Done,
}

pub struct Recorder {
    session: RecordingSession,
    tracking: TrackingConfig,
    filter: Ema,
    stage: Stage,
    /// Recording time of all finished samples
    session_time: f32,
    rows: Vec<AngleSample>,
}

impl Recorder {
    pub fn new(session: RecordingSession, tracking: TrackingConfig) -> Result<Self, InputError> {
        tracking.validate()?;
        let stage = if session.target_angles.is_empty() {
            Stage::Done
        } else {
            Stage::Countdown {
                sample: 0,
                remaining: session.countdown,
            }
        };
        Ok(Self {
            session,
            tracking,
            filter: Ema::new(RECORDER_ALPHA),
            stage,
            session_time: 0.0,
            rows: Vec::new(),
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }

    pub fn rows(&self) -> &[AngleSample] {
        &self.rows
    }

    /// Advance by one frame
    pub fn feed(&mut self, frame: &LandmarkFrame, dt: f32) -> Stage {
        let dt = dt.max(0.0);
        let angles = frame.hands.first().map(|hand| {
            let raw = hand_angle(hand, self.tracking.anchor_point, self.tracking.target_point);
            (raw, self.filter.update(raw))
        });

        self.stage = match self.stage {
            Stage::Done => Stage::Done,
            Stage::Countdown { sample, remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    info!(sample = sample + 1, target = self.session.target_angles[sample], "recording sample");
                    Stage::Recording { sample, elapsed: 0.0 }
                } else {
                    Stage::Countdown { sample, remaining }
                }
            }
            Stage::Recording { sample, elapsed } => {
                let elapsed = elapsed + dt;
                if let Some((raw_angle, filtered_angle)) = angles {
                    self.rows.push(AngleSample {
                        timestamp: self.session_time + elapsed,
                        sample_id: sample + 1,
                        target_angle: self.session.target_angles[sample],
                        raw_angle,
                        filtered_angle,
                    });
                }
                if elapsed >= self.session.duration_per_sample {
                    self.next_sample(sample)
                } else {
                    Stage::Recording { sample, elapsed }
                }
            }
        };
        self.stage
    }

    fn next_sample(&mut self, finished: usize) -> Stage {
        self.session_time += self.session.duration_per_sample;
        self.filter.reset();
        debug!(sample = finished + 1, rows = self.rows.len(), "sample finished");

        let next = finished + 1;
        if next < self.session.target_angles.len() {
            Stage::Countdown {
                sample: next,
                remaining: self.session.countdown,
            }
        } else {
            Stage::Done
        }
    }

    /// Pull frames until the session is done or the source runs dry
    pub fn run(&mut self, source: &mut dyn LandmarkSource, dt: f32) -> Result<&[AngleSample], InputError> {
        while !self.is_done() {
            match source.next_frame()? {
                Some(frame) => {
                    self.feed(&frame, dt);
                }
                None => {
                    warn!(stage = ?self.stage, "landmark stream ended before the session finished");
                    break;
                }
            }
        }
        Ok(&self.rows)
    }
}

/// Write rows as CSV. Nothing is written for an empty recording; the
/// number of rows written is returned.
pub fn write_csv<W: Write>(rows: &[AngleSample], mut writer: W) -> Result<usize, InputError> {
    if rows.is_empty() {
        warn!("no data recorded");
        return Ok(0);
    }

    writeln!(writer, "{}", CSV_HEADER)?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{},{},{}",
            row.timestamp, row.sample_id, row.target_angle, row.raw_angle, row.filtered_angle
        )?;
    }
    writer.flush()?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{fixtures, Handedness};
    use crate::source::ScriptedSource;

    const DT: f32 = 0.5;

    fn hand_frame(deg: f32) -> LandmarkFrame {
        LandmarkFrame {
            hands: vec![fixtures::pointing(deg, Handedness::Right)],
        }
    }

    #[test]
    fn test_countdown_then_record() {
        let session = RecordingSession {
            target_angles: vec![90.0],
            duration_per_sample: 1.0,
            countdown: 1.0,
        };
        let mut recorder = Recorder::new(session, TrackingConfig::new()).expect("valid tracking config");

        assert!(matches!(recorder.feed(&hand_frame(90.0), DT), Stage::Countdown { .. }));
        assert!(matches!(recorder.feed(&hand_frame(90.0), DT), Stage::Recording { .. }));
        assert!(recorder.rows().is_empty(), "Countdown frames are not recorded");

        recorder.feed(&hand_frame(91.0), DT);
        assert_eq!(recorder.feed(&hand_frame(92.0), DT), Stage::Done);

        let rows = recorder.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sample_id, 1);
        assert_eq!(rows[0].target_angle, 90.0);
        assert_eq!(rows[0].timestamp, 0.5);
        assert_eq!(rows[1].timestamp, 1.0);
        assert!((rows[1].raw_angle - 92.0).abs() < 1e-3);
        assert!(rows[1].filtered_angle < rows[1].raw_angle, "Filter lags the raw angle");
    }

    #[test]
    fn test_frames_without_hand_are_skipped() {
        let session = RecordingSession {
            target_angles: vec![45.0],
            duration_per_sample: 1.0,
            countdown: 0.0,
        };
        let mut recorder = Recorder::new(session, TrackingConfig::new()).expect("valid tracking config");
        recorder.feed(&LandmarkFrame::empty(), DT);
        recorder.feed(&LandmarkFrame::empty(), DT);
        recorder.feed(&hand_frame(45.0), DT);
        assert!(recorder.is_done());
        assert_eq!(recorder.rows().len(), 1);
    }

    #[test]
    fn test_each_sample_resets_filter_and_ids() {
        let session = RecordingSession {
            target_angles: vec![30.0, 150.0],
            duration_per_sample: 1.0,
            countdown: 0.0,
        };
        let mut recorder = Recorder::new(session, TrackingConfig::new()).expect("valid tracking config");
        let mut frames = Vec::new();
        for deg in [30.0, 30.0, 30.0, 150.0, 150.0, 150.0] {
            frames.push(hand_frame(deg));
        }
        let mut source = ScriptedSource::new(frames);

        let rows = recorder.run(&mut source, DT).expect("run").to_vec();
        assert!(recorder.is_done());

        let second: Vec<_> = rows.iter().filter(|r| r.sample_id == 2).collect();
        assert!(!second.is_empty());
        assert!(
            (second[0].filtered_angle - 150.0).abs() < 1e-2,
            "Fresh filter passes the first sample through"
        );
        assert!(second[0].timestamp > 1.0, "Timestamps continue across samples");
    }

    #[test]
    fn test_bad_anchor_is_rejected() {
        let tracking = TrackingConfig {
            anchor_point: crate::angle::AnchorPoint::Landmark(21),
            ..TrackingConfig::new()
        };
        let session = RecordingSession::new(vec![90.0], 1.0);
        assert!(matches!(
            Recorder::new(session, tracking),
            Err(InputError::LandmarkIndex { name: "anchor", index: 21 })
        ));
    }

    #[test]
    fn test_write_csv() {
        let rows = [AngleSample {
            timestamp: 0.5,
            sample_id: 1,
            target_angle: 90.0,
            raw_angle: 91.5,
            filtered_angle: 90.25,
        }];
        let mut out = Vec::new();
        assert_eq!(write_csv(&rows, &mut out).expect("write"), 1);

        let text = String::from_utf8(out).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(lines.next(), Some("0.5,1,90,91.5,90.25"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_recording_writes_nothing() {
        let mut out = Vec::new();
        assert_eq!(write_csv(&[], &mut out).expect("write"), 0);
        assert!(out.is_empty());
    }
}
