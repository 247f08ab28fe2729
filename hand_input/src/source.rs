//! Landmark frame sources
//!
//! The hand tracker runs out of process and streams one JSON frame per
//! line. A blank line is a frame with no hands.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::error::InputError;
use crate::landmarks::{LandmarkFrame, RawFrame};

/// Anything that yields landmark frames, one per camera frame
pub trait LandmarkSource {
    /// Next frame, or None once the stream has ended
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>, InputError>;
}

/// JSON-lines reader
pub struct JsonLinesSource<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far
    pub fn line(&self) -> usize {
        self.line
    }
}

impl JsonLinesSource<Box<dyn BufRead>> {
    /// Open a file, or standard input for `-`
    pub fn open(path: &str) -> Result<Self, InputError> {
        let reader: Box<dyn BufRead> = if path == "-" {
            info!("reading landmark frames from stdin");
            Box::new(BufReader::new(io::stdin()))
        } else {
            let file = File::open(Path::new(path))
                .map_err(|e| InputError::Unavailable(format!("{}: {}", path, e)))?;
            info!(path, "reading landmark frames");
            Box::new(BufReader::new(file))
        };
        Ok(Self::new(reader))
    }
}

impl<R: BufRead> LandmarkSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>, InputError> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            debug!(lines = self.line, "landmark stream ended");
            return Ok(None);
        }
        self.line += 1;

        let text = self.buf.trim();
        if text.is_empty() {
            return Ok(Some(LandmarkFrame::empty()));
        }

        let malformed = |reason: String| InputError::Malformed {
            line: self.line,
            reason,
        };
        let raw: RawFrame = serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?;
        let frame = LandmarkFrame::try_from(raw).map_err(malformed)?;
        Ok(Some(frame))
    }
}

/// Pre-recorded frames, replayed in order
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    frames: VecDeque<LandmarkFrame>,
}

impl ScriptedSource {
    pub fn new(frames: impl IntoIterator<Item = LandmarkFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl LandmarkSource for ScriptedSource {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>, InputError> {
        Ok(self.frames.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{fixtures, Handedness, RawHand};
    use std::io::Cursor;

    fn line_for(frame: &LandmarkFrame) -> String {
        let raw = RawFrame {
            hands: frame.hands.iter().map(RawHand::from).collect(),
        };
        serde_json::to_string(&raw).expect("serialize")
    }

    #[test]
    fn test_reads_frames_until_eof() {
        let frame = LandmarkFrame {
            hands: vec![fixtures::showing(2, Handedness::Right)],
        };
        let input = format!("{}\n\n{}\n", line_for(&frame), line_for(&LandmarkFrame::empty()));
        let mut source = JsonLinesSource::new(Cursor::new(input));

        let first = source.next_frame().expect("ok").expect("frame");
        assert_eq!(first, frame);
        let blank = source.next_frame().expect("ok").expect("frame");
        assert!(blank.is_empty(), "Blank line is a frame with no hands");
        let empty = source.next_frame().expect("ok").expect("frame");
        assert!(empty.is_empty());
        assert!(source.next_frame().expect("ok").is_none());
        assert_eq!(source.line(), 3);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let input = "{}\nnot json\n";
        let mut source = JsonLinesSource::new(Cursor::new(input));
        assert!(source.next_frame().is_ok());

        match source.next_frame() {
            Err(InputError::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_landmark_count_is_malformed() {
        let input = r#"{"hands":[{"handedness":"Left","landmarks":[[0.1,0.1]]}]}"#;
        let mut source = JsonLinesSource::new(Cursor::new(input));
        let err = source.next_frame().expect_err("one landmark");
        assert!(err.to_string().contains("expected 21 landmarks"), "{}", err);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let result = JsonLinesSource::open("/definitely/not/here.jsonl");
        assert!(matches!(result, Err(InputError::Unavailable(_))));
    }

    #[test]
    fn test_scripted_source() {
        let mut source = ScriptedSource::new(vec![LandmarkFrame::empty(); 2]);
        assert!(source.next_frame().expect("ok").is_some());
        assert!(source.next_frame().expect("ok").is_some());
        assert!(source.next_frame().expect("ok").is_none());
    }
}
