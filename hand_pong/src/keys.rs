//! Keyboard input for player 2
//!
//! Key events arrive as a script read in lockstep with the landmark frames:
//! one line per frame, whitespace separated `+Key` (pressed) and `-Key`
//! (released) tokens. A blank line means no change. Once the script ends
//! the held keys stay as they are.

use std::io::BufRead;

use anyhow::{Context, Result};
use game_core::PaddleIntent;
use tracing::{debug, warn};

/// Direction after a key press
pub fn handle_key_down(key: &str, current_dir: i8) -> i8 {
    match key {
        "ArrowUp" | "w" | "W" => -1,
        "ArrowDown" | "s" | "S" => 1,
        _ => current_dir,
    }
}

/// Direction after a key release
pub fn handle_key_up(key: &str, current_dir: i8) -> i8 {
    match key {
        "ArrowUp" | "w" | "W" | "ArrowDown" | "s" | "S" => 0,
        _ => current_dir,
    }
}

/// Math answer key, `0`..=`5`
fn answer_key(key: &str) -> Option<u8> {
    key.parse::<u8>().ok().filter(|n| *n <= 5)
}

pub struct KeyScript<R> {
    reader: Option<R>,
    intent: PaddleIntent,
    line: usize,
    buf: String,
}

impl<R: BufRead> KeyScript<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            intent: PaddleIntent::new(),
            line: 0,
            buf: String::new(),
        }
    }

    /// No keyboard at all
    pub fn idle() -> Self {
        Self {
            reader: None,
            intent: PaddleIntent::new(),
            line: 0,
            buf: String::new(),
        }
    }

    /// Keys held during the next frame
    pub fn next_intent(&mut self) -> Result<PaddleIntent> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(self.intent);
        };

        self.buf.clear();
        let read = reader
            .read_line(&mut self.buf)
            .with_context(|| format!("reading key script line {}", self.line + 1))?;
        if read == 0 {
            debug!(lines = self.line, "key script ended");
            self.reader = None;
            return Ok(self.intent);
        }
        self.line += 1;

        for token in self.buf.split_whitespace() {
            if let Some(key) = token.strip_prefix('+') {
                apply_key(&mut self.intent, key, true);
            } else if let Some(key) = token.strip_prefix('-') {
                apply_key(&mut self.intent, key, false);
            } else {
                warn!(line = self.line, token, "ignoring key token without +/- prefix");
            }
        }
        Ok(self.intent)
    }
}

/// Update held keys for one `+Key`/`-Key` token
fn apply_key(intent: &mut PaddleIntent, key: &str, pressed: bool) {
    if let Some(digit) = answer_key(key) {
        if pressed {
            intent.answer = Some(digit);
        } else if intent.answer == Some(digit) {
            intent.answer = None;
        }
        return;
    }
    intent.dir = if pressed {
        handle_key_down(key, intent.dir)
    } else {
        handle_key_up(key, intent.dir)
    };
}
