//! Read-only view of the engine handed to the renderer once per tick.

use serde::Serialize;

use crate::{Ball, BallModifier, GameMode, Paddle, PaddlePowerup, Particle, Phase, Side};

#[derive(Debug, Clone, Serialize)]
pub struct PaddleView {
    pub side: Side,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub score: u32,
    pub color: [u8; 3],
    pub powerup: PaddlePowerup,
    /// Label shown under the score: own powerup or credited ball effect
    pub powerup_label: Option<&'static str>,
    pub powerup_time_left: f32,
    pub trail: Vec<f32>,
}

impl PaddleView {
    pub fn new(paddle: &Paddle, credited: Option<(BallModifier, f32)>, now: f32) -> Self {
        let (powerup_label, powerup_time_left) = match (paddle.powerup.label(), credited) {
            (Some(label), _) => (Some(label), (paddle.powerup_expires_at - now).max(0.0)),
            (None, Some((modifier, expires_at))) => (modifier.label(), (expires_at - now).max(0.0)),
            (None, None) => (None, 0.0),
        };
        Self {
            side: paddle.side,
            x: paddle.x,
            y: paddle.y,
            width: paddle.width,
            height: paddle.height,
            score: paddle.score,
            color: paddle.side.color(),
            powerup: paddle.powerup,
            powerup_label,
            powerup_time_left,
            trail: paddle.trail.iter().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub modifier: BallModifier,
    pub visible: bool,
}

impl From<&Ball> for BallView {
    fn from(ball: &Ball) -> Self {
        Self {
            x: ball.pos.x,
            y: ball.pos.y,
            radius: ball.effective_radius(),
            modifier: ball.modifier,
            visible: !ball.is_hidden(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MathView {
    pub equation: String,
    pub time_left: f32,
    pub progress: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub mode: GameMode,
    pub arena: [f32; 2],
    /// "MM:SS" of match time, or "SUDDEN DEATH"
    pub clock: String,
    pub level: u32,
    pub left: PaddleView,
    pub right: PaddleView,
    pub ball: BallView,
    pub math: Option<MathView>,
    pub particles: Vec<Particle>,
    pub winner_text: Option<String>,
}

pub fn format_clock(elapsed: f32, sudden_death: bool) -> String {
    if sudden_death {
        return "SUDDEN DEATH".to_string();
    }
    let total = elapsed.max(0.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}
