use std::fmt;

use serde::Serialize;

use crate::config::Config;
use crate::powerup::Powerup;
use crate::Side;

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Delta time for this tick
    pub now: f32, // Total elapsed match time
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }

    /// Advance the clock by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        self.dt = dt;
        self.now += dt;
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Session-scoped rally progress: paddle hits, level and ball base speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rally {
    pub level: u32,
    pub total_hits: u32,
    pub base_speed: f32,
}

impl Rally {
    pub fn new(start_speed: f32) -> Self {
        Self {
            level: 1,
            total_hits: 0,
            base_speed: start_speed,
        }
    }

    /// Count a paddle hit. Returns true when the hit completes a level.
    pub fn register_hit(&mut self, config: &Config) -> bool {
        self.total_hits += 1;
        if self.total_hits % config.hits_per_level.max(1) != 0 {
            return false;
        }
        self.level += 1;
        self.base_speed = (self.base_speed + config.speed_increment_per_level).min(config.ball_max_speed);
        true
    }

    /// Speed the ball leaves a paddle with, boosted off a trampoline
    pub fn return_speed(&self, trampoline: bool, config: &Config) -> f32 {
        if trampoline {
            (self.base_speed * config.trampoline_boost).min(config.ball_max_speed)
        } else {
            self.base_speed
        }
    }
}

/// Discrete gesture token derived from the tracked hand each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Gesture {
    /// No hand, or nothing recognisable
    #[default]
    Neutral,
    /// Number of extended fingers, 0-5
    Digit(u8),
    /// Two-handed crossed-index pose used to pause
    PausePose,
}

impl Gesture {
    pub fn digit(self) -> Option<u8> {
        match self {
            Gesture::Digit(n) => Some(n),
            Gesture::Neutral | Gesture::PausePose => None,
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gesture::Neutral => f.write_str("neutral"),
            Gesture::Digit(n) => write!(f, "{}", n),
            Gesture::PausePose => f.write_str("pause"),
        }
    }
}

/// Movement and answer intent for the keyboard-driven paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleIntent {
    pub dir: i8,            // -1 = up, 0 = stop, 1 = down
    pub answer: Option<u8>, // Digit key held this tick
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Everything the engine consumes for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Smoothed hand angle in degrees
    pub angle: f32,
    pub gesture: Gesture,
    /// Pause pose hold progress in [0, 1]
    pub pause_progress: f32,
    /// Player 2 keyboard state (PvP only)
    pub opponent: PaddleIntent,
}

/// How a math task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathOutcome {
    Won(Side),
    Expired,
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub left_scored: bool,
    pub right_scored: bool,
    pub ball_hit_paddle: bool,
    pub ball_hit_wall: bool,
    pub level_up: bool,
    pub task_started: bool,
    pub math: Option<MathOutcome>,
    pub powerup: Option<(Side, Powerup)>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn scored(&mut self, side: Side) {
        match side {
            Side::Left => self.left_scored = true,
            Side::Right => self.right_scored = true,
        }
    }
}
