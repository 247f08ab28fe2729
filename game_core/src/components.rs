use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::arena::Aabb;
use crate::config::Config;
use crate::params::Params;
use crate::resources::GameRng;

/// Which half of the arena a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    /// Player 1, driven by the hand angle
    Left,
    /// Player 2, bot or keyboard
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "PLAYER 1",
            Side::Right => "PLAYER 2",
        }
    }

    /// Horizontal direction the ball travels after this paddle returns it
    pub fn outward(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    pub fn color(self) -> [u8; 3] {
        match self {
            Side::Left => Params::COLOR_P1,
            Side::Right => Params::COLOR_P2,
        }
    }
}

/// Timed paddle modifier. At most one is active per paddle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PaddlePowerup {
    #[default]
    None,
    Enlarge,
    Shrink,
    Trampoline,
    Agility,
}

impl PaddlePowerup {
    /// Height relative to the base paddle height
    pub fn height_factor(self) -> f32 {
        match self {
            PaddlePowerup::Enlarge => Params::ENLARGE_FACTOR,
            PaddlePowerup::Shrink => Params::SHRINK_FACTOR,
            PaddlePowerup::None | PaddlePowerup::Trampoline | PaddlePowerup::Agility => 1.0,
        }
    }

    pub fn label(self) -> Option<&'static str> {
        match self {
            PaddlePowerup::None => None,
            PaddlePowerup::Enlarge => Some("ENLARGE"),
            PaddlePowerup::Shrink => Some("SHRINK"),
            PaddlePowerup::Trampoline => Some("TRAMPOLINE"),
            PaddlePowerup::Agility => Some("AGILITY"),
        }
    }
}

/// Paddle component
#[derive(Debug, Clone)]
pub struct Paddle {
    pub side: Side,
    pub x: f32, // Left edge, fixed
    pub y: f32, // Top edge, clamped to arena
    pub width: f32,
    pub height: f32,
    pub base_height: f32,
    pub score: u32,
    pub powerup: PaddlePowerup,
    pub powerup_expires_at: f32,
    pub trail: VecDeque<f32>, // Previous y positions while agility is active
}

impl Paddle {
    pub fn new(side: Side, config: &Config) -> Self {
        Self {
            side,
            x: config.paddle_x(side),
            y: (config.arena_height - config.paddle_height) / 2.0,
            width: config.paddle_width,
            height: config.paddle_height,
            base_height: config.paddle_height,
            score: 0,
            powerup: PaddlePowerup::None,
            powerup_expires_at: 0.0,
            trail: VecDeque::with_capacity(Params::TRAIL_LENGTH),
        }
    }

    /// Reset position, score and all effects
    pub fn reset(&mut self, config: &Config) {
        self.score = 0;
        self.clear_powerup();
        self.y = (config.arena_height - self.height) / 2.0;
    }

    pub fn clear_powerup(&mut self) {
        self.powerup = PaddlePowerup::None;
        self.powerup_expires_at = 0.0;
        self.height = self.base_height;
        self.trail.clear();
    }

    /// Replace any active powerup with `powerup` for the configured duration
    pub fn apply_powerup(&mut self, powerup: PaddlePowerup, now: f32, config: &Config) {
        self.clear_powerup();
        if powerup == PaddlePowerup::None {
            return;
        }
        self.powerup = powerup;
        self.powerup_expires_at = now + config.powerup_duration;
        self.height = self.base_height * powerup.height_factor();
        self.y = config.clamp_paddle_y(self.y, self.height);
    }

    /// Expire the powerup once its time is up. Returns true if it expired this tick.
    pub fn update(&mut self, now: f32, config: &Config) -> bool {
        if self.powerup != PaddlePowerup::None && now >= self.powerup_expires_at {
            debug!(side = ?self.side, powerup = ?self.powerup, "paddle powerup expired");
            self.clear_powerup();
            self.y = config.clamp_paddle_y(self.y, self.height);
            return true;
        }
        false
    }

    /// Place the paddle directly at `target_y` (clamped)
    pub fn move_to(&mut self, target_y: f32, config: &Config) {
        self.y = config.clamp_paddle_y(target_y, self.height);
        self.record_trail();
    }

    /// Move a fraction `factor` of the way towards `target_y` (clamped)
    pub fn lerp_to(&mut self, target_y: f32, factor: f32, config: &Config) {
        let target = config.clamp_paddle_y(target_y, self.height);
        self.y += (target - self.y) * factor.clamp(0.0, 1.0);
        self.y = config.clamp_paddle_y(self.y, self.height);
        self.record_trail();
    }

    fn record_trail(&mut self) {
        if self.powerup != PaddlePowerup::Agility {
            self.trail.clear();
            return;
        }
        self.trail.push_back(self.y);
        while self.trail.len() > Params::TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn rect(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, self.y),
            Vec2::new(self.x + self.width, self.y + self.height),
        )
    }

    /// X coordinate of the face the ball bounces off
    pub fn face_x(&self) -> f32 {
        match self.side {
            Side::Left => self.x + self.width,
            Side::Right => self.x,
        }
    }

    pub fn is_trampoline(&self) -> bool {
        self.powerup == PaddlePowerup::Trampoline
    }

    /// Particles thrown off the paddle center when a trampoline launch happens
    pub fn trampoline_burst(&self) -> Option<ParticleBurst> {
        self.is_trampoline().then(|| {
            ParticleBurst::new(
                Vec2::new(self.x + self.width / 2.0, self.center_y()),
                self.side.color(),
                Params::TRAMPOLINE_PARTICLES,
            )
        })
    }
}

/// Timed ball modifier. Tiny and ghost are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BallModifier {
    #[default]
    None,
    Tiny,
    Ghost,
}

impl BallModifier {
    pub fn label(self) -> Option<&'static str> {
        match self {
            BallModifier::None => None,
            BallModifier::Tiny => Some("TINY BALL"),
            BallModifier::Ghost => Some("GHOST BALL"),
        }
    }
}

/// Ball component - the pong ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2, // Units per tick
    pub radius: f32,
    pub modifier: BallModifier,
    pub modifier_expires_at: f32,
    pub ghost_visible: bool,
}

impl Ball {
    pub fn new(config: &Config) -> Self {
        Self {
            pos: config.center(),
            vel: Vec2::ZERO,
            radius: config.ball_radius,
            modifier: BallModifier::None,
            modifier_expires_at: 0.0,
            ghost_visible: true,
        }
    }

    /// Serve from the center in a random horizontal direction.
    /// Modifiers survive a serve; they only end when they expire.
    pub fn reset(&mut self, speed: f32, center: Vec2, rng: &mut GameRng) {
        self.pos = center;
        let dir = if rng.0.gen_bool(0.5) { 1.0 } else { -1.0 };
        let spread = rng.0.gen_range(-Params::SERVE_SPREAD..=Params::SERVE_SPREAD);
        self.vel = Vec2::new(speed * dir, speed * spread);
    }

    /// Apply a modifier, replacing whichever one was active
    pub fn set_modifier(&mut self, modifier: BallModifier, now: f32, duration: f32) {
        self.modifier = modifier;
        self.modifier_expires_at = now + duration;
        self.ghost_visible = true;
    }

    pub fn clear_modifier(&mut self) {
        self.modifier = BallModifier::None;
        self.modifier_expires_at = 0.0;
        self.ghost_visible = true;
    }

    /// Advance one tick: expire modifiers, integrate, bounce off the
    /// top and bottom walls. Returns true if a wall was hit.
    pub fn update(&mut self, now: f32, config: &Config) -> bool {
        if self.modifier != BallModifier::None && now >= self.modifier_expires_at {
            debug!(modifier = ?self.modifier, "ball modifier expired");
            self.clear_modifier();
        }

        self.pos += self.vel;
        if !self.pos.is_finite() || !self.vel.is_finite() {
            self.pos = config.center();
            self.vel = Vec2::new(config.ball_start_speed, 0.0);
        }

        let mut hit_wall = false;
        if self.pos.y <= 0.0 {
            self.pos.y = 1.0;
            self.vel.y = self.vel.y.abs();
            hit_wall = true;
        } else if self.pos.y >= config.arena_height {
            self.pos.y = config.arena_height - 1.0;
            self.vel.y = -self.vel.y.abs();
            hit_wall = true;
        }

        self.ghost_visible = match self.modifier {
            BallModifier::Ghost => ((now * Params::GHOST_FLICKER_HZ) as i64) % 2 == 0,
            BallModifier::None | BallModifier::Tiny => true,
        };

        hit_wall
    }

    /// Radius used for collision and drawing
    pub fn effective_radius(&self) -> f32 {
        match self.modifier {
            BallModifier::Tiny => self.radius / 2.0,
            BallModifier::None | BallModifier::Ghost => self.radius,
        }
    }

    /// True during the invisible half of a ghost flicker
    pub fn is_hidden(&self) -> bool {
        self.modifier == BallModifier::Ghost && !self.ghost_visible
    }

    pub fn rect(&self) -> Aabb {
        Aabb::from_center_size(self.pos, Vec2::splat(self.effective_radius() * 2.0))
    }

    /// Send the ball back from `paddle` at `speed`, with an angle proportional
    /// to how far from the paddle center it struck. Returns the contact burst.
    pub fn reflect_off(&mut self, paddle: &Paddle, speed: f32, max_angle_deg: f32) -> ParticleBurst {
        let half = (paddle.height / 2.0).max(f32::EPSILON);
        let offset = ((self.pos.y - paddle.center_y()) / half).clamp(-1.0, 1.0);
        let angle = (offset * max_angle_deg).to_radians();
        let dir = paddle.side.outward();

        self.vel = Vec2::new(speed * angle.cos() * dir, speed * angle.sin());
        // Never let the ball keep heading into the paddle it just hit
        if self.vel.x.signum() != dir {
            self.vel.x = -self.vel.x;
        }

        ParticleBurst::new(
            Vec2::new(paddle.face_x(), self.pos.y),
            paddle.side.color(),
            Params::COLLISION_PARTICLES,
        )
    }
}

/// Cosmetic particle
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32, // 1.0 = fully opaque, culled at <= 0
    pub color: [u8; 3],
    pub size: u8,
}

impl Particle {
    /// Advance one tick. Returns false once the particle has faded out.
    pub fn tick(&mut self) -> bool {
        self.pos += self.vel;
        self.life -= Params::PARTICLE_DECAY;
        self.life > 0.0
    }
}

/// Request to spawn a group of particles, returned by entity methods to the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleBurst {
    pub origin: Vec2,
    pub color: [u8; 3],
    pub count: usize,
    pub speed_scale: f32,
    pub size_range: (u8, u8),
}

impl ParticleBurst {
    pub fn new(origin: Vec2, color: [u8; 3], count: usize) -> Self {
        Self {
            origin,
            color,
            count,
            speed_scale: 1.0,
            size_range: (2, 6),
        }
    }

    /// Celebration burst for a math task winner
    pub fn fireworks(origin: Vec2) -> Self {
        Self {
            origin,
            color: Params::COLOR_GOLD,
            count: Params::FIREWORK_PARTICLES,
            speed_scale: Params::FIREWORK_SPEED_SCALE,
            size_range: (4, 9),
        }
    }

    pub fn spawn(&self, rng: &mut GameRng) -> Vec<Particle> {
        let s = Params::PARTICLE_SPEED;
        (0..self.count)
            .map(|_| Particle {
                pos: self.origin,
                vel: Vec2::new(rng.0.gen_range(-s..=s), rng.0.gen_range(-s..=s)) * self.speed_scale,
                life: 1.0,
                color: self.color,
                size: rng.0.gen_range(self.size_range.0..=self.size_range.1),
            })
            .collect()
    }
}
