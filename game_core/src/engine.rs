//! Match engine
//!
//! Owns the paddles, the ball, the math task and the particle world, and
//! advances them one tick at a time while the phase machine says `Playing`.
//! Time is the engine's own clock: it only moves while a match is running,
//! so pauses do not eat into the time limit or any powerup timer.

use hecs::World;
use tracing::{debug, info, trace};

use crate::fsm::{Action, GameMode, Phase, PhaseFsm, TransitionResult};
use crate::powerup::Effect;
use crate::snapshot::{format_clock, BallView, MathView, PaddleView, Snapshot};
use crate::systems::*;
use crate::{
    Ball, BallModifier, Config, ConfigError, Difficulty, Events, GameRng, MathOutcome, MathTask, Paddle,
    Params, Particle, Rally, Side, TickInput, Time,
};

pub struct GameEngine {
    config: Config,
    fsm: PhaseFsm,
    mode: GameMode,
    time: Time,
    left: Paddle,
    right: Paddle,
    ball: Ball,
    rally: Rally,
    math: MathTask,
    last_task_time: f32,
    sudden_death: bool,
    winner: Option<Side>,
    /// Side credited with the running ball modifier, for display
    ball_effect_owner: Option<Side>,
    particles: World,
    events: Events,
    rng: GameRng,
}

impl GameEngine {
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let left = Paddle::new(Side::Left, &config);
        let right = Paddle::new(Side::Right, &config);
        let ball = Ball::new(&config);

        Ok(Self {
            fsm: PhaseFsm::new(),
            mode: GameMode::Bot(Difficulty::default()),
            time: Time::new(0.0, 0.0),
            left,
            right,
            ball,
            rally: Rally::new(config.ball_start_speed),
            math: MathTask::new(config.math_task_duration),
            last_task_time: 0.0,
            sudden_death: false,
            winner: None,
            ball_effect_owner: None,
            particles: World::new(),
            events: Events::new(),
            rng: GameRng::new(seed),
            config,
        })
    }

    pub fn phase(&self) -> Phase {
        self.fsm.phase()
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Events raised by the last `update`
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Direct ball access for scripted scenarios
    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    pub fn math_task(&self) -> &MathTask {
        &self.math
    }

    pub fn rally(&self) -> &Rally {
        &self.rally
    }

    /// Match clock in seconds
    pub fn elapsed(&self) -> f32 {
        self.time.now
    }

    pub fn is_sudden_death(&self) -> bool {
        self.sudden_death
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// "PLAYER 1 WINS" / "PLAYER 2 WINS" once the match is decided
    pub fn winner_text(&self) -> Option<String> {
        self.winner.map(|side| format!("{} WINS", side.label()))
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len() as usize
    }

    /// Drive the phase machine. Starting or restarting a match resets all
    /// match state; every other action only changes the phase.
    pub fn apply(&mut self, action: Action) -> TransitionResult {
        let result = self.fsm.transition(action);
        if !result.success {
            debug!(?action, phase = ?result.from, "transition rejected");
            return result;
        }
        info!(from = ?result.from, to = ?result.to, ?action, "phase transition");

        match action {
            Action::StartBot(difficulty) => self.start_match(GameMode::Bot(difficulty)),
            Action::StartPvp => self.start_match(GameMode::Pvp),
            Action::Restart => self.start_match(self.mode),
            _ => {}
        }
        result
    }

    /// Start a match from the main or difficulty menu
    pub fn start_game(&mut self, mode: GameMode) -> TransitionResult {
        match mode {
            GameMode::Pvp => self.apply(Action::StartPvp),
            GameMode::Bot(difficulty) => {
                if self.phase() == Phase::Menu {
                    self.apply(Action::ChooseBot);
                }
                self.apply(Action::StartBot(difficulty))
            }
        }
    }

    fn start_match(&mut self, mode: GameMode) {
        self.mode = mode;
        self.time = Time::new(0.0, 0.0);
        self.left.reset(&self.config);
        self.right.reset(&self.config);
        self.ball.clear_modifier();
        self.rally = Rally::new(self.config.ball_start_speed);
        self.ball.reset(self.rally.base_speed, self.config.center(), &mut self.rng);
        self.particles.clear();
        self.math.reset();
        self.last_task_time = 0.0;
        self.sudden_death = false;
        self.winner = None;
        self.ball_effect_owner = None;
        self.events.clear();
        info!(?mode, "match started");
    }

    /// Advance one tick. Does nothing unless a match is being played.
    pub fn update(&mut self, input: &TickInput, dt: f32) -> &Events {
        self.events.clear();
        if !self.fsm.is_playing() {
            return &self.events;
        }

        let dt = if dt.is_finite() { dt.clamp(0.0, Params::MAX_DT) } else { 0.0 };
        self.time.advance(dt);
        let now = self.time.now;

        // 1. Time limit
        if now >= self.config.time_limit && !self.sudden_death {
            match leader(self.left.score, self.right.score) {
                Some(side) => {
                    self.finish(side);
                    return &self.events;
                }
                None => {
                    self.sudden_death = true;
                    info!(score = self.left.score, "time up on a tie, sudden death");
                }
            }
        }

        // 2. Pause pose
        if input.pause_progress >= 1.0 {
            self.apply(Action::Pause);
            return &self.events;
        }

        // 3-4. Paddles
        move_player(&mut self.left, input.angle, &self.config);
        match self.mode {
            GameMode::Pvp => move_keyboard(&mut self.right, input.opponent, self.time.dt, &self.config),
            GameMode::Bot(difficulty) => {
                move_bot(&mut self.right, &self.ball, difficulty.lerp_factor(), &self.config)
            }
        }

        // 5. Timers and integration
        self.left.update(now, &self.config);
        self.right.update(now, &self.config);
        if self.ball.update(now, &self.config) {
            self.events.ball_hit_wall = true;
        }
        if self.ball.modifier == BallModifier::None {
            self.ball_effect_owner = None;
        }

        // 6. Paddle contact
        let mut bursts = check_collisions(
            &self.left,
            &self.right,
            &mut self.ball,
            &mut self.rally,
            &self.config,
            &mut self.events,
        );

        // 7. Goals
        let scorer = check_scoring(
            &mut self.left,
            &mut self.right,
            &mut self.ball,
            &self.rally,
            &self.config,
            &mut self.events,
            &mut self.rng,
        );
        if scorer.is_some() {
            if let Some(side) = match_winner(
                self.left.score,
                self.right.score,
                self.config.win_score,
                self.sudden_death,
                scorer,
            ) {
                self.finish(side);
            }
        }

        // 8. Math task
        if self.fsm.is_playing() {
            let outcome = drive_math_task(
                &mut self.math,
                &mut self.last_task_time,
                now,
                self.config.math_task_interval,
                input.gesture,
                input.opponent.answer,
                self.mode,
                &mut self.rng,
                &mut self.events,
            );
            if let Some(MathOutcome::Won(winner)) = outcome {
                let award = award_powerup(
                    winner,
                    &mut self.left,
                    &mut self.right,
                    &mut self.ball,
                    now,
                    &self.config,
                    &mut self.rng,
                );
                if let Effect::Ball(_) = award.effect {
                    self.ball_effect_owner = Some(winner);
                }
                self.events.powerup = Some((winner, award.powerup));
                bursts.push(award.fireworks);
            }
        }

        // 9. Particles
        for burst in &bursts {
            spawn_particles(&mut self.particles, burst, &mut self.rng);
        }
        update_particles(&mut self.particles);

        trace!(
            now,
            ball_x = self.ball.pos.x,
            ball_y = self.ball.pos.y,
            particles = self.particles.len(),
            "tick"
        );
        &self.events
    }

    fn finish(&mut self, winner: Side) {
        self.winner = Some(winner);
        self.math.deactivate();
        self.apply(Action::MatchOver);
        info!(
            ?winner,
            left = self.left.score,
            right = self.right.score,
            "match over"
        );
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        let now = self.time.now;
        let credited = |side: Side| {
            (self.ball_effect_owner == Some(side) && self.ball.modifier != BallModifier::None)
                .then_some((self.ball.modifier, self.ball.modifier_expires_at))
        };

        Snapshot {
            phase: self.phase(),
            mode: self.mode,
            arena: [self.config.arena_width, self.config.arena_height],
            clock: format_clock(now, self.sudden_death),
            level: self.rally.level,
            left: PaddleView::new(&self.left, credited(Side::Left), now),
            right: PaddleView::new(&self.right, credited(Side::Right), now),
            ball: BallView::from(&self.ball),
            math: self.math.active.then(|| MathView {
                equation: self.math.equation.clone(),
                time_left: self.math.time_left(now).max(0.0),
                progress: self.math.progress(now),
            }),
            particles: self
                .particles
                .query::<&Particle>()
                .iter()
                .map(|(_e, p)| *p)
                .collect(),
            winner_text: self.winner_text(),
        }
    }
}
