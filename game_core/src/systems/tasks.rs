use glam::Vec2;
use tracing::debug;

use crate::powerup::{Effect, Powerup};
use crate::{
    Ball, Config, Events, GameMode, GameRng, Gesture, MathOutcome, MathTask, Paddle, ParticleBurst, Side,
};

/// Per-tick math task driver. Spawns a task once the interval has passed
/// with none running, then checks answers and the deadline. Returns how
/// the task ended, if it ended this tick.
///
/// The hand gesture always answers for the left player. In PvP a digit key
/// answers for the right player; in bot mode an expired task goes to the bot.
#[allow(clippy::too_many_arguments)]
pub fn drive_math_task(
    task: &mut MathTask,
    last_task_time: &mut f32,
    now: f32,
    interval: f32,
    gesture: Gesture,
    keyboard_answer: Option<u8>,
    mode: GameMode,
    rng: &mut GameRng,
    events: &mut Events,
) -> Option<MathOutcome> {
    if !task.active {
        if now - *last_task_time > interval && task.generate(now, rng) {
            *last_task_time = now;
            events.task_started = true;
        }
        return None;
    }

    let outcome = if gesture.digit().is_some_and(|d| task.check_answer(d)) {
        MathOutcome::Won(Side::Left)
    } else if mode.is_pvp() && keyboard_answer.is_some_and(|d| task.check_answer(d)) {
        MathOutcome::Won(Side::Right)
    } else if task.time_left(now) <= 0.0 {
        if mode.is_pvp() {
            MathOutcome::Expired
        } else {
            MathOutcome::Won(Side::Right)
        }
    } else {
        return None;
    };

    task.deactivate();
    events.math = Some(outcome);
    debug!(?outcome, equation = %task.equation, "math task resolved");
    Some(outcome)
}

/// A powerup handed to a math task winner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Award {
    pub powerup: Powerup,
    pub effect: Effect,
    pub fireworks: ParticleBurst,
}

/// Roll a random powerup for `winner` and apply it. Paddle effects replace
/// whatever the target paddle had; ball effects go straight to the ball.
pub fn award_powerup(
    winner: Side,
    left: &mut Paddle,
    right: &mut Paddle,
    ball: &mut Ball,
    now: f32,
    config: &Config,
    rng: &mut GameRng,
) -> Award {
    let powerup = Powerup::random(rng);
    let effect = powerup.effect(winner);

    match effect {
        Effect::Paddle { side, powerup } => {
            let paddle = match side {
                Side::Left => left,
                Side::Right => right,
            };
            paddle.apply_powerup(powerup, now, config);
        }
        Effect::Ball(modifier) => ball.set_modifier(modifier, now, config.powerup_duration),
    }
    debug!(?winner, powerup = powerup.label(), "powerup awarded");

    Award {
        powerup,
        effect,
        fireworks: ParticleBurst::fireworks(fireworks_origin(winner, config)),
    }
}

/// Center of the winner's half
fn fireworks_origin(winner: Side, config: &Config) -> Vec2 {
    let x = match winner {
        Side::Left => config.arena_width / 4.0,
        Side::Right => config.arena_width * 3.0 / 4.0,
    };
    Vec2::new(x, config.arena_height / 2.0)
}
