use tracing::debug;

use crate::{Ball, Config, Events, Paddle, ParticleBurst, Rally};

/// Resolve ball vs paddle contact. Only the paddle the ball is travelling
/// towards can return it, which rules out double bounces. Returns the
/// particle bursts to spawn.
pub fn check_collisions(
    left: &Paddle,
    right: &Paddle,
    ball: &mut Ball,
    rally: &mut Rally,
    config: &Config,
    events: &mut Events,
) -> Vec<ParticleBurst> {
    let ball_rect = ball.rect();

    let paddle = if ball.vel.x < 0.0 && ball_rect.intersects(&left.rect()) {
        left
    } else if ball.vel.x > 0.0 && ball_rect.intersects(&right.rect()) {
        right
    } else {
        return Vec::new();
    };

    if rally.register_hit(config) {
        events.level_up = true;
        debug!(level = rally.level, speed = rally.base_speed, "level up");
    }

    let speed = rally.return_speed(paddle.is_trampoline(), config);
    let mut bursts = vec![ball.reflect_off(paddle, speed, config.max_bounce_angle)];
    bursts.extend(paddle.trampoline_burst());
    events.ball_hit_paddle = true;

    bursts
}
