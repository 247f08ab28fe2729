use crate::arena::map_angle_to_paddle_y;
use crate::{Ball, Config, Paddle, PaddleIntent};

/// Place the hand-driven paddle straight at the mapped angle, no smoothing
pub fn move_player(paddle: &mut Paddle, angle: f32, config: &Config) {
    let target_y = map_angle_to_paddle_y(
        angle,
        config.arena_height,
        paddle.height,
        config.angle_up,
        config.angle_down,
    );
    paddle.move_to(target_y, config);
}

/// Apply keyboard intent to the second player's paddle
pub fn move_keyboard(paddle: &mut Paddle, intent: PaddleIntent, dt: f32, config: &Config) {
    if intent.dir != 0 {
        let delta = intent.dir.signum() as f32 * config.keyboard_speed * dt;
        paddle.move_to(paddle.y + delta, config);
    } else {
        paddle.move_to(paddle.y, config);
    }
}

/// Bot tracking: close a fixed fraction of the gap to the ball each tick.
/// The bot holds still while a ghost ball is hidden.
pub fn move_bot(paddle: &mut Paddle, ball: &Ball, lerp_factor: f32, config: &Config) {
    if ball.is_hidden() {
        return;
    }
    let target_y = ball.pos.y - paddle.height / 2.0;
    paddle.lerp_to(target_y, lerp_factor, config);
}
