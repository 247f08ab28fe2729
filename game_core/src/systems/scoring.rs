use std::cmp::Ordering;

use tracing::debug;

use crate::arena::goal_crossed;
use crate::{Ball, Config, Events, GameRng, Paddle, Rally, Side};

/// Check if the ball left the arena. The scorer gets a point and the ball
/// is served again from the center at the current base speed.
pub fn check_scoring(
    left: &mut Paddle,
    right: &mut Paddle,
    ball: &mut Ball,
    rally: &Rally,
    config: &Config,
    events: &mut Events,
    rng: &mut GameRng,
) -> Option<Side> {
    let scorer = goal_crossed(ball.pos.x, config)?.opponent();

    let paddle = match scorer {
        Side::Left => left,
        Side::Right => right,
    };
    paddle.score += 1;
    events.scored(scorer);
    debug!(?scorer, score = paddle.score, "point scored");

    ball.reset(rally.base_speed, config.center(), rng);
    Some(scorer)
}

/// Winner after a point, if the match is decided. In sudden death the
/// scorer wins outright.
pub fn match_winner(
    left_score: u32,
    right_score: u32,
    win_score: u32,
    sudden_death: bool,
    scorer: Option<Side>,
) -> Option<Side> {
    if sudden_death {
        if let Some(side) = scorer {
            return Some(side);
        }
    }
    if left_score >= win_score || right_score >= win_score {
        return Some(if left_score > right_score {
            Side::Left
        } else {
            Side::Right
        });
    }
    None
}

/// Leader when the clock runs out; None on a tie
pub fn leader(left_score: u32, right_score: u32) -> Option<Side> {
    match left_score.cmp(&right_score) {
        Ordering::Greater => Some(Side::Left),
        Ordering::Less => Some(Side::Right),
        Ordering::Equal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn setup() -> (Config, Paddle, Paddle, Ball, Rally, Events, GameRng) {
        let config = Config::new();
        (
            config.clone(),
            Paddle::new(Side::Left, &config),
            Paddle::new(Side::Right, &config),
            Ball::new(&config),
            Rally::new(config.ball_start_speed),
            Events::new(),
            GameRng::new(12345), // Fixed seed for deterministic tests
        )
    }

    #[test]
    fn test_right_player_scores_when_ball_exits_left() {
        let (config, mut left, mut right, mut ball, rally, mut events, mut rng) = setup();
        ball.pos = Vec2::new(-25.0, 300.0);
        ball.vel = Vec2::new(-15.0, 0.0);

        let scorer = check_scoring(&mut left, &mut right, &mut ball, &rally, &config, &mut events, &mut rng);

        assert_eq!(scorer, Some(Side::Right));
        assert_eq!(right.score, 1, "Right player should score");
        assert_eq!(left.score, 0, "Left player should not score");
        assert!(events.right_scored, "Should trigger right_scored event");
    }

    #[test]
    fn test_left_player_scores_when_ball_exits_right() {
        let (config, mut left, mut right, mut ball, rally, mut events, mut rng) = setup();
        ball.pos = Vec2::new(config.arena_width + 25.0, 300.0);

        let scorer = check_scoring(&mut left, &mut right, &mut ball, &rally, &config, &mut events, &mut rng);

        assert_eq!(scorer, Some(Side::Left));
        assert_eq!(left.score, 1);
        assert!(events.left_scored);
    }

    #[test]
    fn test_ball_inside_margin_does_not_score() {
        let (config, mut left, mut right, mut ball, rally, mut events, mut rng) = setup();
        ball.pos = Vec2::new(-10.0, 300.0);

        assert_eq!(
            check_scoring(&mut left, &mut right, &mut ball, &rally, &config, &mut events, &mut rng),
            None
        );
        assert_eq!(ball.pos.x, -10.0);
    }

    #[test]
    fn test_ball_resets_after_scoring() {
        let (config, mut left, mut right, mut ball, mut rally, mut events, mut rng) = setup();
        rally.base_speed = 21.0;
        ball.pos = Vec2::new(-30.0, 12.0);

        check_scoring(&mut left, &mut right, &mut ball, &rally, &config, &mut events, &mut rng);

        assert_eq!(ball.pos, config.center(), "Ball should be back at center");
        assert_eq!(ball.vel.x.abs(), 21.0, "Serve uses the current base speed");
    }

    #[test]
    fn test_match_winner() {
        assert_eq!(match_winner(4, 3, 5, false, Some(Side::Left)), None);
        assert_eq!(match_winner(5, 3, 5, false, Some(Side::Left)), Some(Side::Left));
        assert_eq!(match_winner(2, 5, 5, false, Some(Side::Right)), Some(Side::Right));
        assert_eq!(match_winner(3, 4, 5, true, Some(Side::Right)), Some(Side::Right));
        assert_eq!(match_winner(3, 3, 5, true, None), None);
    }

    #[test]
    fn test_leader() {
        assert_eq!(leader(2, 1), Some(Side::Left));
        assert_eq!(leader(0, 4), Some(Side::Right));
        assert_eq!(leader(3, 3), None);
    }
}
