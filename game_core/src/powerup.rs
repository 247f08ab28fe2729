use rand::seq::SliceRandom;
use serde::Serialize;

use crate::components::{BallModifier, PaddlePowerup};
use crate::resources::GameRng;
use crate::Side;

/// Reward for winning a math task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Powerup {
    Enlarge,
    Trampoline,
    Agility,
    Shrink,
    TinyBall,
    GhostBall,
}

/// What a powerup acts on once awarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Paddle { side: Side, powerup: PaddlePowerup },
    Ball(BallModifier),
}

impl Powerup {
    pub const ROSTER: [Powerup; 6] = [
        Powerup::Enlarge,
        Powerup::Trampoline,
        Powerup::Agility,
        Powerup::Shrink,
        Powerup::TinyBall,
        Powerup::GhostBall,
    ];

    /// Uniform pick from the roster
    pub fn random(rng: &mut GameRng) -> Powerup {
        *Self::ROSTER
            .choose(&mut rng.0)
            .unwrap_or(&Powerup::Enlarge)
    }

    pub fn label(self) -> &'static str {
        match self {
            Powerup::Enlarge => "ENLARGE",
            Powerup::Trampoline => "TRAMPOLINE",
            Powerup::Agility => "AGILITY",
            Powerup::Shrink => "SHRINK",
            Powerup::TinyBall => "TINY BALL",
            Powerup::GhostBall => "GHOST BALL",
        }
    }

    /// Bind the effect to its target. Buffs go to the winner, shrink to the
    /// loser, ball modifiers to the ball.
    pub fn effect(self, winner: Side) -> Effect {
        match self {
            Powerup::Enlarge => Effect::Paddle {
                side: winner,
                powerup: PaddlePowerup::Enlarge,
            },
            Powerup::Trampoline => Effect::Paddle {
                side: winner,
                powerup: PaddlePowerup::Trampoline,
            },
            Powerup::Agility => Effect::Paddle {
                side: winner,
                powerup: PaddlePowerup::Agility,
            },
            Powerup::Shrink => Effect::Paddle {
                side: winner.opponent(),
                powerup: PaddlePowerup::Shrink,
            },
            Powerup::TinyBall => Effect::Ball(BallModifier::Tiny),
            Powerup::GhostBall => Effect::Ball(BallModifier::Ghost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shrink_targets_loser() {
        assert_eq!(
            Powerup::Shrink.effect(Side::Left),
            Effect::Paddle {
                side: Side::Right,
                powerup: PaddlePowerup::Shrink
            }
        );
        assert_eq!(
            Powerup::Enlarge.effect(Side::Right),
            Effect::Paddle {
                side: Side::Right,
                powerup: PaddlePowerup::Enlarge
            }
        );
    }

    #[test]
    fn test_ball_effects_skip_paddles() {
        assert_eq!(
            Powerup::GhostBall.effect(Side::Left),
            Effect::Ball(BallModifier::Ghost)
        );
        assert_eq!(
            Powerup::TinyBall.effect(Side::Right),
            Effect::Ball(BallModifier::Tiny)
        );
    }

    #[test]
    fn test_random_covers_roster() {
        let mut rng = GameRng::new(99);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(Powerup::random(&mut rng).label());
        }
        assert_eq!(seen.len(), Powerup::ROSTER.len());
    }
}
