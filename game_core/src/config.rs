use crate::params::Params;
use crate::Side;
use thiserror::Error;

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("win score must be at least 1")]
    ZeroWinScore,
    #[error("hits per level must be at least 1")]
    ZeroHitsPerLevel,
    #[error("paddle height {paddle} does not fit the arena height {arena}")]
    PaddleTooTall { paddle: f32, arena: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
}

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub arena_width: f32,
    pub arena_height: f32,
    pub paddle_inset: f32,
    pub score_margin: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub keyboard_speed: f32,
    pub angle_up: f32,
    pub angle_down: f32,
    pub ball_radius: f32,
    pub ball_start_speed: f32,
    pub ball_max_speed: f32,
    pub max_bounce_angle: f32,
    pub trampoline_boost: f32,
    pub hits_per_level: u32,
    pub speed_increment_per_level: f32,
    pub win_score: u32,
    pub time_limit: f32,
    pub math_task_duration: f32,
    pub math_task_interval: f32,
    pub powerup_duration: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: Params::ARENA_WIDTH,
            arena_height: Params::ARENA_HEIGHT,
            paddle_inset: Params::PADDLE_INSET,
            score_margin: Params::SCORE_MARGIN,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            keyboard_speed: Params::KEYBOARD_SPEED,
            angle_up: Params::PADDLE_ANGLE_UP,
            angle_down: Params::PADDLE_ANGLE_DOWN,
            ball_radius: Params::BALL_RADIUS,
            ball_start_speed: Params::BALL_START_SPEED,
            ball_max_speed: Params::BALL_MAX_SPEED,
            max_bounce_angle: Params::MAX_BOUNCE_ANGLE,
            trampoline_boost: Params::TRAMPOLINE_BOOST,
            hits_per_level: Params::HITS_PER_LEVEL,
            speed_increment_per_level: Params::SPEED_INCREMENT_PER_LEVEL,
            win_score: Params::WIN_SCORE,
            time_limit: Params::TIME_LIMIT,
            math_task_duration: Params::MATH_TASK_DURATION,
            math_task_interval: Params::MATH_TASK_INTERVAL,
            powerup_duration: Params::POWERUP_DURATION,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that the values describe a playable match
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.win_score == 0 {
            return Err(ConfigError::ZeroWinScore);
        }
        if self.hits_per_level == 0 {
            return Err(ConfigError::ZeroHitsPerLevel);
        }
        let positives = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("paddle_height", self.paddle_height),
            ("ball_start_speed", self.ball_start_speed),
            ("ball_max_speed", self.ball_max_speed),
            ("time_limit", self.time_limit),
            ("math_task_duration", self.math_task_duration),
            ("powerup_duration", self.powerup_duration),
        ];
        for (name, value) in positives {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        // Enlarge must still fit
        if self.paddle_height * Params::ENLARGE_FACTOR > self.arena_height {
            return Err(ConfigError::PaddleTooTall {
                paddle: self.paddle_height * Params::ENLARGE_FACTOR,
                arena: self.arena_height,
            });
        }
        Ok(())
    }

    /// Get X position (left edge) for a paddle
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_inset,
            Side::Right => self.arena_width - self.paddle_inset - self.paddle_width,
        }
    }

    /// Clamp a paddle's top edge to arena bounds
    pub fn clamp_paddle_y(&self, y: f32, paddle_height: f32) -> f32 {
        let max_y = (self.arena_height - paddle_height).max(0.0);
        if y.is_nan() {
            return max_y / 2.0;
        }
        y.clamp(0.0, max_y)
    }

    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paddle_x() {
        let config = Config::new();
        assert_eq!(config.paddle_x(Side::Left), 30.0, "Left paddle X position");
        assert_eq!(
            config.paddle_x(Side::Right),
            1200.0 - 30.0 - 25.0,
            "Right paddle X position"
        );
    }

    #[test]
    fn test_config_clamp_paddle_y() {
        let config = Config::new();
        let h = config.paddle_height;
        assert_eq!(config.clamp_paddle_y(-50.0, h), 0.0);
        assert_eq!(config.clamp_paddle_y(5000.0, h), config.arena_height - h);
        assert_eq!(config.clamp_paddle_y(300.0, h), 300.0);
        assert_eq!(config.clamp_paddle_y(f32::NAN, h), (config.arena_height - h) / 2.0);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(Config::new().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::new();
        config.win_score = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroWinScore));

        let mut config = Config::new();
        config.hits_per_level = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroHitsPerLevel));

        let mut config = Config::new();
        config.paddle_height = 800.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaddleTooTall { .. })
        ));

        let mut config = Config::new();
        config.time_limit = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "time_limit", .. })
        ));
    }
}
