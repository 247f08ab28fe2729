use glam::Vec2;

use crate::{Config, Side};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Overlap test; touching edges do not count
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Side whose goal line the ball has crossed, if any.
/// The ball has to travel `score_margin` past the edge first.
pub fn goal_crossed(ball_x: f32, config: &Config) -> Option<Side> {
    if ball_x < -config.score_margin {
        Some(Side::Left)
    } else if ball_x > config.arena_width + config.score_margin {
        Some(Side::Right)
    } else {
        None
    }
}

/// Map a hand angle to the paddle's top edge via clamped linear interpolation
/// between `angle_up` (top of the arena) and `angle_down` (bottom).
///
/// Input is wrapped into [0, 360). The result always lies in
/// `[0, arena_height - paddle_height]`; non-finite angles and equal
/// thresholds map to the middle.
pub fn map_angle_to_paddle_y(
    angle_deg: f32,
    arena_height: f32,
    paddle_height: f32,
    angle_up: f32,
    angle_down: f32,
) -> f32 {
    let max_y = (arena_height - paddle_height).max(0.0);
    let span = angle_down - angle_up;
    if !angle_deg.is_finite() || !span.is_finite() || span == 0.0 {
        return max_y * 0.5;
    }

    let angle = angle_deg.rem_euclid(360.0);
    let progress = ((angle - angle_up) / span).clamp(0.0, 1.0);
    progress * max_y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::from_center_size(Vec2::new(12.0, 5.0), Vec2::splat(6.0));
        let c = Aabb::from_center_size(Vec2::new(20.0, 5.0), Vec2::splat(6.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        let touching = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(12.0, 10.0));
        assert!(!a.intersects(&touching), "Shared edge is not an overlap");
    }

    #[test]
    fn test_goal_crossed() {
        let config = Config::new();
        assert_eq!(goal_crossed(-20.5, &config), Some(Side::Left));
        assert_eq!(goal_crossed(-5.0, &config), None);
        assert_eq!(goal_crossed(config.arena_width + 21.0, &config), Some(Side::Right));
        assert_eq!(goal_crossed(600.0, &config), None);
    }

    #[test]
    fn test_angle_mapping_endpoints() {
        let max_y = 900.0 - 140.0;
        assert_eq!(map_angle_to_paddle_y(100.0, 900.0, 140.0, 100.0, 250.0), 0.0);
        assert_eq!(map_angle_to_paddle_y(250.0, 900.0, 140.0, 100.0, 250.0), max_y);
        assert_eq!(map_angle_to_paddle_y(175.0, 900.0, 140.0, 100.0, 250.0), max_y / 2.0);
    }

    #[test]
    fn test_angle_mapping_is_always_clamped() {
        let max_y = 900.0 - 140.0;
        for angle in [-1.0e9, -720.0, -1.0, 0.0, 50.0, 99.0, 251.0, 359.9, 360.0, 1.0e9] {
            let y = map_angle_to_paddle_y(angle, 900.0, 140.0, 100.0, 250.0);
            assert!((0.0..=max_y).contains(&y), "angle {} mapped to {}", angle, y);
        }
        for angle in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let y = map_angle_to_paddle_y(angle, 900.0, 140.0, 100.0, 250.0);
            assert_eq!(y, max_y / 2.0);
        }
    }

    #[test]
    fn test_angle_mapping_wraps_and_inverts() {
        // 460 wraps to 100
        assert_eq!(map_angle_to_paddle_y(460.0, 900.0, 140.0, 100.0, 250.0), 0.0);
        // Inverted thresholds flip the direction
        assert_eq!(map_angle_to_paddle_y(250.0, 900.0, 140.0, 250.0, 100.0), 0.0);
        // Degenerate thresholds
        assert_eq!(map_angle_to_paddle_y(10.0, 900.0, 140.0, 100.0, 100.0), 380.0);
    }
}
