use glam::Vec2;

use crate::landmarks::Hand;

/// Angle of the vector `from -> to` in degrees, in [0, 360).
///
/// Image y grows downwards, so it is flipped to get the usual
/// counter-clockwise convention: straight right is 0, straight up is 90.
pub fn calculate_angle(from: Vec2, to: Vec2) -> f32 {
    let dx = to.x - from.x;
    let dy = -(to.y - from.y);
    let deg = dy.atan2(dx).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if deg >= 360.0 {
        0.0
    } else {
        deg
    }
}

/// Pivot the hand angle is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorPoint {
    Landmark(usize),
    /// Midpoint of two landmarks
    Midpoint(usize, usize),
}

impl AnchorPoint {
    pub fn resolve(self, hand: &Hand) -> Vec2 {
        match self {
            AnchorPoint::Landmark(i) => hand.point(i),
            AnchorPoint::Midpoint(a, b) => hand.midpoint(a, b),
        }
    }
}

/// Raw control angle of `hand`: anchor to target landmark
pub fn hand_angle(hand: &Hand, anchor: AnchorPoint, target: usize) -> f32 {
    calculate_angle(anchor.resolve(hand), hand.point(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{fixtures, Handedness, INDEX_MCP, INDEX_PIP, THUMB_TIP};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_cardinal_directions() {
        let o = Vec2::new(0.5, 0.5);
        assert!(approx(calculate_angle(o, Vec2::new(0.6, 0.5)), 0.0));
        assert!(approx(calculate_angle(o, Vec2::new(0.5, 0.4)), 90.0), "Up is 90");
        assert!(approx(calculate_angle(o, Vec2::new(0.4, 0.5)), 180.0));
        assert!(approx(calculate_angle(o, Vec2::new(0.5, 0.6)), 270.0), "Down is 270");
    }

    #[test]
    fn test_angle_range() {
        let o = Vec2::ZERO;
        for i in 0..360 {
            let rad = (i as f32).to_radians();
            let angle = calculate_angle(o, Vec2::new(rad.cos(), -rad.sin()));
            assert!((0.0..360.0).contains(&angle), "{} -> {}", i, angle);
        }
        assert_eq!(calculate_angle(o, o), 0.0);
    }

    #[test]
    fn test_hand_angle_uses_anchor_midpoint() {
        for deg in [30.0, 140.0, 225.0] {
            let hand = fixtures::pointing(deg, Handedness::Right);
            let angle = hand_angle(&hand, AnchorPoint::Midpoint(INDEX_MCP, INDEX_PIP), THUMB_TIP);
            assert!(approx(angle, deg), "expected {} got {}", deg, angle);
        }
    }
}
