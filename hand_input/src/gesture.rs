//! Gesture classification from hand landmarks.
//!
//! One hand gives a finger count (0-5). Two hands crossed at the index
//! fingertips give the pause pose.

use game_core::Gesture;

use crate::landmarks::*;

const FINGERS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

/// Horizontal thumb-to-wrist distance that counts as an extended thumb
pub const THUMB_SPREAD: f32 = 0.1;

/// Thresholds for the two-handed pause pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XPose {
    /// Index fingertips closer than this
    pub max_tip_distance: f32,
    /// Wrists further apart than this
    pub min_wrist_distance: f32,
}

impl Default for XPose {
    fn default() -> Self {
        Self {
            max_tip_distance: 0.15,
            min_wrist_distance: 0.20,
        }
    }
}

impl XPose {
    pub fn matches(&self, a: &Hand, b: &Hand) -> bool {
        let tips = a.point(INDEX_TIP).distance(b.point(INDEX_TIP));
        let wrists = a.point(WRIST).distance(b.point(WRIST));
        tips < self.max_tip_distance && wrists > self.min_wrist_distance
    }
}

/// Number of raised fingers. A finger is up when its tip sits above its
/// middle knuckle; the thumb is up when it sticks out sideways from the wrist.
pub fn count_fingers(hand: &Hand) -> u8 {
    let fingers = FINGERS
        .iter()
        .filter(|(tip, pip)| hand.point(*tip).y < hand.point(*pip).y)
        .count() as u8;
    let thumb = (hand.point(THUMB_TIP).x - hand.point(WRIST).x).abs() > THUMB_SPREAD;
    fingers + u8::from(thumb)
}

pub fn classify(hand: &Hand) -> Gesture {
    Gesture::Digit(count_fingers(hand))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::fixtures;
    use glam::Vec2;

    #[test]
    fn test_finger_counts() {
        for n in 0..=5 {
            let hand = fixtures::showing(n, Handedness::Right);
            assert_eq!(count_fingers(&hand), n, "showing {}", n);
            assert_eq!(classify(&hand), Gesture::Digit(n));
        }
    }

    #[test]
    fn test_thumb_only() {
        let mut hand = fixtures::fist(Handedness::Left);
        hand.landmarks[THUMB_TIP].x = hand.point(WRIST).x + 0.11;
        assert_eq!(count_fingers(&hand), 1);
    }

    #[test]
    fn test_x_pose() {
        let pose = XPose::default();
        let mut left = fixtures::fist(Handedness::Left);
        let mut right = fixtures::fist(Handedness::Right);

        left.landmarks[WRIST] = Vec2::new(0.3, 0.8);
        right.landmarks[WRIST] = Vec2::new(0.7, 0.8);
        left.landmarks[INDEX_TIP] = Vec2::new(0.49, 0.4);
        right.landmarks[INDEX_TIP] = Vec2::new(0.51, 0.4);
        assert!(pose.matches(&left, &right));

        // Tips apart
        right.landmarks[INDEX_TIP] = Vec2::new(0.7, 0.4);
        assert!(!pose.matches(&left, &right));

        // Tips together but wrists too close
        right.landmarks[INDEX_TIP] = Vec2::new(0.51, 0.4);
        right.landmarks[WRIST] = Vec2::new(0.4, 0.8);
        assert!(!pose.matches(&left, &right));
    }
}
