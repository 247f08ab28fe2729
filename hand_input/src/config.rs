use crate::angle::AnchorPoint;
use crate::error::InputError;
use crate::gesture::XPose;
use crate::landmarks::{Handedness, INDEX_MCP, INDEX_PIP, LANDMARK_COUNT, THUMB_TIP};

/// Hand tracking configuration
#[derive(Debug, Clone)]
pub struct TrackingConfig {
    /// Hand that steers the paddle and makes gestures
    pub dominant_hand: Handedness,
    pub target_point: usize,
    pub anchor_point: AnchorPoint,
    /// Angle reported before any hand has been seen
    pub initial_angle: f32,
    /// Seconds the pause pose must be held
    pub pause_hold_time: f32,
    pub pause_enabled: bool,
    pub x_pose: XPose,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            dominant_hand: Handedness::Right,
            target_point: THUMB_TIP,
            anchor_point: AnchorPoint::Midpoint(INDEX_MCP, INDEX_PIP),
            initial_angle: 140.0,
            pause_hold_time: 1.5,
            pause_enabled: true,
            x_pose: XPose::default(),
        }
    }
}

impl TrackingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every configured landmark must exist on a hand
    pub fn validate(&self) -> Result<(), InputError> {
        let anchors = match self.anchor_point {
            AnchorPoint::Landmark(i) => [i, i],
            AnchorPoint::Midpoint(a, b) => [a, b],
        };
        let indices = [
            ("target", self.target_point),
            ("anchor", anchors[0]),
            ("anchor", anchors[1]),
        ];
        for (name, index) in indices {
            if index >= LANDMARK_COUNT {
                return Err(InputError::LandmarkIndex { name, index });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TrackingConfig::new().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_landmarks_rejected() {
        let config = TrackingConfig {
            target_point: LANDMARK_COUNT,
            ..TrackingConfig::new()
        };
        assert!(matches!(
            config.validate(),
            Err(InputError::LandmarkIndex { name: "target", index: 21 })
        ));

        let config = TrackingConfig {
            anchor_point: AnchorPoint::Midpoint(5, 40),
            ..TrackingConfig::new()
        };
        let err = config.validate().expect_err("anchor past the last landmark");
        assert!(err.to_string().contains("anchor landmark index 40"), "{}", err);
    }
}
