//! Per-frame hand controller
//!
//! Turns a landmark frame into the two values the game consumes each tick:
//! a smoothed steering angle and a gesture token, plus the pause pose hold
//! progress.

use game_core::{Gesture, PaddleIntent, TickInput};
use tracing::{debug, trace};

use crate::angle::hand_angle;
use crate::config::TrackingConfig;
use crate::error::InputError;
use crate::filter::{adaptive_alpha, Ema};
use crate::gesture::classify;
use crate::landmarks::LandmarkFrame;

/// Controller output for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandReading {
    /// Smoothed angle in degrees, [0, 360)
    pub angle: f32,
    pub gesture: Gesture,
    /// Pause pose hold progress in [0, 1]
    pub pause_progress: f32,
    pub hands_detected: usize,
}

impl HandReading {
    /// Combine with the keyboard state into one engine tick
    pub fn tick_input(&self, opponent: PaddleIntent) -> TickInput {
        TickInput {
            angle: self.angle,
            gesture: self.gesture,
            pause_progress: self.pause_progress,
            opponent,
        }
    }
}

pub struct HandController {
    config: TrackingConfig,
    smoother: Ema,
    angle: f32,
    pause_timer: f32,
}

impl HandController {
    pub fn new(config: TrackingConfig) -> Result<Self, InputError> {
        config.validate()?;
        Ok(Self {
            angle: config.initial_angle,
            smoother: Ema::new(0.2),
            pause_timer: 0.0,
            config,
        })
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn process(&mut self, frame: &LandmarkFrame, dt: f32) -> HandReading {
        if frame.is_empty() {
            // Angle holds its last value
            self.pause_timer = 0.0;
            return self.reading(Gesture::Neutral, 0.0, 0);
        }

        let pause_progress = self.update_pause(frame, dt);

        let Some(hand) = frame.find(self.config.dominant_hand) else {
            self.pause_timer = 0.0;
            return self.reading(Gesture::Neutral, 0.0, frame.hands.len());
        };

        let raw = hand_angle(hand, self.config.anchor_point, self.config.target_point);
        self.smoother.set_alpha(adaptive_alpha(raw - self.angle));
        self.angle = self.smoother.update(raw);
        trace!(raw, smoothed = self.angle, "hand angle");

        let gesture = if pause_progress > 0.0 {
            Gesture::PausePose
        } else {
            classify(hand)
        };
        self.reading(gesture, pause_progress, frame.hands.len())
    }

    /// Advance the pause hold timer. Only an X-pose made with exactly two
    /// hands keeps it running.
    fn update_pause(&mut self, frame: &LandmarkFrame, dt: f32) -> f32 {
        let posed = self.config.pause_enabled
            && matches!(frame.hands.as_slice(), [a, b] if self.config.x_pose.matches(a, b));
        if !posed {
            self.pause_timer = 0.0;
            return 0.0;
        }

        let was_full = self.pause_timer >= self.config.pause_hold_time;
        self.pause_timer += dt.max(0.0);
        let progress = if self.config.pause_hold_time > 0.0 {
            (self.pause_timer / self.config.pause_hold_time).min(1.0)
        } else {
            1.0
        };
        if progress >= 1.0 && !was_full {
            debug!("pause pose held");
        }
        progress
    }

    fn reading(&self, gesture: Gesture, pause_progress: f32, hands_detected: usize) -> HandReading {
        HandReading {
            angle: self.angle,
            gesture,
            pause_progress,
            hands_detected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{fixtures, Handedness, INDEX_TIP, THUMB_TIP, WRIST};
    use glam::Vec2;

    const DT: f32 = 0.1;

    fn frame(hands: Vec<crate::landmarks::Hand>) -> LandmarkFrame {
        LandmarkFrame { hands }
    }

    fn x_pose_pair() -> Vec<crate::landmarks::Hand> {
        let mut left = fixtures::showing(1, Handedness::Left);
        let mut right = fixtures::showing(1, Handedness::Right);
        left.landmarks[WRIST] = Vec2::new(0.3, 0.8);
        right.landmarks[WRIST] = Vec2::new(0.7, 0.8);
        left.landmarks[INDEX_TIP] = Vec2::new(0.49, 0.3);
        right.landmarks[INDEX_TIP] = Vec2::new(0.51, 0.3);
        // Thumbs stay tucked against the moved wrists
        left.landmarks[THUMB_TIP].x = 0.3;
        right.landmarks[THUMB_TIP].x = 0.7;
        vec![left, right]
    }

    #[test]
    fn test_bad_target_landmark_is_rejected() {
        let config = TrackingConfig {
            target_point: 99,
            ..TrackingConfig::new()
        };
        assert!(matches!(
            HandController::new(config),
            Err(InputError::LandmarkIndex { index: 99, .. })
        ));
    }

    #[test]
    fn test_no_hands_holds_angle() {
        let mut controller = HandController::new(TrackingConfig::new()).expect("valid tracking config");
        let reading = controller.process(&LandmarkFrame::empty(), DT);
        assert_eq!(reading.angle, 140.0, "Initial angle before any hand");
        assert_eq!(reading.gesture, Gesture::Neutral);
        assert_eq!(reading.pause_progress, 0.0);

        controller.process(&frame(vec![fixtures::pointing(200.0, Handedness::Right)]), DT);
        let held = controller.angle();
        let reading = controller.process(&LandmarkFrame::empty(), DT);
        assert_eq!(reading.angle, held);
    }

    #[test]
    fn test_first_reading_passes_through() {
        let mut controller = HandController::new(TrackingConfig::new()).expect("valid tracking config");
        let reading = controller.process(&frame(vec![fixtures::pointing(200.0, Handedness::Right)]), DT);
        assert!((reading.angle - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_small_jitter_is_damped() {
        let mut controller = HandController::new(TrackingConfig::new()).expect("valid tracking config");
        controller.process(&frame(vec![fixtures::pointing(150.0, Handedness::Right)]), DT);
        let reading = controller.process(&frame(vec![fixtures::pointing(152.0, Handedness::Right)]), DT);
        // 2 degree jump: alpha = 0.15 + 0.2 * 0.75 = 0.3
        assert!((reading.angle - 150.6).abs() < 1e-2, "angle {}", reading.angle);
    }

    #[test]
    fn test_only_dominant_hand_steers() {
        let mut controller = HandController::new(TrackingConfig::new()).expect("valid tracking config");
        let reading = controller.process(&frame(vec![fixtures::showing(3, Handedness::Left)]), DT);
        assert_eq!(reading.gesture, Gesture::Neutral);
        assert_eq!(reading.angle, 140.0);
        assert_eq!(reading.hands_detected, 1);

        let reading = controller.process(&frame(vec![fixtures::showing(3, Handedness::Right)]), DT);
        assert_eq!(reading.gesture, Gesture::Digit(3));
    }

    #[test]
    fn test_pause_pose_fills_over_hold_time() {
        let mut controller = HandController::new(TrackingConfig::new()).expect("valid tracking config");
        let pose = frame(x_pose_pair());

        let reading = controller.process(&pose, 0.75);
        assert!((reading.pause_progress - 0.5).abs() < 1e-4);
        assert_eq!(reading.gesture, Gesture::PausePose);

        let reading = controller.process(&pose, 0.75);
        assert_eq!(reading.pause_progress, 1.0);
        let reading = controller.process(&pose, 0.75);
        assert_eq!(reading.pause_progress, 1.0, "Progress saturates");

        // Breaking the pose resets the timer
        controller.process(&frame(vec![fixtures::showing(2, Handedness::Right)]), DT);
        let reading = controller.process(&pose, 0.3);
        assert!((reading.pause_progress - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_pause_can_be_disabled() {
        let config = TrackingConfig {
            pause_enabled: false,
            ..TrackingConfig::new()
        };
        let mut controller = HandController::new(config).expect("valid tracking config");
        let reading = controller.process(&frame(x_pose_pair()), 2.0);
        assert_eq!(reading.pause_progress, 0.0);
        assert_eq!(reading.gesture, Gesture::Digit(1));
    }
}
