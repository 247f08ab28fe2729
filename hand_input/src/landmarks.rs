//! Hand landmark layout and per-frame containers
//!
//! Landmarks are normalized image coordinates: x grows to the right and y
//! grows downwards, both roughly in [0, 1].

use glam::Vec2;
use serde::{Deserialize, Serialize};

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

pub const LANDMARK_COUNT: usize = 21;

/// Handedness label reported by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

/// One tracked hand
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    pub handedness: Handedness,
    pub landmarks: [Vec2; LANDMARK_COUNT],
}

impl Hand {
    /// Build a hand from raw points. None unless exactly 21 are given.
    pub fn from_points(handedness: Handedness, points: &[[f32; 2]]) -> Option<Self> {
        if points.len() != LANDMARK_COUNT {
            return None;
        }
        let mut landmarks = [Vec2::ZERO; LANDMARK_COUNT];
        for (slot, [x, y]) in landmarks.iter_mut().zip(points) {
            *slot = Vec2::new(*x, *y);
        }
        Some(Self {
            handedness,
            landmarks,
        })
    }

    pub fn point(&self, index: usize) -> Vec2 {
        self.landmarks[index]
    }

    pub fn midpoint(&self, a: usize, b: usize) -> Vec2 {
        (self.landmarks[a] + self.landmarks[b]) * 0.5
    }
}

/// Every hand detected in one camera frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandmarkFrame {
    pub hands: Vec<Hand>,
}

impl LandmarkFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn find(&self, handedness: Handedness) -> Option<&Hand> {
        self.hands.iter().find(|hand| hand.handedness == handedness)
    }
}

/// Wire form of a hand, as produced by the vision process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawHand {
    pub handedness: Handedness,
    pub landmarks: Vec<[f32; 2]>,
}

/// Wire form of a frame: `{"hands":[{"handedness":"Right","landmarks":[[x,y],...]}]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFrame {
    #[serde(default)]
    pub hands: Vec<RawHand>,
}

impl TryFrom<RawFrame> for LandmarkFrame {
    type Error = String;

    fn try_from(raw: RawFrame) -> Result<Self, Self::Error> {
        let hands = raw
            .hands
            .iter()
            .map(|hand| {
                Hand::from_points(hand.handedness, &hand.landmarks).ok_or_else(|| {
                    format!(
                        "expected {} landmarks, got {}",
                        LANDMARK_COUNT,
                        hand.landmarks.len()
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { hands })
    }
}

impl From<&Hand> for RawHand {
    fn from(hand: &Hand) -> Self {
        Self {
            handedness: hand.handedness,
            landmarks: hand.landmarks.iter().map(|p| [p.x, p.y]).collect(),
        }
    }
}
