//! Key-moment output records

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Suffix appended to the label of a moment that was synthesized from the
/// global peak analysis rather than observed directly.
pub const ESTIMATED_SUFFIX: &str = " (estimated)";

/// The six canonical serve phases, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseLabel {
    Start,
    BallRelease,
    Trophy,
    RacketLow,
    Impact,
    FollowThrough,
}

impl PhaseLabel {
    /// Canonical output vocabulary, matching the persisted JSON format.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseLabel::Start => "Start Position",
            PhaseLabel::BallRelease => "Ball Release",
            PhaseLabel::Trophy => "Trophy Position",
            PhaseLabel::RacketLow => "Racket Low Point",
            PhaseLabel::Impact => "Ball Impact",
            PhaseLabel::FollowThrough => "Follow Through",
        }
    }

    pub const ALL: [PhaseLabel; 6] = [
        PhaseLabel::Start,
        PhaseLabel::BallRelease,
        PhaseLabel::Trophy,
        PhaseLabel::RacketLow,
        PhaseLabel::Impact,
        PhaseLabel::FollowThrough,
    ];
}

/// Which racket-association heuristic matched at the Racket Low Point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Horizontally closest racket below the right wrist
    Closest,
    /// Topmost racket in the frame
    Highest,
}

/// A pixel-space position carried as key-moment metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPosition {
    pub x: f32,
    pub y: f32,
}

impl From<Point2<f32>> for PixelPosition {
    fn from(p: Point2<f32>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// One detected (or synthesized) key moment of the serve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMoment {
    /// Zero-based frame index
    pub frame: usize,
    /// `frame / fps`, in seconds
    pub timestamp: f64,
    /// Phase vocabulary string, optionally suffixed for estimated origin
    pub label: String,
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection_method: Option<DetectionMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub racket_position: Option<PixelPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_hand_position: Option<PixelPosition>,
}

impl KeyMoment {
    /// A directly observed moment with no phase-specific metadata.
    pub fn detected(phase: PhaseLabel, frame: usize, fps: f64, confidence: f32) -> Self {
        Self {
            frame,
            timestamp: frame as f64 / fps,
            label: phase.as_str().to_string(),
            confidence,
            detection_method: None,
            racket_position: None,
            right_hand_position: None,
        }
    }

    /// A moment synthesized from the global peak analysis.
    pub fn estimated(phase: PhaseLabel, frame: usize, fps: f64, confidence: f32) -> Self {
        let mut moment = Self::detected(phase, frame, fps, confidence);
        moment.label.push_str(ESTIMATED_SUFFIX);
        moment
    }

    /// Label with any origin suffix stripped.
    pub fn base_label(&self) -> &str {
        self.label.strip_suffix(ESTIMATED_SUFFIX).unwrap_or(&self.label)
    }

    pub fn is_estimated(&self) -> bool {
        self.label.ends_with(ESTIMATED_SUFFIX)
    }
}
