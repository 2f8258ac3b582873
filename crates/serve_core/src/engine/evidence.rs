//! Frame evidence filter
//!
//! Validates one pose frame and extracts the landmarks the detector reasons
//! about. Pure per-frame gate: a frame is disqualified when no person was
//! detected, the landmark set is incomplete, or the mean keypoint
//! confidence falls below the configured threshold. All geometric checks
//! downstream operate on the values extracted here.

use nalgebra::{distance, Point2};

use crate::models::pose::{
    LEFT_SHOULDER, LEFT_WRIST, RIGHT_ANKLE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use crate::models::PoseFrame;

/// Validated, normalized evidence for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameEvidence {
    /// Zero-based frame index in the source video
    pub frame: usize,
    pub left_wrist: Point2<f32>,
    pub right_wrist: Point2<f32>,
    pub left_shoulder: Point2<f32>,
    pub right_shoulder: Point2<f32>,
    pub right_ankle: Point2<f32>,
    /// Mean keypoint confidence; 1.0 when the estimator supplied no scores
    pub mean_confidence: f32,
    body_scale: f32,
}

impl FrameEvidence {
    /// Shoulder-to-shoulder distance, the divisor for all relative
    /// thresholds. `None` when degenerate (coincident shoulders), which
    /// disqualifies this frame from scale-normalized comparisons only.
    pub fn body_scale(&self) -> Option<f32> {
        (self.body_scale > 0.0).then_some(self.body_scale)
    }

    /// Left-wrist height above the left shoulder, in body scales. Positive
    /// means above. `None` when the body scale is degenerate.
    pub fn left_wrist_height(&self) -> Option<f32> {
        let scale = self.body_scale()?;
        Some((self.left_shoulder.y - self.left_wrist.y) / scale)
    }
}

/// Evaluate one frame against the evidence gate. Returns `None` for
/// disqualified frames; never errors (a bad frame simply contributes
/// nothing, per the engine's failure semantics).
pub fn evaluate_frame(
    frame_idx: usize,
    frame: &PoseFrame,
    min_mean_confidence: f32,
) -> Option<FrameEvidence> {
    let person = frame.first_person()?;
    if !person.is_complete() {
        return None;
    }

    let mean_confidence = person.mean_score().unwrap_or(1.0);
    if mean_confidence < min_mean_confidence {
        return None;
    }

    let left_shoulder = person.point(LEFT_SHOULDER)?;
    let right_shoulder = person.point(RIGHT_SHOULDER)?;

    Some(FrameEvidence {
        frame: frame_idx,
        left_wrist: person.point(LEFT_WRIST)?,
        right_wrist: person.point(RIGHT_WRIST)?,
        left_shoulder,
        right_shoulder,
        right_ankle: person.point(RIGHT_ANKLE)?,
        mean_confidence,
        body_scale: distance(&left_shoulder, &right_shoulder),
    })
}

/// Run the evidence filter over a whole pose sequence, keeping frame order.
pub fn collect_evidence(frames: &[PoseFrame], min_mean_confidence: f32) -> Vec<FrameEvidence> {
    frames
        .iter()
        .enumerate()
        .filter_map(|(idx, frame)| evaluate_frame(idx, frame, min_mean_confidence))
        .collect()
}
