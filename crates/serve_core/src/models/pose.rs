//! Pose keypoint models
//!
//! One [`PoseFrame`] per video frame, produced externally by a pose
//! estimator in the standard 17-point COCO body layout. A frame with no
//! detected person deserializes to an empty `persons` list and is excluded
//! from analysis downstream.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

// Named indices into the 17-point COCO body layout. Indices 0-4 are the
// face points, which the engine never reads and leaves unnamed. The full
// limb table is part of the wire contract with the upstream estimator, so
// it is declared here even where the engine only consumes a subset.
pub const LEFT_SHOULDER: usize = 5;
pub const RIGHT_SHOULDER: usize = 6;
pub const LEFT_ELBOW: usize = 7;
pub const RIGHT_ELBOW: usize = 8;
pub const LEFT_WRIST: usize = 9;
pub const RIGHT_WRIST: usize = 10;
pub const LEFT_HIP: usize = 11;
pub const RIGHT_HIP: usize = 12;
pub const LEFT_KNEE: usize = 13;
pub const RIGHT_KNEE: usize = 14;
pub const LEFT_ANKLE: usize = 15;
pub const RIGHT_ANKLE: usize = 16;

/// Number of keypoints a complete person record must carry.
pub const KEYPOINT_COUNT: usize = 17;

/// One detected person: keypoint coordinates in pixel space plus optional
/// per-keypoint confidence scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonPose {
    /// `[x, y]` pixel coordinates, indexed by the keypoint constants above
    pub keypoints: Vec<[f32; 2]>,
    /// Per-keypoint confidence, same length as `keypoints` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keypoint_scores: Option<Vec<f32>>,
}

impl PersonPose {
    /// Whether all 17 keypoints are present.
    pub fn is_complete(&self) -> bool {
        self.keypoints.len() >= KEYPOINT_COUNT
    }

    /// Pixel position of one keypoint, if present.
    pub fn point(&self, index: usize) -> Option<Point2<f32>> {
        self.keypoints.get(index).map(|&[x, y]| Point2::new(x, y))
    }

    /// Mean keypoint confidence. `None` when the estimator supplied no
    /// scores (callers treat that as fully confident, matching the
    /// upstream estimator contract).
    pub fn mean_score(&self) -> Option<f32> {
        let scores = self.keypoint_scores.as_ref()?;
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().sum::<f32>() / scores.len() as f32)
    }
}

/// Pose data for a single video frame. The frame index is the position of
/// this entry in the per-video sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Detected persons, possibly empty (tracking failure). Only the first
    /// person is consumed by the engine.
    #[serde(default)]
    pub persons: Vec<PersonPose>,
}

impl PoseFrame {
    /// The first detected person, if any.
    pub fn first_person(&self) -> Option<&PersonPose> {
        self.persons.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_person(scores: Option<Vec<f32>>) -> PersonPose {
        PersonPose {
            keypoints: (0..KEYPOINT_COUNT).map(|i| [i as f32, i as f32 * 2.0]).collect(),
            keypoint_scores: scores,
        }
    }

    #[test]
    fn test_point_lookup() {
        let person = make_person(None);
        let wrist = person.point(LEFT_WRIST).unwrap();
        assert_eq!(wrist, Point2::new(9.0, 18.0));
        assert!(person.point(40).is_none());
    }

    #[test]
    fn test_mean_score() {
        let person = make_person(Some(vec![0.5; KEYPOINT_COUNT]));
        assert_eq!(person.mean_score(), Some(0.5));

        let no_scores = make_person(None);
        assert_eq!(no_scores.mean_score(), None);
    }

    #[test]
    fn test_incomplete_person() {
        let person = PersonPose { keypoints: vec![[1.0, 2.0]; 5], keypoint_scores: None };
        assert!(!person.is_complete());
        assert!(person.point(RIGHT_ANKLE).is_none());
    }

    #[test]
    fn test_empty_frame_deserializes() {
        let frame: PoseFrame = serde_json::from_str("{}").unwrap();
        assert!(frame.first_person().is_none());
    }
}
