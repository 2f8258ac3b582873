//! Object detection models for ball and racket boxes
//!
//! Detections arrive as unordered lists keyed by frame index; the engine
//! groups them itself before the phase scan.

use std::collections::BTreeMap;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in pixel space. Serialized as the 4-element
/// `[x1, y1, x2, y2]` array the upstream detector emits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl From<[f32; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [f32; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

impl BoundingBox {
    /// Midpoint of the box.
    pub fn center(&self) -> Point2<f32> {
        Point2::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
}

/// One detector output for a single physical object in a single frame.
/// Used for both ball and racket streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Zero-based frame index
    pub frame: usize,
    pub bbox: BoundingBox,
    /// Stable across frames for the same physical object; absent when the
    /// tracker could not associate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_id: Option<u32>,
    /// Detector confidence in [0, 1]
    pub confidence: f32,
}

impl Detection {
    pub fn center(&self) -> Point2<f32> {
        self.bbox.center()
    }
}

/// Group detections by frame index. Within a frame, input order is kept so
/// tie-breaks stay deterministic.
pub fn group_by_frame(detections: &[Detection]) -> BTreeMap<usize, Vec<&Detection>> {
    let mut grouped: BTreeMap<usize, Vec<&Detection>> = BTreeMap::new();
    for detection in detections {
        grouped.entry(detection.frame).or_default().push(detection);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_detection(frame: usize, bbox: [f32; 4], confidence: f32) -> Detection {
        Detection { frame, bbox: bbox.into(), track_id: None, confidence }
    }

    #[test]
    fn test_bbox_center() {
        let d = make_detection(0, [10.0, 20.0, 30.0, 60.0], 0.9);
        assert_eq!(d.center(), Point2::new(20.0, 40.0));
    }

    #[test]
    fn test_bbox_array_round_trip() {
        let d = make_detection(3, [1.0, 2.0, 3.0, 4.0], 0.5);
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("\"bbox\":[1.0,2.0,3.0,4.0]"));
        let back: Detection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_group_by_frame_keeps_order() {
        let detections = vec![
            make_detection(5, [0.0; 4], 0.1),
            make_detection(2, [0.0; 4], 0.2),
            make_detection(5, [1.0, 1.0, 2.0, 2.0], 0.3),
        ];
        let grouped = group_by_frame(&detections);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[&5].len(), 2);
        assert_eq!(grouped[&5][0].confidence, 0.1);
        assert_eq!(grouped[&5][1].confidence, 0.3);
        assert!(!grouped.contains_key(&0));
    }
}
