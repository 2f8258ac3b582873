//! Ball-to-wrist proximity detection
//!
//! The release event is a disappearance transition: the ball was tracked
//! near the tossing hand in the recent past and is no longer tracked near
//! it now. Both checks measure against the current frame's wrist position;
//! the lookback does not re-resolve old wrist positions, matching the
//! single-pass design.

use std::collections::BTreeMap;

use nalgebra::{distance, Point2};

use crate::models::Detection;

/// Whether any detection's center lies within `radius` pixels of `wrist`.
pub fn any_ball_within(detections: &[&Detection], wrist: &Point2<f32>, radius: f32) -> bool {
    detections.iter().any(|d| distance(&d.center(), wrist) < radius)
}

/// Whether any ball detection in the trailing window
/// `[frame - lookback, frame)` was within `radius` pixels of `wrist`.
pub fn had_ball_in_window(
    balls_by_frame: &BTreeMap<usize, Vec<&Detection>>,
    frame: usize,
    lookback: usize,
    wrist: &Point2<f32>,
    radius: f32,
) -> bool {
    let window_start = frame.saturating_sub(lookback);
    balls_by_frame
        .range(window_start..frame)
        .any(|(_, detections)| any_ball_within(detections, wrist, radius))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::group_by_frame;

    fn make_ball(frame: usize, cx: f32, cy: f32) -> Detection {
        Detection {
            frame,
            bbox: [cx - 5.0, cy - 5.0, cx + 5.0, cy + 5.0].into(),
            track_id: Some(1),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_ball_within_radius() {
        let ball = make_ball(0, 110.0, 200.0);
        let wrist = Point2::new(100.0, 200.0);
        assert!(any_ball_within(&[&ball], &wrist, 20.0));
        assert!(!any_ball_within(&[&ball], &wrist, 10.0));
    }

    #[test]
    fn test_boundary_is_exclusive() {
        let ball = make_ball(0, 150.0, 200.0);
        let wrist = Point2::new(100.0, 200.0);
        // Distance is exactly 50: strictly-less comparison rejects it.
        assert!(!any_ball_within(&[&ball], &wrist, 50.0));
    }

    #[test]
    fn test_lookback_window_bounds() {
        let balls = vec![make_ball(2, 100.0, 200.0), make_ball(7, 100.0, 200.0)];
        let grouped = group_by_frame(&balls);
        let wrist = Point2::new(100.0, 200.0);

        // Window [2, 7) sees the frame-2 ball
        assert!(had_ball_in_window(&grouped, 7, 5, &wrist, 30.0));
        // Window [3, 8) misses frame 2 but sees frame 7
        assert!(had_ball_in_window(&grouped, 8, 5, &wrist, 30.0));
        // The current frame is never part of its own window
        assert!(!had_ball_in_window(&grouped, 2, 5, &wrist, 30.0));
        // Window [8, 13) is empty
        assert!(!had_ball_in_window(&grouped, 13, 5, &wrist, 30.0));
    }

    #[test]
    fn test_lookback_near_sequence_start() {
        let balls = vec![make_ball(0, 100.0, 200.0)];
        let grouped = group_by_frame(&balls);
        let wrist = Point2::new(100.0, 200.0);
        // frame 3 with lookback 5 clamps the window start to 0
        assert!(had_ball_in_window(&grouped, 3, 5, &wrist, 30.0));
    }

    #[test]
    fn test_distant_ball_in_window_ignored() {
        let balls = vec![make_ball(4, 900.0, 900.0)];
        let grouped = group_by_frame(&balls);
        let wrist = Point2::new(100.0, 200.0);
        assert!(!had_ball_in_window(&grouped, 6, 5, &wrist, 30.0));
    }
}
