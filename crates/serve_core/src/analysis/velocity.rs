//! Wrist and ball kinematics
//!
//! First-difference velocity and acceleration of the hitting-hand wrist
//! across the frames where a person was tracked, plus pairwise velocity
//! between two ball detections. Positions are pixels, so velocities are
//! pixels per second.

use nalgebra::{Point2, Vector2};
use serde::Serialize;

use crate::models::pose::RIGHT_WRIST;
use crate::models::{Detection, PoseFrame};

/// Velocity/acceleration series for the right wrist. All vectors share the
/// same length: one entry per frame with a tracked person, in frame order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WristKinematics {
    /// Seconds from the first tracked frame
    pub time_s: Vec<f32>,
    /// `[vx, vy]` in pixels/second; first entry is zero
    pub velocity: Vec<[f32; 2]>,
    /// `[ax, ay]` in pixels/second²; first entry is zero
    pub acceleration: Vec<[f32; 2]>,
}

/// Compute the right-wrist kinematics series over a pose sequence. Frames
/// without a tracked person or wrist keypoint are dropped before
/// differencing, so gaps do not produce spikes.
pub fn right_wrist_kinematics(frames: &[PoseFrame], fps: f64) -> WristKinematics {
    let fps = fps as f32;
    let positions: Vec<Point2<f32>> = frames
        .iter()
        .filter_map(|frame| frame.first_person()?.point(RIGHT_WRIST))
        .collect();

    let mut kinematics = WristKinematics::default();
    if positions.is_empty() {
        return kinematics;
    }

    kinematics.time_s = (0..positions.len()).map(|i| i as f32 / fps).collect();

    let mut velocity = vec![Vector2::zeros(); positions.len()];
    for i in 1..positions.len() {
        velocity[i] = (positions[i] - positions[i - 1]) * fps;
    }

    let mut acceleration = vec![Vector2::zeros(); positions.len()];
    for i in 1..positions.len() {
        acceleration[i] = (velocity[i] - velocity[i - 1]) * fps;
    }

    kinematics.velocity = velocity.iter().map(|v| [v.x, v.y]).collect();
    kinematics.acceleration = acceleration.iter().map(|a| [a.x, a.y]).collect();
    kinematics
}

/// Velocity of the ball between two detections, in pixels/second. `None`
/// when both detections share a frame (no elapsed time to divide by).
pub fn ball_velocity(from: &Detection, to: &Detection, fps: f64) -> Option<Vector2<f32>> {
    if from.frame == to.frame {
        return None;
    }
    let dt = (to.frame as f32 - from.frame as f32) / fps as f32;
    Some((to.center() - from.center()) / dt)
}
