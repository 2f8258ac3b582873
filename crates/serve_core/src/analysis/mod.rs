//! Post-detection analysis tools.

pub mod velocity;

pub use velocity::{ball_velocity, right_wrist_kinematics, WristKinematics};
