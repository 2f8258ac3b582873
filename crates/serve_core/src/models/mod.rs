//! Data models: pose frames, object detections, key-moment records.

pub mod detection;
pub mod moments;
pub mod pose;

pub use detection::{group_by_frame, BoundingBox, Detection};
pub use moments::{DetectionMethod, KeyMoment, PhaseLabel, PixelPosition};
pub use pose::{PersonPose, PoseFrame};
