//! # serve_core - Tennis-Serve Phase Segmentation Engine
//!
//! This library segments a tennis serve into six canonical phases (Start,
//! Ball Release, Trophy Position, Racket Low Point, Ball Impact, Follow
//! Through) from pre-computed per-frame pose keypoints plus optional ball
//! and racket detections, emitting one timestamped key moment per phase.
//!
//! ## Features
//! - Deterministic single-pass temporal state machine (same input = same
//!   output, no RNG, no I/O)
//! - Confidence-gated evidence filtering and body-scale normalization
//! - Tolerates missing or noisy detection streams with partial output
//! - JSON API for easy integration with upload/serving layers

pub mod analysis;
pub mod api;
pub mod engine;
pub mod error;
pub mod models;

pub use analysis::{ball_velocity, right_wrist_kinematics, WristKinematics};
pub use api::{analyze_serve_json, AnalyzeRequest, AnalyzeResponse};
pub use engine::{detect_key_moments, DetectorConfig, PhaseDetector, ServePhases};
pub use error::{AnalysisError, Result};
pub use models::{Detection, DetectionMethod, KeyMoment, PhaseLabel, PoseFrame};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
