//! JSON string API
//!
//! String-in/string-out entry point for embedding the engine behind FFI or
//! a service boundary without sharing Rust types.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{right_wrist_kinematics, WristKinematics};
use crate::engine::{collect_evidence, DetectorConfig, PhaseDetector};
use crate::error::{AnalysisError, Result};
use crate::models::{Detection, KeyMoment, PoseFrame};
use crate::SCHEMA_VERSION;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub schema_version: u8,
    /// Frames per second of the source video; used only for timestamps
    pub fps: f64,
    /// One entry per frame, in frame order
    pub pose_frames: Vec<PoseFrame>,
    #[serde(default)]
    pub ball_detections: Vec<Detection>,
    #[serde(default)]
    pub racket_detections: Vec<Detection>,
    /// Threshold overrides; defaults (or the env profile) when absent
    #[serde(default)]
    pub config: Option<DetectorConfig>,
    /// Also compute the right-wrist kinematics series
    #[serde(default)]
    pub include_kinematics: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub schema_version: u8,
    /// Frames that survived the evidence filter
    pub valid_frames: usize,
    pub key_moments: Vec<KeyMoment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrist_kinematics: Option<WristKinematics>,
}

/// Run the full segmentation over a JSON request, returning the response as
/// a JSON string.
pub fn analyze_serve_json(request_json: &str) -> Result<String> {
    let request: AnalyzeRequest = serde_json::from_str(request_json)?;

    if request.schema_version != SCHEMA_VERSION {
        return Err(AnalysisError::InvalidParameter(format!(
            "unsupported schema_version {}, expected {}",
            request.schema_version, SCHEMA_VERSION
        )));
    }
    if !(request.fps > 0.0 && request.fps.is_finite()) {
        return Err(AnalysisError::InvalidParameter(format!(
            "fps must be a positive finite number, got {}",
            request.fps
        )));
    }

    let config = request.config.unwrap_or_else(DetectorConfig::from_env_or_default);
    let valid_frames = collect_evidence(&request.pose_frames, config.min_mean_confidence).len();

    let detector = PhaseDetector::new(config);
    let key_moments = detector.detect(
        &request.pose_frames,
        &request.ball_detections,
        &request.racket_detections,
        request.fps,
    );

    info!(
        frames = request.pose_frames.len(),
        valid_frames,
        moments = key_moments.len(),
        "serve analysis complete"
    );

    let wrist_kinematics = request
        .include_kinematics
        .then(|| right_wrist_kinematics(&request.pose_frames, request.fps));

    let response =
        AnalyzeResponse { schema_version: SCHEMA_VERSION, valid_frames, key_moments, wrist_kinematics };
    Ok(serde_json::to_string(&response)?)
}
