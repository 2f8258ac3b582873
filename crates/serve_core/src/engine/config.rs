//! Detector threshold configuration
//!
//! All spatial thresholds are expressed as multiples of the per-frame body
//! scale (shoulder width) so they stay resolution- and subject-size
//! independent. Values can come from a preset or the
//! `SERVE_DETECTOR_PROFILE` environment variable.

use std::env;

use serde::{Deserialize, Serialize};

/// Tunable thresholds for the phase detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Frames with mean keypoint confidence below this are discarded
    pub min_mean_confidence: f32,
    /// Minimum surviving frames for the peak analysis to be meaningful
    pub min_valid_frames: usize,
    /// Ball counts as "near the tossing hand" within this many body scales
    pub ball_proximity_factor: f32,
    /// Left wrist must be this many body scales above the shoulder for a
    /// release to register
    pub toss_height_factor: f32,
    /// Horizontal corridor for the closest-racket heuristic, in body scales
    pub racket_horizontal_factor: f32,
    /// Pixel tolerance when matching a frame against a global peak
    pub peak_tolerance_px: f32,
    /// Trailing window checked for a previously-near ball
    pub release_lookback_frames: usize,
    /// Synthesize peak-fallback moments for phases the scan never observed
    pub enable_peak_fallback: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_mean_confidence: 0.3,
            min_valid_frames: 10,
            ball_proximity_factor: 1.0,
            toss_height_factor: 0.2,
            racket_horizontal_factor: 0.5,
            peak_tolerance_px: 10.0,
            release_lookback_frames: 5,
            enable_peak_fallback: false,
        }
    }
}

impl DetectorConfig {
    /// Stricter evidence gating for clean, well-lit footage.
    pub fn strict() -> Self {
        Self {
            min_mean_confidence: 0.5,
            min_valid_frames: 20,
            peak_tolerance_px: 5.0,
            ..Self::default()
        }
    }

    /// Select a preset from `SERVE_DETECTOR_PROFILE` ("strict" or
    /// "default"), falling back to the default thresholds.
    pub fn from_env_or_default() -> Self {
        match env::var("SERVE_DETECTOR_PROFILE").as_deref() {
            Ok("strict") => Self::strict(),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = DetectorConfig::default();
        assert_eq!(config.min_mean_confidence, 0.3);
        assert_eq!(config.min_valid_frames, 10);
        assert_eq!(config.release_lookback_frames, 5);
        assert!(!config.enable_peak_fallback);
    }

    #[test]
    fn test_strict_preset_tightens_gates() {
        let strict = DetectorConfig::strict();
        let default = DetectorConfig::default();
        assert!(strict.min_mean_confidence > default.min_mean_confidence);
        assert!(strict.min_valid_frames > default.min_valid_frames);
        // Spatial factors are shared between presets
        assert_eq!(strict.ball_proximity_factor, default.ball_proximity_factor);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DetectorConfig =
            serde_json::from_str(r#"{"enable_peak_fallback": true}"#).unwrap();
        assert!(config.enable_peak_fallback);
        assert_eq!(config.min_valid_frames, 10);
    }
}
