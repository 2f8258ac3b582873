//! File I/O for the key-moment CLI
//!
//! Reads the JSON artifacts the upstream vision pipeline writes (pose
//! frames, ball detections, racket detections) and writes the analysis
//! outputs next to a chosen stem, `<stem>_moments.json` style.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serve_core::models::{Detection, PoseFrame};

/// Load a pose-frame sequence from a JSON array file.
pub fn load_pose_frames(path: &Path) -> Result<Vec<PoseFrame>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read pose file {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse pose frames from {}", path.display()))
}

/// Load ball or racket detections from a JSON array file. A missing path
/// yields an empty list — absent detection streams are the normal case,
/// the engine just produces fewer moments.
pub fn load_detections(path: Option<&Path>) -> Result<Vec<Detection>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read detections file {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse detections from {}", path.display()))
}

/// Serialize `value` as JSON to `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    fs::write(path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Output path for key moments: `<stem>_moments.json` beside the given
/// output stem.
pub fn moments_path(out_stem: &Path) -> PathBuf {
    suffixed_path(out_stem, "_moments.json")
}

/// Output path for the kinematics series: `<stem>_kinematics.json`.
pub fn kinematics_path(out_stem: &Path) -> PathBuf {
    suffixed_path(out_stem, "_kinematics.json")
}

fn suffixed_path(out_stem: &Path, suffix: &str) -> PathBuf {
    let stem = out_stem.file_stem().unwrap_or_default().to_string_lossy();
    out_stem.with_file_name(format!("{stem}{suffix}"))
}
