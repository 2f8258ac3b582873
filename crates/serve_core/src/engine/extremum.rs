//! Global extremum analysis
//!
//! One linear scan over the filtered frames, computing for each tracked
//! signal (left wrist, right wrist, right ankle) the minimum vertical pixel
//! coordinate and the frame where it first occurs. Image y grows downward,
//! so the minimum is the topmost position. The phase scan compares frames
//! against these peaks, so this pass must run first.

use tracing::{info, warn};

use super::evidence::FrameEvidence;

/// Topmost position of one tracked signal across the whole sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalPeak {
    /// Minimum y value reached (pixels)
    pub min_y: f32,
    /// Frame index of the first occurrence of the minimum
    pub frame: usize,
}

/// Global peaks for the three signals the phase machine tracks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakAnalysis {
    pub left_wrist: SignalPeak,
    pub right_wrist: SignalPeak,
    pub right_ankle: SignalPeak,
}

/// Scan the filtered frames for global peaks. Returns `None` (with a
/// warning) when fewer than `min_valid_frames` frames survived filtering,
/// the minimum sample size for a peak to be meaningful.
pub fn analyze_peaks(evidence: &[FrameEvidence], min_valid_frames: usize) -> Option<PeakAnalysis> {
    if evidence.len() < min_valid_frames {
        warn!(
            valid_frames = evidence.len(),
            min_valid_frames, "too few valid frames, key moment detection may fail"
        );
        return None;
    }

    let mut left_wrist = SignalPeak { min_y: f32::INFINITY, frame: 0 };
    let mut right_wrist = SignalPeak { min_y: f32::INFINITY, frame: 0 };
    let mut right_ankle = SignalPeak { min_y: f32::INFINITY, frame: 0 };

    for frame in evidence {
        // Strict comparisons keep argmin semantics: first occurrence wins.
        if frame.left_wrist.y < left_wrist.min_y {
            left_wrist = SignalPeak { min_y: frame.left_wrist.y, frame: frame.frame };
        }
        if frame.right_wrist.y < right_wrist.min_y {
            right_wrist = SignalPeak { min_y: frame.right_wrist.y, frame: frame.frame };
        }
        if frame.right_ankle.y < right_ankle.min_y {
            right_ankle = SignalPeak { min_y: frame.right_ankle.y, frame: frame.frame };
        }
    }

    info!(
        left_wrist_peak = left_wrist.frame,
        right_wrist_peak = right_wrist.frame,
        right_ankle_peak = right_ankle.frame,
        "peak analysis complete"
    );

    Some(PeakAnalysis { left_wrist, right_wrist, right_ankle })
}
