//! The phase-segmentation engine
//!
//! Two sequential passes over an already-materialized evidence sequence:
//! the extremum pre-pass computes global landmark peaks, then the phase
//! state machine scans frames in increasing index order. Both passes are
//! pure and single-threaded; frame order is a correctness requirement, not
//! an optimization.

pub mod config;
pub mod evidence;
pub mod extremum;
pub mod phases;
pub mod proximity;
pub mod racket;

pub use config::DetectorConfig;
pub use evidence::{collect_evidence, evaluate_frame, FrameEvidence};
pub use extremum::{analyze_peaks, PeakAnalysis, SignalPeak};
pub use phases::{detect_key_moments, PhaseDetector, ServePhases};
pub use racket::{global_highest_racket, resolve_racket};
