//! Phase state machine
//!
//! The top-level driver. After the evidence filter and the global peak
//! pre-pass, a single forward scan advances six monotonic phase flags in
//! fixed order (Start → Ball Release → Trophy → Racket Low → Impact →
//! Follow Through). The ordered else-if chain guarantees at most one phase
//! predicate is evaluated and satisfied per frame, so at most one key
//! moment is appended per frame. The impact phase anchors to the global
//! racket apex and may inject a record earlier than the scan pointer, which
//! is why the result is sorted by frame before return.

use tracing::debug;

use super::config::DetectorConfig;
use super::evidence::{collect_evidence, FrameEvidence};
use super::extremum::{analyze_peaks, PeakAnalysis};
use super::{proximity, racket};
use crate::models::{group_by_frame, Detection, KeyMoment, PhaseLabel, PoseFrame};

/// Confidence assigned to peak-fallback moments, which are inferred rather
/// than observed.
const FALLBACK_CONFIDENCE: f32 = 0.5;

/// Per-run phase flags. Flags only ever transition false → true; a later
/// phase is never considered until every earlier one is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServePhases {
    pub start: bool,
    pub ball_release: bool,
    pub trophy: bool,
    pub racket_low: bool,
    pub impact: bool,
    pub follow_through: bool,
}

impl ServePhases {
    /// Number of phases reached so far.
    pub fn completed(&self) -> usize {
        [self.start, self.ball_release, self.trophy, self.racket_low, self.impact, self.follow_through]
            .iter()
            .filter(|&&flag| flag)
            .count()
    }
}

/// The serve phase detector. Holds only configuration; all run state lives
/// in the scan.
#[derive(Debug, Clone, Default)]
pub struct PhaseDetector {
    config: DetectorConfig,
}

impl PhaseDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Segment one serve. Returns the key moments sorted by frame index;
    /// an empty list when fewer than the configured minimum of frames
    /// survive filtering. Phases whose predicate never holds simply emit
    /// nothing — partial output is the expected failure mode.
    pub fn detect(
        &self,
        frames: &[PoseFrame],
        ball_detections: &[Detection],
        racket_detections: &[Detection],
        fps: f64,
    ) -> Vec<KeyMoment> {
        let evidence = collect_evidence(frames, self.config.min_mean_confidence);
        let Some(peaks) = analyze_peaks(&evidence, self.config.min_valid_frames) else {
            return Vec::new();
        };

        let balls_by_frame = group_by_frame(ball_detections);
        let rackets_by_frame = group_by_frame(racket_detections);

        let mut phases = ServePhases::default();
        let mut moments: Vec<KeyMoment> = Vec::new();

        for frame in &evidence {
            if !phases.start {
                if frame.frame == 0 {
                    phases.start = true;
                    moments.push(KeyMoment::detected(
                        PhaseLabel::Start,
                        frame.frame,
                        fps,
                        frame.mean_confidence,
                    ));
                }
            } else if !phases.ball_release {
                if self.ball_released(frame, &balls_by_frame) {
                    phases.ball_release = true;
                    debug!(frame = frame.frame, "detected ball release");
                    moments.push(KeyMoment::detected(
                        PhaseLabel::BallRelease,
                        frame.frame,
                        fps,
                        frame.mean_confidence,
                    ));
                }
            } else if !phases.trophy {
                if (frame.left_wrist.y - peaks.left_wrist.min_y).abs()
                    < self.config.peak_tolerance_px
                {
                    phases.trophy = true;
                    debug!(frame = frame.frame, "detected trophy position");
                    moments.push(KeyMoment::detected(
                        PhaseLabel::Trophy,
                        frame.frame,
                        fps,
                        frame.mean_confidence,
                    ));
                }
            } else if !phases.racket_low {
                if let Some(in_frame) = rackets_by_frame.get(&frame.frame) {
                    let body_scale = frame.body_scale().unwrap_or(0.0);
                    if let Some((detected, method)) = racket::resolve_racket(
                        in_frame,
                        &frame.right_wrist,
                        body_scale,
                        self.config.racket_horizontal_factor,
                    ) {
                        phases.racket_low = true;
                        debug!(frame = frame.frame, ?method, "detected racket low point");
                        let mut moment = KeyMoment::detected(
                            PhaseLabel::RacketLow,
                            frame.frame,
                            fps,
                            detected.confidence,
                        );
                        moment.detection_method = Some(method);
                        moment.racket_position = Some(detected.center().into());
                        moment.right_hand_position = Some(frame.right_wrist.into());
                        moments.push(moment);
                    }
                }
            } else if !phases.impact {
                // Whole-sequence scan: the apex of the racket trajectory is
                // a more reliable contact proxy than any per-frame rule, so
                // the emitted frame may precede the scan pointer.
                if let Some(apex) = racket::global_highest_racket(racket_detections) {
                    phases.impact = true;
                    debug!(frame = apex.frame, "detected ball impact at global racket apex");
                    let mut moment = KeyMoment::detected(
                        PhaseLabel::Impact,
                        apex.frame,
                        fps,
                        apex.confidence,
                    );
                    moment.racket_position = Some(apex.center().into());
                    moment.right_hand_position = Some(frame.right_wrist.into());
                    moments.push(moment);
                }
            } else if !phases.follow_through
                && (frame.right_ankle.y - peaks.right_ankle.min_y).abs()
                    < self.config.peak_tolerance_px
            {
                phases.follow_through = true;
                debug!(frame = frame.frame, "detected follow through");
                moments.push(KeyMoment::detected(
                    PhaseLabel::FollowThrough,
                    frame.frame,
                    fps,
                    frame.mean_confidence,
                ));
            }
        }

        moments.sort_by_key(|m| m.frame);

        if self.config.enable_peak_fallback {
            self.apply_peak_fallback(&mut moments, phases, &peaks, fps);
        }

        moments
    }

    /// Release predicate: no ball is tracked near the tossing hand now, the
    /// hand is already rising, and a ball was near it within the lookback
    /// window. Requires a non-degenerate body scale.
    fn ball_released(
        &self,
        frame: &FrameEvidence,
        balls_by_frame: &std::collections::BTreeMap<usize, Vec<&Detection>>,
    ) -> bool {
        if balls_by_frame.is_empty() {
            return false;
        }
        let (Some(scale), Some(wrist_height)) = (frame.body_scale(), frame.left_wrist_height())
        else {
            return false;
        };

        let radius = scale * self.config.ball_proximity_factor;
        let current: &[&Detection] =
            balls_by_frame.get(&frame.frame).map(Vec::as_slice).unwrap_or(&[]);

        !proximity::any_ball_within(current, &frame.left_wrist, radius)
            && wrist_height > self.config.toss_height_factor
            && proximity::had_ball_in_window(
                balls_by_frame,
                frame.frame,
                self.config.release_lookback_frames,
                &frame.left_wrist,
                radius,
            )
    }

    /// Synthesize moments for phases the scan passed over, anchored at the
    /// corresponding global peak frame. Only fills gaps, so the
    /// one-moment-per-label bound is preserved.
    fn apply_peak_fallback(
        &self,
        moments: &mut Vec<KeyMoment>,
        phases: ServePhases,
        peaks: &PeakAnalysis,
        fps: f64,
    ) {
        if phases.ball_release && !phases.trophy {
            debug!(frame = peaks.left_wrist.frame, "synthesizing trophy at wrist peak");
            moments.push(KeyMoment::estimated(
                PhaseLabel::Trophy,
                peaks.left_wrist.frame,
                fps,
                FALLBACK_CONFIDENCE,
            ));
        }
        if phases.impact && !phases.follow_through {
            debug!(frame = peaks.right_ankle.frame, "synthesizing follow through at ankle peak");
            moments.push(KeyMoment::estimated(
                PhaseLabel::FollowThrough,
                peaks.right_ankle.frame,
                fps,
                FALLBACK_CONFIDENCE,
            ));
        }
        moments.sort_by_key(|m| m.frame);
    }
}

/// Segment a serve with the default thresholds.
pub fn detect_key_moments(
    frames: &[PoseFrame],
    ball_detections: &[Detection],
    racket_detections: &[Detection],
    fps: f64,
) -> Vec<KeyMoment> {
    PhaseDetector::default().detect(frames, ball_detections, racket_detections, fps)
}
