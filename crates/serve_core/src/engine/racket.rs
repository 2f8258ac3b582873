//! Racket-to-hand association
//!
//! Two per-frame heuristics resolve which racket belongs to the serving
//! hand, plus a whole-sequence scan for the racket's apex used by the
//! impact phase. "Highest" always means the minimum center-y, since image
//! y grows downward; all scans break ties to the first detection in input
//! order so results stay deterministic.

use nalgebra::Point2;

use crate::models::{Detection, DetectionMethod};

/// Resolve the racket associated with the serving hand in one frame.
///
/// Heuristic `closest` (priority): among rackets whose center is below the
/// right wrist and within `racket_horizontal_factor × body_scale` of it
/// horizontally, the horizontally closest. Heuristic `highest` (fallback):
/// the topmost racket in the frame. Ties break to the first detection in
/// input order.
pub fn resolve_racket<'a>(
    rackets: &[&'a Detection],
    right_wrist: &Point2<f32>,
    body_scale: f32,
    racket_horizontal_factor: f32,
) -> Option<(&'a Detection, DetectionMethod)> {
    let horizontal_limit = body_scale * racket_horizontal_factor;

    let mut closest: Option<(&Detection, f32)> = None;
    for racket in rackets {
        let center = racket.center();
        let dist_x = (center.x - right_wrist.x).abs();
        let below_wrist = center.y - right_wrist.y > 0.0;
        if below_wrist && dist_x < horizontal_limit {
            match closest {
                Some((_, best)) if dist_x >= best => {}
                _ => closest = Some((racket, dist_x)),
            }
        }
    }
    if let Some((racket, _)) = closest {
        return Some((racket, DetectionMethod::Closest));
    }

    highest_racket(rackets).map(|racket| (racket, DetectionMethod::Highest))
}

/// Topmost (minimum center-y) racket among the given detections.
fn highest_racket<'a>(rackets: &[&'a Detection]) -> Option<&'a Detection> {
    let mut best: Option<(&Detection, f32)> = None;
    for racket in rackets {
        let y = racket.center().y;
        match best {
            Some((_, best_y)) if y >= best_y => {}
            _ => best = Some((racket, y)),
        }
    }
    best.map(|(racket, _)| racket)
}

/// The single racket detection with the topmost center across the whole
/// sequence, regardless of frame. Ties break to the earliest in input
/// order. This is the impact-phase anchor.
pub fn global_highest_racket(rackets: &[Detection]) -> Option<&Detection> {
    let mut best: Option<(&Detection, f32)> = None;
    for racket in rackets {
        let y = racket.center().y;
        match best {
            Some((_, best_y)) if y >= best_y => {}
            _ => best = Some((racket, y)),
        }
    }
    best.map(|(racket, _)| racket)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_racket(frame: usize, cx: f32, cy: f32, confidence: f32) -> Detection {
        Detection {
            frame,
            bbox: [cx - 20.0, cy - 30.0, cx + 20.0, cy + 30.0].into(),
            track_id: None,
            confidence,
        }
    }

    #[test]
    fn test_closest_method_has_priority() {
        // Both below the wrist and inside the corridor; the horizontally
        // closer one wins even though the other is higher in the image.
        let near = make_racket(0, 105.0, 350.0, 0.8);
        let far = make_racket(0, 130.0, 250.0, 0.9);
        let wrist = Point2::new(100.0, 200.0);

        let (racket, method) =
            resolve_racket(&[&far, &near], &wrist, 100.0, 0.5).unwrap();
        assert_eq!(racket.confidence, 0.8);
        assert_eq!(method, DetectionMethod::Closest);
    }

    #[test]
    fn test_racket_above_wrist_falls_back_to_highest() {
        // Inside the corridor horizontally but above the wrist, so the
        // closest heuristic rejects it and the highest heuristic picks it.
        let racket = make_racket(0, 110.0, 150.0, 0.7);
        let wrist = Point2::new(100.0, 200.0);

        let (resolved, method) = resolve_racket(&[&racket], &wrist, 100.0, 0.5).unwrap();
        assert_eq!(resolved.confidence, 0.7);
        assert_eq!(method, DetectionMethod::Highest);
    }

    #[test]
    fn test_outside_corridor_falls_back_to_highest() {
        let low = make_racket(0, 400.0, 500.0, 0.6);
        let high = make_racket(0, 450.0, 300.0, 0.9);
        let wrist = Point2::new(100.0, 200.0);

        let (resolved, method) = resolve_racket(&[&low, &high], &wrist, 100.0, 0.5).unwrap();
        assert_eq!(resolved.confidence, 0.9);
        assert_eq!(method, DetectionMethod::Highest);
    }

    #[test]
    fn test_no_rackets_resolves_nothing() {
        let wrist = Point2::new(100.0, 200.0);
        assert!(resolve_racket(&[], &wrist, 100.0, 0.5).is_none());
    }

    #[test]
    fn test_degenerate_scale_disables_closest() {
        let racket = make_racket(0, 100.0, 350.0, 0.8);
        let wrist = Point2::new(100.0, 200.0);
        // Zero corridor width: dist_x < 0 never holds, highest takes over.
        let (_, method) = resolve_racket(&[&racket], &wrist, 0.0, 0.5).unwrap();
        assert_eq!(method, DetectionMethod::Highest);
    }

    #[test]
    fn test_global_highest_across_frames() {
        let rackets = vec![
            make_racket(3, 100.0, 50.0, 0.5),
            make_racket(8, 100.0, 10.0, 0.95),
            make_racket(12, 100.0, 30.0, 0.7),
        ];
        let best = global_highest_racket(&rackets).unwrap();
        assert_eq!(best.frame, 8);
        assert_eq!(best.confidence, 0.95);
    }

    #[test]
    fn test_global_highest_tie_breaks_first() {
        let rackets = vec![make_racket(2, 50.0, 40.0, 0.5), make_racket(9, 80.0, 40.0, 0.6)];
        assert_eq!(global_highest_racket(&rackets).unwrap().frame, 2);
    }

    #[test]
    fn test_global_highest_empty() {
        assert!(global_highest_racket(&[]).is_none());
    }
}
