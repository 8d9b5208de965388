//! Suspicion classification
//!
//! Combines the head-orientation and shoulder-motion estimators into an
//! ordered suspicion level plus human-readable activity tags. Classification
//! is a pure fold over independent checks, each contributing an optional
//! activity and candidate level, reduced by maximum severity.

use crate::features::{head_orientation, shoulder_displacement};
use crate::types::{KeypointFrame, SuspicionLevel};
use crate::validator::has_sufficient_anchors;

/// Absolute horizontal-ratio threshold above which the head counts as turned
pub const HEAD_TURN_RATIO_THRESHOLD: f64 = 0.25;

/// Normalized shoulder displacement threshold above which motion is unusual
pub const SHOULDER_MOTION_THRESHOLD: f64 = 0.15;

/// Result of classifying one person's frame
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// Human-readable activity tags, in check order
    pub activities: Vec<String>,
    /// Maximum severity across all triggered checks
    pub level: SuspicionLevel,
}

impl Assessment {
    fn normal() -> Self {
        Self {
            activities: Vec::new(),
            level: SuspicionLevel::Normal,
        }
    }
}

/// Classify one person's current frame against their previous frame.
///
/// Pure: no state is read or mutated beyond the arguments. Returns
/// `([], Normal)` when the current frame fails anchor validation. The
/// shoulder check runs only when a previous frame is present and itself
/// passes validation; it can promote straight to `HotSuspect` even when the
/// head check did not fire.
pub fn classify(current: &KeypointFrame, previous: Option<&KeypointFrame>) -> Assessment {
    if !has_sufficient_anchors(current) {
        return Assessment::normal();
    }

    let checks = [head_turn_check(current), shoulder_motion_check(current, previous)];

    checks
        .into_iter()
        .flatten()
        .fold(Assessment::normal(), |mut acc, (activity, level)| {
            acc.activities.push(activity);
            acc.level = acc.level.max(level);
            acc
        })
}

/// Head-turn check: fires at `Suspect` when |h_ratio| exceeds the threshold
fn head_turn_check(current: &KeypointFrame) -> Option<(String, SuspicionLevel)> {
    let orientation = head_orientation(current);
    if orientation.h_ratio.abs() > HEAD_TURN_RATIO_THRESHOLD {
        let direction = if orientation.h_ratio < 0.0 { "left" } else { "right" };
        Some((format!("Head Turned: {direction}"), SuspicionLevel::Suspect))
    } else {
        None
    }
}

/// Shoulder-motion check: fires at `HotSuspect` when normalized displacement
/// since the previous frame exceeds the threshold
fn shoulder_motion_check(
    current: &KeypointFrame,
    previous: Option<&KeypointFrame>,
) -> Option<(String, SuspicionLevel)> {
    let previous = previous.filter(|&prev| has_sufficient_anchors(prev))?;
    let motion = shoulder_displacement(current, previous);
    if motion > SHOULDER_MOTION_THRESHOLD {
        Some((
            "Unusual Body/Shoulder Movement".to_string(),
            SuspicionLevel::HotSuspect,
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Keypoint, Landmark};
    use pretty_assertions::assert_eq;

    /// Frame with eyes, nose and shoulders visible; nose offset controls
    /// h_ratio (eye span 20, so offset 6 => ratio 0.3)
    fn full_frame(nose_offset: f64, shoulder_y: f64) -> KeypointFrame {
        let mut frame = KeypointFrame::empty();
        frame.set(Landmark::LeftEye, Keypoint::detected(100.0, 100.0, 0.9));
        frame.set(Landmark::RightEye, Keypoint::detected(120.0, 100.0, 0.9));
        frame.set(Landmark::Nose, Keypoint::detected(110.0 + nose_offset, 110.0, 0.9));
        frame.set(Landmark::LeftShoulder, Keypoint::detected(60.0, shoulder_y, 0.9));
        frame.set(Landmark::RightShoulder, Keypoint::detected(160.0, shoulder_y, 0.9));
        frame
    }

    #[test]
    fn test_insufficient_anchors_is_normal() {
        let mut frame = KeypointFrame::empty();
        frame.set(Landmark::Nose, Keypoint::detected(100.0, 100.0, 0.9));
        frame.set(Landmark::LeftEye, Keypoint::detected(95.0, 95.0, 0.9));

        let assessment = classify(&frame, None);
        assert_eq!(assessment.activities, Vec::<String>::new());
        assert_eq!(assessment.level, SuspicionLevel::Normal);
    }

    #[test]
    fn test_empty_frame_is_normal() {
        let assessment = classify(&KeypointFrame::empty(), None);
        assert_eq!(assessment, Assessment::normal());
    }

    #[test]
    fn test_neutral_pose_is_normal() {
        let assessment = classify(&full_frame(0.0, 200.0), None);
        assert_eq!(assessment.activities, Vec::<String>::new());
        assert_eq!(assessment.level, SuspicionLevel::Normal);
    }

    #[test]
    fn test_head_turned_left() {
        // h_ratio = -0.3
        let assessment = classify(&full_frame(-6.0, 200.0), None);
        assert_eq!(assessment.activities, vec!["Head Turned: left".to_string()]);
        assert!(assessment.level >= SuspicionLevel::Suspect);
    }

    #[test]
    fn test_head_turned_right() {
        // h_ratio = +0.3
        let assessment = classify(&full_frame(6.0, 200.0), None);
        assert_eq!(assessment.activities, vec!["Head Turned: right".to_string()]);
        assert!(assessment.level >= SuspicionLevel::Suspect);
    }

    #[test]
    fn test_ratio_at_threshold_does_not_fire() {
        // Eye span 20, offset 5 => h_ratio exactly 0.25; threshold is strict
        let assessment = classify(&full_frame(5.0, 200.0), None);
        assert_eq!(assessment.level, SuspicionLevel::Normal);
    }

    #[test]
    fn test_shoulder_motion_promotes_to_hot_suspect() {
        // Shoulder width 100, vertical shift 20 => displacement 0.2 > 0.15,
        // head centered so the head check does not fire
        let previous = full_frame(0.0, 180.0);
        let current = full_frame(0.0, 200.0);

        let assessment = classify(&current, Some(&previous));
        assert_eq!(
            assessment.activities,
            vec!["Unusual Body/Shoulder Movement".to_string()]
        );
        assert_eq!(assessment.level, SuspicionLevel::HotSuspect);
    }

    #[test]
    fn test_combined_checks_head_listed_first() {
        let previous = full_frame(0.0, 180.0);
        let current = full_frame(-6.0, 200.0);

        let assessment = classify(&current, Some(&previous));
        assert_eq!(
            assessment.activities,
            vec![
                "Head Turned: left".to_string(),
                "Unusual Body/Shoulder Movement".to_string(),
            ]
        );
        assert_eq!(assessment.level, SuspicionLevel::HotSuspect);
    }

    #[test]
    fn test_invalid_previous_frame_skips_shoulder_check() {
        let mut previous = full_frame(0.0, 180.0);
        // Leave only the shoulders visible: 2 of 5 anchors
        previous.set(Landmark::Nose, Keypoint::hidden());
        previous.set(Landmark::LeftEye, Keypoint::hidden());
        previous.set(Landmark::RightEye, Keypoint::hidden());

        let assessment = classify(&full_frame(0.0, 200.0), Some(&previous));
        assert_eq!(assessment.level, SuspicionLevel::Normal);
    }

    #[test]
    fn test_small_shoulder_motion_is_normal() {
        // Shoulder width 100, shift 10 => displacement 0.1 < 0.15
        let previous = full_frame(0.0, 190.0);
        let current = full_frame(0.0, 200.0);

        let assessment = classify(&current, Some(&previous));
        assert_eq!(assessment.level, SuspicionLevel::Normal);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let previous = full_frame(0.0, 180.0);
        let current = full_frame(-6.0, 200.0);

        let first = classify(&current, Some(&previous));
        let second = classify(&current, Some(&previous));
        assert_eq!(first, second);
    }
}
