//! Keypoint frame validation
//!
//! Decides whether a per-person landmark set carries enough visible landmarks
//! to support any geometric inference. Every estimator that needs geometry
//! short-circuits to "no inference possible" when validation fails.

use crate::types::{KeypointFrame, Landmark};

/// The five anchor landmarks used to judge frame sufficiency
pub const ANCHOR_LANDMARKS: [Landmark; 5] = [
    Landmark::Nose,
    Landmark::LeftEye,
    Landmark::RightEye,
    Landmark::LeftShoulder,
    Landmark::RightShoulder,
];

/// Minimum number of visible anchors for a frame to support inference
pub const MIN_VISIBLE_ANCHORS: usize = 3;

/// Returns true iff at least [`MIN_VISIBLE_ANCHORS`] of the five anchor
/// landmarks are visible.
pub fn has_sufficient_anchors(frame: &KeypointFrame) -> bool {
    let visible = ANCHOR_LANDMARKS
        .iter()
        .filter(|&&lm| frame.is_visible(lm))
        .count();
    visible >= MIN_VISIBLE_ANCHORS
}
