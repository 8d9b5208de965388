//! Geometric feature extraction
//!
//! Computes the two behavioral signals the classifier consumes: horizontal
//! head orientation from the eye/nose triangle, and scale-invariant
//! inter-frame shoulder displacement.
//!
//! Both estimators fail safe: any missing landmark or degenerate geometry
//! (zero eye span, zero shoulder width) yields a neutral result rather than
//! an error, since partial visibility is an expected steady-state condition.

use crate::types::{KeypointFrame, Landmark};

/// Horizontal head orientation derived from the eye/nose triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadOrientation {
    /// Angle of the inter-eye line in degrees (diagnostic only)
    pub eye_angle_deg: f64,
    /// Nose offset from the eye center, normalized by eye span.
    /// Negative = turned left, positive = turned right.
    pub h_ratio: f64,
}

impl HeadOrientation {
    /// The "cannot evaluate" result
    pub fn neutral() -> Self {
        Self {
            eye_angle_deg: 0.0,
            h_ratio: 0.0,
        }
    }
}

/// Estimate horizontal head orientation.
///
/// Requires both eyes and the nose visible; otherwise returns the neutral
/// result. A zero eye-to-eye horizontal distance also yields neutral, to
/// avoid division by zero.
pub fn head_orientation(frame: &KeypointFrame) -> HeadOrientation {
    let left_eye = frame.get(Landmark::LeftEye);
    let right_eye = frame.get(Landmark::RightEye);
    let nose = frame.get(Landmark::Nose);

    if !left_eye.visible || !right_eye.visible || !nose.visible {
        return HeadOrientation::neutral();
    }

    let eye_dx = right_eye.x - left_eye.x;
    let eye_dy = right_eye.y - left_eye.y;
    if eye_dx.abs() == 0.0 {
        return HeadOrientation::neutral();
    }

    let eye_angle_deg = eye_dy.atan2(eye_dx).to_degrees();
    let eye_center_x = (left_eye.x + right_eye.x) / 2.0;
    let h_ratio = (nose.x - eye_center_x) / eye_dx.abs();

    HeadOrientation {
        eye_angle_deg,
        h_ratio,
    }
}

/// Estimate normalized inter-frame shoulder displacement.
///
/// Requires both shoulders visible in both frames; otherwise returns 0.0
/// ("no motion signal"). Per-shoulder displacements are normalized by the
/// current shoulder width, making the signal invariant to distance from the
/// camera; the result is the mean of the two normalized magnitudes.
pub fn shoulder_displacement(current: &KeypointFrame, previous: &KeypointFrame) -> f64 {
    const SHOULDERS: [Landmark; 2] = [Landmark::LeftShoulder, Landmark::RightShoulder];
    if !current.all_visible(&SHOULDERS) || !previous.all_visible(&SHOULDERS) {
        return 0.0;
    }

    let curr_left = current.get(Landmark::LeftShoulder);
    let curr_right = current.get(Landmark::RightShoulder);
    let prev_left = previous.get(Landmark::LeftShoulder);
    let prev_right = previous.get(Landmark::RightShoulder);

    let shoulder_width = distance(curr_left.x, curr_left.y, curr_right.x, curr_right.y);
    if shoulder_width == 0.0 {
        return 0.0;
    }

    let left_motion = distance(curr_left.x, curr_left.y, prev_left.x, prev_left.y) / shoulder_width;
    let right_motion =
        distance(curr_right.x, curr_right.y, prev_right.x, prev_right.y) / shoulder_width;

    (left_motion + right_motion) / 2.0
}

fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}
