//! Pose payload ingest
//!
//! Parses the per-frame payload produced by the pose-estimation collaborator
//! into [`KeypointFrame`] values. A detection is a sequence of
//! `(x, y, confidence)` triples in COCO slot order; the first 11 slots are
//! the consumed landmarks, and any further slots (a 17-landmark COCO pose)
//! are ignored. Keypoints at or below the confidence threshold become
//! invisible with zeroed coordinates.

use crate::error::InvigilError;
use crate::types::{Keypoint, KeypointFrame, Landmark};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum detection confidence for a keypoint to count as visible
pub const DETECTION_CONFIDENCE_THRESHOLD: f64 = 0.25;

/// One raw keypoint as emitted by the pose model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawKeypoint {
    pub x: f64,
    pub y: f64,
    pub confidence: f64,
}

/// One video frame's worth of per-person detections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPoseFrame {
    /// Capture time of the video frame
    pub timestamp: DateTime<Utc>,
    /// Per-person keypoint sequences, in detection slot order
    pub detections: Vec<Vec<RawKeypoint>>,
}

/// Convert one raw detection into a [`KeypointFrame`].
///
/// Fails if the detection supplies fewer than [`Landmark::COUNT`] landmarks;
/// landmarks past the consumed subset are ignored.
pub fn detection_to_frame(detection: &[RawKeypoint]) -> Result<KeypointFrame, InvigilError> {
    if detection.len() < Landmark::COUNT {
        return Err(InvigilError::MissingLandmarks {
            expected: Landmark::COUNT,
            got: detection.len(),
        });
    }

    let mut frame = KeypointFrame::empty();
    for landmark in Landmark::ALL {
        let raw = detection[landmark.index()];
        let keypoint = if raw.confidence > DETECTION_CONFIDENCE_THRESHOLD {
            Keypoint::detected(raw.x, raw.y, raw.confidence)
        } else {
            Keypoint::hidden()
        };
        frame.set(landmark, keypoint);
    }
    Ok(frame)
}

/// Parse a pose payload JSON string into its capture timestamp and one
/// [`KeypointFrame`] per detection.
pub fn parse_pose_frame(json: &str) -> Result<(DateTime<Utc>, Vec<KeypointFrame>), InvigilError> {
    let raw: RawPoseFrame = serde_json::from_str(json)?;
    let frames = raw
        .detections
        .iter()
        .map(|detection| detection_to_frame(detection))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((raw.timestamp, frames))
}
