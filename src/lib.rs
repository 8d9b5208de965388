//! invigil - Behavioral-inference core for camera-based exam proctoring
//!
//! invigil turns per-person pose keypoints into a classified suspicion signal
//! plus throttled alerts through a deterministic, frame-synchronous pipeline:
//! ingest → anchor validation → geometric feature extraction → suspicion
//! classification → per-identity state update → alert throttling.
//!
//! Pose estimation, video capture, rendering, and persistence are external
//! collaborators; this crate consumes materialized keypoints and hands back
//! assessments and alert records.

pub mod classifier;
pub mod error;
pub mod features;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod state;
pub mod throttle;
pub mod types;
pub mod validator;

pub use classifier::{classify, Assessment, HEAD_TURN_RATIO_THRESHOLD, SHOULDER_MOTION_THRESHOLD};
pub use error::InvigilError;
pub use pipeline::{classify_frame, FrameReport, PersonAssessment, ProctorProcessor};
pub use schema::{parse_pose_frame, RawKeypoint, RawPoseFrame, DETECTION_CONFIDENCE_THRESHOLD};
pub use state::StateStore;
pub use throttle::{AlertThrottle, ALERT_COOLDOWN_SECS};
pub use types::{Alert, Identity, Keypoint, KeypointFrame, Landmark, SuspicionLevel};

/// invigil version embedded in emitted payloads
pub const INVIGIL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for emitted payloads
pub const PRODUCER_NAME: &str = "invigil";
