//! Core types for the invigil pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: landmarks, per-person keypoint frames, suspicion levels, and
//! emitted alerts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Anatomical landmarks consumed by the behavior pipeline.
///
/// The discriminants match the COCO keypoint ordering used by the upstream
/// pose model, so a raw detection's slot index maps directly to a landmark.
/// Only the upper-body subset is consumed; lower-body landmarks the pose
/// model may emit are ignored at ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landmark {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
}

impl Landmark {
    /// Number of landmarks tracked per person
    pub const COUNT: usize = 11;

    /// All landmarks in slot order
    pub const ALL: [Landmark; Landmark::COUNT] = [
        Landmark::Nose,
        Landmark::LeftEye,
        Landmark::RightEye,
        Landmark::LeftEar,
        Landmark::RightEar,
        Landmark::LeftShoulder,
        Landmark::RightShoulder,
        Landmark::LeftElbow,
        Landmark::RightElbow,
        Landmark::LeftWrist,
        Landmark::RightWrist,
    ];

    /// Slot index of this landmark in a raw detection
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A single detected anatomical landmark.
///
/// `visible` is true iff the detection confidence exceeded the ingest
/// threshold; invisible keypoints carry zeroed coordinates and must never be
/// used in geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
    pub confidence: f64,
    pub visible: bool,
}

impl Keypoint {
    /// A keypoint detected above the confidence threshold
    pub fn detected(x: f64, y: f64, confidence: f64) -> Self {
        Self {
            x,
            y,
            confidence,
            visible: true,
        }
    }

    /// An invisible keypoint (below-threshold or absent detection)
    pub fn hidden() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            confidence: 0.0,
            visible: false,
        }
    }
}

impl Default for Keypoint {
    fn default() -> Self {
        Self::hidden()
    }
}

/// One person's landmark set for a single video frame.
///
/// Fixed-size, indexed by [`Landmark`]; insertion order is irrelevant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeypointFrame {
    points: [Keypoint; Landmark::COUNT],
}

impl KeypointFrame {
    /// Frame with every landmark invisible
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a landmark's keypoint
    pub fn get(&self, landmark: Landmark) -> &Keypoint {
        &self.points[landmark.index()]
    }

    /// Set a landmark's keypoint
    pub fn set(&mut self, landmark: Landmark, keypoint: Keypoint) {
        self.points[landmark.index()] = keypoint;
    }

    /// Whether the given landmark is visible
    pub fn is_visible(&self, landmark: Landmark) -> bool {
        self.get(landmark).visible
    }

    /// Whether every landmark in `landmarks` is visible
    pub fn all_visible(&self, landmarks: &[Landmark]) -> bool {
        landmarks.iter().all(|&lm| self.is_visible(lm))
    }

    /// Iterator over `(landmark, keypoint)` pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Landmark, &Keypoint)> + '_ {
        Landmark::ALL.iter().map(move |&lm| (lm, self.get(lm)))
    }
}

/// Per-frame label assigned to one detected person.
///
/// Identity is the detection's slot index within the current frame's
/// detection sequence. It is NOT a persistent track id: if detection count
/// or ordering shifts between frames, the same index may refer to a
/// different person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(pub u32);

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "student-{}", self.0)
    }
}

/// Ordered classification of behavioral risk.
///
/// Totally ordered: `Normal < Suspect < HotSuspect`. Classification reduces
/// independent checks by maximum severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspicionLevel {
    Normal,
    Suspect,
    HotSuspect,
}

impl SuspicionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuspicionLevel::Normal => "Normal",
            SuspicionLevel::Suspect => "Suspect",
            SuspicionLevel::HotSuspect => "HotSuspect",
        }
    }

    /// Overlay color contract: Normal = green, Suspect = yellow,
    /// HotSuspect = red (RGB).
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            SuspicionLevel::Normal => (0, 255, 0),
            SuspicionLevel::Suspect => (255, 255, 0),
            SuspicionLevel::HotSuspect => (255, 0, 0),
        }
    }
}

impl fmt::Display for SuspicionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An emitted alert record.
///
/// Created by the alert throttle when a classification clears both the
/// severity and cooldown gates. Immutable once emitted; the core never
/// revises or deletes an alert. The snapshot path is attached by the caller
/// after the external snapshot collaborator has written the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub identity: Identity,
    pub timestamp: DateTime<Utc>,
    pub activities: Vec<String>,
    pub level: SuspicionLevel,
    pub snapshot: Option<String>,
}

impl Alert {
    pub fn new(
        identity: Identity,
        timestamp: DateTime<Utc>,
        activities: Vec<String>,
        level: SuspicionLevel,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity,
            timestamp,
            activities,
            level,
            snapshot: None,
        }
    }

    /// Attach the snapshot path returned by the snapshot collaborator
    pub fn with_snapshot(mut self, path: impl Into<String>) -> Self {
        self.snapshot = Some(path.into());
        self
    }
}
