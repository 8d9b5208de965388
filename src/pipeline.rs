//! Pipeline orchestration
//!
//! This module provides the public API for invigil. One call to
//! [`ProctorProcessor::process_frame`] runs a full frame-synchronous cycle:
//! classify every detection, update per-identity state, and evaluate the
//! alert throttle. The cycle completes deterministically before the next
//! frame's keypoints are accepted, since the shoulder-motion estimator
//! depends on `previous` being exactly the prior cycle's committed frame.

use crate::classifier::{classify, Assessment};
use crate::state::StateStore;
use crate::throttle::AlertThrottle;
use crate::types::{Alert, Identity, KeypointFrame, SuspicionLevel};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One person's classification outcome for the current frame.
///
/// Handed to the overlay collaborator, which renders a bounding region and
/// label colored by [`SuspicionLevel::color`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonAssessment {
    pub identity: Identity,
    pub activities: Vec<String>,
    pub level: SuspicionLevel,
}

/// Outcome of one full processing cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Timestamp the cycle was evaluated at
    pub timestamp: DateTime<Utc>,
    /// One assessment per detection, in slot order
    pub assessments: Vec<PersonAssessment>,
    /// Alerts that cleared both the severity and cooldown gates
    pub alerts: Vec<Alert>,
}

/// Classify one frame against an optional previous frame, statelessly.
///
/// Convenience wrapper over [`classify`] for callers that manage their own
/// state; returns the activity tags and final level.
pub fn classify_frame(
    current: &KeypointFrame,
    previous: Option<&KeypointFrame>,
) -> (Vec<String>, SuspicionLevel) {
    let Assessment { activities, level } = classify(current, previous);
    (activities, level)
}

/// Stateful frame processor owning the per-identity state store and the
/// alert throttle.
///
/// Single-owner by construction: processing takes `&mut self`, so a
/// deployment with concurrent producers must serialize calls (e.g. behind a
/// mutex or a single-writer queue).
#[derive(Debug, Default)]
pub struct ProctorProcessor {
    store: StateStore,
    throttle: AlertThrottle,
}

impl ProctorProcessor {
    /// Processor with the standard 5-second alert cooldown
    pub fn new() -> Self {
        Self::default()
    }

    /// Processor with a custom alert cooldown
    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            store: StateStore::new(),
            throttle: AlertThrottle::with_cooldown(cooldown),
        }
    }

    /// Run one full processing cycle over the current frame's detections.
    ///
    /// Identity is assigned by detection slot index; it is not a persistent
    /// track id. Identities absent from `detections` are forgotten, so a
    /// person missing for one frame restarts with first-sighting semantics.
    pub fn process_frame(
        &mut self,
        detections: &[KeypointFrame],
        now: DateTime<Utc>,
    ) -> FrameReport {
        let mut assessments = Vec::with_capacity(detections.len());
        let mut alerts = Vec::new();

        for (slot, frame) in detections.iter().enumerate() {
            let identity = Identity(slot as u32);
            let assessment = classify(frame, self.store.get_previous(identity));
            self.store.commit(identity, frame.clone());

            if let Some(alert) = self.throttle.maybe_alert(
                identity,
                assessment.activities.clone(),
                assessment.level,
                now,
            ) {
                alerts.push(alert);
            }

            assessments.push(PersonAssessment {
                identity,
                activities: assessment.activities,
                level: assessment.level,
            });
        }

        self.store.end_cycle();

        FrameReport {
            timestamp: now,
            assessments,
            alerts,
        }
    }

    /// Number of identities carrying state from the last cycle
    pub fn tracked_count(&self) -> usize {
        self.store.tracked_count()
    }
}
