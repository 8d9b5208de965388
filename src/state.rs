//! Per-identity frame state
//!
//! Holds, per tracked identity, the keypoint frame committed in the
//! immediately preceding processing cycle. The store is rebuilt every cycle
//! from only the identities observed in that cycle: commits accumulate in a
//! staging map, and [`StateStore::end_cycle`] promotes it wholesale, so any
//! identity not re-observed is implicitly forgotten. The structure never
//! grows beyond the current frame's population.

use crate::types::{Identity, KeypointFrame};
use std::collections::HashMap;

/// Per-identity store of previous-cycle keypoint frames.
///
/// Single-owner: all mutation goes through `&mut self`. Callers invoking the
/// pipeline from multiple producers must serialize access externally.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    previous: HashMap<Identity, KeypointFrame>,
    staged: HashMap<Identity, KeypointFrame>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame committed for `identity` in the immediately preceding cycle.
    ///
    /// An identity missing from the store is a first sighting and yields
    /// `None`, never stale data.
    pub fn get_previous(&self, identity: Identity) -> Option<&KeypointFrame> {
        self.previous.get(&identity)
    }

    /// Stage `frame` as `identity`'s frame for the in-progress cycle
    pub fn commit(&mut self, identity: Identity, frame: KeypointFrame) {
        self.staged.insert(identity, frame);
    }

    /// Finish the cycle: staged frames become the previous frames, and every
    /// identity not committed this cycle is dropped.
    pub fn end_cycle(&mut self) {
        self.previous = std::mem::take(&mut self.staged);
    }

    /// Number of identities with a previous frame
    pub fn tracked_count(&self) -> usize {
        self.previous.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Keypoint, Landmark};

    fn frame_at(x: f64) -> KeypointFrame {
        let mut frame = KeypointFrame::empty();
        frame.set(Landmark::Nose, Keypoint::detected(x, 100.0, 0.9));
        frame
    }

    #[test]
    fn test_first_sighting_has_no_previous() {
        let store = StateStore::new();
        assert!(store.get_previous(Identity(0)).is_none());
    }

    #[test]
    fn test_commit_visible_only_after_end_cycle() {
        let mut store = StateStore::new();
        store.commit(Identity(0), frame_at(10.0));

        // Still the in-progress cycle
        assert!(store.get_previous(Identity(0)).is_none());

        store.end_cycle();
        assert_eq!(store.get_previous(Identity(0)), Some(&frame_at(10.0)));
    }

    #[test]
    fn test_absent_identity_dropped_on_cycle_end() {
        let mut store = StateStore::new();
        store.commit(Identity(0), frame_at(10.0));
        store.commit(Identity(1), frame_at(20.0));
        store.end_cycle();
        assert_eq!(store.tracked_count(), 2);

        // Next cycle only re-observes identity 0
        store.commit(Identity(0), frame_at(11.0));
        store.end_cycle();

        assert_eq!(store.tracked_count(), 1);
        assert_eq!(store.get_previous(Identity(0)), Some(&frame_at(11.0)));
        assert!(store.get_previous(Identity(1)).is_none());
    }

    #[test]
    fn test_previous_is_exactly_prior_cycle() {
        let mut store = StateStore::new();
        store.commit(Identity(0), frame_at(1.0));
        store.end_cycle();
        store.commit(Identity(0), frame_at(2.0));
        store.end_cycle();

        // Not the frame from two cycles ago
        assert_eq!(store.get_previous(Identity(0)), Some(&frame_at(2.0)));
    }

    #[test]
    fn test_empty_cycle_forgets_everyone() {
        let mut store = StateStore::new();
        store.commit(Identity(0), frame_at(1.0));
        store.end_cycle();

        // A cycle with no detections
        store.end_cycle();
        assert_eq!(store.tracked_count(), 0);
    }
}
