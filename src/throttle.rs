//! Alert throttling
//!
//! Enforces a minimum inter-alert interval per identity. The cooldown is a
//! per-identity debounce, never a global one: concurrent different identities
//! do not throttle each other.

use crate::types::{Alert, Identity, SuspicionLevel};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Minimum elapsed seconds between two alerts for the same identity
pub const ALERT_COOLDOWN_SECS: i64 = 5;

/// Per-identity alert debounce.
#[derive(Debug, Clone)]
pub struct AlertThrottle {
    last_alert: HashMap<Identity, DateTime<Utc>>,
    cooldown: Duration,
}

impl Default for AlertThrottle {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertThrottle {
    /// Throttle with the standard cooldown ([`ALERT_COOLDOWN_SECS`])
    pub fn new() -> Self {
        Self::with_cooldown(Duration::seconds(ALERT_COOLDOWN_SECS))
    }

    /// Throttle with a custom cooldown
    pub fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            last_alert: HashMap::new(),
            cooldown,
        }
    }

    /// Emit an alert if `level` exceeds `Normal` and the identity's cooldown
    /// has elapsed.
    ///
    /// The first alert for an identity is never blocked. On fire, the
    /// identity's last-alert time advances to `now`; otherwise state is
    /// unchanged and `None` is returned.
    pub fn maybe_alert(
        &mut self,
        identity: Identity,
        activities: Vec<String>,
        level: SuspicionLevel,
        now: DateTime<Utc>,
    ) -> Option<Alert> {
        if level <= SuspicionLevel::Normal {
            return None;
        }

        if let Some(&last) = self.last_alert.get(&identity) {
            if now.signed_duration_since(last) <= self.cooldown {
                return None;
            }
        }

        self.last_alert.insert(identity, now);
        Some(Alert::new(identity, now, activities, level))
    }

    /// Last time an alert fired for `identity`, if any
    pub fn last_alert_time(&self, identity: Identity) -> Option<DateTime<Utc>> {
        self.last_alert.get(&identity).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn acts() -> Vec<String> {
        vec!["Head Turned: left".to_string()]
    }

    #[test]
    fn test_normal_level_never_fires() {
        let mut throttle = AlertThrottle::new();
        let alert = throttle.maybe_alert(Identity(0), vec![], SuspicionLevel::Normal, at(0));
        assert!(alert.is_none());
        assert!(throttle.last_alert_time(Identity(0)).is_none());
    }

    #[test]
    fn test_first_alert_not_blocked() {
        let mut throttle = AlertThrottle::new();
        let alert = throttle.maybe_alert(Identity(0), acts(), SuspicionLevel::Suspect, at(0));

        let alert = alert.expect("first qualifying trigger should fire");
        assert_eq!(alert.identity, Identity(0));
        assert_eq!(alert.level, SuspicionLevel::Suspect);
        assert_eq!(alert.activities, acts());
        assert_eq!(alert.timestamp, at(0));
        assert!(alert.snapshot.is_none());
    }

    #[test]
    fn test_cooldown_sequence() {
        let mut throttle = AlertThrottle::new();

        // t=0 fires, t=3 suppressed, t=6 fires again
        assert!(throttle
            .maybe_alert(Identity(0), acts(), SuspicionLevel::Suspect, at(0))
            .is_some());
        assert!(throttle
            .maybe_alert(Identity(0), acts(), SuspicionLevel::Suspect, at(3))
            .is_none());
        assert!(throttle
            .maybe_alert(Identity(0), acts(), SuspicionLevel::HotSuspect, at(6))
            .is_some());
    }

    #[test]
    fn test_suppressed_trigger_leaves_state_unchanged() {
        let mut throttle = AlertThrottle::new();
        throttle.maybe_alert(Identity(0), acts(), SuspicionLevel::Suspect, at(0));
        throttle.maybe_alert(Identity(0), acts(), SuspicionLevel::Suspect, at(3));

        // Cooldown still measured from t=0, not t=3
        assert_eq!(throttle.last_alert_time(Identity(0)), Some(at(0)));
    }

    #[test]
    fn test_exactly_at_cooldown_does_not_fire() {
        let mut throttle = AlertThrottle::new();
        throttle.maybe_alert(Identity(0), acts(), SuspicionLevel::Suspect, at(0));

        // Cooldown requires strictly more than 5 seconds
        assert!(throttle
            .maybe_alert(Identity(0), acts(), SuspicionLevel::Suspect, at(5))
            .is_none());
    }

    #[test]
    fn test_identities_do_not_share_cooldown() {
        let mut throttle = AlertThrottle::new();
        assert!(throttle
            .maybe_alert(Identity(0), acts(), SuspicionLevel::Suspect, at(0))
            .is_some());

        // A different identity inside X's cooldown window still fires
        assert!(throttle
            .maybe_alert(Identity(1), acts(), SuspicionLevel::Suspect, at(1))
            .is_some());
    }

    #[test]
    fn test_custom_cooldown() {
        let mut throttle = AlertThrottle::with_cooldown(Duration::seconds(1));
        assert!(throttle
            .maybe_alert(Identity(0), acts(), SuspicionLevel::Suspect, at(0))
            .is_some());
        assert!(throttle
            .maybe_alert(Identity(0), acts(), SuspicionLevel::Suspect, at(2))
            .is_some());
    }
}
