//! Alert reporting
//!
//! Formats emitted alerts for the external logging collaborator: one
//! human-readable line per alert, plus the JSON record handed to the backend.
//! Alerts are append-only; nothing here revises or deletes a record.

use crate::error::InvigilError;
use crate::types::Alert;

/// Render the log line appended for one alert.
///
/// Fields: timestamp, identity, level name, activities, and the snapshot
/// reference when one was attached.
pub fn alert_log_line(alert: &Alert) -> String {
    let activities = alert.activities.join(", ");
    match &alert.snapshot {
        Some(path) => format!(
            "{} - {} - {} - [{}] - {}",
            alert.timestamp.to_rfc3339(),
            alert.identity,
            alert.level,
            activities,
            path
        ),
        None => format!(
            "{} - {} - {} - [{}]",
            alert.timestamp.to_rfc3339(),
            alert.identity,
            alert.level,
            activities
        ),
    }
}

/// Encode one alert as its JSON record
pub fn alert_to_json(alert: &Alert) -> Result<String, InvigilError> {
    serde_json::to_string(alert).map_err(|e| InvigilError::EncodingError(e.to_string()))
}
