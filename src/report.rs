//! Report formatting
//!
//! Renders computed workouts as fixed-template text lines and encodes batches
//! of outcomes into JSON reports.

use crate::error::WorkoutError;
use crate::types::{PackageOutcome, ReportProducer, WorkoutReport, WorkoutResult};
use crate::{FLUX_VERSION, PRODUCER_NAME};
use chrono::Utc;
use uuid::Uuid;

/// Current JSON report version
pub const REPORT_VERSION: &str = "1.0.0";

/// Line printed for packages whose code matches no activity
pub const UNKNOWN_WORKOUT_MESSAGE: &str = "Unknown workout type.";

/// Render a result as a single report line.
///
/// All quantities use fixed-point notation with exactly three fractional digits.
pub fn format_message(result: &WorkoutResult) -> String {
    format!(
        "Activity type: {}; Duration: {:.3} h; Distance: {:.3} km; Avg speed: {:.3} km/h; Calories burned: {:.3}.",
        result.activity_label,
        result.duration_hours,
        result.distance_km,
        result.mean_speed_kmh,
        result.calories_kcal,
    )
}

/// Render an outcome, falling back to the unknown-type line
pub fn format_outcome(outcome: &PackageOutcome) -> String {
    match outcome {
        PackageOutcome::Computed { result, .. } => format_message(result),
        PackageOutcome::Unknown { .. } => UNKNOWN_WORKOUT_MESSAGE.to_string(),
    }
}

/// Encoder producing JSON workout reports
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Wrap outcomes in a report envelope
    pub fn encode(&self, outcomes: Vec<PackageOutcome>) -> WorkoutReport {
        WorkoutReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: FLUX_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            outcomes,
        }
    }

    /// Encode to JSON string
    pub fn encode_to_json(&self, outcomes: Vec<PackageOutcome>) -> Result<String, WorkoutError> {
        let report = self.encode(outcomes);
        Ok(serde_json::to_string(&report)?)
    }

    /// Encode to pretty-printed JSON string
    pub fn encode_to_json_pretty(
        &self,
        outcomes: Vec<PackageOutcome>,
    ) -> Result<String, WorkoutError> {
        let report = self.encode(outcomes);
        Ok(serde_json::to_string_pretty(&report)?)
    }
}
