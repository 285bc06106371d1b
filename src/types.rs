//! Core types for Workout Flux
//!
//! This module defines the data structures that flow through the calculation:
//! activity kinds, input packages, computed results and the JSON report envelope.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Activity kind, the closed set of supported workouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    Running,
    SportsWalking,
    Swimming,
}

impl ActivityKind {
    /// All supported kinds, in code-table order
    pub const ALL: [ActivityKind; 3] = [
        ActivityKind::Running,
        ActivityKind::SportsWalking,
        ActivityKind::Swimming,
    ];

    /// Resolve a three-letter package code. Codes are case sensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "RUN" => Some(ActivityKind::Running),
            "WLK" => Some(ActivityKind::SportsWalking),
            "SWM" => Some(ActivityKind::Swimming),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ActivityKind::Running => "RUN",
            ActivityKind::SportsWalking => "WLK",
            ActivityKind::Swimming => "SWM",
        }
    }

    /// Display label used as `activity_label` in results
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Running => "Running",
            ActivityKind::SportsWalking => "SportsWalking",
            ActivityKind::Swimming => "Swimming",
        }
    }

    /// Number of positional parameters the variant constructor takes
    pub fn arity(&self) -> usize {
        match self {
            ActivityKind::Running => 3,
            ActivityKind::SportsWalking => 4,
            ActivityKind::Swimming => 5,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Computed summary of a single workout
///
/// Produced in one piece by [`crate::workout::Workout::training_info`]; every
/// field is always populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutResult {
    /// Display label of the activity (e.g. "Running")
    pub activity_label: String,
    /// Workout duration as supplied (hours)
    pub duration_hours: f64,
    /// Covered distance (km)
    pub distance_km: f64,
    /// Mean speed (km/h)
    pub mean_speed_kmh: f64,
    /// Energy spent (kcal)
    pub calories_kcal: f64,
}

impl fmt::Display for WorkoutResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::report::format_message(self))
    }
}

/// One input package: an activity code plus its positional sensor readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPackage {
    /// Three-letter activity code ("RUN", "WLK", "SWM")
    pub workout_type: String,
    /// Positional parameters in constructor order
    pub data: Vec<f64>,
}

impl WorkoutPackage {
    pub fn new(workout_type: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            workout_type: workout_type.into(),
            data,
        }
    }
}

/// Result of processing one package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PackageOutcome {
    /// The code was recognized and the workout computed
    Computed {
        workout_type: String,
        result: WorkoutResult,
    },
    /// The code matched no known activity
    Unknown { workout_type: String },
}

impl PackageOutcome {
    pub fn result(&self) -> Option<&WorkoutResult> {
        match self {
            PackageOutcome::Computed { result, .. } => Some(result),
            PackageOutcome::Unknown { .. } => None,
        }
    }
}

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Complete JSON report for a batch of packages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    pub outcomes: Vec<PackageOutcome>,
}
