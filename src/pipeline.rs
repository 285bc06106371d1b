//! Package pipeline
//!
//! This module provides the batch API for Workout Flux. It parses workout
//! packages, runs each one through the dispatch table and renders the results.

use crate::dispatch::read_package;
use crate::error::WorkoutError;
use crate::report::{format_outcome, ReportEncoder};
use crate::types::{PackageOutcome, WorkoutPackage};
use crate::workout::Workout;
use tracing::info;

/// Built-in sample packages used by the demo harness
pub fn demo_packages() -> Vec<WorkoutPackage> {
    vec![
        WorkoutPackage::new("SWM", vec![720.0, 1.0, 80.0, 25.0, 40.0]),
        WorkoutPackage::new("RUN", vec![15000.0, 1.0, 75.0]),
        WorkoutPackage::new("WLK", vec![9000.0, 1.0, 75.0, 180.0]),
    ]
}

/// Parse a JSON string containing an array of packages
pub fn parse_array(json: &str) -> Result<Vec<WorkoutPackage>, WorkoutError> {
    let packages: Vec<WorkoutPackage> = serde_json::from_str(json)?;
    Ok(packages)
}

/// Parse NDJSON (newline-delimited JSON) containing packages
pub fn parse_ndjson(ndjson: &str) -> Result<Vec<WorkoutPackage>, WorkoutError> {
    let mut packages = Vec::new();
    for (line_num, line) in ndjson.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<WorkoutPackage>(trimmed) {
            Ok(package) => packages.push(package),
            Err(e) => {
                return Err(WorkoutError::ParseError(format!(
                    "Failed to parse line {}: {}",
                    line_num + 1,
                    e
                )));
            }
        }
    }
    Ok(packages)
}

/// Dispatch and compute a single package
pub fn process_package(package: &WorkoutPackage) -> Result<PackageOutcome, WorkoutError> {
    let outcome = match read_package(&package.workout_type, &package.data)? {
        Some(training) => PackageOutcome::Computed {
            workout_type: package.workout_type.clone(),
            result: training.training_info(),
        },
        None => PackageOutcome::Unknown {
            workout_type: package.workout_type.clone(),
        },
    };
    Ok(outcome)
}

/// Process a batch of packages in order.
///
/// Stops at the first contract violation; unknown codes become
/// [`PackageOutcome::Unknown`] and do not stop the batch.
pub fn process_packages(packages: &[WorkoutPackage]) -> Result<Vec<PackageOutcome>, WorkoutError> {
    let outcomes = packages
        .iter()
        .map(process_package)
        .collect::<Result<Vec<_>, _>>()?;

    let unknown = outcomes
        .iter()
        .filter(|o| matches!(o, PackageOutcome::Unknown { .. }))
        .count();
    info!(
        total = outcomes.len(),
        unknown,
        "processed workout packages"
    );

    Ok(outcomes)
}

/// Convert a JSON array of packages into report lines.
///
/// # Example
/// ```
/// let lines = workout_flux::packages_to_messages(
///     r#"[{"workout_type": "RUN", "data": [15000, 1, 75]}]"#.to_string(),
/// ).unwrap();
/// assert!(lines[0].starts_with("Activity type: Running; Duration: 1.000 h"));
/// ```
pub fn packages_to_messages(raw_json: String) -> Result<Vec<String>, WorkoutError> {
    let packages = parse_array(&raw_json)?;
    let outcomes = process_packages(&packages)?;
    Ok(outcomes.iter().map(format_outcome).collect())
}

/// Convert a JSON array of packages into a JSON report
pub fn packages_to_report(raw_json: String) -> Result<String, WorkoutError> {
    let packages = parse_array(&raw_json)?;
    let outcomes = process_packages(&packages)?;
    ReportEncoder::new().encode_to_json(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::UNKNOWN_WORKOUT_MESSAGE;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_demo_packages() {
        let outcomes = process_packages(&demo_packages()).unwrap();
        assert_eq!(outcomes.len(), 3);

        let labels: Vec<&str> = outcomes
            .iter()
            .map(|o| o.result().unwrap().activity_label.as_str())
            .collect();
        assert_eq!(labels, vec!["Swimming", "Running", "SportsWalking"]);

        let swim = outcomes[0].result().unwrap();
        assert!((swim.mean_speed_kmh - 1.0).abs() < 1e-9);
        assert!((swim.calories_kcal - 336.0).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_code_does_not_stop_batch() {
        let packages = vec![
            WorkoutPackage::new("XYZ", vec![1.0, 2.0]),
            WorkoutPackage::new("RUN", vec![15000.0, 1.0, 75.0]),
        ];
        let outcomes = process_packages(&packages).unwrap();

        assert_eq!(
            outcomes[0],
            PackageOutcome::Unknown {
                workout_type: "XYZ".to_string()
            }
        );
        assert!(outcomes[1].result().is_some());
    }

    #[test]
    fn test_contract_violation_fails_batch() {
        let packages = vec![
            WorkoutPackage::new("RUN", vec![15000.0, 1.0, 75.0]),
            WorkoutPackage::new("WLK", vec![9000.0, 1.0, 75.0]),
        ];
        let err = process_packages(&packages).unwrap_err();
        assert!(matches!(err, WorkoutError::ArityMismatch { .. }));
    }

    #[test]
    fn test_parse_ndjson() {
        let ndjson = r#"{"workout_type":"RUN","data":[15000,1,75]}

{"workout_type":"SWM","data":[720,1,80,25,40]}"#;
        let packages = parse_ndjson(ndjson).unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[1].workout_type, "SWM");
    }

    #[test]
    fn test_parse_ndjson_reports_line() {
        let ndjson = "{\"workout_type\":\"RUN\",\"data\":[1,1,1]}\nnot json\n";
        match parse_ndjson(ndjson).unwrap_err() {
            WorkoutError::ParseError(msg) => assert!(msg.contains("line 2")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_packages_to_messages() {
        let json = r#"[
            {"workout_type": "RUN", "data": [15000, 1, 75]},
            {"workout_type": "ABC", "data": []}
        ]"#;
        let lines = packages_to_messages(json.to_string()).unwrap();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Distance: 9.750 km"));
        assert_eq!(lines[1], UNKNOWN_WORKOUT_MESSAGE);
    }

    #[test]
    fn test_packages_to_report() {
        let json = r#"[{"workout_type": "SWM", "data": [720, 1, 80, 25, 40]}]"#;
        let report = packages_to_report(json.to_string()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();

        assert_eq!(value["outcomes"][0]["result"]["activity_label"], "Swimming");
        let calories = value["outcomes"][0]["result"]["calories_kcal"].as_f64().unwrap();
        assert!((calories - 336.0).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_json() {
        let err = packages_to_messages("not json".to_string()).unwrap_err();
        assert!(matches!(err, WorkoutError::JsonError(_)));
    }
}
