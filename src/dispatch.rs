//! Dispatch table
//!
//! Maps a three-letter activity code and a positional parameter list to the
//! matching workout constructor.

use crate::error::WorkoutError;
use crate::types::ActivityKind;
use crate::workout::{Running, SportsWalking, Swimming, Training};
use tracing::{debug, warn};

/// Build a workout from a package code and its positional readings.
///
/// Returns `Ok(None)` when `code` names no known activity. A recognized code
/// with the wrong number of parameters, or with out-of-range values, is an
/// error.
///
/// # Example
/// ```
/// use workout_flux::dispatch::read_package;
/// use workout_flux::workout::Workout;
///
/// let training = read_package("RUN", &[15000.0, 1.0, 75.0]).unwrap().unwrap();
/// assert_eq!(training.training_info().activity_label, "Running");
/// assert!(read_package("XYZ", &[1.0]).unwrap().is_none());
/// ```
pub fn read_package(code: &str, data: &[f64]) -> Result<Option<Training>, WorkoutError> {
    let Some(kind) = ActivityKind::from_code(code) else {
        warn!(code, "unknown workout type");
        return Ok(None);
    };

    build(kind, data).map(Some)
}

/// Construct the variant for an already resolved activity kind
pub fn build(kind: ActivityKind, data: &[f64]) -> Result<Training, WorkoutError> {
    debug!(code = kind.code(), params = ?data, "dispatching workout");

    let training = match (kind, data) {
        (ActivityKind::Running, &[action, duration, weight]) => {
            Running::new(count("action", action)?, duration, weight)?.into()
        }
        (ActivityKind::SportsWalking, &[action, duration, weight, height]) => {
            SportsWalking::new(count("action", action)?, duration, weight, height)?.into()
        }
        (ActivityKind::Swimming, &[action, duration, weight, length_pool, count_pool]) => {
            Swimming::new(
                count("action", action)?,
                duration,
                weight,
                length_pool,
                count("pool_lap_count", count_pool)?,
            )?
            .into()
        }
        _ => {
            return Err(WorkoutError::ArityMismatch {
                code: kind.code().to_string(),
                expected: kind.arity(),
                actual: data.len(),
            })
        }
    };

    Ok(training)
}

/// Convert a positional reading into a whole, non-negative count
fn count(field: &'static str, value: f64) -> Result<u32, WorkoutError> {
    if !value.is_finite() || value < 0.0 {
        return Err(WorkoutError::InvalidParameter {
            field,
            value,
            reason: "must be a non-negative count",
        });
    }
    if value.fract() != 0.0 {
        return Err(WorkoutError::InvalidParameter {
            field,
            value,
            reason: "must be a whole number",
        });
    }
    if value > f64::from(u32::MAX) {
        return Err(WorkoutError::InvalidParameter {
            field,
            value,
            reason: "count is too large",
        });
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::Workout;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dispatch_known_codes() {
        let run = read_package("RUN", &[15000.0, 1.0, 75.0]).unwrap().unwrap();
        assert_eq!(run.kind(), ActivityKind::Running);

        let walk = read_package("WLK", &[9000.0, 1.0, 75.0, 180.0])
            .unwrap()
            .unwrap();
        assert_eq!(walk.kind(), ActivityKind::SportsWalking);
        match &walk {
            Training::SportsWalking(w) => assert_eq!(w.height_cm(), 180.0),
            other => panic!("unexpected variant: {other:?}"),
        }

        let swim = read_package("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0])
            .unwrap()
            .unwrap();
        assert_eq!(swim.kind(), ActivityKind::Swimming);
        match &swim {
            Training::Swimming(w) => {
                assert_eq!(w.pool_length_m(), 25.0);
                assert_eq!(w.pool_lap_count(), 40);
                assert_eq!(w.base().action(), 720);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
        assert_eq!(
            swim,
            Training::Swimming(Swimming::new(720, 1.0, 80.0, 25.0, 40).unwrap())
        );
    }

    #[test]
    fn test_unknown_code_is_absent() {
        assert!(read_package("XYZ", &[1.0, 2.0, 3.0]).unwrap().is_none());
        assert!(read_package("", &[]).unwrap().is_none());
    }

    #[test]
    fn test_arity_mismatch() {
        let err = read_package("RUN", &[15000.0, 1.0]).unwrap_err();
        match err {
            WorkoutError::ArityMismatch {
                code,
                expected,
                actual,
            } => {
                assert_eq!(code, "RUN");
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Running parameters are too few for swimming
        assert!(matches!(
            read_package("SWM", &[15000.0, 1.0, 75.0]),
            Err(WorkoutError::ArityMismatch { expected: 5, .. })
        ));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let err = read_package("RUN", &[15000.0, 0.0, 75.0]).unwrap_err();
        assert!(matches!(err, WorkoutError::InvalidDuration(_)));

        let err = read_package("RUN", &[15000.0, 1e-310, 75.0]).unwrap_err();
        assert!(matches!(err, WorkoutError::InvalidDuration(_)));
    }

    #[test]
    fn test_overflowing_readings_rejected() {
        let err = read_package("RUN", &[15000.0, 1.0, 1e308]).unwrap_err();
        assert!(matches!(
            err,
            WorkoutError::NonFiniteResult {
                quantity: "calories_kcal",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_counts() {
        assert!(matches!(
            read_package("RUN", &[10.5, 1.0, 75.0]),
            Err(WorkoutError::InvalidParameter { field: "action", .. })
        ));
        assert!(matches!(
            read_package("RUN", &[-1.0, 1.0, 75.0]),
            Err(WorkoutError::InvalidParameter { field: "action", .. })
        ));
        assert!(matches!(
            read_package("SWM", &[720.0, 1.0, 80.0, 25.0, 40.5]),
            Err(WorkoutError::InvalidParameter {
                field: "pool_lap_count",
                ..
            })
        ));
        assert!(matches!(
            read_package("RUN", &[1e12, 1.0, 75.0]),
            Err(WorkoutError::InvalidParameter { field: "action", .. })
        ));
    }
}
