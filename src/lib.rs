//! Workout Flux - Summary metrics for running, walking and swimming workouts
//!
//! Flux turns raw workout readings into distance, mean speed and calories
//! through a small deterministic flow: package dispatch → workout model →
//! report formatting.
//!
//! ## Modules
//!
//! - **Workout Model**: shared distance/speed model plus per-activity calorie formulas
//! - **Dispatch Table**: activity code and positional readings to a workout
//! - **Report**: fixed-template text lines and JSON reports

pub mod dispatch;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod types;
pub mod workout;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use dispatch::read_package;
pub use error::WorkoutError;
pub use pipeline::{packages_to_messages, packages_to_report, process_packages};
pub use report::{format_message, ReportEncoder, UNKNOWN_WORKOUT_MESSAGE};
pub use types::{ActivityKind, PackageOutcome, WorkoutPackage, WorkoutResult};
pub use workout::{Running, SportsWalking, Swimming, Training, Workout};

/// Flux version embedded in all JSON reports
pub const FLUX_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for JSON reports
pub const PRODUCER_NAME: &str = "workout-flux";
