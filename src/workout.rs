//! Workout model
//!
//! Every activity shares one distance/speed model and brings its own calorie
//! formula:
//! - Running: speed-driven calories
//! - SportsWalking: speed and body height driven calories
//! - Swimming: stroke length and pool-lap based speed

use crate::error::WorkoutError;
use crate::types::{ActivityKind, WorkoutResult};

/// Distance covered by one step (m)
pub const STEP_LENGTH_M: f64 = 0.65;
/// Metres in a kilometre
pub const M_IN_KM: f64 = 1000.0;
/// Minutes in an hour
pub const MIN_IN_H: f64 = 60.0;

/// Calculation contract shared by all activities
///
/// `spent_calories` has no default: each activity must supply its formula.
pub trait Workout {
    /// Which activity this is
    fn kind(&self) -> ActivityKind;

    /// Shared readings (action count, duration, weight)
    fn base(&self) -> &TrainingBase;

    /// Distance covered by one action (m)
    fn step_length_m(&self) -> f64 {
        STEP_LENGTH_M
    }

    /// Covered distance (km)
    fn distance_km(&self) -> f64 {
        f64::from(self.base().action()) * self.step_length_m() / M_IN_KM
    }

    /// Mean speed over the whole workout (km/h)
    fn mean_speed_kmh(&self) -> f64 {
        self.distance_km() / self.base().duration_hours()
    }

    /// Energy spent (kcal)
    fn spent_calories(&self) -> f64;

    /// Assemble the full result for this workout
    fn training_info(&self) -> WorkoutResult {
        WorkoutResult {
            activity_label: self.kind().label().to_string(),
            duration_hours: self.base().duration_hours(),
            distance_km: self.distance_km(),
            mean_speed_kmh: self.mean_speed_kmh(),
            calories_kcal: self.spent_calories(),
        }
    }
}

/// Readings common to every workout
///
/// Only built through [`TrainingBase::new`], so the duration is always a
/// normal positive value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingBase {
    action: u32,
    duration_hours: f64,
    weight_kg: f64,
}

impl TrainingBase {
    pub fn new(action: u32, duration_hours: f64, weight_kg: f64) -> Result<Self, WorkoutError> {
        if !duration_hours.is_normal() || duration_hours < 0.0 {
            return Err(WorkoutError::InvalidDuration(duration_hours));
        }
        Ok(Self {
            action,
            duration_hours,
            weight_kg: require_positive("weight_kg", weight_kg)?,
        })
    }

    /// Number of actions (steps or strokes)
    pub fn action(&self) -> u32 {
        self.action
    }

    /// Workout duration (hours)
    pub fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    /// Athlete weight (kg)
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }
}

/// Check a physical measurement is finite and strictly positive
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, WorkoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(WorkoutError::InvalidParameter {
            field,
            value,
            reason: "must be a finite value greater than zero",
        })
    }
}

/// Reject readings whose computed quantities overflow
fn ensure_finite<W: Workout>(workout: W) -> Result<W, WorkoutError> {
    let info = workout.training_info();
    let quantities = [
        ("distance_km", info.distance_km),
        ("mean_speed_kmh", info.mean_speed_kmh),
        ("calories_kcal", info.calories_kcal),
    ];
    for (quantity, value) in quantities {
        if !value.is_finite() {
            return Err(WorkoutError::NonFiniteResult {
                activity: workout.kind().label(),
                quantity,
            });
        }
    }
    Ok(workout)
}

/// Running workout
#[derive(Debug, Clone, PartialEq)]
pub struct Running {
    base: TrainingBase,
}

impl Running {
    const CALORIES_MEAN_SPEED_MULTIPLIER: f64 = 18.0;
    const CALORIES_MEAN_SPEED_SHIFT: f64 = 1.79;

    pub fn new(action: u32, duration_hours: f64, weight_kg: f64) -> Result<Self, WorkoutError> {
        ensure_finite(Self {
            base: TrainingBase::new(action, duration_hours, weight_kg)?,
        })
    }
}

impl Workout for Running {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Running
    }

    fn base(&self) -> &TrainingBase {
        &self.base
    }

    fn spent_calories(&self) -> f64 {
        (Self::CALORIES_MEAN_SPEED_MULTIPLIER * self.mean_speed_kmh()
            + Self::CALORIES_MEAN_SPEED_SHIFT)
            * self.base.weight_kg()
            / M_IN_KM
            * self.base.duration_hours()
            * MIN_IN_H
    }
}

/// Race walking, calories depend on athlete height
#[derive(Debug, Clone, PartialEq)]
pub struct SportsWalking {
    base: TrainingBase,
    height_cm: f64,
}

impl SportsWalking {
    const CALORIES_WEIGHT_MULTIPLIER: f64 = 0.035;
    const CALORIES_SPEED_HEIGHT_MULTIPLIER: f64 = 0.029;
    const KMH_IN_MSEC: f64 = 0.278;
    const CM_IN_M: f64 = 100.0;

    pub fn new(
        action: u32,
        duration_hours: f64,
        weight_kg: f64,
        height_cm: f64,
    ) -> Result<Self, WorkoutError> {
        ensure_finite(Self {
            base: TrainingBase::new(action, duration_hours, weight_kg)?,
            height_cm: require_positive("height_cm", height_cm)?,
        })
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }
}

impl Workout for SportsWalking {
    fn kind(&self) -> ActivityKind {
        ActivityKind::SportsWalking
    }

    fn base(&self) -> &TrainingBase {
        &self.base
    }

    fn spent_calories(&self) -> f64 {
        let speed_m_per_sec = self.mean_speed_kmh() * Self::KMH_IN_MSEC;
        let height_m = self.height_cm / Self::CM_IN_M;
        (Self::CALORIES_WEIGHT_MULTIPLIER * self.base.weight_kg()
            + (speed_m_per_sec.powi(2) / height_m)
                * Self::CALORIES_SPEED_HEIGHT_MULTIPLIER
                * self.base.weight_kg())
            * self.base.duration_hours()
            * MIN_IN_H
    }
}

/// Pool swimming
///
/// Distance is counted from strokes, but mean speed comes from pool laps,
/// so the two are computed independently.
#[derive(Debug, Clone, PartialEq)]
pub struct Swimming {
    base: TrainingBase,
    pool_length_m: f64,
    pool_lap_count: u32,
}

impl Swimming {
    /// Distance covered by one stroke (m)
    pub const STROKE_LENGTH_M: f64 = 1.38;
    const CALORIES_MEAN_SPEED_SHIFT: f64 = 1.1;
    const CALORIES_WEIGHT_MULTIPLIER: f64 = 2.0;

    pub fn new(
        action: u32,
        duration_hours: f64,
        weight_kg: f64,
        pool_length_m: f64,
        pool_lap_count: u32,
    ) -> Result<Self, WorkoutError> {
        ensure_finite(Self {
            base: TrainingBase::new(action, duration_hours, weight_kg)?,
            pool_length_m: require_positive("pool_length_m", pool_length_m)?,
            pool_lap_count,
        })
    }

    pub fn pool_length_m(&self) -> f64 {
        self.pool_length_m
    }

    pub fn pool_lap_count(&self) -> u32 {
        self.pool_lap_count
    }
}

impl Workout for Swimming {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Swimming
    }

    fn base(&self) -> &TrainingBase {
        &self.base
    }

    fn step_length_m(&self) -> f64 {
        Self::STROKE_LENGTH_M
    }

    fn mean_speed_kmh(&self) -> f64 {
        self.pool_length_m * f64::from(self.pool_lap_count) / M_IN_KM / self.base.duration_hours()
    }

    fn spent_calories(&self) -> f64 {
        (self.mean_speed_kmh() + Self::CALORIES_MEAN_SPEED_SHIFT)
            * Self::CALORIES_WEIGHT_MULTIPLIER
            * self.base.weight_kg()
            * self.base.duration_hours()
    }
}

/// Any supported workout, as produced by the dispatch table
#[derive(Debug, Clone, PartialEq)]
pub enum Training {
    Running(Running),
    SportsWalking(SportsWalking),
    Swimming(Swimming),
}

impl Training {
    fn as_workout(&self) -> &dyn Workout {
        match self {
            Training::Running(w) => w,
            Training::SportsWalking(w) => w,
            Training::Swimming(w) => w,
        }
    }
}

impl Workout for Training {
    fn kind(&self) -> ActivityKind {
        self.as_workout().kind()
    }

    fn base(&self) -> &TrainingBase {
        self.as_workout().base()
    }

    fn step_length_m(&self) -> f64 {
        self.as_workout().step_length_m()
    }

    fn distance_km(&self) -> f64 {
        self.as_workout().distance_km()
    }

    fn mean_speed_kmh(&self) -> f64 {
        self.as_workout().mean_speed_kmh()
    }

    fn spent_calories(&self) -> f64 {
        self.as_workout().spent_calories()
    }
}

impl From<Running> for Training {
    fn from(w: Running) -> Self {
        Training::Running(w)
    }
}

impl From<SportsWalking> for Training {
    fn from(w: SportsWalking) -> Self {
        Training::SportsWalking(w)
    }
}

impl From<Swimming> for Training {
    fn from(w: Swimming) -> Self {
        Training::Swimming(w)
    }
}
