use chrono::NaiveDate;
use derive_more::{AsRef, Display, Into};

use crate::{CreateError, DeleteError, ReadError, UpdateError, Weight};

/// Persisted workout store. At most one workout exists per calendar
/// date; the engines only ever issue exact-date lookups.
#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn find_workout(&self, date: NaiveDate) -> Result<Option<Workout>, ReadError>;
    async fn create_workout(
        &self,
        date: NaiveDate,
        sets: Vec<ExerciseSet>,
    ) -> Result<Workout, CreateError>;
    async fn replace_workout_sets(
        &self,
        date: NaiveDate,
        sets: Vec<ExerciseSet>,
    ) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, date: NaiveDate) -> Result<NaiveDate, DeleteError>;
}

/// Canonical identifier of an exercise, e.g. `bench_press`.
#[derive(AsRef, Debug, Display, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseId(String);

impl ExerciseId {
    pub fn new(id: &str) -> Result<Self, ExerciseIdError> {
        let trimmed_id = id.trim();

        if trimmed_id.is_empty() {
            return Err(ExerciseIdError::Empty);
        }

        Ok(ExerciseId(trimmed_id.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseIdError {
    #[error("Exercise ID must not be empty")]
    Empty,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(1..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 1 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

/// A single performed set. Immutable once created; the weight is
/// always canonical kilograms.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSet {
    pub exercise_id: ExerciseId,
    pub weight: Weight,
    pub reps: Reps,
}

impl ExerciseSet {
    #[must_use]
    pub fn matches(&self, exercise_id: &ExerciseId) -> bool {
        self.exercise_id == *exercise_id
    }

    /// Lifted volume of this set in kilograms.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.weight.kg() * f64::from(u32::from(self.reps))
    }
}

/// All sets recorded for one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub date: NaiveDate,
    pub sets: Vec<ExerciseSet>,
}

impl Workout {
    /// Total volume of this workout's sets of the given exercise.
    #[must_use]
    pub fn volume_for(&self, exercise_id: &ExerciseId) -> f64 {
        self.sets
            .iter()
            .filter(|s| s.matches(exercise_id))
            .map(ExerciseSet::volume)
            .sum()
    }
}
