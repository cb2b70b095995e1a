use chrono::NaiveDate;
use log::{debug, error};

use crate::{
    CreateError, DeleteError, ExerciseSet, ReadError, UpdateError, Workout, WorkoutRepository,
};

/// Logging decorator around a [`WorkoutRepository`]. Failures are
/// logged and propagated unchanged; an unavailable store is expected
/// during offline use and only logged at debug level.
pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Unavailable) => {
                    debug!("failed to {} workout: {err}", $action);
                }
                _ => {
                    error!("failed to {} workout: {err}", $action);
                }
            },
        }
        result
    }};
}

impl<R: WorkoutRepository> WorkoutRepository for Service<R> {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(self.repository.read_workouts(), ReadError, "read")
    }

    async fn find_workout(&self, date: NaiveDate) -> Result<Option<Workout>, ReadError> {
        log_on_error!(self.repository.find_workout(date), ReadError, "find")
    }

    async fn create_workout(
        &self,
        date: NaiveDate,
        sets: Vec<ExerciseSet>,
    ) -> Result<Workout, CreateError> {
        log_on_error!(
            self.repository.create_workout(date, sets),
            CreateError,
            "create"
        )
    }

    async fn replace_workout_sets(
        &self,
        date: NaiveDate,
        sets: Vec<ExerciseSet>,
    ) -> Result<Workout, UpdateError> {
        log_on_error!(
            self.repository.replace_workout_sets(date, sets),
            UpdateError,
            "replace"
        )
    }

    async fn delete_workout(&self, date: NaiveDate) -> Result<NaiveDate, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(date),
            DeleteError,
            "delete"
        )
    }
}
