use std::{cell::RefCell, collections::BTreeMap};

use chrono::NaiveDate;
use trainlog_domain::{
    CreateError, DeleteError, ExerciseSet, ReadError, UpdateError, Workout, WorkoutRepository,
};

/// Session-scoped store without durability. Backs tests and scratch
/// sessions; keyed by date like every store implementation.
#[derive(Default)]
pub struct MemoryStorage {
    workouts: RefCell<BTreeMap<NaiveDate, Vec<ExerciseSet>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkoutRepository for MemoryStorage {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        Ok(self
            .workouts
            .borrow()
            .iter()
            .map(|(date, sets)| Workout {
                date: *date,
                sets: sets.clone(),
            })
            .collect())
    }

    async fn find_workout(&self, date: NaiveDate) -> Result<Option<Workout>, ReadError> {
        Ok(self
            .workouts
            .borrow()
            .get(&date)
            .map(|sets| Workout {
                date,
                sets: sets.clone(),
            }))
    }

    async fn create_workout(
        &self,
        date: NaiveDate,
        sets: Vec<ExerciseSet>,
    ) -> Result<Workout, CreateError> {
        let mut workouts = self.workouts.borrow_mut();
        if workouts.contains_key(&date) {
            return Err(CreateError::Conflict);
        }
        workouts.insert(date, sets.clone());
        Ok(Workout { date, sets })
    }

    async fn replace_workout_sets(
        &self,
        date: NaiveDate,
        sets: Vec<ExerciseSet>,
    ) -> Result<Workout, UpdateError> {
        let mut workouts = self.workouts.borrow_mut();
        if !workouts.contains_key(&date) {
            return Err(UpdateError::NotFound);
        }
        workouts.insert(date, sets.clone());
        Ok(Workout { date, sets })
    }

    async fn delete_workout(&self, date: NaiveDate) -> Result<NaiveDate, DeleteError> {
        if self.workouts.borrow_mut().remove(&date).is_none() {
            return Err(DeleteError::NotFound);
        }
        Ok(date)
    }
}
