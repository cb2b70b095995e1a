//! Durable single-file store.
//!
//! The whole store (settings and workouts) lives in one JSON file,
//! loaded on open and rewritten on every mutation. A failed write
//! rolls the in-memory change back, so reads keep matching the file
//! and the operation can be retried. Weights are persisted as
//! canonical kilograms; DTO values are validated against the domain
//! types when loading.

use std::{
    cell::RefCell,
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use trainlog_domain::{
    CreateError, DeleteError, ExerciseId, ExerciseSet, ReadError, Reps, StorageError, UpdateError,
    Weight, Workout, WorkoutRepository,
};

use crate::Settings;

#[derive(thiserror::Error, Debug)]
pub enum FileError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Format(#[from] serde_json::Error),
    #[error("invalid stored value: {0}")]
    InvalidData(String),
}

impl From<FileError> for StorageError {
    fn from(value: FileError) -> Self {
        StorageError::Other(Box::new(value))
    }
}

#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct FileContents {
    settings: Settings,
    workouts: Vec<WorkoutDto>,
}

#[derive(Serialize, Deserialize)]
struct WorkoutDto {
    date: NaiveDate,
    sets: Vec<SetDto>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetDto {
    exercise_id: String,
    weight: f64,
    reps: u32,
}

impl From<&ExerciseSet> for SetDto {
    fn from(value: &ExerciseSet) -> Self {
        SetDto {
            exercise_id: value.exercise_id.to_string(),
            weight: value.weight.kg(),
            reps: value.reps.into(),
        }
    }
}

impl TryFrom<&SetDto> for ExerciseSet {
    type Error = FileError;

    fn try_from(value: &SetDto) -> Result<Self, Self::Error> {
        Ok(ExerciseSet {
            exercise_id: ExerciseId::new(&value.exercise_id)
                .map_err(|e| FileError::InvalidData(e.to_string()))?,
            weight: Weight::new(value.weight)
                .map_err(|e| FileError::InvalidData(e.to_string()))?,
            reps: Reps::new(value.reps).map_err(|e| FileError::InvalidData(e.to_string()))?,
        })
    }
}

pub struct JsonFileStorage {
    path: PathBuf,
    settings: RefCell<Settings>,
    workouts: RefCell<BTreeMap<NaiveDate, Vec<ExerciseSet>>>,
}

impl JsonFileStorage {
    /// Open a store, creating an empty one if the file is missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FileError> {
        let path = path.as_ref().to_path_buf();
        let contents = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str::<FileContents>(&json)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no store at {}, starting empty", path.display());
                FileContents::default()
            }
            Err(err) => return Err(err.into()),
        };

        let mut workouts = BTreeMap::new();
        for workout in &contents.workouts {
            let sets = workout
                .sets
                .iter()
                .map(ExerciseSet::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            workouts.insert(workout.date, sets);
        }

        Ok(Self {
            path,
            settings: RefCell::new(contents.settings),
            workouts: RefCell::new(workouts),
        })
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        *self.settings.borrow()
    }

    pub fn write_settings(&self, settings: Settings) -> Result<(), FileError> {
        *self.settings.borrow_mut() = settings;
        self.persist()
    }

    fn persist(&self) -> Result<(), FileError> {
        let contents = FileContents {
            settings: *self.settings.borrow(),
            workouts: self
                .workouts
                .borrow()
                .iter()
                .map(|(date, sets)| WorkoutDto {
                    date: *date,
                    sets: sets.iter().map(SetDto::from).collect(),
                })
                .collect(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&contents)?)?;
        Ok(())
    }
}

impl WorkoutRepository for JsonFileStorage {
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
        Ok(self.workouts.borrow().get(&date).map(|sets| Workout {
            date,
            sets: sets.clone(),
        }))
    }

    async fn create_workout(
        &self,
        date: NaiveDate,
        sets: Vec<ExerciseSet>,
    ) -> Result<Workout, CreateError> {
        {
            let mut workouts = self.workouts.borrow_mut();
            if workouts.contains_key(&date) {
                return Err(CreateError::Conflict);
            }
            workouts.insert(date, sets.clone());
        }
        if let Err(err) = self.persist() {
            self.workouts.borrow_mut().remove(&date);
            return Err(StorageError::from(err).into());
        }
        Ok(Workout { date, sets })
    }

    async fn replace_workout_sets(
        &self,
        date: NaiveDate,
        sets: Vec<ExerciseSet>,
    ) -> Result<Workout, UpdateError> {
        let previous = {
            let mut workouts = self.workouts.borrow_mut();
            if !workouts.contains_key(&date) {
                return Err(UpdateError::NotFound);
            }
            workouts.insert(date, sets.clone())
        };
        if let Err(err) = self.persist() {
            if let Some(previous) = previous {
                self.workouts.borrow_mut().insert(date, previous);
            }
            return Err(StorageError::from(err).into());
        }
        Ok(Workout { date, sets })
    }

    async fn delete_workout(&self, date: NaiveDate) -> Result<NaiveDate, DeleteError> {
        let Some(previous) = self.workouts.borrow_mut().remove(&date) else {
            return Err(DeleteError::NotFound);
        };
        if let Err(err) = self.persist() {
            self.workouts.borrow_mut().insert(date, previous);
            return Err(StorageError::from(err).into());
        }
        Ok(date)
    }
}
