#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod calendar;
pub mod catalog;
pub mod draft;
mod error;
mod service;
pub mod volume;
mod weight;
mod workout;

pub use calendar::{DefaultInterval, Interval};
pub use catalog::{
    Catalog, CatalogEntry, CatalogError, Equipment, Language, MovementPattern, MuscleGroup,
};
pub use draft::{DraftEntryId, DraftExerciseEntry, DraftLog, DraftRowId, DraftSetRow};
pub use error::{CommitError, CreateError, DeleteError, ReadError, StorageError, UpdateError};
pub use service::Service;
pub use volume::Period;
pub use weight::{LB_PER_KG, Weight, WeightError, WeightUnit};
pub use workout::{
    ExerciseId, ExerciseIdError, ExerciseSet, Reps, RepsError, Workout, WorkoutRepository,
};
