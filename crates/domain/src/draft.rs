//! Editable-draft reconciliation.
//!
//! A [`DraftLog`] shadows the persisted workout store for one selected
//! date at a time. In-progress edits for previously visited dates are
//! kept in a session-scoped cache which takes priority over the store,
//! so switching dates never clobbers uncommitted work. Only an
//! explicit [`DraftLog::commit`] writes through to the store.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    Catalog, CommitError, ExerciseId, ExerciseSet, Language, ReadError, Reps, Weight, WeightUnit,
    WorkoutRepository,
};

/// Set rows seeded when an exercise is appended to a draft.
pub const DEFAULT_SET_COUNT: usize = 2;

/// Fraction digits used when rendering a stored weight into an
/// editable text field.
const WEIGHT_FRACTION_DIGITS: usize = 3;

#[derive(Deref, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftEntryId(Uuid);

impl DraftEntryId {
    fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Deref, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftRowId(Uuid);

impl DraftRowId {
    fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

/// One editable set row holding raw, possibly invalid, input text.
/// Validity is derived by parsing, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSetRow {
    id: DraftRowId,
    pub weight_text: String,
    pub reps_text: String,
}

impl DraftSetRow {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: DraftRowId::random(),
            weight_text: String::new(),
            reps_text: String::new(),
        }
    }

    /// Render a persisted set back into editable text in the given
    /// display unit.
    #[must_use]
    pub fn from_set(set: &ExerciseSet, unit: WeightUnit) -> Self {
        Self {
            id: DraftRowId::random(),
            weight_text: unit.format(set.weight, WEIGHT_FRACTION_DIGITS),
            reps_text: u32::from(set.reps).to_string(),
        }
    }

    #[must_use]
    pub fn id(&self) -> DraftRowId {
        self.id
    }

    /// The row's values if both texts parse, interpreting the weight
    /// text in `unit`.
    #[must_use]
    pub fn parsed(&self, unit: WeightUnit) -> Option<(Weight, Reps)> {
        let weight = Weight::parse(&self.weight_text, unit).ok()?;
        let reps = Reps::try_from(self.reps_text.as_str()).ok()?;
        Some((weight, reps))
    }

    #[must_use]
    pub fn is_valid(&self, unit: WeightUnit) -> bool {
        self.parsed(unit).is_some()
    }
}

impl Default for DraftSetRow {
    fn default() -> Self {
        Self::new()
    }
}

/// One exercise within a draft. The identity is independent of the
/// exercise id, so the same exercise may appear twice in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftExerciseEntry {
    id: DraftEntryId,
    pub exercise_id: ExerciseId,
    pub rows: Vec<DraftSetRow>,
}

impl DraftExerciseEntry {
    #[must_use]
    pub fn new(exercise_id: ExerciseId, set_count: usize) -> Self {
        Self {
            id: DraftEntryId::random(),
            exercise_id,
            rows: (0..set_count).map(|_| DraftSetRow::new()).collect(),
        }
    }

    fn from_rows(exercise_id: ExerciseId, rows: Vec<DraftSetRow>) -> Self {
        Self {
            id: DraftEntryId::random(),
            exercise_id,
            rows,
        }
    }

    #[must_use]
    pub fn id(&self) -> DraftEntryId {
        self.id
    }

    /// Materialize the entry's valid rows, in order. Invalid rows are
    /// silently omitted.
    #[must_use]
    pub fn sets(&self, unit: WeightUnit) -> Vec<ExerciseSet> {
        self.rows
            .iter()
            .filter_map(|row| {
                row.parsed(unit).map(|(weight, reps)| ExerciseSet {
                    exercise_id: self.exercise_id.clone(),
                    weight,
                    reps,
                })
            })
            .collect()
    }

    #[must_use]
    pub fn valid_row_count(&self, unit: WeightUnit) -> usize {
        self.rows.iter().filter(|row| row.is_valid(unit)).count()
    }
}

/// Draft editing state for the currently selected date, backed by a
/// per-date cache of drafts from earlier in the session.
///
/// The cache is unbounded for the session lifetime: one buffer is
/// retained per visited date.
pub struct DraftLog {
    selected_date: NaiveDate,
    entries: Vec<DraftExerciseEntry>,
    cache: BTreeMap<NaiveDate, Vec<DraftExerciseEntry>>,
    last_synced: Option<NaiveDate>,
    revision: u64,
}

impl DraftLog {
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            selected_date: date,
            entries: Vec::new(),
            cache: BTreeMap::new(),
            last_synced: None,
            revision: 0,
        }
    }

    #[must_use]
    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    #[must_use]
    pub fn entries(&self) -> &[DraftExerciseEntry] {
        &self.entries
    }

    #[must_use]
    pub fn entry(&self, id: DraftEntryId) -> Option<&DraftExerciseEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Monotonic change marker. Observers repaint when it differs
    /// from the value they last saw.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Change the selected date. No data moves until the next
    /// [`DraftLog::sync`], keeping navigation free of I/O.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    /// Reconcile the active buffer with the selected date.
    ///
    /// The buffer of the date being left is snapshotted into the
    /// cache first, then the new date is loaded from the cache if
    /// present (uncommitted edits beat persisted data) and from the
    /// store otherwise. Store-loaded sets are grouped by exercise and
    /// sorted by localized display name. A store failure leaves all
    /// state untouched.
    pub async fn sync(
        &mut self,
        repository: &impl WorkoutRepository,
        catalog: &Catalog,
        language: Language,
        unit: WeightUnit,
    ) -> Result<(), ReadError> {
        let date = self.selected_date;

        if self.last_synced == Some(date) {
            self.cache.insert(date, self.entries.clone());
            return Ok(());
        }

        let entries = if let Some(cached) = self.cache.get(&date) {
            cached.clone()
        } else {
            match repository.find_workout(date).await? {
                Some(workout) => {
                    let mut grouped: BTreeMap<ExerciseId, Vec<DraftSetRow>> = BTreeMap::new();
                    for set in &workout.sets {
                        grouped
                            .entry(set.exercise_id.clone())
                            .or_default()
                            .push(DraftSetRow::from_set(set, unit));
                    }
                    let mut entries = grouped
                        .into_iter()
                        .map(|(exercise_id, rows)| {
                            DraftExerciseEntry::from_rows(exercise_id, rows)
                        })
                        .collect::<Vec<_>>();
                    entries.sort_by_key(|e| catalog.display_name(&e.exercise_id, language));
                    entries
                }
                None => Vec::new(),
            }
        };

        if let Some(last) = self.last_synced {
            self.cache.insert(last, self.entries.clone());
        }
        self.entries = entries;
        self.last_synced = Some(date);
        self.revision += 1;

        Ok(())
    }

    /// Write the draft through to the store.
    ///
    /// A draft that materializes to no valid sets deletes the date's
    /// record if one exists and is a no-op otherwise. A non-empty
    /// draft replaces the record's sets wholesale or inserts a new
    /// record. The buffer is never modified; the cache is updated
    /// only after the store write succeeded, so a failed commit
    /// leaves all caller-visible state unchanged.
    pub async fn commit(
        &mut self,
        repository: &impl WorkoutRepository,
        unit: WeightUnit,
    ) -> Result<(), CommitError> {
        let date = self.selected_date;
        let sets = self
            .entries
            .iter()
            .flat_map(|entry| entry.sets(unit))
            .collect::<Vec<_>>();

        if sets.is_empty() {
            if repository.find_workout(date).await?.is_none() {
                return Ok(());
            }
            repository.delete_workout(date).await?;
        } else if repository.find_workout(date).await?.is_some() {
            repository.replace_workout_sets(date, sets).await?;
        } else {
            repository.create_workout(date, sets).await?;
        }

        self.cache.insert(date, self.entries.clone());
        Ok(())
    }

    /// True iff at least one entry has at least one valid row. Gates
    /// save affordances; no side effects.
    #[must_use]
    pub fn has_committable_content(&self, unit: WeightUnit) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.rows.iter().any(|row| row.is_valid(unit)))
    }

    pub fn append_exercise(&mut self, exercise_id: ExerciseId) {
        self.entries
            .push(DraftExerciseEntry::new(exercise_id, DEFAULT_SET_COUNT));
        self.revision += 1;
    }

    pub fn remove_exercise(&mut self, id: DraftEntryId) {
        let len = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() != len {
            self.revision += 1;
        }
    }

    pub fn move_exercise(&mut self, from: usize, to: usize) {
        if from == to || from >= self.entries.len() || to >= self.entries.len() {
            return;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        self.revision += 1;
    }

    pub fn add_set_row(&mut self, entry_id: DraftEntryId) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == entry_id) {
            entry.rows.push(DraftSetRow::new());
            self.revision += 1;
        }
    }

    pub fn remove_set_row(&mut self, entry_id: DraftEntryId, row_id: DraftRowId) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == entry_id) {
            let len = entry.rows.len();
            entry.rows.retain(|row| row.id != row_id);
            if entry.rows.len() != len {
                self.revision += 1;
            }
        }
    }

    pub fn update_set_row(
        &mut self,
        entry_id: DraftEntryId,
        row_id: DraftRowId,
        weight_text: &str,
        reps_text: &str,
    ) {
        if let Some(row) = self.row_mut(entry_id, row_id) {
            row.weight_text = weight_text.to_string();
            row.reps_text = reps_text.to_string();
            self.revision += 1;
        }
    }

    #[must_use]
    pub fn weight_text(&self, entry_id: DraftEntryId, row_id: DraftRowId) -> Option<&str> {
        self.row(entry_id, row_id).map(|row| row.weight_text.as_str())
    }

    #[must_use]
    pub fn reps_text(&self, entry_id: DraftEntryId, row_id: DraftRowId) -> Option<&str> {
        self.row(entry_id, row_id).map(|row| row.reps_text.as_str())
    }

    /// Reset the active buffer without touching cache or store.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.revision += 1;
    }

    fn row(&self, entry_id: DraftEntryId, row_id: DraftRowId) -> Option<&DraftSetRow> {
        self.entries
            .iter()
            .find(|e| e.id == entry_id)?
            .rows
            .iter()
            .find(|row| row.id == row_id)
    }

    fn row_mut(&mut self, entry_id: DraftEntryId, row_id: DraftRowId) -> Option<&mut DraftSetRow> {
        self.entries
            .iter_mut()
            .find(|e| e.id == entry_id)?
            .rows
            .iter_mut()
            .find(|row| row.id == row_id)
    }
}
