//! End-to-end reconciliation between drafts, the store and the
//! aggregation functions.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use trainlog_domain::{
    Catalog, DraftLog, ExerciseId, Interval, Language, Period, Service, WeightUnit,
    WorkoutRepository, volume,
};
use trainlog_storage::MemoryStorage;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn exercise_id(id: &str) -> ExerciseId {
    ExerciseId::new(id).unwrap()
}

async fn sync(log: &mut DraftLog, storage: &impl WorkoutRepository) {
    log.sync(storage, Catalog::builtin(), Language::English, WeightUnit::Kg)
        .await
        .unwrap();
}

fn add_sets(log: &mut DraftLog, id: &str, sets: &[(&str, &str)]) {
    log.append_exercise(exercise_id(id));
    let entry_id = log.entries().last().unwrap().id();
    while log.entries().last().unwrap().rows.len() < sets.len() {
        log.add_set_row(entry_id);
    }
    let row_ids = log
        .entries()
        .last()
        .unwrap()
        .rows
        .iter()
        .map(trainlog_domain::DraftSetRow::id)
        .collect::<Vec<_>>();
    for (row_id, (weight_text, reps_text)) in row_ids.iter().zip(sets) {
        log.update_set_row(entry_id, *row_id, weight_text, reps_text);
    }
}

fn recorded_tuples(log: &DraftLog, unit: WeightUnit) -> Vec<(String, f64, u32)> {
    log.entries()
        .iter()
        .flat_map(|entry| entry.sets(unit))
        .map(|set| {
            (
                set.exercise_id.to_string(),
                set.weight.kg(),
                set.reps.into(),
            )
        })
        .collect()
}

#[tokio::test]
async fn commit_survives_cold_cache_round_trip() {
    let storage = Service::new(MemoryStorage::new());

    let mut log = DraftLog::new(date(1));
    sync(&mut log, &storage).await;
    add_sets(&mut log, "squat", &[("120", "3"), ("100", "8")]);
    add_sets(&mut log, "bench_press", &[("100", "5")]);
    log.commit(&storage, WeightUnit::Kg).await.unwrap();

    // A fresh engine has a cold cache and must rebuild the draft from
    // the store, reordered only by display name.
    let mut cold = DraftLog::new(date(2));
    sync(&mut cold, &storage).await;
    cold.select_date(date(1));
    sync(&mut cold, &storage).await;

    assert_eq!(
        recorded_tuples(&cold, WeightUnit::Kg),
        vec![
            ("bench_press".to_string(), 100.0, 5),
            ("squat".to_string(), 120.0, 3),
            ("squat".to_string(), 100.0, 8),
        ]
    );
}

#[tokio::test]
async fn commit_clear_commit_deletes_then_noops() {
    let storage = MemoryStorage::new();

    let mut log = DraftLog::new(date(1));
    sync(&mut log, &storage).await;
    add_sets(&mut log, "bench_press", &[("100", "5")]);
    log.commit(&storage, WeightUnit::Kg).await.unwrap();
    assert!(storage.find_workout(date(1)).await.unwrap().is_some());

    log.clear();
    log.commit(&storage, WeightUnit::Kg).await.unwrap();
    assert!(storage.find_workout(date(1)).await.unwrap().is_none());

    log.commit(&storage, WeightUnit::Kg).await.unwrap();
    assert!(storage.find_workout(date(1)).await.unwrap().is_none());
}

#[tokio::test]
async fn committed_history_feeds_aggregation() {
    let storage = MemoryStorage::new();
    let mut log = DraftLog::new(date(1));

    // Two Mondays one week apart.
    sync(&mut log, &storage).await;
    add_sets(&mut log, "bench_press", &[("100", "5")]);
    log.commit(&storage, WeightUnit::Kg).await.unwrap();

    log.select_date(date(8));
    sync(&mut log, &storage).await;
    add_sets(&mut log, "bench_press", &[("110", "5")]);
    log.commit(&storage, WeightUnit::Kg).await.unwrap();

    let history = storage.read_workouts().await.unwrap();
    assert_eq!(
        volume::weekly_volumes(&exercise_id("bench_press"), &history),
        vec![(date(1), 500.0), (date(8), 550.0)]
    );
    assert_eq!(
        volume::weekly_volumes(&exercise_id("deadlift"), &history),
        vec![]
    );

    let interval = Interval::from(date(2)..=date(8));
    let series = volume::chart_series(
        &exercise_id("bench_press"),
        &history,
        Period::Day,
        &interval,
    );
    assert_eq!(series.len(), 7);
    assert_eq!(series[6], (date(8), 550.0));
    assert!(series[..6].iter().all(|(_, volume)| *volume == 0.0));
}

#[tokio::test]
async fn display_unit_does_not_change_stored_volume() {
    let storage = MemoryStorage::new();

    let mut log = DraftLog::new(date(1));
    sync(&mut log, &storage).await;
    // 220.462... lb is 100 kg.
    add_sets(&mut log, "bench_press", &[("220.46226218", "5")]);
    log.commit(&storage, WeightUnit::Lb).await.unwrap();

    let history = storage.read_workouts().await.unwrap();
    let volumes = volume::weekly_volumes(&exercise_id("bench_press"), &history);
    assert_eq!(volumes.len(), 1);
    assert!((volumes[0].1 - 500.0).abs() < 1e-4);
}
