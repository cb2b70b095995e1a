//! Time-bucketed volume aggregation.
//!
//! Pure functions over the full persisted history. Volumes are
//! computed in canonical kilograms; any unit conversion happens at
//! the presentation boundary, so aggregated totals are reproducible
//! regardless of the display unit.

use std::collections::BTreeMap;

use chrono::{Days, Months, NaiveDate};

use crate::{ExerciseId, Interval, Workout, calendar};

/// Bucket granularity of a volume chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
}

impl Period {
    /// The bucket a date falls into.
    #[must_use]
    pub fn bucket(self, date: NaiveDate) -> NaiveDate {
        match self {
            Period::Day => date,
            Period::Week => calendar::start_of_week(date),
            Period::Month => calendar::start_of_month(date),
        }
    }

    fn next_bucket(self, bucket: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::Day => bucket.checked_add_days(Days::new(1)),
            Period::Week => bucket.checked_add_days(Days::new(7)),
            Period::Month => bucket.checked_add_months(Months::new(1)),
        }
    }
}

/// Volume series for a chart over the requested interval.
///
/// Every bucket of the interval is present so chart axes stay evenly
/// spaced; buckets without matching sets contribute a volume of zero.
/// The result is sorted ascending by bucket date, independent of the
/// input record order.
#[must_use]
pub fn chart_series(
    exercise_id: &ExerciseId,
    workouts: &[Workout],
    period: Period,
    interval: &Interval,
) -> Vec<(NaiveDate, f64)> {
    let volumes = bucket_volumes(exercise_id, workouts, period);

    let mut series = Vec::new();
    let mut bucket = period.bucket(interval.first);
    while bucket <= interval.last {
        series.push((bucket, volumes.get(&bucket).copied().unwrap_or(0.0)));
        let Some(next) = period.next_bucket(bucket) else {
            break;
        };
        bucket = next;
    }
    series
}

/// Weekly volumes over the entire history.
///
/// Unlike [`chart_series`] this backs a scrollable list, so weeks
/// without matching sets are omitted instead of zero-filled.
#[must_use]
pub fn weekly_volumes(exercise_id: &ExerciseId, workouts: &[Workout]) -> Vec<(NaiveDate, f64)> {
    bucket_volumes(exercise_id, workouts, Period::Week)
        .into_iter()
        .collect()
}

fn bucket_volumes(
    exercise_id: &ExerciseId,
    workouts: &[Workout],
    period: Period,
) -> BTreeMap<NaiveDate, f64> {
    let mut volumes: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for workout in workouts {
        // Keyed on the presence of matching sets, not on their volume,
        // so a bucket of zero-weight sets still appears.
        if workout.sets.iter().any(|set| set.matches(exercise_id)) {
            *volumes.entry(period.bucket(workout.date)).or_insert(0.0) +=
                workout.volume_for(exercise_id);
        }
    }
    volumes
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{ExerciseSet, Reps, Weight};

    use super::*;

    fn from_ymd((year, month, day): (i32, u32, u32)) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn exercise_id(id: &str) -> ExerciseId {
        ExerciseId::new(id).unwrap()
    }

    fn workout(date: (i32, u32, u32), sets: &[(&str, f64, u32)]) -> Workout {
        Workout {
            date: from_ymd(date),
            sets: sets
                .iter()
                .map(|(id, kg, reps)| ExerciseSet {
                    exercise_id: exercise_id(id),
                    weight: Weight::new(*kg).unwrap(),
                    reps: Reps::new(*reps).unwrap(),
                })
                .collect(),
        }
    }

    #[rstest]
    #[case(Period::Day, (2024, 1, 3), (2024, 1, 3))]
    #[case(Period::Week, (2024, 1, 3), (2024, 1, 1))]
    #[case(Period::Month, (2024, 1, 31), (2024, 1, 1))]
    fn test_period_bucket(
        #[case] period: Period,
        #[case] date: (i32, u32, u32),
        #[case] expected: (i32, u32, u32),
    ) {
        assert_eq!(period.bucket(from_ymd(date)), from_ymd(expected));
    }

    #[test]
    fn test_weekly_volumes() {
        let workouts = vec![
            workout((2024, 1, 8), &[("a", 110.0, 5)]),
            workout((2024, 1, 1), &[("a", 100.0, 5)]),
        ];

        assert_eq!(
            weekly_volumes(&exercise_id("a"), &workouts),
            vec![
                (from_ymd((2024, 1, 1)), 500.0),
                (from_ymd((2024, 1, 8)), 550.0),
            ]
        );
        assert_eq!(weekly_volumes(&exercise_id("b"), &workouts), vec![]);
    }

    #[test]
    fn test_weekly_volumes_merge_within_week() {
        let workouts = vec![
            workout((2024, 1, 1), &[("a", 100.0, 5), ("b", 60.0, 10)]),
            workout((2024, 1, 3), &[("a", 100.0, 3)]),
        ];

        assert_eq!(
            weekly_volumes(&exercise_id("a"), &workouts),
            vec![(from_ymd((2024, 1, 1)), 800.0)]
        );
        assert_eq!(
            weekly_volumes(&exercise_id("b"), &workouts),
            vec![(from_ymd((2024, 1, 1)), 600.0)]
        );
    }

    #[test]
    fn test_weekly_volumes_keep_zero_volume_weeks() {
        let workouts = vec![workout((2024, 1, 3), &[("a", 0.0, 5)])];

        assert_eq!(
            weekly_volumes(&exercise_id("a"), &workouts),
            vec![(from_ymd((2024, 1, 1)), 0.0)]
        );
    }

    #[test]
    fn test_chart_series_day_fills_empty_buckets() {
        let workouts = vec![
            workout((2024, 1, 2), &[("a", 100.0, 5)]),
            workout((2024, 1, 5), &[("a", 80.0, 5), ("b", 50.0, 5)]),
        ];
        let interval = Interval::from(from_ymd((2024, 1, 1))..=from_ymd((2024, 1, 7)));

        assert_eq!(
            chart_series(&exercise_id("a"), &workouts, Period::Day, &interval),
            vec![
                (from_ymd((2024, 1, 1)), 0.0),
                (from_ymd((2024, 1, 2)), 500.0),
                (from_ymd((2024, 1, 3)), 0.0),
                (from_ymd((2024, 1, 4)), 0.0),
                (from_ymd((2024, 1, 5)), 400.0),
                (from_ymd((2024, 1, 6)), 0.0),
                (from_ymd((2024, 1, 7)), 0.0),
            ]
        );
    }

    #[test]
    fn test_chart_series_is_order_independent() {
        let interval = Interval::from(from_ymd((2024, 1, 1))..=from_ymd((2024, 1, 7)));
        let a = vec![
            workout((2024, 1, 2), &[("a", 100.0, 5)]),
            workout((2024, 1, 5), &[("a", 80.0, 5)]),
        ];
        let b = a.iter().rev().cloned().collect::<Vec<_>>();

        assert_eq!(
            chart_series(&exercise_id("a"), &a, Period::Day, &interval),
            chart_series(&exercise_id("a"), &b, Period::Day, &interval)
        );
    }

    #[test]
    fn test_chart_series_week_buckets_start_before_interval() {
        let workouts = vec![workout((2024, 1, 3), &[("a", 100.0, 5)])];
        // Wednesday to Wednesday; both weeks must appear, keyed by
        // their Monday.
        let interval = Interval::from(from_ymd((2024, 1, 3))..=from_ymd((2024, 1, 10)));

        assert_eq!(
            chart_series(&exercise_id("a"), &workouts, Period::Week, &interval),
            vec![
                (from_ymd((2024, 1, 1)), 500.0),
                (from_ymd((2024, 1, 8)), 0.0),
            ]
        );
    }

    #[test]
    fn test_chart_series_month() {
        let workouts = vec![
            workout((2024, 1, 10), &[("a", 100.0, 5)]),
            workout((2024, 1, 20), &[("a", 100.0, 5)]),
            workout((2024, 3, 1), &[("a", 60.0, 10)]),
        ];
        let interval = Interval::from(from_ymd((2024, 1, 1))..=from_ymd((2024, 3, 31)));

        assert_eq!(
            chart_series(&exercise_id("a"), &workouts, Period::Month, &interval),
            vec![
                (from_ymd((2024, 1, 1)), 1000.0),
                (from_ymd((2024, 2, 1)), 0.0),
                (from_ymd((2024, 3, 1)), 600.0),
            ]
        );
    }
}
