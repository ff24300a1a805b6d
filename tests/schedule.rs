mod common;

use chrono::{Duration, NaiveTime};
use common::{at, day, seed_hourly_employee, test_pool};
use shiftledger::error::CoreError;
use shiftledger::model::schedule::Schedule;
use shiftledger::service::schedule::{self, ScheduleChanges, ShiftOutcome};

fn hms(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

async fn schedule_count(pool: &sqlx::SqlitePool, employee_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM schedules WHERE employee_id = ?")
        .bind(employee_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

fn created(outcome: &ShiftOutcome) -> &Schedule {
    match outcome {
        ShiftOutcome::Created { schedule } => schedule,
        other => panic!("expected Created, got {other:?}"),
    }
}

#[tokio::test]
async fn overnight_shift_rolls_end_to_next_day() {
    let pool = test_pool().await;
    let emp = seed_hourly_employee(&pool, 10, 100.0).await;

    let results =
        schedule::create_or_replace(&pool, &[emp], day(2026, 1, 5), hms(23, 0), hms(2, 0), false)
            .await
            .unwrap();
    let s = created(&results[0].outcome);

    assert_eq!(s.start_time, at(2026, 1, 5, 23, 0));
    assert_eq!(s.end_time, at(2026, 1, 6, 2, 0));
    assert_eq!(s.end_time - s.start_time, Duration::hours(3));
}

#[tokio::test]
async fn overlapping_shift_is_rejected_without_replace() {
    let pool = test_pool().await;
    let emp = seed_hourly_employee(&pool, 10, 100.0).await;

    schedule::create_or_replace(&pool, &[emp], day(2026, 1, 5), hms(9, 0), hms(17, 0), false)
        .await
        .unwrap();

    let results =
        schedule::create_or_replace(&pool, &[emp], day(2026, 1, 5), hms(16, 0), hms(22, 0), false)
            .await
            .unwrap();
    assert!(matches!(results[0].outcome, ShiftOutcome::Overlap));
    assert_eq!(schedule_count(&pool, emp).await, 1);
}

#[tokio::test]
async fn replace_deletes_conflicts_and_inserts() {
    let pool = test_pool().await;
    let emp = seed_hourly_employee(&pool, 10, 100.0).await;

    schedule::create_or_replace(&pool, &[emp], day(2026, 1, 5), hms(9, 0), hms(13, 0), false)
        .await
        .unwrap();
    schedule::create_or_replace(&pool, &[emp], day(2026, 1, 5), hms(14, 0), hms(18, 0), false)
        .await
        .unwrap();

    // 12:00-15:00 intersects both existing shifts.
    let results =
        schedule::create_or_replace(&pool, &[emp], day(2026, 1, 5), hms(12, 0), hms(15, 0), true)
            .await
            .unwrap();

    match &results[0].outcome {
        ShiftOutcome::Replaced { removed, schedule } => {
            assert_eq!(*removed, 2);
            assert_eq!(schedule.start_time, at(2026, 1, 5, 12, 0));
        }
        other => panic!("expected Replaced, got {other:?}"),
    }
    assert_eq!(schedule_count(&pool, emp).await, 1);
}

#[tokio::test]
async fn batch_conflicts_are_isolated_per_employee() {
    let pool = test_pool().await;
    let busy = seed_hourly_employee(&pool, 10, 100.0).await;
    let free = seed_hourly_employee(&pool, 10, 100.0).await;

    schedule::create_or_replace(&pool, &[busy], day(2026, 1, 5), hms(9, 0), hms(17, 0), false)
        .await
        .unwrap();

    let results = schedule::create_or_replace(
        &pool,
        &[busy, free, 999],
        day(2026, 1, 5),
        hms(10, 0),
        hms(14, 0),
        false,
    )
    .await
    .unwrap();

    assert_eq!(results.len(), 3);
    assert!(matches!(results[0].outcome, ShiftOutcome::Overlap));
    assert!(matches!(results[1].outcome, ShiftOutcome::Created { .. }));
    assert!(matches!(results[2].outcome, ShiftOutcome::NotFound));

    assert_eq!(schedule_count(&pool, busy).await, 1);
    assert_eq!(schedule_count(&pool, free).await, 1);
}

#[tokio::test]
async fn update_revalidates_overlap() {
    let pool = test_pool().await;
    let emp = seed_hourly_employee(&pool, 10, 100.0).await;

    let results =
        schedule::create_or_replace(&pool, &[emp], day(2026, 1, 5), hms(9, 0), hms(12, 0), false)
            .await
            .unwrap();
    let first = created(&results[0].outcome).id;

    schedule::create_or_replace(&pool, &[emp], day(2026, 1, 5), hms(13, 0), hms(17, 0), false)
        .await
        .unwrap();

    // Stretching the morning shift into the afternoon one must fail...
    let changes = ScheduleChanges {
        end_time: Some(hms(14, 0)),
        ..Default::default()
    };
    let err = schedule::update(&pool, first, changes, false).await.unwrap_err();
    assert!(matches!(err, CoreError::OverlapExists(_)));

    // ...unless the caller explicitly replaces the conflicting shift.
    let updated = schedule::update(&pool, first, changes, true).await.unwrap();
    assert_eq!(updated.end_time, at(2026, 1, 5, 14, 0));
    assert_eq!(schedule_count(&pool, emp).await, 1);
}

#[tokio::test]
async fn update_with_end_before_start_rolls_overnight() {
    let pool = test_pool().await;
    let emp = seed_hourly_employee(&pool, 10, 100.0).await;

    let results =
        schedule::create_or_replace(&pool, &[emp], day(2026, 1, 5), hms(9, 0), hms(17, 0), false)
            .await
            .unwrap();
    let id = created(&results[0].outcome).id;

    let changes = ScheduleChanges {
        start_time: Some(hms(22, 0)),
        end_time: Some(hms(6, 0)),
        ..Default::default()
    };
    let updated = schedule::update(&pool, id, changes, false).await.unwrap();

    assert_eq!(updated.start_time, at(2026, 1, 5, 22, 0));
    assert_eq!(updated.end_time, at(2026, 1, 6, 6, 0));
}

#[tokio::test]
async fn swap_is_an_involution() {
    let pool = test_pool().await;
    let emp_a = seed_hourly_employee(&pool, 10, 100.0).await;
    let emp_b = seed_hourly_employee(&pool, 10, 100.0).await;

    let results =
        schedule::create_or_replace(&pool, &[emp_a], day(2026, 1, 5), hms(6, 0), hms(14, 0), false)
            .await
            .unwrap();
    let a = created(&results[0].outcome).clone();

    let results =
        schedule::create_or_replace(&pool, &[emp_b], day(2026, 1, 5), hms(14, 0), hms(22, 0), false)
            .await
            .unwrap();
    let b = created(&results[0].outcome).clone();

    let (swapped_a, swapped_b) = schedule::swap(&pool, a.id, b.id).await.unwrap();
    assert_eq!(swapped_a.start_time, b.start_time);
    assert_eq!(swapped_a.end_time, b.end_time);
    assert_eq!(swapped_b.start_time, a.start_time);
    // employee assignment untouched
    assert_eq!(swapped_a.employee_id, emp_a);
    assert_eq!(swapped_b.employee_id, emp_b);

    let (restored_a, restored_b) = schedule::swap(&pool, a.id, b.id).await.unwrap();
    assert_eq!(restored_a.start_time, a.start_time);
    assert_eq!(restored_a.end_time, a.end_time);
    assert_eq!(restored_b.start_time, b.start_time);
    assert_eq!(restored_b.end_time, b.end_time);
}

#[tokio::test]
async fn swap_with_missing_side_changes_nothing() {
    let pool = test_pool().await;
    let emp = seed_hourly_employee(&pool, 10, 100.0).await;

    let results =
        schedule::create_or_replace(&pool, &[emp], day(2026, 1, 5), hms(9, 0), hms(17, 0), false)
            .await
            .unwrap();
    let a = created(&results[0].outcome).clone();

    let err = schedule::swap(&pool, a.id, 999).await.unwrap_err();
    assert!(matches!(err, CoreError::ScheduleNotFound(999)));

    let unchanged = sqlx::query_as::<_, Schedule>(
        "SELECT id, employee_id, company_id, date, start_time, end_time FROM schedules WHERE id = ?",
    )
    .bind(a.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(unchanged.start_time, a.start_time);
    assert_eq!(unchanged.end_time, a.end_time);
}
