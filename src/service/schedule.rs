//! Schedule conflict resolution: overlap detection on [start, end) windows,
//! create/replace policy, update with re-validation, and the atomic two-row
//! swap. Each employee's check-then-write runs in its own transaction.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use sqlx::{Executor, Sqlite, SqlitePool};
use utoipa::ToSchema;

use crate::error::{CoreError, CoreResult};
use crate::model::schedule::Schedule;
use crate::service::reference;

/// Absolute shift window for a reference day. An end at or before the start
/// means the shift runs into the next calendar day.
pub fn resolve_window(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let start_dt = date.and_time(start).and_utc();
    let mut end_dt = date.and_time(end).and_utc();
    if end_dt <= start_dt {
        end_dt += Duration::days(1);
    }
    (start_dt, end_dt)
}

async fn overlapping<'e, E>(
    executor: E,
    employee_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude_id: Option<i64>,
) -> Result<Vec<Schedule>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Schedule>(
        r#"
        SELECT id, employee_id, company_id, date, start_time, end_time
        FROM schedules
        WHERE employee_id = ?
          AND start_time < ?
          AND end_time > ?
          AND id != ?
        "#,
    )
    .bind(employee_id)
    .bind(end)
    .bind(start)
    .bind(exclude_id.unwrap_or(-1))
    .fetch_all(executor)
    .await
}

/// Per-employee result of a batch shift creation. One employee's conflict
/// never aborts the others.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ShiftOutcome {
    Created { schedule: Schedule },
    Replaced { removed: u64, schedule: Schedule },
    Overlap,
    NotFound,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeShiftOutcome {
    #[schema(example = 1)]
    pub employee_id: i64,
    #[serde(flatten)]
    pub outcome: ShiftOutcome,
}

/// Plans a shift for each employee independently: reject on overlap unless
/// `replace` is set, in which case the conflicting rows are deleted in the
/// same transaction that inserts the new one.
pub async fn create_or_replace(
    pool: &SqlitePool,
    employee_ids: &[i64],
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    replace: bool,
) -> CoreResult<Vec<EmployeeShiftOutcome>> {
    let (start_dt, end_dt) = resolve_window(date, start, end);
    let mut results = Vec::with_capacity(employee_ids.len());

    for &employee_id in employee_ids {
        let outcome = plan_shift(pool, employee_id, date, start_dt, end_dt, replace).await?;
        results.push(EmployeeShiftOutcome {
            employee_id,
            outcome,
        });
    }

    Ok(results)
}

async fn plan_shift(
    pool: &SqlitePool,
    employee_id: i64,
    date: NaiveDate,
    start_dt: DateTime<Utc>,
    end_dt: DateTime<Utc>,
    replace: bool,
) -> CoreResult<ShiftOutcome> {
    let mut tx = pool.begin().await?;

    let company_id = match reference::employee_company(&mut *tx, employee_id).await {
        Ok(id) => id,
        Err(CoreError::EmployeeNotFound(_)) => return Ok(ShiftOutcome::NotFound),
        Err(e) => return Err(e),
    };

    let conflicts = overlapping(&mut *tx, employee_id, start_dt, end_dt, None).await?;

    if !conflicts.is_empty() && !replace {
        tracing::debug!(employee_id, count = conflicts.len(), "Shift overlap rejected");
        return Ok(ShiftOutcome::Overlap);
    }

    let removed = delete_schedules(&mut *tx, &conflicts).await?;
    let schedule = insert_schedule(&mut *tx, employee_id, company_id, date, start_dt, end_dt).await?;

    tx.commit().await?;

    if removed > 0 {
        Ok(ShiftOutcome::Replaced { removed, schedule })
    } else {
        Ok(ShiftOutcome::Created { schedule })
    }
}

async fn delete_schedules<'e, E>(executor: E, schedules: &[Schedule]) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    if schedules.is_empty() {
        return Ok(0);
    }

    let placeholders = vec!["?"; schedules.len()].join(", ");
    let sql = format!("DELETE FROM schedules WHERE id IN ({placeholders})");

    let mut query = sqlx::query(&sql);
    for s in schedules {
        query = query.bind(s.id);
    }

    Ok(query.execute(executor).await?.rows_affected())
}

async fn insert_schedule<'e, E>(
    executor: E,
    employee_id: i64,
    company_id: i64,
    date: NaiveDate,
    start_dt: DateTime<Utc>,
    end_dt: DateTime<Utc>,
) -> Result<Schedule, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Schedule>(
        r#"
        INSERT INTO schedules (employee_id, company_id, date, start_time, end_time)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, employee_id, company_id, date, start_time, end_time
        "#,
    )
    .bind(employee_id)
    .bind(company_id)
    .bind(date)
    .bind(start_dt)
    .bind(end_dt)
    .fetch_one(executor)
    .await
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ScheduleChanges {
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

/// Merges the provided fields onto an existing entry, re-applies the
/// overnight roll, and re-checks overlap against the employee's other
/// shifts, symmetrically with creation: reject unless `replace` is set.
pub async fn update(
    pool: &SqlitePool,
    schedule_id: i64,
    changes: ScheduleChanges,
    replace: bool,
) -> CoreResult<Schedule> {
    let mut tx = pool.begin().await?;

    let existing = fetch_schedule(&mut *tx, schedule_id)
        .await?
        .ok_or(CoreError::ScheduleNotFound(schedule_id))?;

    let date = changes.date.unwrap_or(existing.date);
    let start = changes.start_time.unwrap_or_else(|| existing.start_time.time());
    let end = changes.end_time.unwrap_or_else(|| existing.end_time.time());
    let (start_dt, end_dt) = resolve_window(date, start, end);

    let conflicts = overlapping(&mut *tx, existing.employee_id, start_dt, end_dt, Some(schedule_id)).await?;

    if !conflicts.is_empty() {
        if !replace {
            return Err(CoreError::OverlapExists(existing.employee_id));
        }
        delete_schedules(&mut *tx, &conflicts).await?;
    }

    let updated = sqlx::query_as::<_, Schedule>(
        r#"
        UPDATE schedules
        SET date = ?, start_time = ?, end_time = ?
        WHERE id = ?
        RETURNING id, employee_id, company_id, date, start_time, end_time
        "#,
    )
    .bind(date)
    .bind(start_dt)
    .bind(end_dt)
    .bind(schedule_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(updated)
}

/// Exchanges only the start/end times of two shifts, all-or-nothing. Dates
/// and employee assignments stay put, so swapping twice is the identity.
pub async fn swap(
    pool: &SqlitePool,
    schedule_id_a: i64,
    schedule_id_b: i64,
) -> CoreResult<(Schedule, Schedule)> {
    let mut tx = pool.begin().await?;

    let a = fetch_schedule(&mut *tx, schedule_id_a)
        .await?
        .ok_or(CoreError::ScheduleNotFound(schedule_id_a))?;
    let b = fetch_schedule(&mut *tx, schedule_id_b)
        .await?
        .ok_or(CoreError::ScheduleNotFound(schedule_id_b))?;

    let new_a = set_window(&mut *tx, a.id, b.start_time, b.end_time).await?;
    let new_b = set_window(&mut *tx, b.id, a.start_time, a.end_time).await?;

    tx.commit().await?;
    Ok((new_a, new_b))
}

async fn fetch_schedule<'e, E>(executor: E, id: i64) -> Result<Option<Schedule>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Schedule>(
        r#"
        SELECT id, employee_id, company_id, date, start_time, end_time
        FROM schedules
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

async fn set_window<'e, E>(
    executor: E,
    id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Schedule, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Schedule>(
        r#"
        UPDATE schedules
        SET start_time = ?, end_time = ?
        WHERE id = ?
        RETURNING id, employee_id, company_id, date, start_time, end_time
        "#,
    )
    .bind(start)
    .bind(end)
    .bind(id)
    .fetch_one(executor)
    .await
}
