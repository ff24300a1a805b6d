//! The TimeLog state machine: open and close attendance sessions while the
//! storage layer (a partial unique index on open rows) enforces that an
//! employee never has two open sessions, even under concurrent clock-ins.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::{Executor, Sqlite, SqlitePool};
use utoipa::ToSchema;

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::model::schedule::Schedule;
use crate::model::time_log::{TimeLog, TimeLogStatus};
use crate::service::reference;

#[derive(Debug, Clone, Copy)]
pub struct AttendancePolicy {
    /// Sessions open longer than this are force-closed on the next clock-in.
    pub max_shift_hours: i64,
    /// Clock-ins within this many minutes before the scheduled start require
    /// an explicit early-start choice.
    pub early_login_window_minutes: i64,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            max_shift_hours: 24,
            early_login_window_minutes: 240,
        }
    }
}

impl From<&Config> for AttendancePolicy {
    fn from(config: &Config) -> Self {
        Self {
            max_shift_hours: config.max_shift_hours,
            early_login_window_minutes: config.early_login_window_minutes,
        }
    }
}

/// What a clock-in attempt resolved to. Everything except `Started` leaves
/// the store untouched (apart from a possible ceiling auto-close) and hands
/// the decision back to the caller.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionOutcome {
    Started { time_log: TimeLog },
    AlreadyOpen { same_day: bool, time_log: TimeLog },
    EarlyChoiceRequired { schedule: Schedule },
    NoSchedule,
}

pub async fn find_open_session<'e, E>(
    executor: E,
    employee_id: i64,
) -> Result<Option<TimeLog>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, TimeLog>(
        r#"
        SELECT id, employee_id, company_id, log_date, login_time, logout_time,
               total_minutes, is_scheduled, status, auto_closed
        FROM time_logs
        WHERE employee_id = ? AND logout_time IS NULL
        "#,
    )
    .bind(employee_id)
    .fetch_optional(executor)
    .await
}

/// Closes an open log: logout_time and total_minutes are set exactly once.
/// The `logout_time IS NULL` guard makes a double close a no-op at the row
/// level; callers decide whether that is an error.
async fn close_log<'e, E>(
    executor: E,
    log: &TimeLog,
    now: DateTime<Utc>,
    auto_closed: bool,
) -> CoreResult<TimeLog>
where
    E: Executor<'e, Database = Sqlite>,
{
    let minutes = (now - log.login_time).num_minutes().max(0);

    let closed = sqlx::query_as::<_, TimeLog>(
        r#"
        UPDATE time_logs
        SET logout_time = ?, total_minutes = ?, auto_closed = ?
        WHERE id = ? AND logout_time IS NULL
        RETURNING id, employee_id, company_id, log_date, login_time, logout_time,
                  total_minutes, is_scheduled, status, auto_closed
        "#,
    )
    .bind(now)
    .bind(minutes)
    .bind(auto_closed)
    .bind(log.id)
    .fetch_optional(executor)
    .await?
    .ok_or(CoreError::NoActiveSession)?;

    Ok(closed)
}

async fn open_log<'e, E>(
    executor: E,
    employee_id: i64,
    company_id: i64,
    login_time: DateTime<Utc>,
    is_scheduled: bool,
) -> CoreResult<TimeLog>
where
    E: Executor<'e, Database = Sqlite>,
{
    let inserted = sqlx::query_as::<_, TimeLog>(
        r#"
        INSERT INTO time_logs (employee_id, company_id, log_date, login_time, is_scheduled, status)
        VALUES (?, ?, ?, ?, ?, 'pending')
        RETURNING id, employee_id, company_id, log_date, login_time, logout_time,
                  total_minutes, is_scheduled, status, auto_closed
        "#,
    )
    .bind(employee_id)
    .bind(company_id)
    .bind(login_time.date_naive())
    .bind(login_time)
    .bind(is_scheduled)
    .fetch_one(executor)
    .await
    .map_err(|e| {
        // A racing clock-in that won the partial unique index.
        if CoreError::is_unique_violation(&e) {
            CoreError::AlreadyOpenSession(employee_id)
        } else {
            CoreError::Database(e)
        }
    })?;

    Ok(inserted)
}

/// Clock-in entry point. Resolves to one of four outcomes: reuse or close
/// the open session, demand an early-start choice, demand a no-schedule
/// confirmation, or start right away.
pub async fn start_session(
    pool: &SqlitePool,
    policy: &AttendancePolicy,
    employee_id: i64,
    now: DateTime<Utc>,
) -> CoreResult<SessionOutcome> {
    let mut tx = pool.begin().await?;

    let company_id = reference::employee_company(&mut *tx, employee_id).await?;

    if let Some(open) = find_open_session(&mut *tx, employee_id).await? {
        if now - open.login_time > Duration::hours(policy.max_shift_hours) {
            // Runaway shift: close it flagged for audit, then fall through
            // to a fresh clock-in.
            let closed = close_log(&mut *tx, &open, now, true).await?;
            tracing::info!(
                employee_id,
                time_log_id = closed.id,
                minutes = closed.total_minutes,
                "Auto-closed stale session"
            );
        } else {
            let same_day = open.login_time.date_naive() == now.date_naive();
            tx.commit().await?;
            return Ok(SessionOutcome::AlreadyOpen {
                same_day,
                time_log: open,
            });
        }
    }

    let today = reference::schedule_for_date(&mut *tx, employee_id, now.date_naive()).await?;

    let outcome = match today {
        None => SessionOutcome::NoSchedule,
        Some(schedule) => {
            let lead = schedule.start_time - now;
            if lead > Duration::zero()
                && lead <= Duration::minutes(policy.early_login_window_minutes)
            {
                SessionOutcome::EarlyChoiceRequired { schedule }
            } else {
                let log = open_log(&mut *tx, employee_id, company_id, now, true).await?;
                SessionOutcome::Started { time_log: log }
            }
        }
    };

    tx.commit().await?;
    Ok(outcome)
}

/// Force-closes whatever is open and opens a new session. All three
/// confirmation operations funnel through here.
async fn restart_session(
    pool: &SqlitePool,
    employee_id: i64,
    login_time: DateTime<Utc>,
    is_scheduled: bool,
    now: DateTime<Utc>,
) -> CoreResult<TimeLog> {
    let mut tx = pool.begin().await?;

    let company_id = reference::employee_company(&mut *tx, employee_id).await?;

    if let Some(open) = find_open_session(&mut *tx, employee_id).await? {
        close_log(&mut *tx, &open, now, false).await?;
    }

    let log = open_log(&mut *tx, employee_id, company_id, login_time, is_scheduled).await?;

    tx.commit().await?;
    Ok(log)
}

/// Caller confirmed working without a planned shift.
pub async fn confirm_start_without_schedule(
    pool: &SqlitePool,
    employee_id: i64,
    now: DateTime<Utc>,
) -> CoreResult<TimeLog> {
    restart_session(pool, employee_id, now, false, now).await
}

/// Early arrival, clock starts counting immediately.
pub async fn confirm_early_start_now(
    pool: &SqlitePool,
    employee_id: i64,
    now: DateTime<Utc>,
) -> CoreResult<TimeLog> {
    restart_session(pool, employee_id, now, false, now).await
}

/// Early arrival, clock starts at the scheduled shift start (backdated once
/// the shift actually begins).
pub async fn confirm_early_start_at_schedule(
    pool: &SqlitePool,
    employee_id: i64,
    scheduled_start: DateTime<Utc>,
    now: DateTime<Utc>,
) -> CoreResult<TimeLog> {
    restart_session(pool, employee_id, scheduled_start, true, now).await
}

/// Clock-out: closes the open session or reports that nothing is open.
pub async fn end_session(
    pool: &SqlitePool,
    employee_id: i64,
    now: DateTime<Utc>,
) -> CoreResult<TimeLog> {
    let mut tx = pool.begin().await?;

    reference::employee_company(&mut *tx, employee_id).await?;

    let open = find_open_session(&mut *tx, employee_id)
        .await?
        .ok_or(CoreError::NoActiveSession)?;

    let closed = close_log(&mut *tx, &open, now, false).await?;

    tx.commit().await?;
    Ok(closed)
}

/// Moves a closed log between pending/approved/rejected. Timestamps and
/// minutes are never touched; open logs cannot be reviewed.
pub async fn set_status(
    pool: &SqlitePool,
    time_log_id: i64,
    status: TimeLogStatus,
) -> CoreResult<TimeLog> {
    let mut tx = pool.begin().await?;

    let log = sqlx::query_as::<_, TimeLog>(
        r#"
        SELECT id, employee_id, company_id, log_date, login_time, logout_time,
               total_minutes, is_scheduled, status, auto_closed
        FROM time_logs
        WHERE id = ?
        "#,
    )
    .bind(time_log_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(CoreError::TimeLogNotFound(time_log_id))?;

    if log.is_open() {
        return Err(CoreError::SessionStillOpen(time_log_id));
    }

    let updated = sqlx::query_as::<_, TimeLog>(
        r#"
        UPDATE time_logs
        SET status = ?
        WHERE id = ?
        RETURNING id, employee_id, company_id, log_date, login_time, logout_time,
                  total_minutes, is_scheduled, status, auto_closed
        "#,
    )
    .bind(status)
    .bind(time_log_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(updated)
}
