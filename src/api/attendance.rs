use actix_web::{HttpResponse, Responder, web};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::config::Config;
use crate::model::time_log::TimeLogStatus;
use crate::service::attendance::{self, AttendancePolicy, SessionOutcome};

#[derive(Deserialize, ToSchema)]
pub struct ClockInRequest {
    #[schema(example = 1)]
    pub employee_id: i64,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmMode {
    /// Work without a planned shift.
    NoSchedule,
    /// Early arrival, start counting now.
    EarlyNow,
    /// Early arrival, backdate the login to the scheduled start.
    EarlyAtSchedule,
}

#[derive(Deserialize, ToSchema)]
pub struct ConfirmClockInRequest {
    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "early_now")]
    pub mode: ConfirmMode,

    /// Required for `early_at_schedule`.
    #[schema(example = "2026-01-05T09:00:00Z", value_type = String, format = "date-time", nullable = true)]
    pub scheduled_start: Option<DateTime<Utc>>,
}

/// Clock-in endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/clock-in",
    request_body = ClockInRequest,
    responses(
        (status = 200, description = "Session started, or a confirmation is required", body = SessionOutcome),
        (status = 404, description = "Unknown employee"),
        (status = 409, description = "A session is already open"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn clock_in(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    payload: web::Json<ClockInRequest>,
) -> actix_web::Result<impl Responder> {
    let policy = AttendancePolicy::from(config.get_ref());
    let outcome =
        attendance::start_session(&pool, &policy, payload.employee_id, Utc::now()).await?;

    // AlreadyOpen is a conflict the caller has to resolve; the other
    // outcomes are regular answers carrying the next step.
    let response = match &outcome {
        SessionOutcome::AlreadyOpen { .. } => HttpResponse::Conflict().json(outcome),
        _ => HttpResponse::Ok().json(outcome),
    };

    Ok(response)
}

/// Clock-in confirmation endpoint (early-start and no-schedule branches)
#[utoipa::path(
    post,
    path = "/api/attendance/clock-in/confirm",
    request_body = ConfirmClockInRequest,
    responses(
        (status = 200, description = "Session started"),
        (status = 400, description = "Missing scheduled_start for early_at_schedule"),
        (status = 404, description = "Unknown employee"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn confirm_clock_in(
    pool: web::Data<SqlitePool>,
    payload: web::Json<ConfirmClockInRequest>,
) -> actix_web::Result<impl Responder> {
    let now = Utc::now();
    let payload = payload.into_inner();

    let log = match payload.mode {
        ConfirmMode::NoSchedule => {
            attendance::confirm_start_without_schedule(&pool, payload.employee_id, now).await?
        }
        ConfirmMode::EarlyNow => {
            attendance::confirm_early_start_now(&pool, payload.employee_id, now).await?
        }
        ConfirmMode::EarlyAtSchedule => {
            let scheduled_start = payload.scheduled_start.ok_or_else(|| {
                actix_web::error::ErrorBadRequest(
                    "scheduled_start is required for early_at_schedule",
                )
            })?;
            attendance::confirm_early_start_at_schedule(
                &pool,
                payload.employee_id,
                scheduled_start,
                now,
            )
            .await?
        }
    };

    Ok(HttpResponse::Ok().json(log))
}

/// Clock-out endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/clock-out",
    request_body = ClockInRequest,
    responses(
        (status = 200, description = "Session closed"),
        (status = 404, description = "Unknown employee"),
        (status = 422, description = "No active session"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn clock_out(
    pool: web::Data<SqlitePool>,
    payload: web::Json<ClockInRequest>,
) -> actix_web::Result<impl Responder> {
    let log = attendance::end_session(&pool, payload.employee_id, Utc::now()).await?;
    Ok(HttpResponse::Ok().json(log))
}

/// Approve a closed time log
#[utoipa::path(
    put,
    path = "/api/attendance/{id}/approve",
    params(("id", description = "Time log ID")),
    responses(
        (status = 200, description = "Time log approved"),
        (status = 404, description = "Time log not found"),
        (status = 422, description = "Session is still open")
    ),
    tag = "Attendance"
)]
pub async fn approve_time_log(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let log = attendance::set_status(&pool, path.into_inner(), TimeLogStatus::Approved).await?;
    Ok(HttpResponse::Ok().json(log))
}

/// Reject a closed time log
#[utoipa::path(
    put,
    path = "/api/attendance/{id}/reject",
    params(("id", description = "Time log ID")),
    responses(
        (status = 200, description = "Time log rejected"),
        (status = 404, description = "Time log not found"),
        (status = 422, description = "Session is still open")
    ),
    tag = "Attendance"
)]
pub async fn reject_time_log(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let log = attendance::set_status(&pool, path.into_inner(), TimeLogStatus::Rejected).await?;
    Ok(HttpResponse::Ok().json(log))
}
