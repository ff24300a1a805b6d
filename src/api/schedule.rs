use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::model::schedule::Schedule;
use crate::service::schedule::{self, EmployeeShiftOutcome, ScheduleChanges};

#[derive(Deserialize, ToSchema)]
pub struct CreateSchedule {
    #[schema(example = json!([1, 2, 3]))]
    pub employee_ids: Vec<i64>,

    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "09:00:00", value_type = String)]
    pub start_time: NaiveTime,

    /// An end at or before the start means an overnight shift.
    #[schema(example = "17:00:00", value_type = String)]
    pub end_time: NaiveTime,

    /// Delete intersecting shifts instead of rejecting.
    #[serde(default)]
    pub replace: bool,
}

#[derive(Serialize, ToSchema)]
pub struct CreateScheduleResponse {
    pub results: Vec<EmployeeShiftOutcome>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateSchedule {
    #[schema(example = "2026-01-06", value_type = String, format = "date", nullable = true)]
    pub date: Option<NaiveDate>,

    #[schema(example = "10:00:00", value_type = String, nullable = true)]
    pub start_time: Option<NaiveTime>,

    #[schema(example = "18:00:00", value_type = String, nullable = true)]
    pub end_time: Option<NaiveTime>,

    #[serde(default)]
    pub replace: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct SwapSchedules {
    #[schema(example = 1)]
    pub schedule_id_a: i64,

    #[schema(example = 2)]
    pub schedule_id_b: i64,
}

#[derive(Serialize, ToSchema)]
pub struct SwapSchedulesResponse {
    pub schedule_a: Schedule,
    pub schedule_b: Schedule,
}

/// Plan a shift for a batch of employees
#[utoipa::path(
    post,
    path = "/api/schedule",
    request_body = CreateSchedule,
    responses(
        (status = 200, description = "One outcome per employee", body = CreateScheduleResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Schedule"
)]
pub async fn create_schedule(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateSchedule>,
) -> actix_web::Result<impl Responder> {
    let results = schedule::create_or_replace(
        &pool,
        &payload.employee_ids,
        payload.date,
        payload.start_time,
        payload.end_time,
        payload.replace,
    )
    .await?;

    Ok(HttpResponse::Ok().json(CreateScheduleResponse { results }))
}

/// Update a shift's day or times
#[utoipa::path(
    put,
    path = "/api/schedule/{id}",
    request_body = UpdateSchedule,
    params(("id", description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule updated", body = Schedule),
        (status = 404, description = "Schedule not found"),
        (status = 409, description = "Overlaps another shift and replace was not set")
    ),
    tag = "Schedule"
)]
pub async fn update_schedule(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<UpdateSchedule>,
) -> actix_web::Result<impl Responder> {
    let changes = ScheduleChanges {
        date: payload.date,
        start_time: payload.start_time,
        end_time: payload.end_time,
    };

    let updated = schedule::update(&pool, path.into_inner(), changes, payload.replace).await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Exchange the start/end times of two shifts
#[utoipa::path(
    post,
    path = "/api/schedule/swap",
    request_body = SwapSchedules,
    responses(
        (status = 200, description = "Both shifts updated atomically", body = SwapSchedulesResponse),
        (status = 404, description = "Either schedule is missing")
    ),
    tag = "Schedule"
)]
pub async fn swap_schedules(
    pool: web::Data<SqlitePool>,
    payload: web::Json<SwapSchedules>,
) -> actix_web::Result<impl Responder> {
    let (schedule_a, schedule_b) =
        schedule::swap(&pool, payload.schedule_id_a, payload.schedule_id_b).await?;

    Ok(HttpResponse::Ok().json(SwapSchedulesResponse {
        schedule_a,
        schedule_b,
    }))
}
