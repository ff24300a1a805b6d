use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

use crate::config::Config;
use crate::service::payroll::{self, SalaryRow};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct SalaryRowsQuery {
    #[schema(example = 10)]
    pub company_id: i64,

    #[schema(example = 2026)]
    pub year: i32,

    #[schema(example = 1)]
    pub month: u32,
}

#[derive(Serialize, ToSchema)]
pub struct SalaryRowsResponse {
    pub data: Vec<SalaryRow>,

    /// Reporting baseline for utilization; not part of the pay formula.
    #[schema(example = 160)]
    pub standard_monthly_hours: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateSalarySlip {
    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = 1)]
    pub month: u32,

    #[schema(example = 2026)]
    pub year: i32,

    /// Recompute an existing slip in place instead of failing.
    #[serde(default)]
    pub force_update: bool,
}

/// Monthly payroll preview: every closed session counts, nothing is written
#[utoipa::path(
    get,
    path = "/api/payroll/rows",
    params(SalaryRowsQuery),
    responses(
        (status = 200, description = "One row per employee hired by month end", body = SalaryRowsResponse),
        (status = 400, description = "Invalid period"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payroll"
)]
pub async fn salary_rows(
    pool: web::Data<SqlitePool>,
    config: web::Data<Config>,
    query: web::Query<SalaryRowsQuery>,
) -> actix_web::Result<impl Responder> {
    let data =
        payroll::compute_monthly_salary_rows(&pool, query.company_id, query.year, query.month)
            .await?;

    Ok(HttpResponse::Ok().json(SalaryRowsResponse {
        data,
        standard_monthly_hours: config.standard_monthly_hours,
    }))
}

/// Generate (or force-recompute) the salary slip for one employee-period
#[utoipa::path(
    post,
    path = "/api/payroll/slip",
    request_body = CreateSalarySlip,
    responses(
        (status = 200, description = "Slip created or updated"),
        (status = 404, description = "Unknown employee"),
        (status = 409, description = "Slip exists and force_update was not set"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Payroll"
)]
pub async fn create_salary_slip(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateSalarySlip>,
) -> actix_web::Result<impl Responder> {
    let slip = payroll::create_or_update_salary_slip(
        &pool,
        payload.employee_id,
        payload.month,
        payload.year,
        payload.force_update,
    )
    .await?;

    Ok(HttpResponse::Ok().json(slip))
}
