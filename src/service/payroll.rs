//! Payroll computation: aggregates closed sessions into worked minutes per
//! employee per month and turns them into pay figures. The preview counts
//! every closed log; the finalized slip counts approved logs only.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{Executor, Sqlite, SqlitePool};
use utoipa::ToSchema;

use crate::error::{CoreError, CoreResult};
use crate::model::employee::ContractType;
use crate::model::salary_slip::{SalarySlip, SalarySlipStatus};
use crate::service::reference;

/// Rounds a final pay figure to cents. Minute sums stay integral and hours
/// stay unrounded; only the money is rounded, and only once.
fn round_pay(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn pay_for(
    contract_type: ContractType,
    hourly_rate: Option<f64>,
    monthly_salary: Option<f64>,
    total_minutes: i64,
) -> f64 {
    match contract_type {
        ContractType::Hourly => (total_minutes as f64 / 60.0) * hourly_rate.unwrap_or(0.0),
        ContractType::Monthly => monthly_salary.unwrap_or(0.0),
    }
}

/// [month start, next month start) as calendar days.
fn month_bounds(year: i32, month: u32) -> CoreResult<(NaiveDate, NaiveDate)> {
    let start =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(CoreError::InvalidPeriod { month, year })?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(CoreError::InvalidPeriod { month, year })?;
    Ok((start, end))
}

#[derive(Debug, sqlx::FromRow)]
struct PayrollEmployee {
    id: i64,
    first_name: String,
    last_name: String,
    contract_type: ContractType,
    hourly_rate: Option<f64>,
    monthly_salary: Option<f64>,
}

/// One line of the monthly payroll preview.
#[derive(Debug, Serialize, ToSchema)]
pub struct SalaryRow {
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "hourly")]
    pub contract_type: ContractType,
    #[schema(example = 9600)]
    pub total_minutes: i64,
    #[schema(example = 160.0)]
    pub total_hours: f64,
    #[schema(example = 16000.0)]
    pub total_pay: f64,
    #[schema(example = "pending")]
    pub slip_status: SalarySlipStatus,
}

/// Read-only estimate for a company's month: every closed session counts,
/// regardless of review status. No rows are written.
pub async fn compute_monthly_salary_rows(
    pool: &SqlitePool,
    company_id: i64,
    year: i32,
    month: u32,
) -> CoreResult<Vec<SalaryRow>> {
    let (month_start, month_end) = month_bounds(year, month)?;
    let hired_by = month_end.pred_opt().unwrap_or(month_start);

    let start_dt: DateTime<Utc> = month_start.and_hms_opt(0, 0, 0).unwrap().and_utc();
    let end_dt: DateTime<Utc> = month_end.and_hms_opt(0, 0, 0).unwrap().and_utc();

    let employees = sqlx::query_as::<_, PayrollEmployee>(
        r#"
        SELECT id, first_name, last_name, contract_type, hourly_rate, monthly_salary
        FROM employees
        WHERE company_id = ? AND hire_date <= ?
        ORDER BY id
        "#,
    )
    .bind(company_id)
    .bind(hired_by)
    .fetch_all(pool)
    .await?;

    let mut rows = Vec::with_capacity(employees.len());

    for emp in employees {
        let total_minutes = sqlx::query_scalar::<_, Option<i64>>(
            r#"
            SELECT SUM(total_minutes)
            FROM time_logs
            WHERE employee_id = ?
              AND logout_time IS NOT NULL
              AND total_minutes IS NOT NULL
              AND login_time >= ? AND login_time < ?
            "#,
        )
        .bind(emp.id)
        .bind(start_dt)
        .bind(end_dt)
        .fetch_one(pool)
        .await?
        .unwrap_or(0);

        let slip_status = existing_slip_status(pool, emp.id, month, year).await?;

        let total_pay = round_pay(pay_for(
            emp.contract_type,
            emp.hourly_rate,
            emp.monthly_salary,
            total_minutes,
        ));

        rows.push(SalaryRow {
            employee_id: emp.id,
            first_name: emp.first_name,
            last_name: emp.last_name,
            contract_type: emp.contract_type,
            total_minutes,
            total_hours: total_minutes as f64 / 60.0,
            total_pay,
            slip_status,
        });
    }

    Ok(rows)
}

async fn existing_slip_status<'e, E>(
    executor: E,
    employee_id: i64,
    month: u32,
    year: i32,
) -> Result<SalarySlipStatus, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let status = sqlx::query_scalar::<_, SalarySlipStatus>(
        "SELECT status FROM salary_slips WHERE employee_id = ? AND month = ? AND year = ?",
    )
    .bind(employee_id)
    .bind(month as i64)
    .bind(year)
    .fetch_optional(executor)
    .await?;

    Ok(status.unwrap_or(SalarySlipStatus::Pending))
}

/// Idempotent slip generation, keyed by (employee, month, year). A second
/// run fails with `SalaryExists` unless forced, in which case the numeric
/// fields of the same row are recomputed in place. Only approved logs count.
pub async fn create_or_update_salary_slip(
    pool: &SqlitePool,
    employee_id: i64,
    month: u32,
    year: i32,
    force_update: bool,
) -> CoreResult<SalarySlip> {
    let (month_start, month_end) = month_bounds(year, month)?;

    let mut tx = pool.begin().await?;

    let company_id = reference::employee_company(&mut *tx, employee_id).await?;
    let terms = reference::contract_terms(&mut *tx, employee_id).await?;

    let existing = sqlx::query_as::<_, SalarySlip>(
        r#"
        SELECT id, employee_id, company_id, month, year, total_minutes, total_hours,
               total_pay, tax, status
        FROM salary_slips
        WHERE employee_id = ? AND month = ? AND year = ?
        "#,
    )
    .bind(employee_id)
    .bind(month as i64)
    .bind(year)
    .fetch_optional(&mut *tx)
    .await?;

    if existing.is_some() && !force_update {
        return Err(CoreError::SalaryExists { month, year });
    }

    let total_minutes = sqlx::query_scalar::<_, Option<i64>>(
        r#"
        SELECT SUM(total_minutes)
        FROM time_logs
        WHERE employee_id = ?
          AND status = 'approved'
          AND logout_time IS NOT NULL
          AND total_minutes IS NOT NULL
          AND log_date >= ? AND log_date < ?
        "#,
    )
    .bind(employee_id)
    .bind(month_start)
    .bind(month_end)
    .fetch_one(&mut *tx)
    .await?
    .unwrap_or(0);

    let total_hours = total_minutes as f64 / 60.0;
    let total_pay = round_pay(pay_for(
        terms.contract_type,
        terms.hourly_rate,
        terms.monthly_salary,
        total_minutes,
    ));

    let slip = match existing {
        Some(slip) => {
            sqlx::query_as::<_, SalarySlip>(
                r#"
                UPDATE salary_slips
                SET total_minutes = ?, total_hours = ?, total_pay = ?
                WHERE id = ?
                RETURNING id, employee_id, company_id, month, year, total_minutes,
                          total_hours, total_pay, tax, status
                "#,
            )
            .bind(total_minutes)
            .bind(total_hours)
            .bind(total_pay)
            .bind(slip.id)
            .fetch_one(&mut *tx)
            .await?
        }
        None => {
            sqlx::query_as::<_, SalarySlip>(
                r#"
                INSERT INTO salary_slips
                    (employee_id, company_id, month, year, total_minutes, total_hours,
                     total_pay, tax, status)
                VALUES (?, ?, ?, ?, ?, ?, ?, 0, 'draft')
                RETURNING id, employee_id, company_id, month, year, total_minutes,
                          total_hours, total_pay, tax, status
                "#,
            )
            .bind(employee_id)
            .bind(company_id)
            .bind(month as i64)
            .bind(year)
            .bind(total_minutes)
            .bind(total_hours)
            .bind(total_pay)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                // Concurrent payroll run beat us to the unique key.
                if CoreError::is_unique_violation(&e) {
                    CoreError::SalaryExists { month, year }
                } else {
                    CoreError::Database(e)
                }
            })?
        }
    };

    tx.commit().await?;
    Ok(slip)
}
