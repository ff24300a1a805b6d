//! Read-only access to reference data owned by other modules: contract
//! terms for the pay formula and the scheduled shift for a given day.

use chrono::NaiveDate;
use sqlx::{Executor, Sqlite};

use crate::error::{CoreError, CoreResult};
use crate::model::employee::ContractTerms;
use crate::model::schedule::Schedule;

pub async fn contract_terms<'e, E>(executor: E, employee_id: i64) -> CoreResult<ContractTerms>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, ContractTerms>(
        r#"
        SELECT contract_type, hourly_rate, monthly_salary
        FROM employees
        WHERE id = ?
        "#,
    )
    .bind(employee_id)
    .fetch_optional(executor)
    .await?
    .ok_or(CoreError::EmployeeNotFound(employee_id))
}

/// Company the employee belongs to; doubles as the existence check.
pub async fn employee_company<'e, E>(executor: E, employee_id: i64) -> CoreResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, i64>("SELECT company_id FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(executor)
        .await?
        .ok_or(CoreError::EmployeeNotFound(employee_id))
}

/// The shift planned for `date`, if any. When several rows share the same
/// reference day the earliest one wins.
pub async fn schedule_for_date<'e, E>(
    executor: E,
    employee_id: i64,
    date: NaiveDate,
) -> CoreResult<Option<Schedule>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let schedule = sqlx::query_as::<_, Schedule>(
        r#"
        SELECT id, employee_id, company_id, date, start_time, end_time
        FROM schedules
        WHERE employee_id = ? AND date = ?
        ORDER BY start_time
        LIMIT 1
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .fetch_optional(executor)
    .await?;

    Ok(schedule)
}
