mod common;

use common::{at, day, insert_closed_log, seed_hourly_employee, seed_monthly_employee, test_pool};
use shiftledger::error::CoreError;
use shiftledger::model::salary_slip::SalarySlipStatus;
use shiftledger::service::payroll;

#[tokio::test]
async fn hourly_slip_pays_per_minute_worked() {
    let pool = test_pool().await;
    let emp = seed_hourly_employee(&pool, 10, 100.0).await;

    insert_closed_log(&pool, emp, 10, day(2026, 1, 5), at(2026, 1, 5, 8, 0), 90, "approved").await;

    let slip = payroll::create_or_update_salary_slip(&pool, emp, 1, 2026, false)
        .await
        .unwrap();

    assert_eq!(slip.total_minutes, 90);
    assert_eq!(slip.total_hours, 1.5);
    assert_eq!(slip.total_pay, 150.0);
    assert_eq!(slip.status, SalarySlipStatus::Draft);
}

#[tokio::test]
async fn monthly_slip_is_flat_regardless_of_minutes() {
    let pool = test_pool().await;
    let emp = seed_monthly_employee(&pool, 10, 30000.0).await;

    insert_closed_log(&pool, emp, 10, day(2026, 1, 5), at(2026, 1, 5, 8, 0), 7, "approved").await;

    let slip = payroll::create_or_update_salary_slip(&pool, emp, 1, 2026, false)
        .await
        .unwrap();

    assert_eq!(slip.total_minutes, 7);
    assert_eq!(slip.total_pay, 30000.0);
}

#[tokio::test]
async fn slip_generation_is_idempotent_per_period() {
    let pool = test_pool().await;
    let emp = seed_hourly_employee(&pool, 10, 100.0).await;

    insert_closed_log(&pool, emp, 10, day(2026, 1, 5), at(2026, 1, 5, 8, 0), 60, "approved").await;

    let first = payroll::create_or_update_salary_slip(&pool, emp, 1, 2026, false)
        .await
        .unwrap();

    let err = payroll::create_or_update_salary_slip(&pool, emp, 1, 2026, false)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::SalaryExists { month: 1, year: 2026 }));

    // More work gets approved, forced recompute updates the same row.
    insert_closed_log(&pool, emp, 10, day(2026, 1, 6), at(2026, 1, 6, 8, 0), 30, "approved").await;

    let updated = payroll::create_or_update_salary_slip(&pool, emp, 1, 2026, true)
        .await
        .unwrap();
    assert_eq!(updated.id, first.id);
    assert_eq!(updated.total_minutes, 90);
    assert_eq!(updated.total_pay, 150.0);

    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM salary_slips WHERE employee_id = ?",
    )
    .bind(emp)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn slip_counts_approved_logs_only() {
    let pool = test_pool().await;
    let emp = seed_hourly_employee(&pool, 10, 100.0).await;

    insert_closed_log(&pool, emp, 10, day(2026, 1, 5), at(2026, 1, 5, 8, 0), 30, "approved").await;
    insert_closed_log(&pool, emp, 10, day(2026, 1, 6), at(2026, 1, 6, 8, 0), 60, "pending").await;
    insert_closed_log(&pool, emp, 10, day(2026, 1, 7), at(2026, 1, 7, 8, 0), 45, "rejected").await;
    // Outside the period entirely.
    insert_closed_log(&pool, emp, 10, day(2026, 2, 1), at(2026, 2, 1, 8, 0), 90, "approved").await;

    let slip = payroll::create_or_update_salary_slip(&pool, emp, 1, 2026, false)
        .await
        .unwrap();
    assert_eq!(slip.total_minutes, 30);
    assert_eq!(slip.total_pay, 50.0);
}

#[tokio::test]
async fn preview_rows_count_every_closed_log() {
    let pool = test_pool().await;
    let emp = seed_hourly_employee(&pool, 10, 100.0).await;

    insert_closed_log(&pool, emp, 10, day(2026, 1, 5), at(2026, 1, 5, 8, 0), 30, "approved").await;
    insert_closed_log(&pool, emp, 10, day(2026, 1, 6), at(2026, 1, 6, 8, 0), 60, "pending").await;

    let rows = payroll::compute_monthly_salary_rows(&pool, 10, 2026, 1)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_minutes, 90);
    assert_eq!(rows[0].total_pay, 150.0);
    // No slip yet: the estimate reports pending.
    assert_eq!(rows[0].slip_status, SalarySlipStatus::Pending);

    payroll::create_or_update_salary_slip(&pool, emp, 1, 2026, false)
        .await
        .unwrap();

    let rows = payroll::compute_monthly_salary_rows(&pool, 10, 2026, 1)
        .await
        .unwrap();
    assert_eq!(rows[0].slip_status, SalarySlipStatus::Draft);
}

#[tokio::test]
async fn preview_skips_employees_hired_after_month_end() {
    let pool = test_pool().await;
    seed_hourly_employee(&pool, 10, 100.0).await;

    sqlx::query(
        r#"
        INSERT INTO employees (company_id, first_name, last_name, contract_type, hourly_rate, hire_date)
        VALUES (10, 'Late', 'Hire', 'hourly', 100.0, '2026-02-15')
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let rows = payroll::compute_monthly_salary_rows(&pool, 10, 2026, 1)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn unknown_employee_cannot_get_a_slip() {
    let pool = test_pool().await;

    let err = payroll::create_or_update_salary_slip(&pool, 999, 1, 2026, false)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::EmployeeNotFound(999)));
}

#[tokio::test]
async fn invalid_period_is_rejected() {
    let pool = test_pool().await;
    let emp = seed_hourly_employee(&pool, 10, 100.0).await;

    let err = payroll::create_or_update_salary_slip(&pool, emp, 13, 2026, false)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::InvalidPeriod { month: 13, year: 2026 }));
}
