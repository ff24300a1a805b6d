// Not every test binary uses every helper.
#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Fresh in-memory database with the schema applied. A single connection,
/// since every `sqlite::memory:` connection is its own database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");

    shiftledger::db::MIGRATOR
        .run(&pool)
        .await
        .expect("migrations");

    pool
}

pub async fn seed_hourly_employee(pool: &SqlitePool, company_id: i64, hourly_rate: f64) -> i64 {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO employees (company_id, first_name, last_name, contract_type, hourly_rate, hire_date)
        VALUES (?, 'Ada', 'Hourly', 'hourly', ?, '2024-01-01')
        RETURNING id
        "#,
    )
    .bind(company_id)
    .bind(hourly_rate)
    .fetch_one(pool)
    .await
    .expect("seed hourly employee")
}

pub async fn seed_monthly_employee(pool: &SqlitePool, company_id: i64, monthly_salary: f64) -> i64 {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO employees (company_id, first_name, last_name, contract_type, monthly_salary, hire_date)
        VALUES (?, 'Max', 'Monthly', 'monthly', ?, '2024-01-01')
        RETURNING id
        "#,
    )
    .bind(company_id)
    .bind(monthly_salary)
    .fetch_one(pool)
    .await
    .expect("seed monthly employee")
}

/// Inserts an already-closed session, bypassing the state machine. Used to
/// stage payroll inputs.
pub async fn insert_closed_log(
    pool: &SqlitePool,
    employee_id: i64,
    company_id: i64,
    log_date: NaiveDate,
    login_time: DateTime<Utc>,
    minutes: i64,
    status: &str,
) -> i64 {
    let logout = login_time + chrono::Duration::minutes(minutes);

    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO time_logs
            (employee_id, company_id, log_date, login_time, logout_time, total_minutes, is_scheduled, status)
        VALUES (?, ?, ?, ?, ?, ?, 1, ?)
        RETURNING id
        "#,
    )
    .bind(employee_id)
    .bind(company_id)
    .bind(log_date)
    .bind(login_time)
    .bind(logout)
    .bind(minutes)
    .bind(status)
    .fetch_one(pool)
    .await
    .expect("seed closed time log")
}

pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn day(y: i32, mo: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, mo, d).unwrap()
}
