use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SalarySlipStatus {
    Draft,
    Pending,
    Approved,
    Paid,
    Rejected,
}

/// Computed payroll statement for one employee for one (month, year).
/// Unique on (employee_id, month, year).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct SalarySlip {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = 10)]
    pub company_id: i64,

    #[schema(example = 1)]
    pub month: i64,

    #[schema(example = 2026)]
    pub year: i64,

    #[schema(example = 9600)]
    pub total_minutes: i64,

    #[schema(example = 160.0)]
    pub total_hours: f64,

    #[schema(example = 16000.0)]
    pub total_pay: f64,

    #[schema(example = 0.0)]
    pub tax: f64,

    #[schema(example = "draft")]
    pub status: SalarySlipStatus,
}
