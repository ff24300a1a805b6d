use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContractType {
    Hourly,
    Monthly,
}

/// Reference data row. Employee CRUD lives in another module; this core
/// only ever reads these columns.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 10)]
    pub company_id: i64,

    #[schema(example = "John")]
    pub first_name: String,

    #[schema(example = "Doe")]
    pub last_name: String,

    #[schema(example = "hourly")]
    pub contract_type: ContractType,

    #[schema(example = 100.0, nullable = true)]
    pub hourly_rate: Option<f64>,

    #[schema(example = 30000.0, nullable = true)]
    pub monthly_salary: Option<f64>,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub hire_date: NaiveDate,

    #[schema(example = "active")]
    pub status: String,
}

/// The slice of employee data the pay formula needs.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContractTerms {
    pub contract_type: ContractType,
    pub hourly_rate: Option<f64>,
    pub monthly_salary: Option<f64>,
}
