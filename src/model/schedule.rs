use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A planned shift. `end_time` may land on the day after `date` for
/// overnight shifts (end ≤ start rolls forward by one day).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Schedule {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = 10)]
    pub company_id: i64,

    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "2026-01-05T09:00:00Z", value_type = String, format = "date-time")]
    pub start_time: DateTime<Utc>,

    #[schema(example = "2026-01-05T17:00:00Z", value_type = String, format = "date-time")]
    pub end_time: DateTime<Utc>,
}
