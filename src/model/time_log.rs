use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TimeLogStatus {
    Pending,
    Approved,
    Rejected,
}

/// One attendance session attempt. `logout_time` is null while the session
/// is open; a partial unique index keeps at most one such row per employee.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TimeLog {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = 10)]
    pub company_id: i64,

    /// Calendar day the session is attributed to.
    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub log_date: NaiveDate,

    #[schema(example = "2026-01-05T08:00:00Z", value_type = String, format = "date-time")]
    pub login_time: DateTime<Utc>,

    #[schema(example = "2026-01-05T16:30:00Z", value_type = String, format = "date-time", nullable = true)]
    pub logout_time: Option<DateTime<Utc>>,

    /// Whole minutes between login and logout, set exactly once at close.
    #[schema(example = 510, nullable = true)]
    pub total_minutes: Option<i64>,

    pub is_scheduled: bool,

    #[schema(example = "pending")]
    pub status: TimeLogStatus,

    /// Set when the session was force-closed after exceeding the shift ceiling.
    pub auto_closed: bool,
}

impl TimeLog {
    pub fn is_open(&self) -> bool {
        self.logout_time.is_none()
    }
}
