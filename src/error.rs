use actix_web::{HttpResponse, http::StatusCode};
use thiserror::Error;

/// Typed outcomes of the core operations. Conflicts are caller decisions
/// (force-close, replace, force-update), never retried here.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("employee {0} not found")]
    EmployeeNotFound(i64),

    #[error("schedule {0} not found")]
    ScheduleNotFound(i64),

    #[error("time log {0} not found")]
    TimeLogNotFound(i64),

    #[error("another session is already open for employee {0}")]
    AlreadyOpenSession(i64),

    #[error("schedule overlaps an existing shift for employee {0}")]
    OverlapExists(i64),

    #[error("salary slip already exists for {month}/{year}")]
    SalaryExists { month: u32, year: i32 },

    #[error("no active session to close")]
    NoActiveSession,

    #[error("invalid payroll period {month}/{year}")]
    InvalidPeriod { month: u32, year: i32 },

    #[error("time log {0} is still open")]
    SessionStillOpen(i64),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl actix_web::ResponseError for CoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            CoreError::EmployeeNotFound(_)
            | CoreError::ScheduleNotFound(_)
            | CoreError::TimeLogNotFound(_) => StatusCode::NOT_FOUND,

            CoreError::AlreadyOpenSession(_)
            | CoreError::OverlapExists(_)
            | CoreError::SalaryExists { .. } => StatusCode::CONFLICT,

            CoreError::NoActiveSession | CoreError::SessionStillOpen(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            CoreError::InvalidPeriod { .. } => StatusCode::BAD_REQUEST,

            CoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let CoreError::Database(e) = self {
            tracing::error!(error = %e, "Storage failure");
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Internal Server Error"
            }));
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "message": self.to_string()
        }))
    }
}

impl CoreError {
    /// True when the underlying database error is a unique-key violation.
    /// The open-session index and the slip unique key both surface races
    /// this way; callers translate it into the matching conflict.
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
    }
}
