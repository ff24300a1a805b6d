use crate::api::attendance::{ClockInRequest, ConfirmClockInRequest, ConfirmMode};
use crate::api::payroll::{CreateSalarySlip, SalaryRowsQuery, SalaryRowsResponse};
use crate::api::schedule::{
    CreateSchedule, CreateScheduleResponse, SwapSchedules, SwapSchedulesResponse, UpdateSchedule,
};
use crate::model::employee::{ContractType, Employee};
use crate::model::salary_slip::{SalarySlip, SalarySlipStatus};
use crate::model::schedule::Schedule;
use crate::model::time_log::{TimeLog, TimeLogStatus};
use crate::service::attendance::SessionOutcome;
use crate::service::payroll::SalaryRow;
use crate::service::schedule::{EmployeeShiftOutcome, ShiftOutcome};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shiftledger API",
        version = "1.0.0",
        description = r#"
## Attendance & Payroll Computation Engine

Core operations of a workforce-management backend:

- **Attendance** — clock-in/clock-out sessions with a single-open-session
  guarantee per employee, early-login branching and auto-close of runaway
  shifts.
- **Schedule** — shift planning with overlap detection, replace semantics
  and atomic swaps.
- **Payroll** — monthly previews and idempotent salary slip generation
  (hourly and monthly contracts).

Built with **Actix Web**, **SQLx** and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::clock_in,
        crate::api::attendance::confirm_clock_in,
        crate::api::attendance::clock_out,
        crate::api::attendance::approve_time_log,
        crate::api::attendance::reject_time_log,

        crate::api::schedule::create_schedule,
        crate::api::schedule::update_schedule,
        crate::api::schedule::swap_schedules,

        crate::api::payroll::salary_rows,
        crate::api::payroll::create_salary_slip
    ),
    components(
        schemas(
            ClockInRequest,
            ConfirmClockInRequest,
            ConfirmMode,
            SessionOutcome,
            TimeLog,
            TimeLogStatus,
            CreateSchedule,
            CreateScheduleResponse,
            UpdateSchedule,
            SwapSchedules,
            SwapSchedulesResponse,
            Schedule,
            EmployeeShiftOutcome,
            ShiftOutcome,
            SalaryRowsQuery,
            SalaryRowsResponse,
            SalaryRow,
            CreateSalarySlip,
            SalarySlip,
            SalarySlipStatus,
            Employee,
            ContractType
        )
    ),
    tags(
        (name = "Attendance", description = "Clock-in/clock-out session APIs"),
        (name = "Schedule", description = "Shift planning APIs"),
        (name = "Payroll", description = "Payroll computation APIs"),
    )
)]
pub struct ApiDoc;
