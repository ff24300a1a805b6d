pub mod employee;
pub mod salary_slip;
pub mod schedule;
pub mod time_log;
