pub mod attendance;
pub mod payroll;
pub mod reference;
pub mod schedule;
