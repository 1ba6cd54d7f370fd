pub mod attendance;
pub mod employee_id;
