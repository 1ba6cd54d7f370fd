pub mod admin;
pub mod attendance;
