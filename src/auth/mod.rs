//! Logging in and out, registration, and the guards for protected routes.

mod log_in;
mod log_out;
mod middleware;
mod redirect;
mod register;

pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};
pub use register::{get_register_page, register_user};
