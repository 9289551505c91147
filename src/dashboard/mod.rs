//! Dashboard module
//!
//! The home page for logged in users, showing the totals the API calculates
//! for them.

mod cards;
mod handlers;

pub use handlers::get_dashboard_page;
