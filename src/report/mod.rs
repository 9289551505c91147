//! Reports module
//!
//! Aggregates the current user's transactions into totals, expenses per
//! category and a monthly series, and shows them as charts and tables.

mod aggregation;
mod charts;
mod handlers;
mod tables;

pub use aggregation::{
    CategoryTotal, MonthKey, MonthlyTotals, Report, Totals, build_report, calculate_totals,
    expenses_by_category, monthly_series,
};
pub use handlers::get_reports_page;
