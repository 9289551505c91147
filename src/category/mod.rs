//! Expense and income categories.
//!
//! Categories are shared by all users and stored by the finance API. This
//! module provides the API client, the pages for managing categories and the
//! background task that makes sure the default categories exist.

mod bootstrap;
mod client;
mod create;
mod delete;
pub(crate) mod domain;
mod edit;
mod form;
mod list;

pub use bootstrap::{
    BootstrapReport, DEFAULT_CATEGORY_NAMES, ensure_default_categories,
    spawn_category_bootstrapper,
};
pub use client::CategoryClient;
pub use create::{create_category_endpoint, get_new_category_page};
pub use delete::delete_category_endpoint;
pub use domain::{Category, CategoryId, CategoryName};
pub use edit::{get_edit_category_page, update_category_endpoint};
pub use list::get_categories_page;
