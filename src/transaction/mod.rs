//! Income and expense transactions.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the request bodies sent to the API
//! - The `TransactionClient` for the `/transactions` endpoints
//! - View handlers for listing, creating, editing and deleting transactions

mod client;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit;
mod form;
mod new_category_endpoint;
mod transactions_page;

use axum::extract::FromRef;

use crate::{AppState, category::CategoryClient};

pub use client::TransactionClient;
pub use core::{Transaction, TransactionId, TransactionSummary, TransactionType};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit::{get_edit_transaction_page, update_transaction_endpoint};
pub use new_category_endpoint::create_transaction_category_endpoint;
pub use transactions_page::get_transactions_page;

/// The state needed by the transaction pages and endpoints.
#[derive(Debug, Clone)]
pub struct TransactionsState {
    pub transactions: TransactionClient,
    /// For the category select in the transaction form.
    pub categories: CategoryClient,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: TransactionClient::new(state.api.clone()),
            categories: CategoryClient::new(state.api.clone()),
            local_timezone: state.local_timezone.clone(),
        }
    }
}
