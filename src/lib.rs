//! Fintrack is a web app for tracking personal income and expenses.
//!
//! This library serves HTML pages for a personal finance REST API. It does not
//! store any financial data itself: users, categories and transactions live in
//! the remote API and every page is rendered from the API's responses. The only
//! state kept locally is the logged in user, see [Session].

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod account;
mod alert;
mod api;
mod app_state;
mod auth;
mod category;
mod config;
mod dashboard;
mod endpoints;
mod error;
mod error_page;
mod html;
mod logging;
mod navigation;
mod report;
mod routing;
mod session;
mod timezone;
mod transaction;
mod user;

#[cfg(test)]
mod test_utils;

pub use api::ApiClient;
pub use app_state::AppState;
pub use category::{
    BootstrapReport, Category, CategoryClient, CategoryId, DEFAULT_CATEGORY_NAMES,
    ensure_default_categories, spawn_category_bootstrapper,
};
pub use config::Config;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use report::{
    CategoryTotal, MonthKey, MonthlyTotals, Report, Totals, build_report, calculate_totals,
    expenses_by_category, monthly_series,
};
pub use routing::build_router;
pub use session::{JsonFileStore, KeyValueStore, MemoryStore, Session, SessionSubscriber};
pub use transaction::{Transaction, TransactionClient, TransactionSummary, TransactionType};
pub use user::{User, UserClient, UserId};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
