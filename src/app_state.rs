//! Implements a struct that holds the state of the web server.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    ApiClient, category::CategoryClient, session::Session, transaction::TransactionClient,
    user::UserClient,
};

/// The state of the web server.
///
/// Route handlers take the parts they need through `FromRef` sub-states.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The logged in user, shared by all requests.
    pub session: Arc<Session>,

    /// The connection to the finance REST API.
    pub api: ApiClient,

    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl AppState {
    /// Create the state for a server that talks to `api`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "America/Sao_Paulo".
    pub fn new(api: ApiClient, session: Arc<Session>, local_timezone: &str) -> Self {
        Self {
            session,
            api,
            local_timezone: local_timezone.to_owned(),
        }
    }
}

impl FromRef<AppState> for CategoryClient {
    fn from_ref(state: &AppState) -> Self {
        CategoryClient::new(state.api.clone())
    }
}

impl FromRef<AppState> for TransactionClient {
    fn from_ref(state: &AppState) -> Self {
        TransactionClient::new(state.api.clone())
    }
}

impl FromRef<AppState> for UserClient {
    fn from_ref(state: &AppState) -> Self {
        UserClient::new(state.api.clone())
    }
}
