//! Log-out route handler that clears the session and redirects users.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::{AppState, endpoints, session::Session};

/// The state needed to log out.
#[derive(Debug, Clone)]
pub struct LogOutState {
    pub session: Arc<Session>,
}

impl FromRef<AppState> for LogOutState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session: state.session.clone(),
        }
    }
}

/// Forget the logged in user and redirect the client to the log-in page.
pub async fn get_log_out(State(state): State<LogOutState>) -> Response {
    if let Some(user) = state.session.current() {
        tracing::info!("User {} logged out", user.id);
    }

    state.session.clear();

    Redirect::to(endpoints::LOG_IN_VIEW).into_response()
}
