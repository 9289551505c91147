//! The profile page where users update or delete their account.

mod delete_endpoint;
mod form;
mod page;
mod update_endpoint;

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{AppState, session::Session, user::UserClient};

pub use delete_endpoint::delete_account_endpoint;
pub use page::get_account_page;
pub use update_endpoint::update_account_endpoint;

/// The state needed to change the logged in user's account.
///
/// The session is updated along with the API so the rest of the app sees the change.
#[derive(Debug, Clone)]
pub struct AccountState {
    pub session: Arc<Session>,
    pub users: UserClient,
}

impl FromRef<AppState> for AccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session: state.session.clone(),
            users: UserClient::new(state.api.clone()),
        }
    }
}
