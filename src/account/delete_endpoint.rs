use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{account::AccountState, endpoints, user::User};

/// Delete the logged in user, log them out and send them to the log-in page.
pub async fn delete_account_endpoint(
    State(state): State<AccountState>,
    Extension(user): Extension<User>,
) -> Response {
    if let Err(error) = state.users.delete(user.id).await {
        tracing::error!("Could not delete user {}: {error}", user.id);
        return error.into_alert_response();
    }

    tracing::info!("User {} deleted their account", user.id);
    state.session.clear();

    (
        HxRedirect(endpoints::LOG_IN_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
