//! Route guards that only let requests through while a user is logged in.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;

use crate::{AppState, auth::redirect::log_in_url_for_request, session::Session};

/// The state needed for the auth middleware.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub session: Arc<Session>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session: state.session.clone(),
        }
    }
}

#[inline]
async fn auth_guard_internal(
    state: AuthState,
    mut request: Request,
    next: Next,
    get_redirect: impl Fn(&str) -> Response,
) -> Response {
    let Some(user) = state.session.current() else {
        return get_redirect(&log_in_url_for_request(&request));
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Middleware that checks that a user is logged in.
///
/// The current [crate::User] is placed into the request and the request runs
/// normally, otherwise the client is redirected to the log-in page.
///
/// **Note**: Route handlers can use the function argument `Extension(user): Extension<User>` to receive the user.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    auth_guard_internal(state, request, next, |redirect_url| {
        Redirect::to(redirect_url).into_response()
    })
    .await
}

/// Like [auth_guard], but redirects with the `HX-Redirect` header for HTMX requests.
pub async fn auth_guard_hx(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    auth_guard_internal(state, request, next, |redirect_url| {
        (HxRedirect(redirect_url.to_owned()), StatusCode::OK).into_response()
    })
    .await
}
