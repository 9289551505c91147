//! Helpers shared by the unit tests.

#![allow(missing_docs)]

mod fake_api;
mod form;
mod html;
mod http;

use std::sync::Arc;

use axum::Router;

use crate::{
    AppState,
    session::{MemoryStore, Session},
    user::User,
};

pub(crate) use fake_api::FakeApi;
pub(crate) use form::{
    assert_form_error_message, assert_form_input, assert_form_input_with_value,
    assert_form_submit_button, assert_hx_endpoint, must_get_form, select_options,
};
pub(crate) use html::{
    assert_valid_html, parse_html_document, parse_html_fragment, select_text,
};
pub(crate) use http::{assert_content_type, assert_hx_redirect, get_header};

/// Serve `router` on a random local port and return its base URL, e.g.
/// "http://127.0.0.1:41234".
///
/// The server runs until the test's runtime shuts down.
pub(crate) async fn serve_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("could not bind test listener");
    let address = listener
        .local_addr()
        .expect("could not get test listener address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("test server stopped unexpectedly");
    });

    format!("http://{address}")
}

/// App state connected to `api` with an in-memory session and UTC as the timezone.
pub(crate) fn test_app_state(api: &FakeApi) -> AppState {
    AppState::new(
        api.client.clone(),
        Arc::new(Session::restore(MemoryStore::new())),
        "Etc/UTC",
    )
}

/// Like [test_app_state], with `user` logged in.
pub(crate) fn logged_in_app_state(api: &FakeApi, user: &User) -> AppState {
    let state = test_app_state(api);
    state.session.set_current(user.clone());
    state
}
