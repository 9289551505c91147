//! Full-page error responses: the 404 page and the page shown when a request
//! could not be completed.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// The page for a route or resource that does not exist.
pub struct NotFoundPage;

impl IntoResponse for NotFoundPage {
    fn into_response(self) -> Response {
        let page = error_view(
            "Not Found",
            "404",
            "Something's missing.",
            "We couldn't find that page. It may have been deleted, or the link may be wrong.",
        );

        (StatusCode::NOT_FOUND, Html(page.into_string())).into_response()
    }
}

/// The page for a request that failed for reasons outside the client's control.
///
/// `status` is usually 500, or 502 when the finance API could not be reached.
pub struct ServerErrorPage<'a> {
    pub status: StatusCode,
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for ServerErrorPage<'_> {
    fn default() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

impl IntoResponse for ServerErrorPage<'_> {
    fn into_response(self) -> Response {
        let page = error_view(
            "Server Error",
            self.status.as_str(),
            self.description,
            self.fix,
        );

        (self.status, Html(page.into_string())).into_response()
    }
}

/// Route handler for unknown paths.
pub async fn get_404_not_found() -> Response {
    NotFoundPage.into_response()
}

/// Route handler for the generic error page that HTMX redirects to.
pub async fn get_internal_server_error_page() -> Response {
    ServerErrorPage::default().into_response()
}
