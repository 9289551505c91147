//! Alert system for displaying success and error messages to users.
//!
//! Alerts are rendered as HTML fragments that HTMX swaps into the
//! `#alert-container` element defined in [crate::html::base]. The script in
//! `static/app.js` shows the container after a swap and hides it again when the
//! alert is dismissed.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// An alert message with the text to display to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A success message on its own.
    SuccessSimple { message: String },
    /// An error message with extra details, e.g., how to fix the error.
    Error { message: String, details: String },
    /// An error message on its own.
    ErrorSimple { message: String },
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let (is_error, message, details) = match self {
            Alert::SuccessSimple { message } => (false, message, None),
            Alert::Error { message, details } => (true, message, Some(details)),
            Alert::ErrorSimple { message } => (true, message, None),
        };

        let container_style = if is_error {
            "flex items-start gap-3 p-4 mb-4 rounded-lg shadow-lg border \
            text-red-800 bg-red-50 border-red-300 \
            dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        } else {
            "flex items-start gap-3 p-4 mb-4 rounded-lg shadow-lg border \
            text-green-800 bg-green-50 border-green-300 \
            dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        };

        html! {
            div
                role="alert"
                data-alert-kind=(if is_error { "error" } else { "success" })
                class=(container_style)
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (message) }

                    @if let Some(details) = details.filter(|details| !details.is_empty()) {
                        div class="mt-1 text-sm" { (details) }
                    }
                }

                button
                    type="button"
                    data-dismiss-alert
                    aria-label="Dismiss"
                    class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex \
                        items-center justify-center h-8 w-8 hover:bg-gray-200 \
                        dark:hover:bg-gray-700"
                {
                    "✕"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
