//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    error_page::{NotFoundPage, ServerErrorPage},
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The email and password did not match a registered user.
    #[error("incorrect email or password")]
    InvalidCredentials,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error occurs when the API responds with 404.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The API responded with a status code other than 2xx or 404.
    ///
    /// `message` is taken from the `message` field of the response body when
    /// present, otherwise it is the canonical reason for the status code.
    #[error("the API responded with {status}: {message}")]
    ApiStatus {
        /// The HTTP status code of the response.
        status: u16,
        /// The error message sent by the API.
        message: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("could not reach the API: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("could not decode the API response: {0}")]
    Decode(String),

    /// The API base URL is not a valid absolute URL.
    #[error("invalid API URL \"{0}\"")]
    InvalidApiUrl(String),

    /// The session could not be read from or written to the key-value store.
    #[error("session storage failed: {0}")]
    SessionStorage(String),

    /// An amount could not be converted to a whole number of cents.
    #[error("{0}")]
    InvalidAmount(String),

    /// A date string was not in the `YYYY-MM-DD` format.
    #[error("\"{0}\" is not a valid date")]
    InvalidDate(String),

    /// A category name had fewer than two characters.
    #[error("Category name must have at least 2 characters")]
    CategoryNameTooShort,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            tracing::error!("could not decode API response: {value}");
            Error::Decode(value.to_string())
        } else {
            tracing::error!("an unhandled HTTP client error occurred: {value}");
            Error::Transport(value.to_string())
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundPage.into_response(),
            Error::Transport(_) => ServerErrorPage {
                status: StatusCode::BAD_GATEWAY,
                description: "Could not reach the server",
                fix: "The finance API is not responding. Check that it is running and try again.",
            }
            .into_response(),
            Error::InvalidTimezoneError(timezone) => ServerErrorPage {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ServerErrorPage::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Alert::ErrorSimple {
                    message: "Incorrect email or password.".to_owned(),
                },
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Not found".to_owned(),
                    details: "The item could not be found. \
                    Try refreshing the page to see if it has already been deleted."
                        .to_owned(),
                },
            ),
            Error::ApiStatus { status, message } => (
                StatusCode::from_u16(status)
                    .ok()
                    .filter(|status| status.is_client_error() || status.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                Alert::Error {
                    message: "The request was rejected".to_owned(),
                    details: message,
                },
            ),
            Error::Transport(_) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Could not reach the server".to_owned(),
                    details: "The finance API is not responding. Try again later.".to_owned(),
                },
            ),
            Error::InvalidAmount(details) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details,
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
