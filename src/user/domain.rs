//! The user model and the request bodies for the users endpoints.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::api::date_format;

/// The ID the API assigns to a user.
pub type UserId = i64;

/// A registered user as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The ID assigned by the API.
    pub id: UserId,
    /// The email the user logs in with.
    pub email: String,
    /// A national identity document number, e.g. a CPF.
    pub document: String,
    /// The user's full name, if they gave one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    /// The date of birth, if given.
    #[serde(
        default,
        with = "date_format::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub birthdate: Option<Date>,
}

impl User {
    /// The name to greet the user with: their full name if set, otherwise their email.
    pub fn display_name(&self) -> &str {
        self.fullname
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(self.email.as_str())
    }
}

/// The fewest characters a new password may have.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Check that `email` looks like an email address, e.g. "ana@example.com".
pub fn is_valid_email(email: &str) -> bool {
    email_address::EmailAddress::is_valid(email.trim())
}

/// The body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// The email to log in with.
    pub email: String,
    /// At least [PASSWORD_MIN_LENGTH] characters.
    pub password: String,
    /// A national identity document number.
    pub document: String,
    /// Optional full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    /// Optional date of birth.
    #[serde(with = "date_format::option", skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<Date>,
}

/// The body of `PATCH /users/{id}`. Fields left as `None` are not changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(with = "date_format::option", skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<Date>,
}

/// The body of `POST /users/login`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    /// The email the user registered with.
    pub email: String,
    /// The password in plain text. It is only sent to the API.
    pub password: String,
}
