//! The profile form and its validation.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    api::date_format::{format_date, parse_date},
    endpoints,
    html::{FORM_CONTAINER_TARGET, TextInput, submit_button},
    user::{PASSWORD_MIN_LENGTH, UpdateUserRequest, User, is_valid_email},
};

/// The raw data entered by the user in the profile form.
///
/// The password fields are left blank to keep the current password.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountFormData {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub birthdate: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl AccountFormData {
    /// The form filled in with `user`'s current details.
    pub(super) fn from_user(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            document: user.document.clone(),
            fullname: user.fullname.clone().unwrap_or_default(),
            birthdate: user.birthdate.map(format_date).unwrap_or_default(),
            password: String::new(),
            confirm_password: String::new(),
        }
    }

    /// Check the form, returning the changes to send if every field is valid.
    ///
    /// A blank full name clears it. A blank date of birth leaves it unchanged.
    pub(super) fn validate(&self) -> Result<UpdateUserRequest, AccountFormErrors> {
        let mut errors = AccountFormErrors::default();

        let email = self.email.trim();
        if !is_valid_email(email) {
            errors.email = Some("Enter a valid email address");
        }

        let document = self.document.trim();
        if document.is_empty() {
            errors.document = Some("Enter your document number");
        }

        let birthdate = match self.birthdate.trim() {
            "" => None,
            text => match parse_date(text) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.birthdate = Some("Enter a valid date");
                    None
                }
            },
        };

        let password = if self.password.is_empty() {
            None
        } else if self.password.chars().count() < PASSWORD_MIN_LENGTH {
            errors.password = Some(format!(
                "Password must have at least {PASSWORD_MIN_LENGTH} characters"
            ));
            None
        } else if self.password != self.confirm_password {
            errors.confirm_password = Some("Passwords do not match");
            None
        } else {
            Some(self.password.clone())
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(UpdateUserRequest {
            email: Some(email.to_owned()),
            password,
            document: Some(document.to_owned()),
            fullname: Some(self.fullname.trim().to_owned()),
            birthdate,
        })
    }
}

#[derive(Debug, Default)]
pub(super) struct AccountFormErrors {
    email: Option<&'static str>,
    document: Option<&'static str>,
    birthdate: Option<&'static str>,
    password: Option<String>,
    confirm_password: Option<&'static str>,
}

impl AccountFormErrors {
    fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.document.is_none()
            && self.birthdate.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
    }
}

/// Renders the profile form. `notice` is shown above the fields, e.g. after saving.
pub(super) fn account_form_view(
    form: &AccountFormData,
    errors: &AccountFormErrors,
    notice: Option<Markup>,
) -> Markup {
    html! {
        form
            hx-put=(endpoints::ACCOUNT_API)
            hx-target=(FORM_CONTAINER_TARGET)
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="w-full space-y-4 md:space-y-6"
        {
            @if let Some(notice) = notice {
                (notice)
            }

            (TextInput {
                label: "Email",
                name: "email",
                type_: "email",
                value: form.email.trim(),
                placeholder: "name@example.com",
                required: true,
                error_message: errors.email,
            }.into_html())

            (TextInput {
                label: "Document (CPF)",
                name: "document",
                type_: "text",
                value: form.document.trim(),
                placeholder: "000.000.000-00",
                required: true,
                error_message: errors.document,
            }.into_html())

            (TextInput {
                label: "Full name",
                name: "fullname",
                type_: "text",
                value: form.fullname.trim(),
                placeholder: "Ana Souza",
                required: false,
                error_message: None,
            }.into_html())

            (TextInput {
                label: "Date of birth",
                name: "birthdate",
                type_: "date",
                value: form.birthdate.trim(),
                placeholder: "",
                required: false,
                error_message: errors.birthdate,
            }.into_html())

            (TextInput {
                label: "New password (leave blank to keep the current one)",
                name: "password",
                type_: "password",
                value: "",
                placeholder: "••••••••",
                required: false,
                error_message: errors.password.as_deref(),
            }.into_html())

            (TextInput {
                label: "Confirm new password",
                name: "confirm_password",
                type_: "password",
                value: "",
                placeholder: "••••••••",
                required: false,
                error_message: errors.confirm_password,
            }.into_html())

            (submit_button("Save Changes"))
        }
    }
}
