//! The registration page and the endpoint that creates a user with the API.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    api::date_format::parse_date,
    endpoints,
    html::{
        FORM_CONTAINER_TARGET, LINK_STYLE, TextInput, base, log_in_register, password_input,
        submit_button,
    },
    session::Session,
    user::{CreateUserRequest, PASSWORD_MIN_LENGTH, UserClient, is_valid_email},
};

/// The raw data entered by the user in the registration form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub birthdate: String,
}

#[derive(Debug, Default)]
struct RegisterFormErrors {
    email: Option<&'static str>,
    password: Option<String>,
    confirm_password: Option<&'static str>,
    document: Option<&'static str>,
    birthdate: Option<&'static str>,
}

impl RegisterFormErrors {
    fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
            && self.document.is_none()
            && self.birthdate.is_none()
    }
}

/// Check the form, returning the request to send if every field is valid.
fn validate(form: &RegisterForm) -> Result<CreateUserRequest, RegisterFormErrors> {
    let mut errors = RegisterFormErrors::default();

    let email = form.email.trim();
    if !is_valid_email(email) {
        errors.email = Some("Enter a valid email address");
    }

    if form.password.chars().count() < PASSWORD_MIN_LENGTH {
        errors.password = Some(format!(
            "Password must have at least {PASSWORD_MIN_LENGTH} characters"
        ));
    } else if form.password != form.confirm_password {
        errors.confirm_password = Some("Passwords do not match");
    }

    let document = form.document.trim();
    if document.is_empty() {
        errors.document = Some("Enter your document number");
    }

    let birthdate = match form.birthdate.trim() {
        "" => None,
        text => match parse_date(text) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.birthdate = Some("Enter a valid date");
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    let fullname = form.fullname.trim();

    Ok(CreateUserRequest {
        email: email.to_owned(),
        password: form.password.clone(),
        document: document.to_owned(),
        fullname: (!fullname.is_empty()).then(|| fullname.to_owned()),
        birthdate,
    })
}

fn registration_form(values: &RegisterForm, errors: &RegisterFormErrors) -> Markup {
    html! {
        form
            hx-post=(endpoints::REGISTER_API)
            hx-target=(FORM_CONTAINER_TARGET)
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4 md:space-y-6"
        {
            (TextInput {
                label: "Email",
                name: "email",
                type_: "email",
                value: values.email.trim(),
                placeholder: "name@example.com",
                required: true,
                error_message: errors.email,
            }.into_html())

            (TextInput {
                label: "Document (CPF)",
                name: "document",
                type_: "text",
                value: values.document.trim(),
                placeholder: "000.000.000-00",
                required: true,
                error_message: errors.document,
            }.into_html())

            (TextInput {
                label: "Full name (optional)",
                name: "fullname",
                type_: "text",
                value: values.fullname.trim(),
                placeholder: "Ana Souza",
                required: false,
                error_message: None,
            }.into_html())

            (TextInput {
                label: "Date of birth (optional)",
                name: "birthdate",
                type_: "date",
                value: values.birthdate.trim(),
                placeholder: "",
                required: false,
                error_message: errors.birthdate,
            }.into_html())

            (password_input(PASSWORD_MIN_LENGTH as u8, errors.password.as_deref()))

            (TextInput {
                label: "Confirm Password",
                name: "confirm_password",
                type_: "password",
                value: "",
                placeholder: "••••••••",
                required: true,
                error_message: errors.confirm_password,
            }.into_html())

            (submit_button("Create account"))

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "
                a href=(endpoints::LOG_IN_VIEW) tabindex="0" class=(LINK_STYLE)
                {
                    "Log in here"
                }
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let form = registration_form(&RegisterForm::default(), &RegisterFormErrors::default());
    let content = log_in_register("Create your account", &form);

    base("Register", &[], &content).into_response()
}

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    pub session: Arc<Session>,
    pub users: UserClient,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session: state.session.clone(),
            users: UserClient::new(state.api.clone()),
        }
    }
}

/// Create a user and log them in, then redirect to the dashboard.
pub async fn register_user(
    State(state): State<RegistrationState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    let request = match validate(&form) {
        Ok(request) => request,
        Err(errors) => return registration_form(&form, &errors).into_response(),
    };

    match state.users.create(&request).await {
        Ok(user) => {
            tracing::info!("Registered user {}", user.id);
            state.session.set_current(user);

            (
                HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Could not register user: {error}");
            error.into_alert_response()
        }
    }
}
