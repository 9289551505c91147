//! The log-in page and the endpoint that checks credentials with the API.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::redirect::parse_redirect_url,
    endpoints,
    html::{
        FORM_CONTAINER_TARGET, LINK_STYLE, TextInput, base, log_in_register, password_input,
        submit_button,
    },
    session::Session,
    user::{LoginRequest, UserClient, is_valid_email},
};

pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Incorrect email or password.";

#[derive(Debug, Default)]
struct LogInFormErrors<'a> {
    email: Option<&'a str>,
    password: Option<&'a str>,
}

fn log_in_form(email: &str, errors: LogInFormErrors<'_>, redirect_url: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-target=(FORM_CONTAINER_TARGET)
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4 md:space-y-6"
        {
            @if let Some(redirect_url) = redirect_url {
                input type="hidden" name="redirect_url" value=(redirect_url);
            }

            (TextInput {
                label: "Email",
                name: "email",
                type_: "email",
                value: email,
                placeholder: "name@example.com",
                required: true,
                error_message: errors.email,
            }.into_html())

            (password_input(0, errors.password))

            (submit_button("Log in"))

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Don't have an account? "
                a href=(endpoints::REGISTER_VIEW) tabindex="0" class=(LINK_STYLE)
                {
                    "Register here"
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    pub redirect_url: Option<String>,
}

/// Display the log-in page.
pub async fn get_log_in_page(Query(query): Query<RedirectQuery>) -> Response {
    let redirect_url = parse_redirect_url(query.redirect_url.as_deref(), "log-in query");
    let form = log_in_form("", LogInFormErrors::default(), redirect_url.as_deref());
    let content = log_in_register("Log in to your account", &form);

    base("Log In", &[], &content).into_response()
}

/// The state needed to perform a log in.
#[derive(Debug, Clone)]
pub struct LogInState {
    pub session: Arc<Session>,
    pub users: UserClient,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            session: state.session.clone(),
            users: UserClient::new(state.api.clone()),
        }
    }
}

/// The raw data entered by the user in the log-in form.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LogInData {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Optional URL to redirect to after logging in.
    #[serde(default)]
    pub redirect_url: Option<String>,
}

/// Handler for log-in requests via the POST method.
///
/// On success the user is saved in the session and the client is redirected
/// to the dashboard, or the page they were on before being asked to log in.
/// Invalid input and rejected credentials return the form with an error
/// message, while other API errors are shown as an alert.
pub async fn post_log_in(
    State(state): State<LogInState>,
    Form(data): Form<LogInData>,
) -> Response {
    let redirect_url = parse_redirect_url(data.redirect_url.as_deref(), "log-in form");
    let redirect_url = redirect_url.as_deref();
    let email = data.email.trim();

    if !is_valid_email(email) {
        let errors = LogInFormErrors {
            email: Some("Enter a valid email address"),
            ..Default::default()
        };
        return log_in_form(email, errors, redirect_url).into_response();
    }

    if data.password.is_empty() {
        let errors = LogInFormErrors {
            password: Some("Enter your password"),
            ..Default::default()
        };
        return log_in_form(email, errors, redirect_url).into_response();
    }

    let request = LoginRequest {
        email: email.to_owned(),
        password: data.password,
    };

    match state.users.log_in(&request).await {
        Ok(user) => {
            tracing::info!("User {} logged in", user.id);
            state.session.set_current(user);

            (
                HxRedirect(redirect_url.unwrap_or(endpoints::DASHBOARD_VIEW).to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(Error::InvalidCredentials) => {
            let errors = LogInFormErrors {
                password: Some(INVALID_CREDENTIALS_ERROR_MSG),
                ..Default::default()
            };
            log_in_form(email, errors, redirect_url).into_response()
        }
        Err(error) => {
            tracing::error!("Could not log in: {error}");
            error.into_alert_response()
        }
    }
}


#[cfg(test)]
mod post_log_in_tests {
    use axum::{
        Form,
        extract::{FromRef, State},
        http::StatusCode,
    };

    use crate::{
        ApiClient, AppState, endpoints,
        test_utils::{
            FakeApi, assert_form_error_message, assert_hx_redirect, assert_valid_html,
            must_get_form, parse_html_fragment, test_app_state,
        },
    };

    use super::{INVALID_CREDENTIALS_ERROR_MSG, LogInData, LogInState, post_log_in};

    fn form(email: &str, password: &str) -> Form<LogInData> {
        Form(LogInData {
            email: email.to_owned(),
            password: password.to_owned(),
            redirect_url: None,
        })
    }

    #[tokio::test]
    async fn log_in_saves_user_and_redirects_to_dashboard() {
        let api = FakeApi::spawn().await;
        let user = api.add_user("ana@example.com", "hunter22");
        let state = test_app_state(&api);

        let response = post_log_in(
            State(LogInState::from_ref(&state)),
            form("ana@example.com", "hunter22"),
        )
        .await;

        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
        assert_eq!(state.session.current(), Some(user));
    }

    #[tokio::test]
    async fn log_in_redirects_to_requested_page() {
        let api = FakeApi::spawn().await;
        api.add_user("ana@example.com", "hunter22");
        let state = test_app_state(&api);
        let mut data = form("ana@example.com", "hunter22");
        data.redirect_url = Some("/reports".to_owned());

        let response = post_log_in(State(LogInState::from_ref(&state)), data).await;

        assert_hx_redirect(&response, endpoints::REPORTS_VIEW);
    }

    #[tokio::test]
    async fn wrong_password_shows_error_in_form() {
        let api = FakeApi::spawn().await;
        api.add_user("ana@example.com", "hunter22");
        let state = test_app_state(&api);

        let response = post_log_in(
            State(LogInState::from_ref(&state)),
            form("ana@example.com", "wrong"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert_form_error_message(&must_get_form(&html), INVALID_CREDENTIALS_ERROR_MSG);
        assert_eq!(state.session.current(), None);
    }

    #[tokio::test]
    async fn invalid_email_is_rejected_without_calling_api() {
        let api = FakeApi::spawn().await;
        let state = test_app_state(&api);

        let response = post_log_in(
            State(LogInState::from_ref(&state)),
            form("not-an-email", "hunter22"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_form_error_message(&must_get_form(&html), "Enter a valid email address");
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn unreachable_api_shows_alert() {
        let api = FakeApi::spawn().await;
        let state = AppState {
            api: ApiClient::new("http://127.0.0.1:9").unwrap(),
            ..test_app_state(&api)
        };

        let response = post_log_in(
            State(LogInState::from_ref(&state)),
            form("ana@example.com", "hunter22"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(state.session.current(), None);
    }
}
