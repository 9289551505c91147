use axum::{
    Extension, Form,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{
    account::{
        AccountState,
        form::{AccountFormData, AccountFormErrors, account_form_view},
    },
    alert::Alert,
    user::User,
};

/// Save changes to the logged in user's profile.
///
/// On success the session is updated with the user returned by the API and
/// the form is shown again with a confirmation.
pub async fn update_account_endpoint(
    State(state): State<AccountState>,
    Extension(user): Extension<User>,
    Form(form): Form<AccountFormData>,
) -> Response {
    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => return account_form_view(&form, &errors, None).into_response(),
    };

    match state.users.update(user.id, &request).await {
        Ok(updated) => {
            tracing::info!("User {} updated their account", updated.id);
            let form = AccountFormData::from_user(&updated);
            state.session.set_current(updated);

            let notice = Alert::SuccessSimple {
                message: "Account updated successfully".to_owned(),
            }
            .into_html();

            account_form_view(&form, &AccountFormErrors::default(), Some(notice)).into_response()
        }
        Err(error) => {
            tracing::error!("Could not update user {}: {error}", user.id);
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension, Form,
        extract::{FromRef, State},
        http::StatusCode,
    };
    use time::macros::date;

    use crate::{
        account::{AccountState, form::AccountFormData},
        test_utils::{
            FakeApi, assert_form_error_message, assert_form_input_with_value, assert_valid_html,
            logged_in_app_state, must_get_form, parse_html_fragment, select_text,
        },
    };

    use super::update_account_endpoint;

    fn form() -> AccountFormData {
        AccountFormData {
            email: "ana.souza@example.com".to_owned(),
            document: "123.456.789-00".to_owned(),
            fullname: "Ana Souza".to_owned(),
            birthdate: "1990-05-20".to_owned(),
            password: String::new(),
            confirm_password: String::new(),
        }
    }

    #[tokio::test]
    async fn update_saves_changes_and_refreshes_session() {
        let api = FakeApi::spawn().await;
        let user = api.add_user("ana@example.com", "secret123");
        let state = logged_in_app_state(&api, &user);

        let response = update_account_endpoint(
            State(AccountState::from_ref(&state)),
            Extension(user.clone()),
            Form(form()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert_eq!(
            select_text(&html, "div[role=alert] p"),
            vec!["Account updated successfully"]
        );
        assert_form_input_with_value(&must_get_form(&html), "email", "ana.souza@example.com");

        let current = state.session.current().expect("user should still be logged in");
        assert_eq!(current.email, "ana.souza@example.com");
        assert_eq!(current.fullname.as_deref(), Some("Ana Souza"));
        assert_eq!(current.birthdate, Some(date!(1990 - 05 - 20)));
    }

    #[tokio::test]
    async fn new_password_is_sent_to_api() {
        let api = FakeApi::spawn().await;
        let user = api.add_user("ana@example.com", "secret123");
        let state = logged_in_app_state(&api, &user);
        let form = AccountFormData {
            password: "hunter22".to_owned(),
            confirm_password: "hunter22".to_owned(),
            ..form()
        };

        update_account_endpoint(
            State(AccountState::from_ref(&state)),
            Extension(user),
            Form(form),
        )
        .await;

        let password = api.with_db(|db| db.users[0].1.clone());
        assert_eq!(password, "hunter22");
    }

    #[tokio::test]
    async fn invalid_form_is_not_sent() {
        let api = FakeApi::spawn().await;
        let user = api.add_user("ana@example.com", "secret123");
        let state = logged_in_app_state(&api, &user);
        let form = AccountFormData {
            document: "  ".to_owned(),
            ..form()
        };

        let response = update_account_endpoint(
            State(AccountState::from_ref(&state)),
            Extension(user.clone()),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_form_error_message(&must_get_form(&html), "Enter your document number");
        assert_eq!(api.request_count(), 0);
        assert_eq!(state.session.current(), Some(user));
    }

    #[tokio::test]
    async fn api_error_keeps_session_unchanged() {
        let api = FakeApi::spawn().await;
        let user = api.add_user("ana@example.com", "secret123");
        let state = logged_in_app_state(&api, &user);
        api.with_db(|db| db.users.clear());

        let response = update_account_endpoint(
            State(AccountState::from_ref(&state)),
            Extension(user.clone()),
            Form(form()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(state.session.current(), Some(user));
    }
}
