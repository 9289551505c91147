//! Defines the endpoint for creating a new transaction.

use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of rejecting the request like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    endpoints,
    transaction::{
        TransactionsState,
        core::CreateTransactionRequest,
        form::{TransactionFormAction, TransactionFormData, transaction_form_view},
        transactions_page::categories_or_empty,
    },
    user::User,
};

/// A route handler for creating a new transaction for the current user.
///
/// Redirects to the transactions view on success. Invalid input re-renders the
/// form with validation messages, and API errors are shown as an alert.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionsState>,
    Extension(user): Extension<User>,
    Form(form): Form<TransactionFormData>,
) -> Response {
    let transaction = match form.validate() {
        Ok(transaction) => transaction,
        Err(errors) => {
            let categories = categories_or_empty(&state.categories).await;

            return transaction_form_view(
                TransactionFormAction::Create(endpoints::TRANSACTIONS_API),
                &form,
                &categories,
                &errors,
            )
            .into_response();
        }
    };

    let request = CreateTransactionRequest {
        title: transaction.title,
        category_id: transaction.category_id,
        description: transaction.description,
        amount_in_cents: transaction.amount_in_cents,
        user_id: user.id,
        date: transaction.date,
        type_: transaction.type_,
    };

    match state.transactions.create(&request).await {
        Ok(transaction) => {
            tracing::info!(
                "Created transaction {} for user {}",
                transaction.id,
                transaction.user_id
            );

            (
                HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{Extension, extract::State, http::StatusCode};
    use axum_extra::extract::Form;
    use time::macros::date;

    use crate::{
        category::CategoryClient,
        endpoints,
        test_utils::{
            FakeApi, assert_hx_redirect, assert_valid_html, must_get_form, parse_html_fragment,
            select_options, select_text,
        },
        transaction::{
            TransactionClient, TransactionType, TransactionsState, create_transaction_endpoint,
            form::TransactionFormData,
        },
    };

    fn state(api: &FakeApi) -> TransactionsState {
        TransactionsState {
            transactions: TransactionClient::new(api.client.clone()),
            categories: CategoryClient::new(api.client.clone()),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn form(category_id: i64) -> TransactionFormData {
        TransactionFormData {
            type_: Some(TransactionType::Expense),
            title: "Mercado".to_owned(),
            amount: "123,45".to_owned(),
            date: "2024-01-15".to_owned(),
            category_id: category_id.to_string(),
            description: "Compras da semana".to_owned(),
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let api = FakeApi::spawn().await;
        let user = api.add_user("ana@example.com", "secret123");
        let food = api.add_category("Alimentação");

        let response =
            create_transaction_endpoint(State(state(&api)), Extension(user.clone()), Form(form(food.id)))
                .await;

        assert_hx_redirect(&response, endpoints::TRANSACTIONS_VIEW);
        let transactions = api.with_db(|db| db.transactions.clone());
        assert_eq!(transactions.len(), 1);
        let transaction = &transactions[0];
        assert_eq!(transaction.title, "Mercado");
        assert_eq!(transaction.amount_in_cents, 12345);
        assert_eq!(transaction.user_id, user.id);
        assert_eq!(transaction.category_id, food.id);
        assert_eq!(transaction.date, date!(2024 - 01 - 15));
        assert_eq!(transaction.type_, TransactionType::Expense);
        assert_eq!(
            transaction.description.as_deref(),
            Some("Compras da semana")
        );
    }

    #[tokio::test]
    async fn nonexistent_category_shows_error_alert() {
        let api = FakeApi::spawn().await;
        let user = api.add_user("ana@example.com", "secret123");

        let response =
            create_transaction_endpoint(State(state(&api)), Extension(user), Form(form(404)))
                .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert!(
            select_text(&html, "div")
                .iter()
                .any(|text| text.contains("Category not found")),
            "want alert with the API's message"
        );
        assert!(api.with_db(|db| db.transactions.is_empty()));
    }

    #[tokio::test]
    async fn invalid_form_is_rendered_again_without_creating() {
        let api = FakeApi::spawn().await;
        let user = api.add_user("ana@example.com", "secret123");
        let food = api.add_category("Alimentação");
        let invalid = TransactionFormData {
            amount: "0".to_owned(),
            ..form(food.id)
        };

        let response =
            create_transaction_endpoint(State(state(&api)), Extension(user), Form(invalid)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_eq!(
            select_text(&html, "p.text-red-600"),
            vec!["Amount must be greater than zero"]
        );
        let form = must_get_form(&html);
        assert_eq!(
            select_options(&form, "category_id")[1],
            (food.id.to_string(), "Alimentação".to_owned(), true)
        );
        let requests = api.with_db(|db| db.requests.clone());
        assert!(
            !requests.contains(&"POST /transactions".to_owned()),
            "got {requests:?}"
        );
    }
}
