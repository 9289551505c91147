//! The page and endpoint for editing one of the current user's transactions.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    Error,
    category::Category,
    endpoints,
    html::{FORM_CONTAINER_ID, FORM_CONTAINER_STYLE, base, currency_input_styles},
    navigation::NavBar,
    transaction::{
        Transaction, TransactionClient, TransactionId, TransactionsState,
        core::UpdateTransactionRequest,
        form::{
            TransactionFormAction, TransactionFormData, TransactionFormErrors,
            transaction_form_view,
        },
        transactions_page::categories_or_empty,
    },
    user::User,
};

/// Get a transaction that belongs to `user`.
///
/// Another user's transaction is reported as [Error::NotFound] so its
/// existence is not revealed.
pub(super) async fn get_owned_transaction(
    transactions: &TransactionClient,
    transaction_id: TransactionId,
    user: &User,
) -> Result<Transaction, Error> {
    let transaction = transactions.get_by_id(transaction_id).await?;

    if transaction.user_id != user.id {
        tracing::warn!(
            "User {} tried to access transaction {transaction_id} owned by user {}",
            user.id,
            transaction.user_id
        );
        return Err(Error::NotFound);
    }

    Ok(transaction)
}

/// Render the form for editing a transaction.
pub async fn get_edit_transaction_page(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<TransactionsState>,
    Extension(user): Extension<User>,
) -> Result<Response, Error> {
    let (transaction, categories) = tokio::join!(
        get_owned_transaction(&state.transactions, transaction_id, &user),
        categories_or_empty(&state.categories)
    );
    let transaction = transaction.inspect_err(|error| {
        tracing::error!("Failed to retrieve transaction {transaction_id}: {error}")
    })?;

    Ok(edit_transaction_view(&transaction, &categories).into_response())
}

/// Handle the transaction editing form. Redirects to the transactions view on success.
pub async fn update_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<TransactionsState>,
    Extension(user): Extension<User>,
    Form(form): Form<TransactionFormData>,
) -> Response {
    let update_endpoint = endpoints::format_endpoint(endpoints::TRANSACTION, transaction_id);

    let transaction = match form.validate() {
        Ok(transaction) => transaction,
        Err(errors) => {
            let categories = categories_or_empty(&state.categories).await;

            return transaction_form_view(
                TransactionFormAction::Update(&update_endpoint),
                &form,
                &categories,
                &errors,
            )
            .into_response();
        }
    };

    if let Err(error) = get_owned_transaction(&state.transactions, transaction_id, &user).await {
        return error.into_alert_response();
    }

    let request = UpdateTransactionRequest {
        title: Some(transaction.title),
        category_id: Some(transaction.category_id),
        // An empty description clears the old one.
        description: Some(transaction.description.unwrap_or_default()),
        amount_in_cents: Some(transaction.amount_in_cents),
        date: Some(transaction.date),
        type_: Some(transaction.type_),
    };

    match state.transactions.update(transaction_id, &request).await {
        Ok(_) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

fn edit_transaction_view(transaction: &Transaction, categories: &[Category]) -> Markup {
    let edit_endpoint =
        endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let update_endpoint = endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id);
    let nav_bar = NavBar::new(&edit_endpoint).into_html();
    let form = transaction_form_view(
        TransactionFormAction::Update(&update_endpoint),
        &TransactionFormData::from_transaction(transaction),
        categories,
        &TransactionFormErrors::default(),
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Edit Transaction" }

            div id=(FORM_CONTAINER_ID) class="w-full max-w-md" { (form) }
        }
    };

    base("Edit Transaction", &[currency_input_styles()], &content)
}
