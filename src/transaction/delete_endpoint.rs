//! Defines the endpoint for deleting a transaction.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    transaction::{TransactionClient, TransactionId, edit::get_owned_transaction},
    user::User,
};

/// A route handler for deleting one of the current user's transactions, responds with an alert.
///
/// The status code has to be 200 OK or HTMX will not remove the table row.
pub async fn delete_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(transactions): State<TransactionClient>,
    Extension(user): Extension<User>,
) -> Response {
    if let Err(error) = get_owned_transaction(&transactions, transaction_id, &user).await {
        return error.into_alert_response();
    }

    match transactions.delete(transaction_id).await {
        Ok(()) => Alert::SuccessSimple {
            message: "Transaction deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
