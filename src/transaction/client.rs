//! Client for the `/transactions` endpoints.

use serde::Serialize;

use crate::{
    ApiClient, Error,
    endpoints::format_endpoint,
    transaction::{
        Transaction, TransactionId, TransactionSummary,
        core::{CreateTransactionRequest, UpdateTransactionRequest},
    },
    user::UserId,
};

const TRANSACTIONS: &str = "/transactions";
const TRANSACTION: &str = "/transactions/{transaction_id}";
const SUMMARY: &str = "/transactions/summary/{user_id}";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<UserId>,
}

/// Creates, reads, updates and deletes transactions, and fetches summaries.
#[derive(Debug, Clone)]
pub struct TransactionClient {
    api: ApiClient,
}

impl TransactionClient {
    /// Create a client that sends its requests through `api`.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Create a transaction. The API rejects unknown category IDs.
    pub async fn create(&self, request: &CreateTransactionRequest) -> Result<Transaction, Error> {
        self.api.post(TRANSACTIONS, request).await
    }

    /// Get the transactions of `user_id`, or every transaction if `None`.
    pub async fn list(&self, user_id: Option<UserId>) -> Result<Vec<Transaction>, Error> {
        self.api
            .get_with_query(TRANSACTIONS, &ListQuery { user_id })
            .await
    }

    /// Get a single transaction, whoever it belongs to.
    pub async fn get_by_id(&self, id: TransactionId) -> Result<Transaction, Error> {
        self.api.get(&format_endpoint(TRANSACTION, id)).await
    }

    /// Change the fields of a transaction that are not `None` in `request`.
    pub async fn update(
        &self,
        id: TransactionId,
        request: &UpdateTransactionRequest,
    ) -> Result<Transaction, Error> {
        self.api
            .patch(&format_endpoint(TRANSACTION, id), request)
            .await
    }

    /// Delete a transaction.
    pub async fn delete(&self, id: TransactionId) -> Result<(), Error> {
        self.api.delete(&format_endpoint(TRANSACTION, id)).await
    }

    /// Get the income and expense totals calculated by the API for `user_id`.
    pub async fn summary(&self, user_id: UserId) -> Result<TransactionSummary, Error> {
        self.api.get(&format_endpoint(SUMMARY, user_id)).await
    }
}
