//! Defines the core transaction models and the request bodies for the transactions endpoints.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, api::date_format, category::CategoryId, user::UserId};

/// The ID the API assigns to a transaction.
pub type TransactionId = i64;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionType {
    /// The name used by the API and in form values.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// The label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID assigned by the API.
    pub id: TransactionId,
    /// A short name, e.g. "Mercado".
    pub title: String,
    /// The category the transaction is grouped under.
    pub category_id: CategoryId,
    /// Optional free text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The amount of money in cents. Whether it was earned or spent is given by `type_`.
    pub amount_in_cents: u64,
    /// The user who owns the transaction.
    pub user_id: UserId,
    /// When the transaction happened.
    #[serde(with = "date_format")]
    pub date: Date,
    /// Set by the API when the transaction was created.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
    /// Set by the API on the last update.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<OffsetDateTime>,
    /// Whether the amount was earned or spent.
    #[serde(rename = "type")]
    pub type_: TransactionType,
}

impl Transaction {
    /// The amount with a sign: positive for income and negative for expenses.
    pub fn signed_amount(&self) -> i64 {
        let amount = i64::try_from(self.amount_in_cents).unwrap_or(i64::MAX);

        match self.type_ {
            TransactionType::Income => amount,
            TransactionType::Expense => -amount,
        }
    }
}

/// The body of `POST /transactions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub title: String,
    pub category_id: CategoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount_in_cents: u64,
    pub user_id: UserId,
    #[serde(with = "date_format")]
    pub date: Date,
    #[serde(rename = "type")]
    pub type_: TransactionType,
}

/// The body of `PATCH /transactions/{id}`. Fields left as `None` are not changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_in_cents: Option<u64>,
    #[serde(with = "date_format::option", skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<TransactionType>,
}

/// A user's totals as calculated by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    /// The sum of income in cents.
    pub total_income: u64,
    /// The sum of expenses in cents.
    pub total_expense: u64,
    /// Income minus expenses.
    pub balance: i64,
    /// The number of the user's transactions.
    pub transaction_count: u64,
}

/// Parse an amount typed by a user, e.g. "1234,56" or "19.9", into cents.
///
/// Either a comma or a full stop may separate the cents. Thousands separators
/// are not accepted. The conversion uses integer arithmetic only.
///
/// # Errors
///
/// Returns [Error::InvalidAmount] if `text` is not a number, has more than two
/// decimal places, or is not greater than zero.
pub fn parse_amount_in_cents(text: &str) -> Result<u64, Error> {
    let text = text.trim();

    if text.is_empty() {
        return Err(Error::InvalidAmount("Amount is required".to_owned()));
    }

    let not_a_number = || Error::InvalidAmount(format!("\"{text}\" is not a valid amount"));

    let (whole, fraction) = match text.split_once([',', '.']) {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };

    let is_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());

    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(not_a_number());
    }

    if fraction.len() > 2 {
        return Err(Error::InvalidAmount(
            "Amount can have at most two decimal places".to_owned(),
        ));
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| not_a_number())?
    };
    let fraction: u64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().map_err(|_| not_a_number())? * 10,
        _ => fraction.parse().map_err(|_| not_a_number())?,
    };

    let cents = whole
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(fraction))
        .ok_or_else(not_a_number)?;

    if cents == 0 {
        return Err(Error::InvalidAmount(
            "Amount must be greater than zero".to_owned(),
        ));
    }

    Ok(cents)
}

/// Format cents for an amount input, e.g. `123456` as "1234.56".
pub fn format_amount_input(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
