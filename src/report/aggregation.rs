//! Transaction aggregation for the reports page.
//!
//! Pure functions that turn a user's transactions and the category list into
//! totals, per-category expense totals and a per-month series. All amounts
//! stay in integer cents. The results do not depend on the order of the
//! transactions.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::Display,
};

use time::Date;

use crate::{
    category::{Category, CategoryId},
    transaction::{Transaction, TransactionType},
};

/// Total income and expenses over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// The sum of income in cents.
    pub total_income: u64,
    /// The sum of expenses in cents.
    pub total_expense: u64,
    /// `total_income - total_expense`.
    pub balance: i64,
    /// How many transactions were counted, income and expenses alike.
    pub transaction_count: usize,
}

/// The expenses for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// The category the expenses belong to.
    pub category_id: CategoryId,
    /// The category's name at the time of the report.
    pub name: String,
    /// The sum of the category's expenses in cents. Never zero.
    pub total: u64,
}

/// A calendar month used to group transactions.
///
/// Orders chronologically and displays as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    /// The calendar year.
    pub year: i32,
    /// The month of the year, from 1 to 12.
    pub month: u8,
}

impl From<Date> for MonthKey {
    fn from(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month() as u8,
        }
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Income and expenses for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTotals {
    /// The month being summed.
    pub month: MonthKey,
    /// Income in cents.
    pub income: u64,
    /// Expenses in cents.
    pub expense: u64,
    /// `income - expense`.
    pub balance: i64,
}

/// Everything the reports page shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Totals over every transaction.
    pub totals: Totals,
    /// One entry per category with expenses, in category list order.
    pub expenses_by_category: Vec<CategoryTotal>,
    /// In ascending month order.
    pub monthly: Vec<MonthlyTotals>,
}

fn difference(income: u64, expense: u64) -> i64 {
    i64::try_from(i128::from(income) - i128::from(expense)).unwrap_or(if income > expense {
        i64::MAX
    } else {
        i64::MIN
    })
}

/// Sum income and expenses.
pub fn calculate_totals(transactions: &[Transaction]) -> Totals {
    let mut total_income: u64 = 0;
    let mut total_expense: u64 = 0;

    for transaction in transactions {
        match transaction.type_ {
            TransactionType::Income => {
                total_income = total_income.saturating_add(transaction.amount_in_cents)
            }
            TransactionType::Expense => {
                total_expense = total_expense.saturating_add(transaction.amount_in_cents)
            }
        }
    }

    Totals {
        total_income,
        total_expense,
        balance: difference(total_income, total_expense),
        transaction_count: transactions.len(),
    }
}

/// The expense total of each category, in the order of `categories`.
///
/// Categories without expenses are left out, as are transactions whose
/// category is not in `categories`.
pub fn expenses_by_category(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<CategoryTotal> {
    let mut expenses: HashMap<CategoryId, u64> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.type_ == TransactionType::Expense)
    {
        let total = expenses.entry(transaction.category_id).or_default();
        *total = total.saturating_add(transaction.amount_in_cents);
    }

    categories
        .iter()
        .filter_map(|category| {
            let total = expenses.get(&category.id).copied().unwrap_or_default();

            (total > 0).then(|| CategoryTotal {
                category_id: category.id,
                name: category.name.clone(),
                total,
            })
        })
        .collect()
}

/// Income, expenses and balance for each month with at least one transaction,
/// oldest first.
pub fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<MonthKey, (u64, u64)> = BTreeMap::new();

    for transaction in transactions {
        let (income, expense) = months.entry(MonthKey::from(transaction.date)).or_default();

        match transaction.type_ {
            TransactionType::Income => *income = income.saturating_add(transaction.amount_in_cents),
            TransactionType::Expense => {
                *expense = expense.saturating_add(transaction.amount_in_cents)
            }
        }
    }

    months
        .into_iter()
        .map(|(month, (income, expense))| MonthlyTotals {
            month,
            income,
            expense,
            balance: difference(income, expense),
        })
        .collect()
}

/// Build the whole report.
pub fn build_report(transactions: &[Transaction], categories: &[Category]) -> Report {
    Report {
        totals: calculate_totals(transactions),
        expenses_by_category: expenses_by_category(transactions, categories),
        monthly: monthly_series(transactions),
    }
}
