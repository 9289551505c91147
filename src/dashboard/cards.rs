//! Card components for the dashboard summary.

use maud::{Markup, html};

use crate::{html::format_currency, transaction::TransactionSummary};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md flex flex-col gap-2";
const GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const RED_STYLE: &str = "text-red-600 dark:text-red-400";
const NEUTRAL_STYLE: &str = "text-gray-900 dark:text-white";

struct Card<'a> {
    label: &'a str,
    value: String,
    style: &'static str,
}

fn card(card: Card<'_>) -> Markup {
    html! {
        div class=(CARD_STYLE) data-card=(card.label)
        {
            span class="text-sm text-gray-600 dark:text-gray-400" { (card.label) }
            span class={ "text-2xl font-bold " (card.style) } { (card.value) }
        }
    }
}

fn signed(cents: u64) -> i64 {
    i64::try_from(cents).unwrap_or(i64::MAX)
}

/// The income, expense, balance and count cards.
///
/// With no summary, each card shows a placeholder instead of a value.
pub(super) fn summary_cards(summary: Option<&TransactionSummary>) -> Markup {
    let cards = match summary {
        Some(summary) => [
            Card {
                label: "Income",
                value: format_currency(signed(summary.total_income)),
                style: GREEN_STYLE,
            },
            Card {
                label: "Expenses",
                value: format_currency(signed(summary.total_expense)),
                style: RED_STYLE,
            },
            Card {
                label: "Balance",
                value: format_currency(summary.balance),
                style: if summary.balance >= 0 {
                    GREEN_STYLE
                } else {
                    RED_STYLE
                },
            },
            Card {
                label: "Transactions",
                value: summary.transaction_count.to_string(),
                style: NEUTRAL_STYLE,
            },
        ],
        None => ["Income", "Expenses", "Balance", "Transactions"].map(|label| Card {
            label,
            value: "—".to_owned(),
            style: NEUTRAL_STYLE,
        }),
    };

    html! {
        section class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 w-full"
        {
            @for item in cards {
                (card(item))
            }
        }
    }
}
