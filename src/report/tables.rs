//! Summary cards and tables for the reports page.

use maud::{Markup, html};

use crate::{
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    report::aggregation::{CategoryTotal, MonthlyTotals, Totals},
};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";
const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";

fn amount_color_class(amount: i64) -> &'static str {
    if amount >= 0 {
        TABLE_CELL_GREEN_STYLE
    } else {
        TABLE_CELL_RED_STYLE
    }
}

fn signed(cents: u64) -> i64 {
    i64::try_from(cents).unwrap_or(i64::MAX)
}

/// Cards with total income, total expenses and the balance.
pub(super) fn totals_cards(totals: &Totals) -> Markup {
    let card = |label: &str, amount: i64, style: &str| {
        html! {
            div class=(CARD_STYLE) data-total=(label)
            {
                p class="text-sm text-gray-600 dark:text-gray-400" { (label) }
                p class={ "text-2xl font-bold " (style) } { (format_currency(amount)) }
            }
        }
    };

    html! {
        section class="grid grid-cols-1 sm:grid-cols-3 gap-4 w-full mb-8"
        {
            (card("Income", signed(totals.total_income), TABLE_CELL_GREEN_STYLE))
            (card("Expenses", signed(totals.total_expense), TABLE_CELL_RED_STYLE))
            (card("Balance", totals.balance, amount_color_class(totals.balance)))
        }
    }
}

/// A table with income, expenses and balance for each month.
pub(super) fn monthly_table(monthly: &[MonthlyTotals]) -> Markup {
    html! {
        div class="w-full"
        {
            h3 class="text-xl font-semibold mb-4" { "Monthly Summary" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table id="monthly-table" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Month" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Income" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Expenses" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Balance" }
                        }
                    }

                    tbody
                    {
                        @for month in monthly {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                th scope="row" class=(TABLE_CELL_STYLE) { (month.month) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(signed(month.income))) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(signed(month.expense))) }
                                td class={ (TABLE_CELL_STYLE) " " (amount_color_class(month.balance)) }
                                {
                                    (format_currency(month.balance))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// A table of expenses per category with each category's share of the total.
pub(super) fn category_table(expenses: &[CategoryTotal]) -> Markup {
    let total: u64 = expenses.iter().map(|category| category.total).sum();
    // Whole percent, rounded half up, in integer arithmetic.
    let share = |amount: u64| {
        if total == 0 {
            0
        } else {
            (u128::from(amount) * 100 + u128::from(total) / 2) / u128::from(total)
        }
    };

    html! {
        div class="w-full"
        {
            h3 class="text-xl font-semibold mb-4" { "Expenses by Category" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table id="category-table" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Spent" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Share" }
                        }
                    }

                    tbody
                    {
                        @for category in expenses {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                th scope="row" class=(TABLE_CELL_STYLE) { (category.name) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(signed(category.total))) }
                                td class=(TABLE_CELL_STYLE) { (share(category.total)) "%" }
                            }
                        }
                    }
                }
            }
        }
    }
}
