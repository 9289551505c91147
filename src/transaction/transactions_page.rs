//! The transactions page: the current user's transactions and a form for adding one.

use std::collections::HashMap;

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    category::{Category, CategoryClient, CategoryId},
    endpoints,
    html::{
        CATEGORY_BADGE_STYLE, EXPENSE_TEXT_STYLE, FORM_CONTAINER_ID, INCOME_TEXT_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        currency_input_styles, edit_delete_action_links, format_currency, truncate_text,
    },
    navigation::NavBar,
    timezone::local_today,
    transaction::{
        Transaction, TransactionType, TransactionsState,
        form::{
            TransactionFormAction, TransactionFormData, TransactionFormErrors,
            transaction_form_view,
        },
    },
    user::User,
};

const MAX_DESCRIPTION_LENGTH: usize = 40;

/// Fetch the category list, or an empty list if the API fails.
///
/// The category select is then empty, but the rest of the page still works.
pub(super) async fn categories_or_empty(categories: &CategoryClient) -> Vec<Category> {
    categories
        .list()
        .await
        .inspect_err(|error| {
            tracing::warn!("Could not fetch categories, showing none: {error}")
        })
        .unwrap_or_default()
}

/// Render the current user's transactions, newest first, with the new transaction form.
pub async fn get_transactions_page(
    State(state): State<TransactionsState>,
    Extension(user): Extension<User>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let (transactions, categories) = tokio::join!(
        state.transactions.list(Some(user.id)),
        categories_or_empty(&state.categories)
    );

    let mut transactions = transactions.inspect_err(|error| {
        tracing::error!("Failed to retrieve transactions for user {}: {error}", user.id)
    })?;
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    let form = TransactionFormData::new_expense(today);

    Ok(transactions_view(&transactions, &categories, &form).into_response())
}

fn transactions_view(
    transactions: &[Transaction],
    categories: &[Category],
    form: &TransactionFormData,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();
    let category_names: HashMap<CategoryId, &str> = categories
        .iter()
        .map(|category| (category.id, category.name.as_str()))
        .collect();

    let table_row = |transaction: &Transaction| {
        let edit_url =
            endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
        let delete_url = endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id);
        let confirm_message = format!(
            "Are you sure you want to delete '{}'? This cannot be undone.",
            transaction.title
        );
        let category_name = category_names
            .get(&transaction.category_id)
            .copied()
            .unwrap_or("Unknown");
        let amount_style = match transaction.type_ {
            TransactionType::Income => INCOME_TEXT_STYLE,
            TransactionType::Expense => EXPENSE_TEXT_STYLE,
        };
        let description = transaction
            .description
            .as_deref()
            .map(|description| truncate_text(description, MAX_DESCRIPTION_LENGTH));

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { time datetime=(transaction.date) { (transaction.date) } }

                td class=(TABLE_CELL_STYLE)
                {
                    p class="font-medium text-gray-900 dark:text-white" { (transaction.title) }

                    @if let Some((description, full_description)) = &description {
                        p class="text-xs" title=[*full_description] { (description) }
                    }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    span class=(CATEGORY_BADGE_STYLE) { (category_name) }
                }

                td class={ (TABLE_CELL_STYLE) " text-right " (amount_style) }
                {
                    (format_currency(transaction.signed_amount()))
                }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(
                            &edit_url,
                            &delete_url,
                            &confirm_message,
                            "closest tr",
                            "delete",
                        ))
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="grid gap-8 lg:grid-cols-3 lg:max-w-6xl lg:w-full lg:mx-auto"
            {
                section class="space-y-4"
                {
                    h2 class="text-lg font-bold" { "New Transaction" }

                    div id=(FORM_CONTAINER_ID)
                    {
                        (transaction_form_view(
                            TransactionFormAction::Create(endpoints::TRANSACTIONS_API),
                            form,
                            categories,
                            &TransactionFormErrors::default(),
                        ))
                    }
                }

                section class="space-y-4 lg:col-span-2"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    div class="overflow-x-auto"
                    {
                        table class="w-full text-sm text-left rtl:text-right
                            text-gray-500 dark:text-gray-400"
                        {
                            thead class=(TABLE_HEADER_STYLE)
                            {
                                tr
                                {
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                    th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                                    th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                                }
                            }

                            tbody
                            {
                                @for transaction in transactions {
                                    (table_row(transaction))
                                }

                                @if transactions.is_empty() {
                                    tr
                                    {
                                        td
                                            colspan="5"
                                            class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                                        {
                                            "No transactions yet. Use the form to add your first one."
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Transactions", &[currency_input_styles()], &content)
}

#[cfg(test)]
mod tests {
    use axum::{Extension, extract::State, http::StatusCode};
    use time::macros::date;

    use crate::{
        Error,
        category::CategoryClient,
        endpoints,
        test_utils::{
            FakeApi, assert_hx_endpoint, assert_valid_html, must_get_form, parse_html_document,
            select_options, select_text,
        },
        transaction::{TransactionClient, TransactionType, TransactionsState, get_transactions_page},
    };

    fn state(api: &FakeApi) -> TransactionsState {
        TransactionsState {
            transactions: TransactionClient::new(api.client.clone()),
            categories: CategoryClient::new(api.client.clone()),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn shows_only_current_users_transactions_newest_first() {
        let api = FakeApi::spawn().await;
        let user = api.add_user("ana@example.com", "secret123");
        let other = api.add_user("bia@example.com", "secret123");
        let food = api.add_category("Alimentação");
        let salary = api.add_category("Salário");
        api.add_transaction(user.id, food.id, 2550, TransactionType::Expense, date!(2024 - 01 - 10));
        api.add_transaction(user.id, salary.id, 500000, TransactionType::Income, date!(2024 - 02 - 01));
        api.add_transaction(other.id, food.id, 999, TransactionType::Expense, date!(2024 - 01 - 20));

        let response = get_transactions_page(State(state(&api)), Extension(user))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(select_text(&html, "tbody time"), vec!["2024-02-01", "2024-01-10"]);
        assert_eq!(select_text(&html, "tbody span"), vec!["Salário", "Alimentação"]);
        assert_eq!(
            select_text(&html, "tbody td.text-right"),
            vec!["R$ 5.000,00", "-R$ 25,50"]
        );
    }

    #[tokio::test]
    async fn includes_create_form_with_categories() {
        let api = FakeApi::spawn().await;
        let user = api.add_user("ana@example.com", "secret123");
        let food = api.add_category("Alimentação");

        let response = get_transactions_page(State(state(&api)), Extension(user))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_eq!(
            select_options(&form, "category_id"),
            vec![
                ("".to_owned(), "Select a category".to_owned(), true),
                (food.id.to_string(), "Alimentação".to_owned(), false),
            ]
        );
        let empty_row = select_text(&html, "tbody td");
        assert_eq!(
            empty_row,
            vec!["No transactions yet. Use the form to add your first one."]
        );
    }

    #[tokio::test]
    async fn category_failure_still_renders_transactions() {
        let api = FakeApi::spawn().await;
        let user = api.add_user("ana@example.com", "secret123");
        api.add_transaction(user.id, 42, 1000, TransactionType::Expense, date!(2024 - 03 - 01));
        api.with_db(|db| db.fail_list_categories = true);

        let response = get_transactions_page(State(state(&api)), Extension(user))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_eq!(select_text(&html, "tbody span"), vec!["Unknown"]);
    }

    #[tokio::test]
    async fn transaction_failure_is_an_error() {
        let api = FakeApi::spawn().await;
        let user = api.add_user("ana@example.com", "secret123");
        api.with_db(|db| db.fail_list_transactions = true);

        let result = get_transactions_page(State(state(&api)), Extension(user)).await;

        assert!(
            matches!(result, Err(Error::ApiStatus { status: 500, .. })),
            "got {result:?}"
        );
    }
}
