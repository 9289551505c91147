//! Reports page handler and view rendering.

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState,
    alert::Alert,
    category::CategoryClient,
    endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    report::{
        aggregation::{Report, build_report},
        charts::{ReportChart, charts_script, charts_view, report_charts},
        tables::{category_table, monthly_table, totals_cards},
    },
    transaction::TransactionClient,
    user::User,
};

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for the reports page.
#[derive(Debug, Clone)]
pub struct ReportsState {
    pub transactions: TransactionClient,
    pub categories: CategoryClient,
}

impl FromRef<AppState> for ReportsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: TransactionClient::new(state.api.clone()),
            categories: CategoryClient::new(state.api.clone()),
        }
    }
}

/// Display totals, charts and tables for the current user's transactions.
///
/// Transactions and categories are fetched at the same time. If either request
/// fails the page is still shown, built from an empty list for the failed part,
/// with a warning at the top.
pub async fn get_reports_page(
    State(state): State<ReportsState>,
    Extension(user): Extension<User>,
) -> Response {
    let (transactions, categories) = tokio::join!(
        state.transactions.list(Some(user.id)),
        state.categories.list()
    );

    let mut warnings = Vec::new();

    let transactions = transactions.unwrap_or_else(|error| {
        tracing::error!("Could not load transactions for user {}: {error}", user.id);
        warnings.push("Your transactions could not be loaded.");
        Vec::new()
    });
    let categories = categories.unwrap_or_else(|error| {
        tracing::error!("Could not load categories: {error}");
        warnings.push("Categories could not be loaded, so expenses are not split by category.");
        Vec::new()
    });

    let nav_bar = NavBar::new(endpoints::REPORTS_VIEW);

    if transactions.is_empty() && warnings.is_empty() {
        return reports_no_data_view(nav_bar).into_response();
    }

    let report = build_report(&transactions, &categories);
    let charts = report_charts(&report);

    reports_view(nav_bar, &report, &charts, &warnings).into_response()
}

fn reports_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let transactions_link = link(endpoints::TRANSACTIONS_VIEW, "transactions page");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold" { "Nothing here yet..." }

            p
            {
                "Reports will show up here once you add some transactions. \
                You can add transactions on the " (transactions_link) "."
            }
        }
    );

    base("Reports", &[], &content)
}

fn reports_view(
    nav_bar: NavBar<'_>,
    report: &Report,
    charts: &[ReportChart],
    warnings: &[&str],
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        main
            id="reports-content"
            class={ (PAGE_CONTAINER_STYLE) " max-w-screen-xl text-gray-900 dark:text-white" }
        {
            @for warning in warnings {
                div class="w-full mb-4"
                {
                    (Alert::ErrorSimple { message: (*warning).to_owned() }.into_html())
                }
            }

            h1 class="text-xl font-bold mb-4" { "Reports" }

            (totals_cards(&report.totals))

            (charts_view(charts))

            div class="grid grid-cols-1 xl:grid-cols-2 gap-4 w-full"
            {
                @if !report.expenses_by_category.is_empty() {
                    (category_table(&report.expenses_by_category))
                }

                (monthly_table(&report.monthly))
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
        charts_script(charts),
    ];

    base("Reports", &scripts, &content)
}
