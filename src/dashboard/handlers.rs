//! Dashboard HTTP handler and view rendering.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    alert::Alert,
    dashboard::cards::summary_cards,
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    transaction::{TransactionClient, TransactionSummary},
    user::User,
};

/// Display the current user's totals with links to the other pages.
///
/// If the summary cannot be fetched the page is still shown, with
/// placeholder cards and a warning.
pub async fn get_dashboard_page(
    State(transactions): State<TransactionClient>,
    Extension(user): Extension<User>,
) -> Response {
    let summary = transactions
        .summary(user.id)
        .await
        .inspect_err(|error| {
            tracing::error!("Could not get the summary for user {}: {error}", user.id)
        })
        .ok();

    dashboard_view(&user, summary.as_ref()).into_response()
}

fn dashboard_view(user: &User, summary: Option<&TransactionSummary>) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main
            class={ (PAGE_CONTAINER_STYLE) " max-w-screen-xl text-gray-900 dark:text-white" }
        {
            h1 class="text-xl font-bold mb-4" { "Welcome, " (user.display_name()) }

            @if summary.is_none() {
                div class="w-full mb-4"
                {
                    (Alert::Error {
                        message: "Summary unavailable".to_owned(),
                        details: "Your totals could not be loaded. Try refreshing the page.".to_owned(),
                    }.into_html())
                }
            }

            (summary_cards(summary))

            nav class="flex gap-6 mt-8"
            {
                a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "Manage transactions" }
                a href=(endpoints::REPORTS_VIEW) class=(LINK_STYLE) { "View reports" }
            }
        }
    );

    base("Dashboard", &[], &content)
}
