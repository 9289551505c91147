//! Categories listing page.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    category::{Category, CategoryClient},
    endpoints,
    html::{
        CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, edit_delete_action_links,
    },
    navigation::NavBar,
};

/// Render the categories listing page.
pub async fn get_categories_page(
    State(categories): State<CategoryClient>,
) -> Result<Response, Error> {
    let mut categories = categories
        .list()
        .await
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    categories.sort_by_key(|category| category.name.to_lowercase());

    Ok(categories_view(&categories).into_response())
}

fn categories_view(categories: &[Category]) -> Markup {
    let new_category_route = endpoints::NEW_CATEGORY_VIEW;
    let nav_bar = NavBar::new(endpoints::CATEGORIES_VIEW).into_html();

    let table_row = |category: &Category| {
        let edit_url = endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category.id);
        let delete_url = endpoints::format_endpoint(endpoints::CATEGORY, category.id);
        let confirm_message = format!(
            "Are you sure you want to delete '{}'? This cannot be undone.",
            category.name
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    span class=(CATEGORY_BADGE_STYLE) { (category.name) }
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
            section class="space-y-4 lg:max-w-5xl lg:w-full lg:mx-auto"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Categories" }

                    a href=(new_category_route) class=(LINK_STYLE) { "Create Category" }
                }

                table class="w-full text-sm text-left rtl:text-right
                    text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for category in categories {
                            (table_row(category))
                        }

                        @if categories.is_empty() {
                            tr
                            {
                                td
                                    colspan="2"
                                    class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                                {
                                    "No categories created yet. "
                                    a href=(new_category_route) class=(LINK_STYLE)
                                    {
                                        "Create your first category"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Categories", &[], &content)
}
