//! Category creation page and endpoint.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    category::{
        CategoryClient, CategoryName,
        domain::{CategoryFormData, CreateCategoryRequest},
        form::{CategoryFormAction, category_form_view},
    },
    endpoints,
    html::{FORM_CONTAINER_ID, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// Render the category creation page.
pub async fn get_new_category_page() -> Response {
    new_category_view().into_response()
}

/// Handle category creation form submission.
pub async fn create_category_endpoint(
    State(categories): State<CategoryClient>,
    Form(form): Form<CategoryFormData>,
) -> Response {
    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => {
            return category_form_view(
                CategoryFormAction::Create(endpoints::CATEGORIES_API),
                &form.name,
                Some(&error.to_string()),
            )
            .into_response();
        }
    };

    let request = CreateCategoryRequest {
        name: name.to_string(),
    };

    match categories.create(&request).await {
        Ok(category) => {
            tracing::info!("Created category {} \"{}\"", category.id, category.name);

            (
                HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");
            error.into_alert_response()
        }
    }
}

fn new_category_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_CATEGORY_VIEW).into_html();
    let form = category_form_view(
        CategoryFormAction::Create(endpoints::CATEGORIES_API),
        "",
        None,
    );

    let content = html! {
        (nav_bar)
        div id=(FORM_CONTAINER_ID) class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Create Category", &[], &content)
}
