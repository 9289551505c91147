//! Category editing page and endpoint.

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    Error,
    category::{
        CategoryClient, CategoryId, CategoryName,
        domain::{CategoryFormData, UpdateCategoryRequest},
        form::{CategoryFormAction, category_form_view},
    },
    endpoints,
    html::{FORM_CONTAINER_ID, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// Render the category editing page.
pub async fn get_edit_category_page(
    Path(category_id): Path<CategoryId>,
    State(categories): State<CategoryClient>,
) -> Result<Response, Error> {
    let category = categories
        .get_by_id(category_id)
        .await
        .inspect_err(|error| {
            tracing::error!("Failed to retrieve category {category_id}: {error}")
        })?;

    let edit_endpoint = endpoints::format_endpoint(endpoints::EDIT_CATEGORY_VIEW, category_id);
    let update_endpoint = endpoints::format_endpoint(endpoints::CATEGORY, category_id);

    Ok(edit_category_view(&edit_endpoint, &update_endpoint, &category.name).into_response())
}

/// Handle category update form submission.
pub async fn update_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(categories): State<CategoryClient>,
    Form(form): Form<CategoryFormData>,
) -> Response {
    let update_endpoint = endpoints::format_endpoint(endpoints::CATEGORY, category_id);

    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => {
            return category_form_view(
                CategoryFormAction::Update(&update_endpoint),
                &form.name,
                Some(&error.to_string()),
            )
            .into_response();
        }
    };

    let request = UpdateCategoryRequest {
        name: Some(name.to_string()),
    };

    match categories.update(category_id, &request).await {
        Ok(_) => (
            HxRedirect(endpoints::CATEGORIES_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn edit_category_view(edit_endpoint: &str, update_endpoint: &str, name: &str) -> Markup {
    let nav_bar = NavBar::new(edit_endpoint).into_html();
    let form = category_form_view(CategoryFormAction::Update(update_endpoint), name, None);

    let content = html! {
        (nav_bar)
        div id=(FORM_CONTAINER_ID) class=(FORM_CONTAINER_STYLE) { (form) }
    };

    base("Edit Category", &[], &content)
}
