//! The form shared by the category creation and editing pages.

use maud::{Markup, html};

use crate::html::{FORM_CONTAINER_TARGET, TextInput, submit_button};

/// Where and how the category form is submitted.
pub(super) enum CategoryFormAction<'a> {
    /// POST to create a category.
    Create(&'a str),
    /// PUT to update an existing category.
    Update(&'a str),
}

pub(super) fn category_form_view(
    action: CategoryFormAction<'_>,
    name: &str,
    error_message: Option<&str>,
) -> Markup {
    let (hx_post, hx_put, button_text) = match action {
        CategoryFormAction::Create(endpoint) => (Some(endpoint), None, "Create Category"),
        CategoryFormAction::Update(endpoint) => (None, Some(endpoint), "Save Changes"),
    };

    html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-target=(FORM_CONTAINER_TARGET)
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="w-full space-y-4 md:space-y-6"
        {
            (TextInput {
                label: "Category Name",
                name: "name",
                type_: "text",
                value: name,
                placeholder: "Category Name",
                required: true,
                error_message,
            }.into_html())

            (submit_button(button_text))
        }
    }
}
