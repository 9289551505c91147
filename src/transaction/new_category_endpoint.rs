//! Adds a category without leaving the transaction form.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    category::{CategoryId, CategoryName, domain::CreateCategoryRequest},
    transaction::{
        TransactionsState,
        form::{NewCategoryInput, category_field_view},
        transactions_page::categories_or_empty,
    },
};

/// The inline category input and the category selected when it was submitted.
#[derive(Debug, Default, Deserialize)]
pub struct NewCategoryFormData {
    /// The name typed into the inline input.
    #[serde(default)]
    pub new_category_name: String,
    /// The current value of the category select.
    #[serde(default)]
    pub category_id: String,
}

/// Create a category and return the transaction form's category field with
/// the new category selected.
///
/// An invalid name re-renders the field with the message and the previous
/// selection. API errors are shown as an alert.
pub async fn create_transaction_category_endpoint(
    State(state): State<TransactionsState>,
    Form(form): Form<NewCategoryFormData>,
) -> Response {
    let name = match CategoryName::new(&form.new_category_name) {
        Ok(name) => name,
        Err(error) => {
            let categories = categories_or_empty(&state.categories).await;
            let selected = form.category_id.trim().parse::<CategoryId>().ok();
            let message = error.to_string();

            return category_field_view(
                &categories,
                selected,
                None,
                &NewCategoryInput {
                    name: &form.new_category_name,
                    error_message: Some(&message),
                },
            )
            .into_response();
        }
    };

    let request = CreateCategoryRequest {
        name: name.to_string(),
    };

    let category = match state.categories.create(&request).await {
        Ok(category) => category,
        Err(error) => {
            tracing::error!("Could not create a category from the transaction form: {error}");
            return error.into_alert_response();
        }
    };
    tracing::info!("Created category {} \"{}\"", category.id, category.name);

    let mut categories = categories_or_empty(&state.categories).await;
    if !categories.iter().any(|listed| listed.id == category.id) {
        categories.push(category.clone());
    }

    category_field_view(
        &categories,
        Some(category.id),
        None,
        &NewCategoryInput::default(),
    )
    .into_response()
}
