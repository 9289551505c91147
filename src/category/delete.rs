//! Category deletion endpoint.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    category::{CategoryClient, CategoryId},
};

/// Handle category deletion. Returns a success alert or an error alert.
pub async fn delete_category_endpoint(
    Path(category_id): Path<CategoryId>,
    State(categories): State<CategoryClient>,
) -> Response {
    match categories.delete(category_id).await {
        Ok(()) => Alert::SuccessSimple {
            message: "Category deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
