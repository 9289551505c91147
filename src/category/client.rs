//! Client for the `/categories` endpoints.

use crate::{
    ApiClient, Error,
    category::{
        Category, CategoryId,
        domain::{CreateCategoryRequest, UpdateCategoryRequest},
    },
    endpoints::format_endpoint,
};

const CATEGORIES: &str = "/categories";
const CATEGORY: &str = "/categories/{category_id}";

/// Creates, reads, updates and deletes categories.
#[derive(Debug, Clone)]
pub struct CategoryClient {
    api: ApiClient,
}

impl CategoryClient {
    /// Create a client that sends its requests through `api`.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Create a category, returning it with the ID the API assigned.
    pub async fn create(&self, request: &CreateCategoryRequest) -> Result<Category, Error> {
        self.api.post(CATEGORIES, request).await
    }

    /// Get all categories in the order the API returns them.
    pub async fn list(&self) -> Result<Vec<Category>, Error> {
        self.api.get(CATEGORIES).await
    }

    /// Get a single category.
    ///
    /// # Errors
    ///
    /// Returns [Error::NotFound] if no category has the ID `id`.
    pub async fn get_by_id(&self, id: CategoryId) -> Result<Category, Error> {
        self.api.get(&format_endpoint(CATEGORY, id)).await
    }

    /// Rename a category. Fields left as `None` are not sent.
    pub async fn update(
        &self,
        id: CategoryId,
        request: &UpdateCategoryRequest,
    ) -> Result<Category, Error> {
        self.api.patch(&format_endpoint(CATEGORY, id), request).await
    }

    /// Delete a category.
    pub async fn delete(&self, id: CategoryId) -> Result<(), Error> {
        self.api.delete(&format_endpoint(CATEGORY, id)).await
    }
}
