//! Client for the `/users` endpoints.

use crate::{
    ApiClient, Error,
    endpoints::format_endpoint,
    user::{CreateUserRequest, LoginRequest, UpdateUserRequest, User, UserId},
};

const USERS: &str = "/users";
const USER: &str = "/users/{user_id}";
const LOG_IN: &str = "/users/login";

/// Creates, reads, updates and deletes users, and checks log in credentials.
#[derive(Debug, Clone)]
pub struct UserClient {
    api: ApiClient,
}

impl UserClient {
    /// Create a client that sends its requests through `api`.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Register a new user.
    pub async fn create(&self, request: &CreateUserRequest) -> Result<User, Error> {
        self.api.post(USERS, request).await
    }

    /// Get every registered user.
    pub async fn list(&self) -> Result<Vec<User>, Error> {
        self.api.get(USERS).await
    }

    /// Get a single user.
    pub async fn get_by_id(&self, id: UserId) -> Result<User, Error> {
        self.api.get(&format_endpoint(USER, id)).await
    }

    /// Change the fields of a user that are not `None` in `request`.
    pub async fn update(&self, id: UserId, request: &UpdateUserRequest) -> Result<User, Error> {
        self.api.patch(&format_endpoint(USER, id), request).await
    }

    /// Delete a user.
    pub async fn delete(&self, id: UserId) -> Result<(), Error> {
        self.api.delete(&format_endpoint(USER, id)).await
    }

    /// Check the email and password, returning the matching user.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCredentials] if the API rejects the credentials
    /// (400, 401 or 404), or any other API error unchanged.
    pub async fn log_in(&self, request: &LoginRequest) -> Result<User, Error> {
        self.api
            .post(LOG_IN, request)
            .await
            .map_err(|error| match error {
                Error::NotFound => Error::InvalidCredentials,
                Error::ApiStatus {
                    status: 400 | 401, ..
                } => Error::InvalidCredentials,
                error => error,
            })
    }
}
