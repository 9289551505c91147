//! Users of the finance API.

mod client;
mod domain;

pub use client::UserClient;
pub use domain::{
    CreateUserRequest, LoginRequest, PASSWORD_MIN_LENGTH, UpdateUserRequest, User, UserId,
    is_valid_email,
};
