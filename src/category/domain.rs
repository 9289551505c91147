//! Core category domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::Error;

/// The ID the API assigns to a category.
pub type CategoryId = i64;

/// A category for grouping transactions (e.g., 'Alimentação', 'Salário').
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The ID assigned by the API.
    pub id: CategoryId,
    /// The display name.
    pub name: String,
}

/// A validated category name with at least two characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryName(String);

impl CategoryName {
    /// The fewest user-visible characters a name may have.
    pub const MIN_LENGTH: usize = 2;

    /// Create a category name from user input, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [Error::CategoryNameTooShort] if the trimmed name has fewer than
    /// [CategoryName::MIN_LENGTH] characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.graphemes(true).count() < Self::MIN_LENGTH {
            Err(Error::CategoryNameTooShort)
        } else {
            Ok(Self(name.to_owned()))
        }
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The body of `POST /categories`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

/// The body of `PATCH /categories/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateCategoryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Form data for category creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryFormData {
    #[serde(default)]
    pub name: String,
}
