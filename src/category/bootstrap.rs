//! Creates the starter categories for a new account.

use tokio::task::JoinHandle;

use crate::{
    Error,
    category::{Category, CategoryClient, domain::CreateCategoryRequest},
    session::SessionSubscriber,
    user::UserId,
};

/// The categories created for an account that has none, in creation order.
pub const DEFAULT_CATEGORY_NAMES: [&str; 10] = [
    "Alimentação",
    "Transporte",
    "Moradia",
    "Saúde",
    "Educação",
    "Lazer",
    "Roupas",
    "Salário",
    "Freelance",
    "Investimentos",
];

/// What [ensure_default_categories] did.
#[derive(Debug, Default, PartialEq)]
pub struct BootstrapReport {
    /// The categories that were created.
    pub created: Vec<Category>,
    /// The names of the default categories that could not be created.
    pub failed: Vec<String>,
}

/// Create the [DEFAULT_CATEGORY_NAMES] if there are no categories yet.
///
/// Does nothing if at least one category exists. The defaults are created one
/// at a time, and a failed creation does not stop the rest. Two calls at the
/// same time may both see no categories and create the defaults twice.
///
/// # Errors
///
/// Returns an error if the existing categories could not be listed.
pub async fn ensure_default_categories(
    categories: &CategoryClient,
) -> Result<BootstrapReport, Error> {
    let existing = categories
        .list()
        .await
        .inspect_err(|error| tracing::error!("Could not list categories: {error}"))?;

    if !existing.is_empty() {
        tracing::debug!("{} categories exist, skipping defaults", existing.len());
        return Ok(BootstrapReport::default());
    }

    let mut report = BootstrapReport::default();

    for name in DEFAULT_CATEGORY_NAMES {
        let request = CreateCategoryRequest {
            name: name.to_owned(),
        };

        match categories.create(&request).await {
            Ok(category) => report.created.push(category),
            Err(error) => {
                tracing::error!("Could not create default category \"{name}\": {error}");
                report.failed.push(name.to_owned());
            }
        }
    }

    tracing::info!(
        "Created {} default categories ({} failed)",
        report.created.len(),
        report.failed.len()
    );

    Ok(report)
}

/// Run [ensure_default_categories] each time a different user logs in.
///
/// This includes the user restored from a saved session when the server
/// starts. The task ends when the session is dropped.
pub fn spawn_category_bootstrapper(
    mut subscriber: SessionSubscriber,
    categories: CategoryClient,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last_user_id: Option<UserId> = None;

        while let Some(user) = subscriber.next().await {
            let Some(user) = user else {
                last_user_id = None;
                continue;
            };

            if last_user_id == Some(user.id) {
                continue;
            }

            last_user_id = Some(user.id);
            tracing::debug!("Checking default categories for user {}", user.id);

            // Errors are logged inside.
            let _ = ensure_default_categories(&categories).await;
        }

        tracing::debug!("Session closed, stopping category bootstrapper");
    })
}
