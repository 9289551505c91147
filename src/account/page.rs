use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    account::form::{AccountFormData, AccountFormErrors, account_form_view},
    endpoints,
    html::{BUTTON_DANGER_STYLE, FORM_CONTAINER_ID, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    user::{User, UserClient},
};

/// Display the profile form filled in with the user's details from the API.
pub async fn get_account_page(
    State(users): State<UserClient>,
    Extension(user): Extension<User>,
) -> Result<Response, Error> {
    let user = users.get_by_id(user.id).await?;

    Ok(account_view(&user).into_response())
}

fn account_view(user: &User) -> Markup {
    let nav_bar = NavBar::new(endpoints::ACCOUNT_VIEW).into_html();
    let form = account_form_view(
        &AccountFormData::from_user(user),
        &AccountFormErrors::default(),
        None,
    );

    let content = html!(
        (nav_bar)

        main class={ (PAGE_CONTAINER_STYLE) " max-w-md text-gray-900 dark:text-white" }
        {
            h1 class="text-xl font-bold mb-4" { "Your Account" }

            div id=(FORM_CONTAINER_ID) class="w-full" { (form) }

            section class="w-full mt-8 pt-6 border-t border-gray-200 dark:border-gray-700"
            {
                h2 class="text-lg font-semibold mb-2" { "Delete account" }

                p class="text-sm text-gray-600 dark:text-gray-400 mb-4"
                {
                    "Deleting your account cannot be undone."
                }

                button
                    type="button"
                    id="delete-account-button"
                    hx-delete=(endpoints::ACCOUNT_API)
                    hx-confirm="Are you sure you want to delete your account? This cannot be undone."
                    hx-target-error="#alert-container"
                    class=(BUTTON_DANGER_STYLE)
                {
                    "Delete my account"
                }
            }
        }
    );

    base("Account", &[], &content)
}
