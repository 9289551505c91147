//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    account::{delete_account_endpoint, get_account_page, update_account_endpoint},
    auth::{
        auth_guard, auth_guard_hx, get_log_in_page, get_log_out, get_register_page, post_log_in,
        register_user,
    },
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_page,
        get_edit_category_page, get_new_category_page, update_category_endpoint,
    },
    dashboard::get_dashboard_page,
    endpoints,
    error_page::{get_404_not_found, get_internal_server_error_page},
    logging::logging_middleware,
    report::get_reports_page,
    transaction::{
        create_transaction_category_endpoint, create_transaction_endpoint,
        delete_transaction_endpoint, get_edit_transaction_page, get_transactions_page,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(endpoints::REGISTER_API, post(register_user))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_page),
        )
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page))
        .route(endpoints::EDIT_CATEGORY_VIEW, get(get_edit_category_page))
        .route(endpoints::REPORTS_VIEW, get(get_reports_page))
        .route(endpoints::ACCOUNT_VIEW, get(get_account_page))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These routes are called by HTMX and need the HX-Redirect header for auth redirects to work.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(
                endpoints::TRANSACTIONS_API,
                post(create_transaction_endpoint),
            )
            .route(
                endpoints::TRANSACTION,
                put(update_transaction_endpoint).delete(delete_transaction_endpoint),
            )
            .route(
                endpoints::TRANSACTION_CATEGORIES_API,
                post(create_transaction_category_endpoint),
            )
            .route(endpoints::CATEGORIES_API, post(create_category_endpoint))
            .route(
                endpoints::CATEGORY,
                put(update_category_endpoint).delete(delete_category_endpoint),
            )
            .route(
                endpoints::ACCOUNT_API,
                put(update_account_endpoint).delete(delete_account_endpoint),
            )
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
