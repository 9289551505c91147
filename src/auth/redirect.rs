//! Where to send a user after they log in.
//!
//! A redirect target is only ever a local path, so a crafted link cannot send
//! a user to another site after logging in.

use axum::{extract::Request, http::Uri};

use crate::endpoints;

/// Accept `path_and_query` if it is a local path other than the log-in page.
fn local_target(path_and_query: &str) -> Option<String> {
    if !path_and_query.starts_with('/') || path_and_query.starts_with("//") {
        return None;
    }

    let path = path_and_query
        .split_once('?')
        .map_or(path_and_query, |(path, _)| path);

    (path != endpoints::LOG_IN_VIEW).then(|| path_and_query.to_owned())
}

/// Check a redirect URL from a query string or form.
///
/// Returns the path and query if `raw_url` is a relative URL, otherwise `None`.
pub fn normalize_redirect_url(raw_url: &str) -> Option<String> {
    let uri = raw_url.parse::<Uri>().ok()?;

    if uri.scheme().is_some() || uri.authority().is_some() {
        return None;
    }

    local_target(uri.path_and_query()?.as_str())
}

/// Check a redirect URL from a query string or form, logging rejected values.
pub(super) fn parse_redirect_url(raw_url: Option<&str>, source: &str) -> Option<String> {
    let raw_url = raw_url.filter(|url| !url.is_empty())?;
    let redirect_url = normalize_redirect_url(raw_url);

    if redirect_url.is_none() {
        tracing::warn!("Ignoring invalid redirect URL from {source}: {raw_url}");
    }

    redirect_url
}

/// The log-in page URL that returns the user to `target` afterwards.
pub(super) fn log_in_url_with_target(target: &str) -> String {
    match serde_urlencoded::to_string([("redirect_url", target)]) {
        Ok(query) => format!("{}?{query}", endpoints::LOG_IN_VIEW),
        Err(error) => {
            tracing::error!("Could not encode redirect URL {target}: {error}");
            endpoints::LOG_IN_VIEW.to_owned()
        }
    }
}

/// The log-in page URL for a request that was refused because nobody is logged in.
///
/// Page requests return to the requested page. HTMX requests to `/api` routes
/// return to the page the request was sent from (the `HX-Current-URL`
/// header). The dashboard is used when neither gives a usable target.
pub(super) fn log_in_url_for_request(request: &Request) -> String {
    let target = if request.uri().path().starts_with("/api") {
        target_from_hx_headers(request)
    } else {
        request
            .uri()
            .path_and_query()
            .and_then(|path_and_query| local_target(path_and_query.as_str()))
    };

    log_in_url_with_target(target.as_deref().unwrap_or(endpoints::DASHBOARD_VIEW))
}

fn target_from_hx_headers(request: &Request) -> Option<String> {
    let header = |name: &str| {
        request
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    };

    if !header("hx-request").is_some_and(|value| value.eq_ignore_ascii_case("true")) {
        tracing::warn!("Missing HX-Request header for /api request.");
        return None;
    }

    let Some(current_url) = header("hx-current-url") else {
        tracing::warn!("Missing HX-Current-URL header for /api request.");
        return None;
    };

    // HX-Current-URL is absolute, so only its path and query are kept.
    let target = current_url
        .parse::<Uri>()
        .ok()
        .and_then(|uri| uri.path_and_query().map(|pq| pq.as_str().to_owned()))
        .and_then(|path_and_query| local_target(&path_and_query));

    if target.is_none() {
        tracing::warn!("Invalid HX-Current-URL header value: {current_url}");
    }

    target
}
