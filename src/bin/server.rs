use std::{fs::OpenOptions, net::SocketAddr, path::Path, process::ExitCode, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use fintrack_web::{
    ApiClient, AppState, CategoryClient, Config, JsonFileStore, Session, build_router,
    graceful_shutdown, spawn_category_bootstrapper,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    if let Err(error) = setup_logging(&config.log_path) {
        eprintln!("Could not open log file {}: {error}", config.log_path.display());
        return ExitCode::FAILURE;
    }

    if let Err(error) = config.validate() {
        tracing::error!("Invalid configuration: {error}");
        return ExitCode::FAILURE;
    }

    let api = match ApiClient::new(&config.api_url) {
        Ok(api) => api,
        Err(error) => {
            tracing::error!("Could not create the API client: {error}");
            return ExitCode::FAILURE;
        }
    };

    let session = Arc::new(Session::restore(JsonFileStore::new(&config.session_path)));
    spawn_category_bootstrapper(session.subscribe(), CategoryClient::new(api.clone()));

    let state = AppState::new(api, session, &config.timezone);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!(
        "HTTP server listening on {addr}, using the API at {}",
        config.api_url
    );

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn setup_logging(log_path: &Path) -> std::io::Result<()> {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
