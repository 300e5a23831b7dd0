#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the LA arrests dashboard.
//!
//! Loads the arrest, summary and boundary files once at startup and serves
//! every dashboard chart as JSON. The client owns the selection: it sends
//! the whole selection with each request and gets the next one back from
//! the events endpoint. Frontend static files are served from `app/dist`
//! when present.

mod handlers;

use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use la_arrests_dataset::Datasets;
use la_arrests_dataset::config::DatasetConfig;

/// Directory holding the built frontend.
const STATIC_DIR: &str = "app/dist";

/// Shared application state.
pub struct AppState {
    /// Read-only tables, loaded once and shared by every worker.
    pub datasets: Arc<Datasets>,
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/options", web::get().to(handlers::options))
            .route("/boundaries", web::get().to(handlers::boundaries))
            .route("/dashboard", web::get().to(handlers::dashboard))
            .route("/dashboard/events", web::post().to(handlers::dashboard_event)),
    );
}

/// Starts the arrests dashboard API server.
///
/// Reads the dataset manifest from the environment, loads every input file,
/// and starts the Actix-Web HTTP server. This is a regular async function;
/// the caller provides the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the data cannot be loaded, or if
/// the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Loading datasets...");
    let datasets = DatasetConfig::from_env()
        .and_then(|config| Datasets::load(&config))
        .map_err(|e| {
            log::error!("Failed to load datasets: {e}");
            std::io::Error::other(e)
        })?;

    let state = web::Data::new(AppState {
        datasets: Arc::new(datasets),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let serve_static = Path::new(STATIC_DIR).is_dir();
    if !serve_static {
        log::info!("{STATIC_DIR} not found, serving the API only");
    }

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure);

        if serve_static {
            // Serve frontend static files (production)
            app.service(Files::new("/", STATIC_DIR).index_file("index.html"))
        } else {
            app
        }
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
