//! Backend for the transit-agency learning platform.
//!
//! Serves the course catalog as JSON, collects anonymous telemetry events,
//! and tracks per-session module progress and quiz attempts.
//!
//!
//!
//! # General Infrastructure
//! - The browser keeps its own identity in the `ctr_session_id` cookie and
//!   sends it explicitly with every API call, so the server holds no
//!   session state of its own
//! - Course and quiz content lives in code and is built once at startup
//! - Everything per-visitor (progress, events, quiz attempts) goes to Redis
//! - Pages are rendered elsewhere; this process only speaks JSON
//!
//!
//!
//! # Endpoints
//! - `GET  /api/health`: liveness plus a Redis round trip
//! - `GET  /api/courses`: course summaries for the landing view
//! - `GET  /api/courses/{course}`: full course with modules
//! - `GET  /api/courses/{course}/modules/{module}`: one module plus the
//!   next in course order
//! - `GET/POST /api/progress`: per-session module progress
//! - `POST /api/event`: telemetry collector, fire-and-forget on the client
//! - `GET/POST /api/quiz/{course}/{module}`: question rotation and grading
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use tokio::{
    net::TcpListener,
    signal::{
        ctrl_c,
        unix::{SignalKind, signal},
    },
};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod content;
pub mod database;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use routes::{
    course_handler, courses_handler, event_handler, get_progress_handler, health_handler,
    module_handler, quiz_next_handler, quiz_submit_handler, upsert_progress_handler,
};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/courses", get(courses_handler))
        .route("/api/courses/{course_slug}", get(course_handler))
        .route(
            "/api/courses/{course_slug}/modules/{module_slug}",
            get(module_handler),
        )
        .route(
            "/api/progress",
            get(get_progress_handler).post(upsert_progress_handler),
        )
        .route("/api/event", post(event_handler))
        .route(
            "/api/quiz/{course_slug}/{module_slug}",
            get(quiz_next_handler).post(quiz_submit_handler),
        )
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
