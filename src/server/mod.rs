//! HTTP server for the homepage document.
//!
//! # Endpoints
//!
//! - `GET /api/health`: health check
//! - `GET|POST /api/config`: read or replace the whole document
//! - `POST /api/login`: shared-password check
//! - `GET|PUT|POST /api/{section}`: read a section, replace it, or add an item
//! - `PUT|DELETE /api/{section}/{index}`: update or delete an item
//! - `GET /`, `GET /admin`, anything else: static site files

pub mod error;
pub mod login;
pub mod routes;
pub mod sections;

pub use error::ApiError;
pub use login::PasswordCheck;
pub use sections::{KnownSection, SectionShape};

use axum::{
    handler::HandlerWithoutStateExt,
    routing::{get, post, put},
    Router,
};
use homepage_core::SectionEditor;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub editor: Arc<SectionEditor>,
    pub login: Arc<PasswordCheck>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(editor: SectionEditor, login: PasswordCheck, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            editor: Arc::new(editor),
            login: Arc::new(login),
            static_dir: static_dir.into(),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir)
        .not_found_service(routes::not_found.into_service());

    let api = Router::new()
        .route("/api/health", get(routes::health))
        .route(
            "/api/config",
            get(routes::get_config).post(routes::save_config),
        )
        .route("/api/login", post(routes::login))
        .route(
            "/api/{section}",
            get(routes::get_section)
                .put(routes::replace_section)
                .post(routes::add_item),
        )
        .route(
            "/api/{section}/{index}",
            put(routes::update_item).delete(routes::delete_item),
        );

    Router::new()
        .merge(api)
        .route_service("/", ServeFile::new(state.static_dir.join("index.html")))
        .route_service("/admin", ServeFile::new(state.static_dir.join("admin.html")))
        .fallback_service(static_files)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

#[cfg(test)]
mod tests;
