pub mod app_state;
pub mod configuration;
pub mod data_models;
pub mod errors;
pub mod mail;
mod notifications;
mod routes;
mod traits;
pub mod validation;

use crate::app_state::AppState;
use crate::configuration::Application;
use crate::errors::PanicResponder;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_app(app_state: AppState, application: &Application) -> Router {
    let environment = app_state.environment.clone();
    let api = Router::new()
        .route("/api/health", get(routes::health_check))
        .route("/api/test-email-config", get(routes::test_email_config))
        .route("/api/submit-form", post(routes::submit_form))
        .with_state(app_state);
    let app = match &application.static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };
    app.layer(CatchPanicLayer::custom(PanicResponder(environment)))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
