// src/routes.rs

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{questionnaire, tests},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Questionnaire and test sub-routers.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (pool, config, coordinator).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let questionnaire_routes = Router::new().route("/", get(questionnaire::get_questionnaire));

    let test_routes = Router::new()
        .route("/", post(tests::submit_test))
        .route("/{id}/results", get(tests::get_results));

    Router::new()
        .nest("/api/questionnaire", questionnaire_routes)
        .nest("/api/tests", test_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
