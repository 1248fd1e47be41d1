use axum::{
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod auth;
pub mod onboarding;
pub mod settings;
pub mod stacks;
pub mod templates;

pub const LOGIN_PATH: &str = "/auth/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const HOME_PATH: &str = "/";
pub const GENERAL_SETTINGS_PATH: &str = "/settings/general";

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: navigational pages, JSON API and docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    let pages = Router::new()
        .route("/auth/logout", get(auth::logout).post(auth::logout))
        .route("/onboarding", get(onboarding::index))
        .route("/onboarding/welcome", get(onboarding::welcome))
        .route("/onboarding/password", get(onboarding::password))
        .route("/settings", get(settings::index))
        .route("/settings/general", get(settings::general))
        .route("/settings/templates", get(settings::templates))
        .route("/templates", get(templates::catalog));

    let api = Router::new()
        .route("/api/stacks/:stack_id/profiles", get(stacks::profiles))
        .route("/api/stacks/:stack_id/changes", get(stacks::changes));

    public
        .merge(pages)
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx answers are logged as errors
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
