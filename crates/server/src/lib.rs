pub mod config;
pub mod doc;
pub mod dtos;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;
pub mod web;

use axum::{Router, routing::get};
use doc::ApiDoc;
use sea_orm::DatabaseConnection;
use state::AppState;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the full application: JSON API under `/api`, the HTML pages, health and docs
pub fn app(db: DatabaseConnection) -> Router {
    let api = routes::router().with_state(AppState { db });

    Router::new()
        .merge(web::router(api.clone()))
        .nest("/api", api)
        .route("/health", get(routes::health::health))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
}
