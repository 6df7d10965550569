use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::server::api;
use crate::server::page::INDEX_HTML;

/// The full HTTP surface. Handlers are stateless.
pub fn app() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(api::health))
        .route("/api/impact", get(api::impact_get).post(api::impact_post))
        .route("/api/zone", post(api::zone_post))
        .route("/api/presets", get(api::presets))
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
