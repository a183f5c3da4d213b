use axum::{
    http::{header::CACHE_CONTROL, HeaderValue},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::models::AppState;

// Embed the default stylesheet in the binary
pub const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

pub fn build_router(state: AppState) -> Router {
    // Always serve styles.css - use custom if provided, otherwise use embedded default
    let stylesheet_content = state
        .custom_css
        .clone()
        .unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());

    let json_api = Router::new()
        .route("/api/results", get(handlers::api::results_get))
        .route("/emission/electricity/:region/:energy", get(handlers::api::emission_get))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/", get(handlers::dashboard::dashboard_get))
        .route("/calculate", post(handlers::dashboard::calculate_post))
        .route("/sort/:column", get(handlers::dashboard::sort_get))
        .route("/theme", post(handlers::theme::theme_post))
        .route("/regions", get(handlers::catalog::regions_get))
        .route(
            "/static/styles.css",
            get(move || {
                let css = stylesheet_content.clone();
                async move { ([(axum::http::header::CONTENT_TYPE, "text/css")], css) }
            })
            .layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static("no-cache"),
            )),
        )
        .merge(json_api)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
