use axum::{http::Method, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod contacts;
pub mod deals;
pub mod error;
pub mod places;
pub mod state;
pub mod submit;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(contacts::routes())
        .merge(deals::routes())
        .merge(submit::routes())
        .merge(places::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
