use crate::handlers;
use crate::middleware::require_api_key;
use crate::state::AppState;
use axum::{middleware, routing::get, Router};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Management routes, meant to be nested under `/api/v1`.
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .merge(handlers::domains::routes())
        .merge(handlers::records::routes())
        .merge(handlers::config::routes())
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
}

/// The complete HTTP surface: `/health` plus the management API.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1", create_api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
