//! API routes

pub mod admin;
pub mod public;

use axum::routing::{delete, get, patch, post, put};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::admin_auth_middleware;
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Public storefront (no auth), keyed by store slug
    let storefront = Router::new()
        .route(
            "/api/stores/{slug}/pickup-slots",
            get(public::list_pickup_slots),
        )
        .route("/api/stores/{slug}/schedule", get(public::get_schedule))
        .route(
            "/api/stores/{slug}/delivery-check",
            get(public::delivery_check),
        )
        .route("/api/stores/{slug}/orders", post(public::place_order));

    // Merchant dashboard (JWT authenticated); the store is always taken
    // from the verified identity, never from the request
    let admin_routes = Router::new()
        .route("/api/admin/orders", get(admin::orders::list))
        .route(
            "/api/admin/orders/{id}",
            get(admin::orders::get).delete(admin::orders::remove),
        )
        .route(
            "/api/admin/orders/{id}/status",
            patch(admin::orders::update_status),
        )
        .route(
            "/api/admin/orders/{id}/items",
            put(admin::orders::replace_items),
        )
        .route(
            "/api/admin/pickup-slots",
            get(admin::pickup_slots::list).post(admin::pickup_slots::create),
        )
        .route(
            "/api/admin/pickup-slots/{id}",
            patch(admin::pickup_slots::toggle).delete(admin::pickup_slots::remove),
        )
        .route(
            "/api/admin/schedule",
            get(admin::schedule::resolve).put(admin::schedule::set_day),
        )
        .route(
            "/api/admin/cep-ranges",
            get(admin::cep_ranges::list).post(admin::cep_ranges::create),
        )
        .route("/api/admin/cep-ranges/{id}", delete(admin::cep_ranges::remove))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ));

    Router::new()
        .route("/health", get(public::health_check))
        .merge(storefront)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
