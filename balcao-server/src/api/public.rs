//! Public storefront handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{DeliveryCheck, OrderSummary, PickupSlot, PlaceOrderInput, ScheduleDay, Store};

use crate::db;
use crate::delivery::cep;
use crate::orders::placement;
use crate::scheduling::resolver;
use crate::state::AppState;

pub async fn health_check() -> ApiResponse<()> {
    ApiResponse::ok()
}

/// Resolve a slug to its store; unknown and inactive look the same
async fn resolve_store(state: &AppState, slug: &str) -> Result<Store, AppError> {
    db::stores::find_active_by_slug(&state.pool, slug)
        .await
        .map_err(db::internal)?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound))
}

/// POST /api/stores/{slug}/orders
pub async fn place_order(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<PlaceOrderInput>,
) -> Result<ApiResponse<OrderSummary>, AppError> {
    let summary = placement::place_order(&state, &slug, input).await?;
    Ok(ApiResponse::success(summary))
}

/// GET /api/stores/{slug}/pickup-slots
pub async fn list_pickup_slots(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ApiResponse<Vec<PickupSlot>>, AppError> {
    let store = resolve_store(&state, &slug).await?;
    let slots = db::pickup_slots::list_active(&state.pool, store.id)
        .await
        .map_err(db::internal)?;
    Ok(ApiResponse::success(slots))
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// GET /api/stores/{slug}/schedule
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ScheduleQuery>,
) -> Result<ApiResponse<Vec<ScheduleDay>>, AppError> {
    let store = resolve_store(&state, &slug).await?;
    let days = resolver::resolve(
        &state.pool,
        store.id,
        query.from.as_deref(),
        query.to.as_deref(),
    )
    .await?;
    Ok(ApiResponse::success(days))
}

#[derive(Debug, Deserialize)]
pub struct DeliveryCheckQuery {
    pub cep: String,
}

/// GET /api/stores/{slug}/delivery-check?cep=01310-100
pub async fn delivery_check(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<DeliveryCheckQuery>,
) -> Result<ApiResponse<DeliveryCheck>, AppError> {
    let store = resolve_store(&state, &slug).await?;
    let result = cep::check(&state.pool, store.id, &query.cep).await?;
    Ok(ApiResponse::success(result))
}
