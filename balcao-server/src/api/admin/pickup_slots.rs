//! Admin pickup slot handlers

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{PickupSlot, PickupSlotCreate};

use crate::auth::AdminIdentity;
use crate::db;
use crate::scheduling::slots;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub day_of_week: Option<i32>,
    #[serde(default)]
    pub active_only: bool,
}

/// GET /api/admin/pickup-slots
pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Query(query): Query<ListQuery>,
) -> Result<ApiResponse<Vec<PickupSlot>>, AppError> {
    let all = db::pickup_slots::list(&state.pool, identity.store_id)
        .await
        .map_err(db::internal)?;

    let filtered = all
        .into_iter()
        .filter(|s| query.day_of_week.is_none_or(|d| s.day_of_week == d))
        .filter(|s| !query.active_only || s.is_active)
        .collect();

    Ok(ApiResponse::success(filtered))
}

/// POST /api/admin/pickup-slots
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Json(payload): Json<PickupSlotCreate>,
) -> Result<ApiResponse<PickupSlot>, AppError> {
    let slot = slots::create(&state.pool, identity.store_id, payload).await?;
    Ok(ApiResponse::success(slot))
}

#[derive(Debug, Deserialize)]
pub struct ToggleBody {
    pub is_active: bool,
}

/// PATCH /api/admin/pickup-slots/{id}
pub async fn toggle(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Path(slot_id): Path<i64>,
    Json(body): Json<ToggleBody>,
) -> Result<ApiResponse<PickupSlot>, AppError> {
    let slot = slots::toggle_active(&state.pool, identity.store_id, slot_id, body.is_active).await?;
    Ok(ApiResponse::success(slot))
}

/// DELETE /api/admin/pickup-slots/{id}
pub async fn remove(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Path(slot_id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    let deleted = db::pickup_slots::delete(&state.pool, identity.store_id, slot_id)
        .await
        .map_err(db::internal)?;
    if !deleted {
        return Err(AppError::new(ErrorCode::SlotNotFound));
    }
    Ok(ApiResponse::ok())
}
