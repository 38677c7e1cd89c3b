//! Admin schedule handlers

use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError};
use shared::models::{ScheduleDay, ScheduleOverrideSet};

use crate::auth::AdminIdentity;
use crate::scheduling::resolver;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// GET /api/admin/schedule
pub async fn resolve(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Query(query): Query<ResolveQuery>,
) -> Result<ApiResponse<Vec<ScheduleDay>>, AppError> {
    let days = resolver::resolve(
        &state.pool,
        identity.store_id,
        query.from.as_deref(),
        query.to.as_deref(),
    )
    .await?;
    Ok(ApiResponse::success(days))
}

/// PUT /api/admin/schedule
pub async fn set_day(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Json(payload): Json<ScheduleOverrideSet>,
) -> Result<ApiResponse<ScheduleDay>, AppError> {
    let day = resolver::set_override(&state.pool, identity.store_id, payload).await?;
    Ok(ApiResponse::success(day))
}
