//! Admin delivery area handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{CepRange, CepRangeCreate};

use crate::auth::AdminIdentity;
use crate::db;
use crate::delivery::cep;
use crate::state::AppState;

/// GET /api/admin/cep-ranges
pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
) -> Result<ApiResponse<Vec<CepRange>>, AppError> {
    let ranges = db::cep_ranges::list(&state.pool, identity.store_id)
        .await
        .map_err(db::internal)?;
    Ok(ApiResponse::success(ranges))
}

/// POST /api/admin/cep-ranges
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Json(payload): Json<CepRangeCreate>,
) -> Result<ApiResponse<CepRange>, AppError> {
    let (start, end) = cep::validate_range(&payload.cep_start, &payload.cep_end)?;
    let range = db::cep_ranges::create(&state.pool, identity.store_id, &start, &end)
        .await
        .map_err(db::internal)?;
    Ok(ApiResponse::success(range))
}

/// DELETE /api/admin/cep-ranges/{id}
pub async fn remove(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Path(range_id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    let deleted = db::cep_ranges::delete(&state.pool, identity.store_id, range_id)
        .await
        .map_err(db::internal)?;
    if !deleted {
        return Err(AppError::new(ErrorCode::CepRangeNotFound));
    }
    Ok(ApiResponse::ok())
}
