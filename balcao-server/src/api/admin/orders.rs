//! Admin order handlers

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{OrderDetail, OrderItemInput, OrderStatus, OrderStatusUpdate};

use crate::auth::AdminIdentity;
use crate::db::{
    self,
    orders::{OrderFilters, ReplaceItemsOutcome, StatusUpdateOutcome},
};
use crate::orders::placement;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub customer: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/admin/orders
pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Query(query): Query<ListQuery>,
) -> Result<ApiResponse<Vec<OrderDetail>>, AppError> {
    let filters = OrderFilters {
        status: query.status,
        date_from: query.date_from,
        date_to: query.date_to,
        customer: query.customer.filter(|c| !c.trim().is_empty()),
        limit: query.limit.unwrap_or(50),
        offset: query.offset.unwrap_or(0),
    };
    let orders = db::orders::list(&state.pool, identity.store_id, filters)
        .await
        .map_err(db::internal)?;
    Ok(ApiResponse::success(orders))
}

/// GET /api/admin/orders/{id}
pub async fn get(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Path(order_id): Path<i64>,
) -> Result<ApiResponse<OrderDetail>, AppError> {
    let order = db::orders::find_detail(&state.pool, identity.store_id, order_id)
        .await
        .map_err(db::internal)?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    Ok(ApiResponse::success(order))
}

/// PATCH /api/admin/orders/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Path(order_id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> Result<ApiResponse<shared::models::Order>, AppError> {
    let outcome =
        db::orders::update_status(&state.pool, identity.store_id, order_id, payload.status)
            .await
            .map_err(db::internal)?;

    match outcome {
        StatusUpdateOutcome::Updated(order) => Ok(ApiResponse::success(order)),
        StatusUpdateOutcome::IllegalTransition(current) => {
            Err(AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Cannot change order status from {current} to {}", payload.status),
            ))
        }
        StatusUpdateOutcome::NotFound => Err(AppError::new(ErrorCode::OrderNotFound)),
    }
}

/// PUT /api/admin/orders/{id}/items
///
/// Full replacement of the item set. Prices are re-frozen from the
/// current catalog at replacement time.
pub async fn replace_items(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Path(order_id): Path<i64>,
    Json(items): Json<Vec<OrderItemInput>>,
) -> Result<ApiResponse<OrderDetail>, AppError> {
    placement::validate_items(&items)?;
    let resolved = placement::resolve_items(&state.pool, identity.store_id, &items).await?;

    let outcome = db::orders::replace_items(&state.pool, identity.store_id, order_id, resolved)
        .await
        .map_err(db::internal)?;

    match outcome {
        ReplaceItemsOutcome::Replaced(detail) => Ok(ApiResponse::success(detail)),
        ReplaceItemsOutcome::NotPending(current) => Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Items can only be edited while the order is {}, not {current}", OrderStatus::Pending),
        )),
        ReplaceItemsOutcome::NotFound => Err(AppError::new(ErrorCode::OrderNotFound)),
    }
}

/// DELETE /api/admin/orders/{id}
pub async fn remove(
    State(state): State<AppState>,
    Extension(identity): Extension<AdminIdentity>,
    Path(order_id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    let deleted = db::orders::delete(&state.pool, identity.store_id, order_id)
        .await
        .map_err(db::internal)?;
    if !deleted {
        return Err(AppError::new(ErrorCode::OrderNotFound));
    }
    Ok(ApiResponse::ok())
}
