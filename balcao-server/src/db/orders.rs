//! Order queries
//!
//! Order status lives in a TEXT column and is parsed through
//! `OrderStatus::from_str` on the way out, so an unexpected value is a
//! database error instead of a silent misread. All multi-row writes run in
//! a single transaction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{FulfillmentType, Order, OrderDetail, OrderItem, OrderStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::PgPool;
use std::collections::HashMap;

use super::BoxError;

/// Raw order row; status columns come back as TEXT
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    store_id: i64,
    customer_id: i64,
    order_number: i32,
    status: String,
    fulfillment_type: String,
    delivery_date: NaiveDate,
    pickup_time: Option<String>,
    pickup_slot_id: Option<i64>,
    delivery_cep: Option<String>,
    delivery_street: Option<String>,
    delivery_number: Option<String>,
    delivery_neighborhood: Option<String>,
    delivery_city: Option<String>,
    shipping_address: Option<String>,
    notes: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, BoxError> {
        Ok(Order {
            id: self.id,
            store_id: self.store_id,
            customer_id: self.customer_id,
            order_number: self.order_number,
            status: self.status.parse::<OrderStatus>()?,
            fulfillment_type: self.fulfillment_type.parse::<FulfillmentType>()?,
            delivery_date: self.delivery_date,
            pickup_time: self.pickup_time,
            pickup_slot_id: self.pickup_slot_id,
            delivery_cep: self.delivery_cep,
            delivery_street: self.delivery_street,
            delivery_number: self.delivery_number,
            delivery_neighborhood: self.delivery_neighborhood,
            delivery_city: self.delivery_city,
            shipping_address: self.shipping_address,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Order row joined with its customer's identity
#[derive(sqlx::FromRow)]
struct OrderListRow {
    #[sqlx(flatten)]
    order: OrderRow,
    customer_name: String,
    customer_whatsapp: String,
}

/// Fields of a new order, resolved and validated by the placement workflow
pub struct NewOrder {
    pub store_id: i64,
    pub customer_id: i64,
    pub fulfillment_type: FulfillmentType,
    pub delivery_date: NaiveDate,
    pub pickup_time: Option<String>,
    pub pickup_slot_id: Option<i64>,
    pub delivery_cep: Option<String>,
    pub delivery_street: Option<String>,
    pub delivery_number: Option<String>,
    pub delivery_neighborhood: Option<String>,
    pub delivery_city: Option<String>,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
}

/// One resolved order line with pricing frozen from the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub product_name: String,
    pub variant_label: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub discount_amount: Decimal,
}

/// Create an order with its items atomically.
///
/// Claims the next per-store order number and writes the order and all
/// items in one transaction; a failure anywhere leaves nothing behind.
pub async fn create_with_items(
    pool: &PgPool,
    new_order: NewOrder,
    items: Vec<NewOrderItem>,
) -> Result<(Order, Vec<OrderItem>), BoxError> {
    let now = now_millis();
    let order_id = snowflake_id();

    let mut tx = pool.begin().await?;

    // Claim the next sequential order number for this store. The row lock
    // taken by UPDATE serializes concurrent placements on the counter.
    let order_number: i32 = sqlx::query_scalar(
        r#"
        UPDATE stores
        SET next_order_number = next_order_number + 1, updated_at = $2
        WHERE id = $1
        RETURNING next_order_number - 1
        "#,
    )
    .bind(new_order.store_id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let order_row = sqlx::query_as::<_, OrderRow>(
        r#"
        INSERT INTO orders (
            id, store_id, customer_id, order_number, status, fulfillment_type,
            delivery_date, pickup_time, pickup_slot_id, delivery_cep,
            delivery_street, delivery_number, delivery_neighborhood,
            delivery_city, shipping_address, notes, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $17)
        RETURNING *
        "#,
    )
    .bind(order_id)
    .bind(new_order.store_id)
    .bind(new_order.customer_id)
    .bind(order_number)
    .bind(OrderStatus::Pending.as_str())
    .bind(new_order.fulfillment_type.as_str())
    .bind(new_order.delivery_date)
    .bind(&new_order.pickup_time)
    .bind(new_order.pickup_slot_id)
    .bind(&new_order.delivery_cep)
    .bind(&new_order.delivery_street)
    .bind(&new_order.delivery_number)
    .bind(&new_order.delivery_neighborhood)
    .bind(&new_order.delivery_city)
    .bind(&new_order.shipping_address)
    .bind(&new_order.notes)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let saved_items = insert_items(&mut tx, order_id, &items, now).await?;

    tx.commit().await?;

    Ok((order_row.into_order()?, saved_items))
}

/// Batch-insert order items via UNNEST
async fn insert_items(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    order_id: i64,
    items: &[NewOrderItem],
    now: i64,
) -> Result<Vec<OrderItem>, BoxError> {
    let ids: Vec<i64> = items.iter().map(|_| snowflake_id()).collect();
    let product_ids: Vec<i64> = items.iter().map(|i| i.product_id).collect();
    let variant_ids: Vec<Option<i64>> = items.iter().map(|i| i.variant_id).collect();
    let product_names: Vec<String> = items.iter().map(|i| i.product_name.clone()).collect();
    let variant_labels: Vec<Option<String>> =
        items.iter().map(|i| i.variant_label.clone()).collect();
    let quantities: Vec<i32> = items.iter().map(|i| i.quantity).collect();
    let unit_prices: Vec<Decimal> = items.iter().map(|i| i.unit_price).collect();
    let discounts: Vec<Decimal> = items.iter().map(|i| i.discount_amount).collect();

    let saved = sqlx::query_as::<_, OrderItem>(
        r#"
        INSERT INTO order_items (
            id, order_id, product_id, variant_id, product_name, variant_label,
            quantity, unit_price, discount_amount, created_at
        )
        SELECT t.id, $2::bigint, t.product_id, t.variant_id, t.product_name,
               t.variant_label, t.quantity, t.unit_price, t.discount_amount, $10::bigint
        FROM UNNEST(
            $1::bigint[], $3::bigint[], $4::bigint[], $5::text[],
            $6::text[], $7::int[], $8::numeric[], $9::numeric[]
        ) AS t(id, product_id, variant_id, product_name, variant_label, quantity, unit_price, discount_amount)
        RETURNING *
        "#,
    )
    .bind(&ids)
    .bind(order_id)
    .bind(&product_ids)
    .bind(&variant_ids)
    .bind(&product_names)
    .bind(&variant_labels)
    .bind(&quantities)
    .bind(&unit_prices)
    .bind(&discounts)
    .bind(now)
    .fetch_all(&mut **tx)
    .await?;

    Ok(saved)
}

/// Result of a status change attempt
pub enum StatusUpdateOutcome {
    Updated(Order),
    /// The order exists but its current status forbids the transition
    IllegalTransition(OrderStatus),
    NotFound,
}

/// Apply a status transition under a row lock.
///
/// The current status is read with FOR UPDATE, so two concurrent updates
/// serialize and the loser sees the winner's terminal state.
pub async fn update_status(
    pool: &PgPool,
    store_id: i64,
    order_id: i64,
    target: OrderStatus,
) -> Result<StatusUpdateOutcome, BoxError> {
    let mut tx = pool.begin().await?;

    let current: Option<String> = sqlx::query_scalar(
        "SELECT status FROM orders WHERE id = $1 AND store_id = $2 FOR UPDATE",
    )
    .bind(order_id)
    .bind(store_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(current) = current else {
        return Ok(StatusUpdateOutcome::NotFound);
    };
    let current = current.parse::<OrderStatus>()?;

    if !current.can_transition(target) {
        return Ok(StatusUpdateOutcome::IllegalTransition(current));
    }

    let row = sqlx::query_as::<_, OrderRow>(
        "UPDATE orders SET status = $3, updated_at = $4 WHERE id = $1 AND store_id = $2 RETURNING *",
    )
    .bind(order_id)
    .bind(store_id)
    .bind(target.as_str())
    .bind(now_millis())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(StatusUpdateOutcome::Updated(row.into_order()?))
}

/// Result of an item replacement attempt
pub enum ReplaceItemsOutcome {
    Replaced(OrderDetail),
    /// Items can only be edited while the order is still pending
    NotPending(OrderStatus),
    NotFound,
}

/// Replace all items of a pending order atomically
pub async fn replace_items(
    pool: &PgPool,
    store_id: i64,
    order_id: i64,
    items: Vec<NewOrderItem>,
) -> Result<ReplaceItemsOutcome, BoxError> {
    let now = now_millis();
    let mut tx = pool.begin().await?;

    let current: Option<String> = sqlx::query_scalar(
        "SELECT status FROM orders WHERE id = $1 AND store_id = $2 FOR UPDATE",
    )
    .bind(order_id)
    .bind(store_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(current) = current else {
        return Ok(ReplaceItemsOutcome::NotFound);
    };
    let current = current.parse::<OrderStatus>()?;
    if current != OrderStatus::Pending {
        return Ok(ReplaceItemsOutcome::NotPending(current));
    }

    sqlx::query("DELETE FROM order_items WHERE order_id = $1")
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

    let saved_items = insert_items(&mut tx, order_id, &items, now).await?;

    let row = sqlx::query_as::<_, OrderListRow>(
        r#"
        UPDATE orders SET updated_at = $3 WHERE orders.id = $1 AND orders.store_id = $2
        RETURNING orders.*,
            (SELECT c.name FROM customers c WHERE c.id = orders.customer_id) AS customer_name,
            (SELECT c.whatsapp FROM customers c WHERE c.id = orders.customer_id) AS customer_whatsapp
        "#,
    )
    .bind(order_id)
    .bind(store_id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(ReplaceItemsOutcome::Replaced(OrderDetail {
        order: row.order.into_order()?,
        customer_name: row.customer_name,
        customer_whatsapp: row.customer_whatsapp,
        items: saved_items,
    }))
}

/// Optional filters for the merchant order list
#[derive(Debug, Default)]
pub struct OrderFilters {
    pub status: Option<OrderStatus>,
    /// Inclusive delivery-date bounds
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Matches the customer name (substring) or exact WhatsApp number
    pub customer: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// List orders for a store, newest first, with customer identity and items
pub async fn list(
    pool: &PgPool,
    store_id: i64,
    filters: OrderFilters,
) -> Result<Vec<OrderDetail>, BoxError> {
    let limit = if filters.limit <= 0 { 50 } else { filters.limit.min(200) };

    let rows = sqlx::query_as::<_, OrderListRow>(
        r#"
        SELECT o.*, c.name AS customer_name, c.whatsapp AS customer_whatsapp
        FROM orders o
        JOIN customers c ON c.id = o.customer_id
        WHERE o.store_id = $1
          AND ($2::text IS NULL OR o.status = $2)
          AND ($3::date IS NULL OR o.delivery_date >= $3)
          AND ($4::date IS NULL OR o.delivery_date <= $4)
          AND ($5::text IS NULL OR c.name ILIKE '%' || $5 || '%' OR c.whatsapp = $5)
        ORDER BY o.created_at DESC, o.id DESC
        LIMIT $6 OFFSET $7
        "#,
    )
    .bind(store_id)
    .bind(filters.status.map(|s| s.as_str()))
    .bind(filters.date_from)
    .bind(filters.date_to)
    .bind(&filters.customer)
    .bind(limit)
    .bind(filters.offset.max(0))
    .fetch_all(pool)
    .await?;

    let order_ids: Vec<i64> = rows.iter().map(|r| r.order.id).collect();
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT * FROM order_items WHERE order_id = ANY($1) ORDER BY id",
    )
    .bind(&order_ids)
    .fetch_all(pool)
    .await?;

    let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }

    rows.into_iter()
        .map(|r| {
            let order = r.order.into_order()?;
            let items = by_order.remove(&order.id).unwrap_or_default();
            Ok(OrderDetail {
                order,
                customer_name: r.customer_name,
                customer_whatsapp: r.customer_whatsapp,
                items,
            })
        })
        .collect()
}

/// Load a single order with customer identity and items
pub async fn find_detail(
    pool: &PgPool,
    store_id: i64,
    order_id: i64,
) -> Result<Option<OrderDetail>, BoxError> {
    let row = sqlx::query_as::<_, OrderListRow>(
        r#"
        SELECT o.*, c.name AS customer_name, c.whatsapp AS customer_whatsapp
        FROM orders o
        JOIN customers c ON c.id = o.customer_id
        WHERE o.id = $1 AND o.store_id = $2
        "#,
    )
    .bind(order_id)
    .bind(store_id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT * FROM order_items WHERE order_id = $1 ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;

    Ok(Some(OrderDetail {
        order: row.order.into_order()?,
        customer_name: row.customer_name,
        customer_whatsapp: row.customer_whatsapp,
        items,
    }))
}

/// Delete an order and its items (cascade). Returns false when no row matched.
pub async fn delete(pool: &PgPool, store_id: i64, order_id: i64) -> Result<bool, BoxError> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1 AND store_id = $2")
        .bind(order_id)
        .bind(store_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
