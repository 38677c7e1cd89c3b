//! Order models and the order status state machine

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order lifecycle state.
///
/// Every order starts as `Pending`. The only legal transitions are
/// `Pending -> Approved` and `Pending -> Rejected`; both targets are
/// terminal. Stored as TEXT and converted explicitly at the database
/// boundary so an unknown value surfaces as an error instead of a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Approved => "APPROVED",
            OrderStatus::Rejected => "REJECTED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Approved | OrderStatus::Rejected)
    }

    /// Whether moving from `self` to `target` is a legal transition.
    /// Self-transitions are not legal, including Pending -> Pending.
    pub fn can_transition(&self, target: OrderStatus) -> bool {
        matches!(
            (self, target),
            (OrderStatus::Pending, OrderStatus::Approved)
                | (OrderStatus::Pending, OrderStatus::Rejected)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "APPROVED" => Ok(OrderStatus::Approved),
            "REJECTED" => Ok(OrderStatus::Rejected),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// How the customer receives the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentType {
    Pickup,
    Delivery,
}

impl FulfillmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentType::Pickup => "PICKUP",
            FulfillmentType::Delivery => "DELIVERY",
        }
    }
}

impl fmt::Display for FulfillmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FulfillmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PICKUP" => Ok(FulfillmentType::Pickup),
            "DELIVERY" => Ok(FulfillmentType::Delivery),
            other => Err(format!("unknown fulfillment type: {other}")),
        }
    }
}

/// Order entity.
///
/// `id` is a non-sequential snowflake and doubles as the public order
/// reference; `order_number` is the short per-store sequential number the
/// merchant reads to the customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub store_id: i64,
    pub customer_id: i64,
    pub order_number: i32,
    pub status: OrderStatus,
    pub fulfillment_type: FulfillmentType,
    pub delivery_date: NaiveDate,
    /// For pickup orders, the chosen window as "HH:mm-HH:mm"
    pub pickup_time: Option<String>,
    /// Slot the customer picked, when they chose one explicitly
    pub pickup_slot_id: Option<i64>,
    pub delivery_cep: Option<String>,
    pub delivery_street: Option<String>,
    pub delivery_number: Option<String>,
    pub delivery_neighborhood: Option<String>,
    pub delivery_city: Option<String>,
    /// Single-line address derived from the delivery fields at placement
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order line with pricing frozen at placement time.
///
/// `product_name`, `variant_label` and `unit_price` are copies taken when
/// the order was placed; later catalog edits never touch them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub product_name: String,
    pub variant_label: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub discount_amount: Decimal,
    pub created_at: i64,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity) - self.discount_amount
    }
}

/// Order with customer identity and items loaded, for merchant views
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub customer_name: String,
    pub customer_whatsapp: String,
    pub items: Vec<OrderItem>,
}

impl OrderDetail {
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|i| i.line_total()).sum()
    }
}

// ========== Placement payloads ==========

/// One requested line in an incoming order
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemInput {
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub quantity: i32,
    #[serde(default)]
    pub discount_amount: Option<Decimal>,
}

/// Public order placement payload, keyed by store slug in the URL
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderInput {
    pub customer_name: String,
    pub customer_whatsapp: String,
    pub fulfillment_type: FulfillmentType,
    pub delivery_date: NaiveDate,
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub pickup_time: Option<String>,
    #[serde(default)]
    pub pickup_slot_id: Option<i64>,
    #[serde(default)]
    pub delivery_cep: Option<String>,
    #[serde(default)]
    pub delivery_street: Option<String>,
    #[serde(default)]
    pub delivery_number: Option<String>,
    #[serde(default)]
    pub delivery_neighborhood: Option<String>,
    #[serde(default)]
    pub delivery_city: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Admin payload for changing an order's status
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

// ========== Public summary ==========

/// One line of the public confirmation summary
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummaryItem {
    pub product_name: String,
    pub variant_label: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub discount_amount: Decimal,
    pub line_total: Decimal,
}

/// Confirmation returned to the customer after placement.
/// Exposes the snowflake `order_ref` rather than any sequential ID.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub order_ref: i64,
    pub order_number: i32,
    pub store_name: String,
    pub customer_name: String,
    pub customer_whatsapp: String,
    pub status: OrderStatus,
    pub fulfillment_type: FulfillmentType,
    pub delivery_date: NaiveDate,
    pub pickup_time: Option<String>,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<OrderSummaryItem>,
    pub total: Decimal,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        assert!(OrderStatus::Pending.can_transition(OrderStatus::Approved));
        assert!(OrderStatus::Pending.can_transition(OrderStatus::Rejected));
        assert!(!OrderStatus::Pending.can_transition(OrderStatus::Pending));
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for from in [OrderStatus::Approved, OrderStatus::Rejected] {
            for to in [
                OrderStatus::Pending,
                OrderStatus::Approved,
                OrderStatus::Rejected,
            ] {
                assert!(!from.can_transition(to), "{from} -> {to} must be illegal");
            }
            assert!(from.is_terminal());
        }
        assert!(!OrderStatus::Pending.is_terminal());
    }

    #[test]
    fn test_status_round_trip() {
        for s in [
            OrderStatus::Pending,
            OrderStatus::Approved,
            OrderStatus::Rejected,
        ] {
            assert_eq!(s.as_str().parse::<OrderStatus>().unwrap(), s);
        }
        assert!("SHIPPED".parse::<OrderStatus>().is_err());
        assert!("pending".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_line_total() {
        let item = OrderItem {
            id: 1,
            order_id: 1,
            product_id: 1,
            variant_id: None,
            product_name: "Bolo de cenoura".into(),
            variant_label: None,
            quantity: 3,
            unit_price: Decimal::new(2550, 2),
            discount_amount: Decimal::new(150, 2),
            created_at: 0,
        };
        // 3 * 25.50 - 1.50 = 75.00
        assert_eq!(item.line_total(), Decimal::new(7500, 2));
    }
}
