//! Order placement orchestration
//!
//! The one write path customers hit. Validation happens before any write;
//! the order and its items are persisted in a single transaction; every
//! price and label is frozen into the item rows at this moment so later
//! catalog edits never touch a placed order.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Customer, FulfillmentType, Order, OrderItem, OrderItemInput, OrderSummary, OrderSummaryItem,
    PlaceOrderInput, ProductDetail,
};

use crate::db::{
    self,
    orders::{NewOrder, NewOrderItem},
};
use crate::delivery::cep;
use crate::orders::whatsapp;
use crate::state::AppState;

const MAX_NOTES_LEN: usize = 500;

/// Place a public order against a store slug
pub async fn place_order(
    state: &AppState,
    slug: &str,
    input: PlaceOrderInput,
) -> Result<OrderSummary, AppError> {
    let today = Utc::now().date_naive();
    validate_structure(&input, today)?;

    // Unknown and inactive slugs are indistinguishable to the caller
    let store = db::stores::find_active_by_slug(&state.pool, slug)
        .await
        .map_err(db::internal)?
        .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound))?;

    // Delivery orders must land inside the store's delivery area
    let delivery_cep = match input.fulfillment_type {
        FulfillmentType::Delivery => {
            let normalized = cep::normalize_cep(input.delivery_cep.as_deref().unwrap_or(""))?;
            let ranges = db::cep_ranges::list(&state.pool, store.id)
                .await
                .map_err(db::internal)?;
            if !cep::is_within_any_range(&normalized, &ranges) {
                return Err(AppError::with_message(
                    ErrorCode::OutOfDeliveryArea,
                    format!("CEP {normalized} is outside the store's delivery area"),
                ));
            }
            Some(normalized)
        }
        FulfillmentType::Pickup => None,
    };

    // When the customer picked a slot, it must be one of this store's
    // active windows; the display label falls back to the slot's window
    let pickup_time = match (input.fulfillment_type, input.pickup_slot_id) {
        (FulfillmentType::Pickup, Some(slot_id)) => {
            let slot = db::pickup_slots::find_by_id(&state.pool, store.id, slot_id)
                .await
                .map_err(db::internal)?
                .filter(|s| s.is_active)
                .ok_or_else(|| AppError::new(ErrorCode::SlotNotFound))?;
            Some(input.pickup_time.clone().unwrap_or_else(|| slot.window()))
        }
        (FulfillmentType::Pickup, None) => input.pickup_time.clone(),
        _ => None,
    };

    let normalized_whatsapp = whatsapp::normalize(&input.customer_whatsapp, &state.country_code)?;
    let customer = db::customers::upsert(
        &state.pool,
        store.id,
        input.customer_name.trim(),
        &normalized_whatsapp,
    )
    .await
    .map_err(db::internal)?;

    let resolved = resolve_items(&state.pool, store.id, &input.items).await?;

    let shipping_address = delivery_cep
        .as_deref()
        .map(|cep_digits| build_shipping_address(&input, cep_digits));

    let new_order = NewOrder {
        store_id: store.id,
        customer_id: customer.id,
        fulfillment_type: input.fulfillment_type,
        delivery_date: input.delivery_date,
        pickup_time,
        pickup_slot_id: match input.fulfillment_type {
            FulfillmentType::Pickup => input.pickup_slot_id,
            FulfillmentType::Delivery => None,
        },
        delivery_cep,
        delivery_street: input.delivery_street.clone(),
        delivery_number: input.delivery_number.clone(),
        delivery_neighborhood: input.delivery_neighborhood.clone(),
        delivery_city: input.delivery_city.clone(),
        shipping_address,
        notes: input.notes.clone(),
    };

    let (order, items) = db::orders::create_with_items(&state.pool, new_order, resolved)
        .await
        .map_err(db::internal)?;

    Ok(build_summary(
        &store.name,
        &state.country_code,
        &customer,
        order,
        items,
    ))
}

/// Fail-fast structural validation; runs before any I/O
fn validate_structure(input: &PlaceOrderInput, today: NaiveDate) -> Result<(), AppError> {
    if input.customer_name.trim().is_empty() {
        return Err(AppError::new(ErrorCode::RequiredField).with_detail("field", "customer_name"));
    }
    if input.customer_whatsapp.trim().is_empty() {
        return Err(
            AppError::new(ErrorCode::RequiredField).with_detail("field", "customer_whatsapp")
        );
    }
    validate_items(&input.items)?;
    // Discounts are merchant-set through the admin item editor; the
    // public storefront must not apply them
    for item in &input.items {
        if item.discount_amount.is_some_and(|d| d > Decimal::ZERO) {
            return Err(
                AppError::validation("Discounts cannot be set during order placement")
                    .with_detail("product_id", item.product_id),
            );
        }
    }
    if input
        .notes
        .as_deref()
        .is_some_and(|n| n.chars().count() > MAX_NOTES_LEN)
    {
        return Err(AppError::with_message(
            ErrorCode::NoteTooLong,
            format!("Notes must not exceed {MAX_NOTES_LEN} characters"),
        ));
    }
    if input.delivery_date <= today {
        return Err(AppError::with_message(
            ErrorCode::PastDeliveryDate,
            "Delivery date must be in the future",
        ));
    }
    if input.fulfillment_type == FulfillmentType::Delivery {
        let required = [
            ("delivery_cep", &input.delivery_cep),
            ("delivery_street", &input.delivery_street),
            ("delivery_number", &input.delivery_number),
            ("delivery_neighborhood", &input.delivery_neighborhood),
            ("delivery_city", &input.delivery_city),
        ];
        for (field, value) in required {
            if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                return Err(
                    AppError::new(ErrorCode::MissingDeliveryField).with_detail("field", field)
                );
            }
        }
    }
    Ok(())
}

/// Structural checks on requested lines, shared by placement and the
/// admin item-replacement path
pub(crate) fn validate_items(items: &[OrderItemInput]) -> Result<(), AppError> {
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    for item in items {
        if item.quantity < 1 {
            return Err(AppError::validation("Item quantity must be at least 1")
                .with_detail("product_id", item.product_id));
        }
        if item.discount_amount.is_some_and(|d| d < Decimal::ZERO) {
            return Err(AppError::validation("Discount amount must not be negative")
                .with_detail("product_id", item.product_id));
        }
    }
    Ok(())
}

/// Resolve requested lines against live catalog data, in input order.
/// The first invalid line aborts with nothing resolved.
pub(crate) async fn resolve_items(
    pool: &sqlx::PgPool,
    store_id: i64,
    items: &[OrderItemInput],
) -> Result<Vec<NewOrderItem>, AppError> {
    let mut resolved = Vec::with_capacity(items.len());
    for item in items {
        let detail = db::products::find_detail(pool, store_id, item.product_id)
            .await
            .map_err(db::internal)?
            .ok_or_else(|| {
                AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", item.product_id)
            })?;
        resolved.push(resolve_item(&detail, item)?);
    }
    Ok(resolved)
}

/// Resolve one requested line against live catalog data, freezing the
/// price and display label into the result
fn resolve_item(detail: &ProductDetail, input: &OrderItemInput) -> Result<NewOrderItem, AppError> {
    let product = &detail.product;

    if !product.is_active {
        return Err(AppError::with_message(
            ErrorCode::ProductInactive,
            format!("Product {} is not available", product.name),
        ));
    }
    if input.quantity < product.min_quantity {
        return Err(AppError::with_message(
            ErrorCode::BelowMinQuantity,
            format!(
                "Minimum quantity for {} is {}",
                product.name, product.min_quantity
            ),
        )
        .with_detail("min_quantity", product.min_quantity));
    }

    let (variant_id, variant_label, unit_price) = if detail.requires_variant() {
        let variant_id = input.variant_id.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::VariantRequired,
                format!("Product {} requires choosing a variant", product.name),
            )
        })?;
        let variant = detail.find_active_variant(variant_id).ok_or_else(|| {
            AppError::new(ErrorCode::VariantNotFound).with_detail("variant_id", variant_id)
        })?;
        (Some(variant.id), Some(variant.label.clone()), variant.price)
    } else {
        if let Some(variant_id) = input.variant_id {
            return Err(
                AppError::new(ErrorCode::VariantNotFound).with_detail("variant_id", variant_id)
            );
        }
        let price = product.price.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProductInvalidPrice,
                format!("Product {} has no usable price", product.name),
            )
        })?;
        (None, None, price)
    };

    // A discount may never push the line total below zero
    let discount_amount = input.discount_amount.unwrap_or(Decimal::ZERO);
    if discount_amount > unit_price * Decimal::from(input.quantity) {
        return Err(AppError::validation(format!(
            "Discount for {} exceeds the line subtotal",
            product.name
        ))
        .with_detail("product_id", product.id));
    }

    Ok(NewOrderItem {
        product_id: product.id,
        variant_id,
        product_name: product.name.clone(),
        variant_label,
        quantity: input.quantity,
        unit_price,
        discount_amount,
    })
}

/// Single-line display address for delivery orders. Not authoritative;
/// the structured fields remain the source of truth.
fn build_shipping_address(input: &PlaceOrderInput, cep_digits: &str) -> String {
    format!(
        "{}, {} - {}, {} - CEP {}-{}",
        input.delivery_street.as_deref().unwrap_or("").trim(),
        input.delivery_number.as_deref().unwrap_or("").trim(),
        input.delivery_neighborhood.as_deref().unwrap_or("").trim(),
        input.delivery_city.as_deref().unwrap_or("").trim(),
        &cep_digits[..5],
        &cep_digits[5..],
    )
}

/// Assemble the public confirmation. Internal IDs stay internal; the only
/// identifier exposed is the order's own non-guessable reference.
fn build_summary(
    store_name: &str,
    country_code: &str,
    customer: &Customer,
    order: Order,
    items: Vec<OrderItem>,
) -> OrderSummary {
    let items: Vec<OrderSummaryItem> = items
        .into_iter()
        .map(|i| OrderSummaryItem {
            line_total: i.line_total(),
            product_name: i.product_name,
            variant_label: i.variant_label,
            quantity: i.quantity,
            unit_price: i.unit_price,
            discount_amount: i.discount_amount,
        })
        .collect();
    let total = items.iter().map(|i| i.line_total).sum();

    OrderSummary {
        order_ref: order.id,
        order_number: order.order_number,
        store_name: store_name.to_string(),
        customer_name: customer.name.clone(),
        customer_whatsapp: whatsapp::format_display(&customer.whatsapp, country_code),
        status: order.status,
        fulfillment_type: order.fulfillment_type,
        delivery_date: order.delivery_date,
        pickup_time: order.pickup_time,
        shipping_address: order.shipping_address,
        notes: order.notes,
        items,
        total,
        created_at: order.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Product, ProductVariant};

    fn base_input() -> PlaceOrderInput {
        PlaceOrderInput {
            customer_name: "Maria Silva".into(),
            customer_whatsapp: "(11) 91234-5678".into(),
            fulfillment_type: FulfillmentType::Pickup,
            delivery_date: NaiveDate::from_ymd_opt(2030, 6, 15).unwrap(),
            items: vec![OrderItemInput {
                product_id: 10,
                variant_id: None,
                quantity: 1,
                discount_amount: None,
            }],
            pickup_time: Some("09:00-12:00".into()),
            pickup_slot_id: None,
            delivery_cep: None,
            delivery_street: None,
            delivery_number: None,
            delivery_neighborhood: None,
            delivery_city: None,
            notes: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
    }

    fn simple_product(price: Option<Decimal>) -> ProductDetail {
        ProductDetail {
            product: Product {
                id: 10,
                store_id: 1,
                name: "Bolo de cenoura".into(),
                description: None,
                price,
                min_quantity: 1,
                is_active: true,
                created_at: 0,
                updated_at: 0,
            },
            variants: vec![],
        }
    }

    fn variant(id: i64, label: &str, price: Decimal, is_active: bool) -> ProductVariant {
        ProductVariant {
            id,
            product_id: 10,
            label: label.into(),
            price,
            is_active,
            display_order: 0,
        }
    }

    #[test]
    fn test_structure_requires_name_and_items() {
        let mut input = base_input();
        input.customer_name = "  ".into();
        assert_eq!(
            validate_structure(&input, today()).unwrap_err().code,
            ErrorCode::RequiredField
        );

        let mut input = base_input();
        input.items.clear();
        assert_eq!(
            validate_structure(&input, today()).unwrap_err().code,
            ErrorCode::OrderEmpty
        );
    }

    #[test]
    fn test_structure_rejects_past_or_same_day_date() {
        let mut input = base_input();
        input.delivery_date = today();
        assert_eq!(
            validate_structure(&input, today()).unwrap_err().code,
            ErrorCode::PastDeliveryDate
        );

        input.delivery_date = today().succ_opt().unwrap();
        assert!(validate_structure(&input, today()).is_ok());
    }

    #[test]
    fn test_structure_requires_delivery_fields() {
        let mut input = base_input();
        input.fulfillment_type = FulfillmentType::Delivery;
        input.delivery_cep = Some("01310-100".into());
        input.delivery_street = Some("Av. Paulista".into());
        input.delivery_number = Some("1000".into());
        input.delivery_city = Some("São Paulo".into());
        // neighborhood missing
        let err = validate_structure(&input, today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingDeliveryField);

        input.delivery_neighborhood = Some("Bela Vista".into());
        assert!(validate_structure(&input, today()).is_ok());
    }

    #[test]
    fn test_structure_rejects_long_notes() {
        let mut input = base_input();
        input.notes = Some("x".repeat(501));
        assert_eq!(
            validate_structure(&input, today()).unwrap_err().code,
            ErrorCode::NoteTooLong
        );
    }

    #[test]
    fn test_resolve_simple_product_freezes_price() {
        let detail = simple_product(Some(Decimal::new(2550, 2)));
        let item = resolve_item(
            &detail,
            &OrderItemInput {
                product_id: 10,
                variant_id: None,
                quantity: 2,
                discount_amount: None,
            },
        )
        .unwrap();
        assert_eq!(item.unit_price, Decimal::new(2550, 2));
        assert_eq!(item.product_name, "Bolo de cenoura");
        assert_eq!(item.variant_id, None);
        assert_eq!(item.discount_amount, Decimal::ZERO);
    }

    #[test]
    fn test_resolve_variant_product_requires_variant() {
        let mut detail = simple_product(None);
        detail.variants = vec![
            variant(1, "Pequeno", Decimal::new(2000, 2), true),
            variant(2, "Grande", Decimal::new(3500, 2), true),
        ];

        let err = resolve_item(
            &detail,
            &OrderItemInput {
                product_id: 10,
                variant_id: None,
                quantity: 1,
                discount_amount: None,
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::VariantRequired);

        let item = resolve_item(
            &detail,
            &OrderItemInput {
                product_id: 10,
                variant_id: Some(2),
                quantity: 1,
                discount_amount: None,
            },
        )
        .unwrap();
        assert_eq!(item.unit_price, Decimal::new(3500, 2));
        assert_eq!(item.variant_label.as_deref(), Some("Grande"));
    }

    #[test]
    fn test_resolve_rejects_inactive_variant() {
        let mut detail = simple_product(None);
        detail.variants = vec![
            variant(1, "Pequeno", Decimal::new(2000, 2), true),
            variant(2, "Grande", Decimal::new(3500, 2), false),
        ];
        let err = resolve_item(
            &detail,
            &OrderItemInput {
                product_id: 10,
                variant_id: Some(2),
                quantity: 1,
                discount_amount: None,
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::VariantNotFound);
    }

    #[test]
    fn test_resolve_all_variants_disabled_falls_back_to_base_price() {
        let mut detail = simple_product(Some(Decimal::new(1800, 2)));
        detail.variants = vec![variant(1, "Pequeno", Decimal::new(2000, 2), false)];
        let item = resolve_item(
            &detail,
            &OrderItemInput {
                product_id: 10,
                variant_id: None,
                quantity: 1,
                discount_amount: None,
            },
        )
        .unwrap();
        assert_eq!(item.unit_price, Decimal::new(1800, 2));
    }

    #[test]
    fn test_resolve_rejects_inactive_product_and_min_quantity() {
        let mut detail = simple_product(Some(Decimal::ONE));
        detail.product.is_active = false;
        let err = resolve_item(
            &detail,
            &OrderItemInput {
                product_id: 10,
                variant_id: None,
                quantity: 1,
                discount_amount: None,
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductInactive);

        let mut detail = simple_product(Some(Decimal::ONE));
        detail.product.min_quantity = 6;
        let err = resolve_item(
            &detail,
            &OrderItemInput {
                product_id: 10,
                variant_id: None,
                quantity: 5,
                discount_amount: None,
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::BelowMinQuantity);
        assert!(err.message.contains("Bolo de cenoura"));
        assert!(err.message.contains('6'));
    }

    #[test]
    fn test_structure_rejects_customer_supplied_discount() {
        let mut input = base_input();
        input.items[0].discount_amount = Some(Decimal::new(99900, 2));
        assert_eq!(
            validate_structure(&input, today()).unwrap_err().code,
            ErrorCode::ValidationFailed
        );
    }

    #[test]
    fn test_resolve_bounds_discount_to_line_subtotal() {
        let detail = simple_product(Some(Decimal::new(2550, 2)));

        // 1 x 25.50 with a 999.00 discount would make the line negative
        let err = resolve_item(
            &detail,
            &OrderItemInput {
                product_id: 10,
                variant_id: None,
                quantity: 1,
                discount_amount: Some(Decimal::new(99900, 2)),
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        // A discount equal to the subtotal zeroes the line and is allowed
        let item = resolve_item(
            &detail,
            &OrderItemInput {
                product_id: 10,
                variant_id: None,
                quantity: 2,
                discount_amount: Some(Decimal::new(5100, 2)),
            },
        )
        .unwrap();
        assert_eq!(item.discount_amount, Decimal::new(5100, 2));
    }

    #[test]
    fn test_resolve_rejects_missing_base_price() {
        let detail = simple_product(None);
        let err = resolve_item(
            &detail,
            &OrderItemInput {
                product_id: 10,
                variant_id: None,
                quantity: 1,
                discount_amount: None,
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductInvalidPrice);
    }

    #[test]
    fn test_shipping_address_format() {
        let mut input = base_input();
        input.delivery_street = Some("Av. Paulista".into());
        input.delivery_number = Some("1000".into());
        input.delivery_neighborhood = Some("Bela Vista".into());
        input.delivery_city = Some("São Paulo".into());
        assert_eq!(
            build_shipping_address(&input, "01310100"),
            "Av. Paulista, 1000 - Bela Vista, São Paulo - CEP 01310-100"
        );
    }
}
