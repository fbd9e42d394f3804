//! Draft order and its lines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::{ClientId, OrderId, OrderLineId, ProductId};
use crate::money::{Currency, Money};
use crate::order::{OrderPricing, OrderStatus};
use crate::shipping::{ShippingDetails, ShippingSchedule};

/// Maximum quantity allowed per order line.
pub const MAX_QUANTITY_PER_LINE: i64 = 9999;

/// An order a client is assembling, or has since submitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftOrder {
    pub id: OrderId,
    /// Buying client.
    pub client_id: ClientId,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
    pub currency: Currency,
    /// Free-text note from the client.
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl DraftOrder {
    /// Start an empty draft for a client.
    pub fn new(client_id: ClientId) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::generate(),
            client_id,
            status: OrderStatus::Draft,
            lines: Vec::new(),
            currency: Currency::EUR,
            note: None,
            created_at: now,
            updated_at: now,
            submitted_at: None,
        }
    }

    /// Add units of a product. Adding a product already on the order
    /// increases that line's quantity.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        sku: impl Into<String>,
        name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<OrderLineId, CommerceError> {
        self.ensure_editable()?;

        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: unit_price.currency.code().to_string(),
            });
        }
        if unit_price.amount_cents < 0 {
            return Err(CommerceError::InvalidPrice(unit_price.amount_cents));
        }

        if let Some(existing) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            check_line_limit(new_quantity)?;

            existing.set_quantity(new_quantity)?;
            let id = existing.id.clone();
            self.touch();
            return Ok(id);
        }

        check_line_limit(quantity)?;
        let line = OrderLine::new(product_id, sku, name, quantity, unit_price)?;
        let id = line.id.clone();
        self.lines.push(line);
        self.touch();
        Ok(id)
    }

    /// Set a line's quantity. A quantity of zero or less removes the line.
    ///
    /// Returns whether a line was found.
    pub fn update_quantity(
        &mut self,
        line_id: &OrderLineId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        self.ensure_editable()?;

        if quantity <= 0 {
            return self.remove_item(line_id);
        }
        check_line_limit(quantity)?;

        match self.lines.iter_mut().find(|l| &l.id == line_id) {
            Some(line) => {
                line.set_quantity(quantity)?;
                self.touch();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a line. Returns whether it was present.
    pub fn remove_item(&mut self, line_id: &OrderLineId) -> Result<bool, CommerceError> {
        self.ensure_editable()?;

        let len_before = self.lines.len();
        self.lines.retain(|l| &l.id != line_id);
        let removed = self.lines.len() < len_before;
        if removed {
            self.touch();
        }
        Ok(removed)
    }

    /// Remove every line.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.ensure_editable()?;
        self.lines.clear();
        self.touch();
        Ok(())
    }

    /// Get a line by ID.
    pub fn line(&self, line_id: &OrderLineId) -> Option<&OrderLine> {
        self.lines.iter().find(|l| &l.id == line_id)
    }

    /// Sum of quantities across lines.
    pub fn total_items(&self) -> i64 {
        self.lines
            .iter()
            .fold(0_i64, |acc, l| acc.saturating_add(l.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        Money::try_sum(self.lines.iter().map(|l| &l.total_price), self.currency)
            .ok_or(CommerceError::Overflow)
    }

    /// Shipping quote for the current quantities.
    pub fn shipping(&self, schedule: &ShippingSchedule) -> ShippingDetails {
        schedule.details(self.total_items())
    }

    /// Full pricing breakdown.
    pub fn pricing(&self, schedule: &ShippingSchedule) -> Result<OrderPricing, CommerceError> {
        let subtotal = self.subtotal()?;
        let shipping = self.shipping(schedule);

        if shipping.cost.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: shipping.cost.currency.code().to_string(),
            });
        }
        let grand_total = subtotal
            .try_add(&shipping.cost)
            .ok_or(CommerceError::Overflow)?;

        Ok(OrderPricing {
            total_items: shipping.total_items,
            subtotal,
            shipping_total: shipping.cost,
            shipping_explanation: shipping.explanation,
            grand_total,
        })
    }

    /// Send the draft to the seller.
    pub fn submit(&mut self) -> Result<(), CommerceError> {
        if self.is_empty() {
            return Err(CommerceError::EmptyOrder);
        }
        self.transition(OrderStatus::Submitted)?;
        self.submitted_at = Some(self.updated_at);
        Ok(())
    }

    /// Move to another status if the lifecycle allows it.
    pub fn transition(&mut self, next: OrderStatus) -> Result<(), CommerceError> {
        if !self.status.can_transition_to(next) {
            return Err(CommerceError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        self.touch();
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), CommerceError> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(CommerceError::OrderNotEditable(self.status.to_string()))
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn check_line_limit(quantity: i64) -> Result<(), CommerceError> {
    if quantity > MAX_QUANTITY_PER_LINE {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_LINE,
        ));
    }
    Ok(())
}

/// One product on an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub product_id: ProductId,
    /// Catalog reference at time of ordering.
    pub sku: String,
    /// Product name (denormalized for display).
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    /// unit_price * quantity
    pub total_price: Money,
}

impl OrderLine {
    fn new(
        product_id: ProductId,
        sku: impl Into<String>,
        name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<Self, CommerceError> {
        let total_price = unit_price
            .try_multiply(quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            id: OrderLineId::generate(),
            product_id,
            sku: sku.into(),
            name: name.into(),
            quantity,
            unit_price,
            total_price,
        })
    }

    /// Change the quantity and its total together; on overflow the line
    /// is left untouched.
    fn set_quantity(&mut self, quantity: i64) -> Result<(), CommerceError> {
        let total_price = self
            .unit_price
            .try_multiply(quantity)
            .ok_or(CommerceError::Overflow)?;
        self.quantity = quantity;
        self.total_price = total_price;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eur(units: i64) -> Money {
        Money::from_units(units, Currency::EUR)
    }

    fn order_with(quantities: &[i64]) -> DraftOrder {
        let mut order = DraftOrder::new(ClientId::new("client-1"));
        for (i, &qty) in quantities.iter().enumerate() {
            order
                .add_item(
                    ProductId::new(format!("prod-{}", i)),
                    format!("SKU-{}", i),
                    format!("Product {}", i),
                    qty,
                    eur(10),
                )
                .unwrap();
        }
        order
    }

    #[test]
    fn test_new_order_is_empty_draft() {
        let order = DraftOrder::new(ClientId::new("client-1"));
        assert!(order.is_empty());
        assert_eq!(order.status, OrderStatus::Draft);
        assert_eq!(order.total_items(), 0);
        assert_eq!(order.currency, Currency::EUR);
    }

    #[test]
    fn test_total_items_sums_quantities() {
        let order = order_with(&[3, 5, 6]);
        assert_eq!(order.total_items(), 14);
        assert_eq!(order.lines.len(), 3);
    }

    #[test]
    fn test_adding_same_product_merges_lines() {
        let mut order = DraftOrder::new(ClientId::new("client-1"));
        let first = order
            .add_item(ProductId::new("p"), "SKU", "Gloves", 2, eur(4))
            .unwrap();
        let second = order
            .add_item(ProductId::new("p"), "SKU", "Gloves", 3, eur(4))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.total_items(), 5);
        assert_eq!(order.lines[0].total_price, eur(20));
    }

    #[test]
    fn test_shipping_follows_quantity_changes() {
        let mut order = order_with(&[2]);
        let schedule = ShippingSchedule::standard();
        assert_eq!(order.shipping(&schedule).cost_units(), 13);

        let line_id = order.lines[0].id.clone();
        order.update_quantity(&line_id, 14).unwrap();
        assert_eq!(order.shipping(&schedule).cost_units(), 25);

        order.update_quantity(&line_id, 0).unwrap();
        assert!(order.is_empty());
        assert_eq!(order.shipping(&schedule).cost_units(), 0);
    }

    #[test]
    fn test_pricing_breakdown() {
        let order = order_with(&[4, 4]);
        let pricing = order.pricing(&ShippingSchedule::standard()).unwrap();

        assert_eq!(pricing.total_items, 8);
        assert_eq!(pricing.subtotal, eur(80));
        assert_eq!(pricing.shipping_total, eur(20));
        assert_eq!(pricing.shipping_explanation, "Frais pour 3-8 produits");
        assert_eq!(pricing.grand_total, eur(100));
    }

    #[test]
    fn test_invalid_quantities_rejected() {
        let mut order = DraftOrder::new(ClientId::new("client-1"));
        assert_eq!(
            order.add_item(ProductId::new("p"), "SKU", "Gloves", 0, eur(1)),
            Err(CommerceError::InvalidQuantity(0))
        );
        assert_eq!(
            order.add_item(
                ProductId::new("p"),
                "SKU",
                "Gloves",
                MAX_QUANTITY_PER_LINE + 1,
                eur(1)
            ),
            Err(CommerceError::QuantityExceedsLimit(
                MAX_QUANTITY_PER_LINE + 1,
                MAX_QUANTITY_PER_LINE
            ))
        );
    }

    #[test]
    fn test_foreign_currency_rejected() {
        let mut order = DraftOrder::new(ClientId::new("client-1"));
        let result = order.add_item(
            ProductId::new("p"),
            "SKU",
            "Gloves",
            1,
            Money::from_units(1, Currency::USD),
        );
        assert!(matches!(result, Err(CommerceError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_remove_unknown_line() {
        let mut order = order_with(&[1]);
        assert_eq!(order.remove_item(&OrderLineId::new("nope")), Ok(false));
        assert_eq!(order.update_quantity(&OrderLineId::new("nope"), 3), Ok(false));
        assert_eq!(order.total_items(), 1);
    }

    #[test]
    fn test_submit_locks_lines() {
        let mut order = order_with(&[3]);
        order.submit().unwrap();

        assert_eq!(order.status, OrderStatus::Submitted);
        assert!(order.submitted_at.is_some());

        let result = order.add_item(ProductId::new("x"), "SKU", "Late", 1, eur(1));
        assert_eq!(
            result,
            Err(CommerceError::OrderNotEditable("submitted".to_string()))
        );
        assert!(order.clear().is_err());
    }

    #[test]
    fn test_submit_empty_order_fails() {
        let mut order = DraftOrder::new(ClientId::new("client-1"));
        assert_eq!(order.submit(), Err(CommerceError::EmptyOrder));
        assert_eq!(order.status, OrderStatus::Draft);
    }

    #[test]
    fn test_invalid_transition() {
        let mut order = order_with(&[1]);
        let result = order.transition(OrderStatus::Shipped);
        assert_eq!(
            result,
            Err(CommerceError::InvalidStatusTransition {
                from: "draft".to_string(),
                to: "shipped".to_string(),
            })
        );
    }

    #[test]
    fn test_order_roundtrips_through_json() {
        let order = order_with(&[2, 7]);
        let json = serde_json::to_string(&order).unwrap();
        let back: DraftOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }

    fn order_near_overflow() -> (DraftOrder, OrderLineId) {
        let mut order = DraftOrder::new(ClientId::new("client-1"));
        let id = order
            .add_item(
                ProductId::new("ingot"),
                "GOLD-1",
                "Gold ingot",
                1000,
                Money::new(i64::MAX / 2000, Currency::EUR),
            )
            .unwrap();
        (order, id)
    }

    #[test]
    fn test_failed_merge_leaves_line_intact() {
        let (mut order, id) = order_near_overflow();
        let before = order.clone();

        let result = order.add_item(
            ProductId::new("ingot"),
            "GOLD-1",
            "Gold ingot",
            1500,
            Money::new(i64::MAX / 2000, Currency::EUR),
        );
        assert_eq!(result, Err(CommerceError::Overflow));

        let line = order.line(&id).unwrap();
        assert_eq!(line.quantity, 1000);
        assert_eq!(line.total_price, before.lines[0].total_price);
        assert_eq!(order.total_items(), 1000);
        assert_eq!(order.subtotal(), before.subtotal());
        assert_eq!(order.updated_at, before.updated_at);
    }

    #[test]
    fn test_failed_quantity_update_leaves_line_intact() {
        let (mut order, id) = order_near_overflow();
        let before = order.clone();

        assert_eq!(order.update_quantity(&id, 9000), Err(CommerceError::Overflow));
        assert_eq!(order.lines, before.lines);
        assert_eq!(order.total_items(), 1000);
    }

    #[test]
    fn test_rejected_mutations_keep_order_state() {
        let mut order = order_with(&[3]);
        let before = order.clone();
        let id = order.lines[0].id.clone();

        assert_eq!(
            order.add_item(ProductId::new("prod-0"), "SKU-0", "Product 0", 0, eur(10)),
            Err(CommerceError::InvalidQuantity(0))
        );
        assert_eq!(
            order.add_item(ProductId::new("prod-0"), "SKU-0", "Product 0", 9999, eur(10)),
            Err(CommerceError::QuantityExceedsLimit(10002, MAX_QUANTITY_PER_LINE))
        );
        assert_eq!(
            order.update_quantity(&id, 10_000),
            Err(CommerceError::QuantityExceedsLimit(10_000, MAX_QUANTITY_PER_LINE))
        );
        assert_eq!(order, before);
    }

    #[test]
    fn test_negative_unit_price_rejected() {
        let mut order = DraftOrder::new(ClientId::new("client-1"));
        let result = order.add_item(
            ProductId::new("refund"),
            "RF-1",
            "Refund",
            1,
            Money::new(-500, Currency::EUR),
        );
        assert_eq!(result, Err(CommerceError::InvalidPrice(-500)));
        assert!(order.is_empty());

        assert!(order
            .add_item(ProductId::new("sample"), "SM-1", "Free sample", 1, eur(0))
            .is_ok());
    }
}
