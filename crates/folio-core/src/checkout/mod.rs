//! # Checkout Calculator
//!
//! Prices an order and applies it to the caller's inventory and customer.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Pipeline                                │
//! │                                                                         │
//! │  Order + &Inventory                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate ──────► methods parsed, SKUs resolved, stock checked         │
//! │       │           qty_total, subtotal_before_discounts, weight          │
//! │       ▼                                                                 │
//! │  price_lines ───► coupons per line (BOOKLOVER → SAVE10 → BULK5)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  aggregate ─────► subtotal_after_discounts                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  shipping ──────► free over threshold, else base + started kg          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tax ───────────► per line by category, then summed                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  payment ───────► card fee / transfer hold / store credit check        │
//! │       │                                                                 │
//! │  ─────┼──────────── nothing above this line touches caller state ────  │
//! │       ▼                                                                 │
//! │  commit ────────► &mut Inventory (stock), &mut Customer (credit)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Receipt                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use folio_core::{checkout, Category, Inventory, InventoryRecord, Order, OrderLine};
//! use rust_decimal::Decimal;
//!
//! let mut inventory = Inventory::new();
//! inventory.insert(
//!     "BK1",
//!     InventoryRecord::new(Category::Book, Decimal::new(3000, 2), Decimal::new(5, 1), Some(10)),
//! );
//!
//! let order = Order::new(vec![OrderLine::new("BK1", 1)]);
//! let receipt = checkout(&order, &mut inventory, None).unwrap();
//!
//! // 30.00 + 1.20 tax + 5.00 shipping = 36.20, + 2% card fee 0.72
//! assert_eq!(receipt.total.to_string(), "36.92");
//! assert_eq!(inventory.stock_of("BK1"), Some(9));
//! ```

mod pipeline;


use tracing::{debug, info};

use crate::config::CheckoutConfig;
use crate::error::CheckoutResult;
use crate::money::{quantize, Money};
use crate::types::{Customer, Inventory, Order, Receipt};

/// A checkout calculator bound to one shop configuration.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    config: CheckoutConfig,
}

impl Checkout {
    pub fn new(config: CheckoutConfig) -> Self {
        Checkout { config }
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Prices `order` and, on success, decrements stock and debits store
    /// credit.
    ///
    /// On error neither `inventory` nor `customer` has been modified.
    /// A missing customer has no store credit.
    pub fn run(
        &self,
        order: &Order,
        inventory: &mut Inventory,
        customer: Option<&mut Customer>,
    ) -> CheckoutResult<Receipt> {
        debug!(
            lines = order.lines.len(),
            coupons = order.coupons.len(),
            "Checkout started"
        );

        let validated = pipeline::validate(order, inventory)?;
        let priced = pipeline::price_lines(&validated, &self.config.coupons, &order.coupons)?;
        let subtotal_after_discounts = pipeline::aggregate(&priced);
        let shipping = pipeline::quote_shipping(&validated, subtotal_after_discounts, &self.config);
        let (lines, tax_total) = pipeline::tax_lines(priced, &self.config.tax);

        let base_total = subtotal_after_discounts + tax_total + shipping.cost;
        let available_credit = customer
            .as_deref()
            .map(|c| c.store_credit)
            .unwrap_or_default();
        let settlement = pipeline::settle_payment(
            validated.payment,
            base_total,
            available_credit,
            &self.config.payment,
        )?;
        let total = base_total + settlement.fee;

        pipeline::commit(&validated, &settlement, inventory, customer);

        let receipt = Receipt {
            lines,
            subtotal_before_discounts: Money::new(validated.subtotal_before_discounts),
            subtotal_after_discounts,
            shipping_cost: shipping.cost,
            tax_total,
            payment_fee: settlement.fee,
            total,
            hold_days: settlement.hold_days,
            free_shipping: shipping.free,
            weight: quantize(validated.total_weight),
            payment_method: validated.payment,
            shipping_method: validated.shipping,
        };

        info!(
            total = %receipt.total,
            lines = receipt.lines.len(),
            payment = %receipt.payment_method,
            "Checkout completed"
        );
        Ok(receipt)
    }
}

/// Runs a checkout with the standard shop rules.
///
/// Shorthand for `Checkout::default().run(..)`.
pub fn checkout(
    order: &Order,
    inventory: &mut Inventory,
    customer: Option<&mut Customer>,
) -> CheckoutResult<Receipt> {
    Checkout::default().run(order, inventory, customer)
}
