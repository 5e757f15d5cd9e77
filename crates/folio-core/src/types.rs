//! # Domain Types
//!
//! Core domain types used throughout Folio Checkout.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT (borrowed)          INPUT (transient)        OUTPUT (derived)    │
//! │  ┌─────────────────┐       ┌─────────────────┐      ┌─────────────────┐ │
//! │  │   Inventory     │       │     Order       │      │    Receipt      │ │
//! │  │  sku → Record   │       │  lines          │      │  lines          │ │
//! │  │  ─────────────  │       │  shipping       │      │  subtotals      │ │
//! │  │  category       │       │  coupons        │      │  shipping_cost  │ │
//! │  │  price, weight  │       │  payment        │      │  tax_total      │ │
//! │  │  stock (mut)    │       └─────────────────┘      │  payment_fee    │ │
//! │  └─────────────────┘                                │  total          │ │
//! │  ┌─────────────────┐                                │  hold_days      │ │
//! │  │   Customer      │                                └─────────────────┘ │
//! │  │  store_credit   │                                                    │
//! │  │  (mut)          │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Method Strings
//! Orders carry shipping and payment methods as raw strings, exactly as they
//! arrive. They are parsed into [`ShippingMethod`] and [`PaymentMethod`] by
//! the checkout validation stage so an unsupported method is reported as a
//! checkout rejection, in its proper place in the validation order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CheckoutError;
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// Product category. Drives coupon eligibility, tax rate and stock tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Book,
    Stationery,
    /// Downloadable goods: weightless in practice, never out of stock.
    Digital,
}

impl Category {
    /// Whether stock levels are checked and decremented for this category.
    #[inline]
    pub const fn tracks_stock(&self) -> bool {
        !matches!(self, Category::Digital)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Book => write!(f, "BOOK"),
            Category::Stationery => write!(f, "STATIONERY"),
            Category::Digital => write!(f, "DIGITAL"),
        }
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// A stocked item, keyed by SKU in the [`Inventory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Display name (informational only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub category: Category,

    /// Unit price. Kept as given; rounding happens in the pricing stages.
    pub price: Decimal,

    /// Unit weight in kilograms.
    pub weight: Decimal,

    /// Units on hand. Required for stock-tracked categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl InventoryRecord {
    pub fn new(category: Category, price: Decimal, weight: Decimal, stock: Option<u32>) -> Self {
        InventoryRecord {
            name: None,
            category,
            price,
            weight,
            stock,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// SKU → record mapping owned by the caller.
///
/// The checkout borrows it mutably and decrements stock only after an order
/// has passed every check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory(BTreeMap<String, InventoryRecord>);

impl Inventory {
    pub fn new() -> Self {
        Inventory(BTreeMap::new())
    }

    /// Inserts or replaces the record for a SKU.
    pub fn insert(&mut self, sku: impl Into<String>, record: InventoryRecord) {
        self.0.insert(sku.into(), record);
    }

    pub fn get(&self, sku: &str) -> Option<&InventoryRecord> {
        self.0.get(sku)
    }

    pub(crate) fn get_mut(&mut self, sku: &str) -> Option<&mut InventoryRecord> {
        self.0.get_mut(sku)
    }

    /// Current stock for a SKU (`None` if unknown or untracked).
    pub fn stock_of(&self, sku: &str) -> Option<u32> {
        self.0.get(sku).and_then(|r| r.stock)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &InventoryRecord)> {
        self.0.iter()
    }
}

impl FromIterator<(String, InventoryRecord)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (String, InventoryRecord)>>(iter: I) -> Self {
        Inventory(iter.into_iter().collect())
    }
}

// =============================================================================
// Customer
// =============================================================================

/// The paying customer. Only store credit matters to checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Absent in input means no credit.
    #[serde(default)]
    pub store_credit: Money,
}

impl Customer {
    pub fn with_store_credit(store_credit: Money) -> Self {
        Customer { store_credit }
    }
}

// =============================================================================
// Order
// =============================================================================

/// One requested line: a SKU and how many units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub sku: String,
    pub qty: u32,
}

impl OrderLine {
    pub fn new(sku: impl Into<String>, qty: u32) -> Self {
        OrderLine {
            sku: sku.into(),
            qty,
        }
    }
}

/// `{"method": "..."}` wrapper for the shipping choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingSelection {
    pub method: String,
}

impl Default for ShippingSelection {
    fn default() -> Self {
        ShippingSelection {
            method: ShippingMethod::Standard.to_string(),
        }
    }
}

/// `{"method": "..."}` wrapper for the payment choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSelection {
    pub method: String,
}

impl Default for PaymentSelection {
    fn default() -> Self {
        PaymentSelection {
            method: PaymentMethod::Card.to_string(),
        }
    }
}

/// A shopping-cart order as submitted.
///
/// Missing sections default to standard shipping, no coupons and card
/// payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub lines: Vec<OrderLine>,
    #[serde(default)]
    pub shipping: ShippingSelection,
    /// Coupon codes; duplicates and unknown codes are harmless.
    #[serde(default)]
    pub coupons: Vec<String>,
    #[serde(default)]
    pub payment: PaymentSelection,
}

impl Order {
    pub fn new(lines: Vec<OrderLine>) -> Self {
        Order {
            lines,
            ..Order::default()
        }
    }

    pub fn with_shipping(mut self, method: impl Into<String>) -> Self {
        self.shipping.method = method.into();
        self
    }

    pub fn with_payment(mut self, method: impl Into<String>) -> Self {
        self.payment.method = method.into();
        self
    }

    pub fn with_coupon(mut self, code: impl Into<String>) -> Self {
        self.coupons.push(code.into());
        self
    }
}

// =============================================================================
// Shipping Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    Standard,
    Express,
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShippingMethod::Standard => write!(f, "standard"),
            ShippingMethod::Express => write!(f, "express"),
        }
    }
}

impl FromStr for ShippingMethod {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(ShippingMethod::Standard),
            "express" => Ok(ShippingMethod::Express),
            other => Err(CheckoutError::InvalidShippingMethod(other.to_string())),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Card payment; carries a percentage surcharge.
    Card,
    /// Bank transfer; goods are held until the transfer clears.
    BankTransfer,
    /// Paid from the customer's store credit balance.
    StoreCredit,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::BankTransfer => write!(f, "bank_transfer"),
            PaymentMethod::StoreCredit => write!(f, "store_credit"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(PaymentMethod::Card),
            "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            "store_credit" => Ok(PaymentMethod::StoreCredit),
            other => Err(CheckoutError::UnsupportedPaymentMethod(other.to_string())),
        }
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// A priced order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineResult {
    pub sku: String,
    pub category: Category,
    pub qty: u32,
    /// Unit price after every applicable coupon.
    #[ts(as = "String")]
    pub unit_price_final: Money,
    /// `unit_price_final × qty`.
    #[ts(as = "String")]
    pub line_subtotal: Money,
    #[ts(as = "String")]
    pub tax_line: Money,
}

/// The priced result of a successful checkout.
///
/// ## Invariant
/// `total == subtotal_after_discounts + tax_total + shipping_cost + payment_fee`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Receipt {
    pub lines: Vec<LineResult>,
    #[ts(as = "String")]
    pub subtotal_before_discounts: Money,
    #[ts(as = "String")]
    pub subtotal_after_discounts: Money,
    #[ts(as = "String")]
    pub shipping_cost: Money,
    #[ts(as = "String")]
    pub tax_total: Money,
    #[ts(as = "String")]
    pub payment_fee: Money,
    #[ts(as = "String")]
    pub total: Money,
    /// Days the goods are held before dispatch (bank transfer clearing).
    pub hold_days: u32,
    pub free_shipping: bool,
    /// Total shipped weight in kg, two places.
    #[ts(as = "String")]
    pub weight: Decimal,
    pub payment_method: PaymentMethod,
    pub shipping_method: ShippingMethod,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tracks_stock() {
        assert!(Category::Book.tracks_stock());
        assert!(Category::Stationery.tracks_stock());
        assert!(!Category::Digital.tracks_stock());
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            "express".parse::<ShippingMethod>().unwrap(),
            ShippingMethod::Express
        );
        assert!(matches!(
            "drone".parse::<ShippingMethod>(),
            Err(CheckoutError::InvalidShippingMethod(m)) if m == "drone"
        ));

        assert_eq!(
            "bank_transfer".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::BankTransfer
        );
        assert!(matches!(
            "crypto".parse::<PaymentMethod>(),
            Err(CheckoutError::UnsupportedPaymentMethod(m)) if m == "crypto"
        ));
    }

    #[test]
    fn test_method_display_round_trips() {
        for method in [ShippingMethod::Standard, ShippingMethod::Express] {
            assert_eq!(method.to_string().parse::<ShippingMethod>().unwrap(), method);
        }
        for method in [
            PaymentMethod::Card,
            PaymentMethod::BankTransfer,
            PaymentMethod::StoreCredit,
        ] {
            assert_eq!(method.to_string().parse::<PaymentMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_order_defaults_from_json() {
        let order: Order = serde_json::from_str(r#"{"lines": [{"sku": "BK1", "qty": 1}]}"#).unwrap();
        assert_eq!(order.shipping.method, "standard");
        assert_eq!(order.payment.method, "card");
        assert!(order.coupons.is_empty());
        assert_eq!(order.lines, vec![OrderLine::new("BK1", 1)]);
    }

    #[test]
    fn test_inventory_from_json() {
        let inventory: Inventory = serde_json::from_str(
            r#"{
                "BK1": {"name": "Clean Code", "category": "BOOK", "price": "30.00", "weight": "0.5", "stock": 10},
                "DG1": {"category": "DIGITAL", "price": 15, "weight": 0}
            }"#,
        )
        .unwrap();

        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.stock_of("BK1"), Some(10));
        assert_eq!(inventory.stock_of("DG1"), None);
        let book = inventory.get("BK1").unwrap();
        assert_eq!(book.category, Category::Book);
        assert_eq!(book.price, Decimal::new(3000, 2));
        assert_eq!(book.name.as_deref(), Some("Clean Code"));
    }

    #[test]
    fn test_customer_credit_defaults_to_zero() {
        let customer: Customer = serde_json::from_str("{}").unwrap();
        assert!(customer.store_credit.is_zero());
    }
}
