//! # Coupon Rules
//!
//! Coupons are data, not code: an ordered list of unit-price transforms.
//!
//! ## Evaluation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  unit price (from inventory)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BOOKLOVER  code present? category BOOK?            × 0.85 → round 2dp  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SAVE10     code present? category BOOK|STATIONERY? × 0.90 → round 2dp  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BULK5      code present? order qty_total >= 10?    × 0.95 → round 2dp  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  unit_price_final                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rules are evaluated in list order and each applied rule rounds before the
//! next one sees the price, so reordering rules changes cent values.
//! `qty_total` is the quantity summed over the whole order, computed once
//! before any line is priced.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::money::quantize;
use crate::types::Category;

// =============================================================================
// Category Scope
// =============================================================================

/// Which categories a coupon applies to.
///
/// In config files this is an optional list: omitted means every category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Vec<Category>>", into = "Option<Vec<Category>>")]
pub enum CategoryScope {
    #[default]
    All,
    Only(Vec<Category>),
}

impl CategoryScope {
    pub fn contains(&self, category: Category) -> bool {
        match self {
            CategoryScope::All => true,
            CategoryScope::Only(categories) => categories.contains(&category),
        }
    }
}

impl From<Option<Vec<Category>>> for CategoryScope {
    fn from(categories: Option<Vec<Category>>) -> Self {
        match categories {
            Some(categories) => CategoryScope::Only(categories),
            None => CategoryScope::All,
        }
    }
}

impl From<CategoryScope> for Option<Vec<Category>> {
    fn from(scope: CategoryScope) -> Self {
        match scope {
            CategoryScope::All => None,
            CategoryScope::Only(categories) => Some(categories),
        }
    }
}

// =============================================================================
// Coupon Rule
// =============================================================================

/// A named unit-price discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponRule {
    /// Code the customer enters, matched exactly.
    pub code: String,

    /// Multiplier applied to the unit price (0.85 = 15% off).
    pub price_factor: Decimal,

    #[serde(default)]
    pub applies_to: CategoryScope,

    /// Order-wide quantity required before the rule applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_total_quantity: Option<u64>,
}

impl CouponRule {
    /// A rule applying to every category with no quantity threshold.
    pub fn new(code: impl Into<String>, price_factor: Decimal) -> Self {
        CouponRule {
            code: code.into(),
            price_factor,
            applies_to: CategoryScope::All,
            min_total_quantity: None,
        }
    }

    pub fn only(mut self, categories: &[Category]) -> Self {
        self.applies_to = CategoryScope::Only(categories.to_vec());
        self
    }

    pub fn min_total_quantity(mut self, qty: u64) -> Self {
        self.min_total_quantity = Some(qty);
        self
    }

    /// Whether this rule's predicates hold for a line.
    pub fn matches(&self, category: Category, qty_total: u64) -> bool {
        self.applies_to.contains(category)
            && self.min_total_quantity.map_or(true, |min| qty_total >= min)
    }

    /// Applies the factor and rounds to 2 places.
    pub fn apply(&self, unit_price: Decimal) -> Decimal {
        quantize(unit_price * self.price_factor)
    }
}

/// The standard coupon catalogue, in evaluation order.
pub fn default_rules() -> Vec<CouponRule> {
    vec![
        CouponRule::new("BOOKLOVER", Decimal::new(85, 2)).only(&[Category::Book]),
        CouponRule::new("SAVE10", Decimal::new(90, 2))
            .only(&[Category::Book, Category::Stationery]),
        CouponRule::new("BULK5", Decimal::new(95, 2)).min_total_quantity(10),
    ]
}

/// Runs a unit price through every active, matching rule in order.
///
/// Returns the price untouched (not re-rounded) when no rule applies.
///
/// ## Example
/// ```rust
/// use folio_core::coupon::{apply_rules, default_rules};
/// use folio_core::types::Category;
/// use rust_decimal::Decimal;
/// use std::collections::HashSet;
///
/// let active: HashSet<&str> = ["BOOKLOVER", "SAVE10"].into_iter().collect();
/// let price = apply_rules(&default_rules(), &active, Decimal::new(3000, 2), Category::Book, 3);
/// // 30.00 × 0.85 = 25.50, × 0.90 = 22.95
/// assert_eq!(price.to_string(), "22.95");
/// ```
pub fn apply_rules(
    rules: &[CouponRule],
    active_codes: &HashSet<&str>,
    unit_price: Decimal,
    category: Category,
    qty_total: u64,
) -> Decimal {
    rules
        .iter()
        .filter(|rule| active_codes.contains(rule.code.as_str()))
        .filter(|rule| rule.matches(category, qty_total))
        .fold(unit_price, |price, rule| rule.apply(price))
}

// =============================================================================
// Unit Tests
// =============================================================================
