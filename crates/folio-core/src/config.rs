//! # Checkout Configuration
//!
//! Every number the checkout uses: tax table, shipping tariffs, card fee,
//! bank-transfer hold, coupon catalogue.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. TOML document (passed in as a string; this crate does no I/O)      │
//! │     Only the sections present are overridden                           │
//! │                                                                         │
//! │  2. Default Values (lowest priority)                                   │
//! │     CheckoutConfig::default() - the standard shop rules                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # checkout.toml
//! weight_allowance_kg = "2.00"
//!
//! [tax]
//! book = 400        # basis points: 4%
//! stationery = 1900
//! digital = 0
//!
//! [shipping.standard]
//! base_fee = "5.00"
//! per_kg_rate = "2.00"
//! free_over = "100.00"
//!
//! [shipping.express]
//! base_fee = "10.00"
//! per_kg_rate = "5.00"
//!
//! [payment]
//! card_fee = 200    # basis points: 2%
//! bank_transfer_hold_days = 2
//!
//! [[coupons]]
//! code = "BOOKLOVER"
//! price_factor = "0.85"
//! applies_to = ["BOOK"]
//! ```
//!
//! Listing any `[[coupons]]` replaces the whole default catalogue, since the
//! list order is the evaluation order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coupon::{default_rules, CouponRule};
use crate::error::{ConfigError, ValidationError};
use crate::money::{Money, Rate};
use crate::types::{Category, ShippingMethod};
use crate::validation::{validate_amount, validate_price_factor, validate_rate, ValidationResult};

// =============================================================================
// Checkout Config
// =============================================================================

/// The complete rule set for one shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    pub tax: TaxTable,
    pub shipping: ShippingTable,
    /// Weight carried for the base fee before per-kg charges start.
    pub weight_allowance_kg: Decimal,
    pub payment: PaymentTerms,
    /// Coupon rules in evaluation order.
    pub coupons: Vec<CouponRule>,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        CheckoutConfig {
            tax: TaxTable::default(),
            shipping: ShippingTable::default(),
            weight_allowance_kg: Decimal::new(200, 2),
            payment: PaymentTerms::default(),
            coupons: default_rules(),
        }
    }
}

impl CheckoutConfig {
    /// Parses and validates a TOML document.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::config::CheckoutConfig;
    /// use folio_core::money::Rate;
    ///
    /// let config = CheckoutConfig::from_toml_str("[payment]\ncard_fee = 150\n").unwrap();
    /// assert_eq!(config.payment.card_fee, Rate::from_bps(150));
    /// // Untouched sections keep their defaults
    /// assert_eq!(config.tax, CheckoutConfig::default().tax);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: CheckoutConfig = toml::from_str(text)?;
        config.validate()?;

        debug!(
            coupons = config.coupons.len(),
            card_fee_bps = config.payment.card_fee.bps(),
            "Checkout config parsed"
        );
        Ok(config)
    }

    /// Checks every value is in range.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_rate("tax.book", self.tax.book)?;
        validate_rate("tax.stationery", self.tax.stationery)?;
        validate_rate("tax.digital", self.tax.digital)?;

        self.shipping.standard.validate("shipping.standard")?;
        self.shipping.express.validate("shipping.express")?;
        validate_amount("weight_allowance_kg", self.weight_allowance_kg)?;

        validate_rate("payment.card_fee", self.payment.card_fee)?;

        for rule in &self.coupons {
            if rule.code.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: "coupons.code".to_string(),
                });
            }
            validate_price_factor(&format!("coupons.{}.price_factor", rule.code), rule.price_factor)?;
        }

        Ok(())
    }
}

// =============================================================================
// Tax
// =============================================================================

/// Tax rate per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxTable {
    pub book: Rate,
    pub stationery: Rate,
    pub digital: Rate,
}

impl Default for TaxTable {
    fn default() -> Self {
        TaxTable {
            book: Rate::from_bps(400),
            stationery: Rate::from_bps(1900),
            digital: Rate::zero(),
        }
    }
}

impl TaxTable {
    pub fn rate_for(&self, category: Category) -> Rate {
        match category {
            Category::Book => self.book,
            Category::Stationery => self.stationery,
            Category::Digital => self.digital,
        }
    }
}

// =============================================================================
// Shipping
// =============================================================================

/// Price list for one shipping method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingTariff {
    /// Charged for any parcel up to the weight allowance.
    pub base_fee: Money,
    /// Charged per started kilogram above the allowance.
    pub per_kg_rate: Money,
    /// Post-discount subtotal at which shipping becomes free.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_over: Option<Money>,
}

/// Result of pricing a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingQuote {
    pub cost: Money,
    pub free: bool,
}

impl ShippingTariff {
    /// Prices a parcel.
    ///
    /// ## Started Kilograms
    /// ```text
    /// weight 2.00, allowance 2.00 → excess 0.00 → 0 kg → base
    /// weight 2.60, allowance 2.00 → excess 0.60 → 1 kg → base + 1 × rate
    /// weight 3.00, allowance 2.00 → excess 1.00 → 1 kg → base + 1 × rate
    /// weight 3.01, allowance 2.00 → excess 1.01 → 2 kg → base + 2 × rate
    /// ```
    pub fn quote(&self, weight: Decimal, allowance: Decimal, subtotal: Money) -> ShippingQuote {
        if self.free_over.is_some_and(|threshold| subtotal >= threshold) {
            return ShippingQuote {
                cost: Money::zero(),
                free: true,
            };
        }

        let cost = if weight <= allowance {
            self.base_fee
        } else {
            let started_kg = (weight - allowance).ceil();
            Money::new(self.base_fee.amount() + self.per_kg_rate.amount() * started_kg)
        };

        ShippingQuote { cost, free: false }
    }

    fn validate(&self, field: &str) -> ValidationResult<()> {
        validate_amount(&format!("{field}.base_fee"), self.base_fee.amount())?;
        validate_amount(&format!("{field}.per_kg_rate"), self.per_kg_rate.amount())?;
        if let Some(threshold) = self.free_over {
            validate_amount(&format!("{field}.free_over"), threshold.amount())?;
        }
        Ok(())
    }
}

/// One tariff per supported shipping method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingTable {
    pub standard: ShippingTariff,
    pub express: ShippingTariff,
}

impl Default for ShippingTable {
    fn default() -> Self {
        ShippingTable {
            standard: ShippingTariff {
                base_fee: Money::from_cents(500),
                per_kg_rate: Money::from_cents(200),
                free_over: Some(Money::from_cents(10_000)),
            },
            express: ShippingTariff {
                base_fee: Money::from_cents(1000),
                per_kg_rate: Money::from_cents(500),
                free_over: None,
            },
        }
    }
}

impl ShippingTable {
    pub fn tariff(&self, method: ShippingMethod) -> &ShippingTariff {
        match method {
            ShippingMethod::Standard => &self.standard,
            ShippingMethod::Express => &self.express,
        }
    }
}

// =============================================================================
// Payment
// =============================================================================

/// Surcharges and holds per payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentTerms {
    /// Card surcharge on the order total.
    pub card_fee: Rate,
    /// Days goods wait for a bank transfer to clear.
    pub bank_transfer_hold_days: u32,
}

impl Default for PaymentTerms {
    fn default() -> Self {
        PaymentTerms {
            card_fee: Rate::from_bps(200),
            bank_transfer_hold_days: 2,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
