//! # Validation Module
//!
//! Input validation utilities for Folio Checkout.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Shape of order / inventory / config documents                     │
//! │  └── Types: quantities are unsigned, prices are decimals               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Order lines: quantity positive                                    │
//! │  ├── Amounts and weights: within [0, MAX_AMOUNT]                       │
//! │  └── Config values: rates ≤ 100%, price factors in (0, 1]              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Checkout validation stage                                    │
//! │  └── Cross-checks against inventory: known SKU, enough stock           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::validation::{validate_amount, validate_quantity};
//! use rust_decimal::Decimal;
//!
//! validate_quantity(4).unwrap();
//! validate_amount("price", Decimal::new(3000, 2)).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Rate;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest price, fee, weight or order aggregate accepted, in whole units.
///
/// The product of any two bounded values fits in a `Decimal`.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// 100% in basis points.
pub const MAX_RATE_BPS: u32 = 10_000;

// =============================================================================
// Order Line Validators
// =============================================================================

/// Validates an order line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// No upper bound: oversized quantities surface as `InsufficientStock`.
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Range Validators
// =============================================================================

/// Validates a rate (tax rate, card fee) is between 0% and 100%.
pub fn validate_rate(field: &str, rate: Rate) -> ValidationResult<()> {
    if rate.bps() > MAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: MAX_RATE_BPS.to_string(),
        });
    }

    Ok(())
}

/// Validates a coupon price factor lies in (0, 1].
///
/// A factor above 1 would be a surcharge, zero would give goods away.
///
/// ## Example
/// ```rust
/// use folio_core::validation::validate_price_factor;
/// use rust_decimal::Decimal;
///
/// assert!(validate_price_factor("SAVE10", Decimal::new(90, 2)).is_ok());
/// assert!(validate_price_factor("SAVE10", Decimal::ZERO).is_err());
/// assert!(validate_price_factor("SAVE10", Decimal::new(11, 1)).is_err());
/// ```
pub fn validate_price_factor(field: &str, factor: Decimal) -> ValidationResult<()> {
    if factor <= Decimal::ZERO || factor > Decimal::ONE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0 (exclusive)".to_string(),
            max: "1".to_string(),
        });
    }

    Ok(())
}

/// Validates an amount or weight lies in `[0, MAX_AMOUNT]`.
pub fn validate_amount(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO || value > Decimal::from(MAX_AMOUNT) {
        return Err(amount_out_of_range(field));
    }

    Ok(())
}

/// The error for an amount outside `[0, MAX_AMOUNT]`, including one whose
/// computation overflowed.
pub fn amount_out_of_range(field: &str) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: "0".to_string(),
        max: MAX_AMOUNT.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
