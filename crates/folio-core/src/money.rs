//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, and the
//! `Rate` type for percentages expressed in basis points.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal, quantized after every step              │
//! │    30.00 × 0.85 = 25.5000 → 25.50                                       │
//! │    1.444        →  1.44                                                 │
//! │    0.825        →  0.83   (half-up: midpoint away from zero)            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::money::{quantize, Money, Rate};
//! use rust_decimal::Decimal;
//!
//! // 30.00 with a 15% coupon
//! let unit = quantize(Decimal::new(3000, 2) * Decimal::new(85, 2));
//! assert_eq!(unit.to_string(), "25.50");
//!
//! let line = Money::new(unit);
//! let tax = line.percentage(Rate::from_bps(400)); // 4%
//! assert_eq!(tax.to_string(), "1.02");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Number of fractional digits every monetary value carries.
pub const MONEY_SCALE: u32 = 2;

/// Rounds a decimal to two fractional digits, half-up, and pins the scale.
///
/// The scale is pinned so `5` renders as `5.00`: equality in `Decimal`
/// ignores scale, but the rendered receipt must not.
///
/// ## Example
/// ```rust
/// use folio_core::money::quantize;
/// use rust_decimal::Decimal;
///
/// assert_eq!(quantize(Decimal::new(2_6, 1)).to_string(), "2.60");
/// assert_eq!(quantize(Decimal::new(1_445, 3)).to_string(), "1.45");
/// ```
pub fn quantize(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    // round_dp never widens the scale, so this only appends zeros
    rounded.rescale(MONEY_SCALE);
    rounded
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount, always held at exactly two fractional digits.
///
/// ## Design Decisions
/// - **Decimal inside**: base-10 arithmetic reproduces cent values exactly
/// - **Quantize on construction**: there is no way to build an unrounded Money
/// - **Serde via Decimal**: serialized as a string (`"49.06"`), deserialized
///   from a string or a number and quantized on the way in
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  InventoryRecord.price ──► coupon rules ──► LineResult.unit_price_final │
/// │                                                   │                     │
/// │                                                   ▼                     │
/// │  LineResult.line_subtotal ──► tax_line ──► Receipt.tax_total            │
/// │                                                                         │
/// │  subtotal + tax + shipping ──► base_total ──► payment fee ──► total     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Creates Money from any decimal, quantizing it half-up to 2 places.
    #[inline]
    pub fn new(amount: Decimal) -> Self {
        Money(quantize(amount))
    }

    /// Creates Money from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, MONEY_SCALE))
    }

    /// Returns zero money value.
    #[inline]
    pub fn zero() -> Self {
        Money(Decimal::new(0, MONEY_SCALE))
    }

    /// Returns the underlying decimal amount (scale 2).
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Calculates a percentage of this amount, rounded half-up.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::{Money, Rate};
    ///
    /// let line = Money::from_cents(760);                  // 7.60
    /// let tax = line.percentage(Rate::from_bps(1900));    // 19%
    /// // 7.60 × 19% = 1.444 → 1.44
    /// assert_eq!(tax.to_string(), "1.44");
    /// ```
    pub fn percentage(&self, rate: Rate) -> Money {
        Money::new(self.0 * rate.as_fraction())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-place rendering, no currency symbol (single-currency system).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money::new(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money::new(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money::new(self.0 - other.0)
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money::new(self.0 * Decimal::from(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Rate
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 400 bps = 4% and 1900 bps = 19%.
/// Integer storage keeps config files and comparisons exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a decimal fraction (400 bps → 0.04).
    #[inline]
    pub fn as_fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_half_up() {
        assert_eq!(quantize(Decimal::new(825, 3)).to_string(), "0.83");
        assert_eq!(quantize(Decimal::new(9202, 4)).to_string(), "0.92");
        assert_eq!(quantize(Decimal::new(962, 3)).to_string(), "0.96");
        // Half-up, not bankers: 0.125 → 0.13 (bankers would give 0.12)
        assert_eq!(quantize(Decimal::new(125, 3)).to_string(), "0.13");
    }

    #[test]
    fn test_quantize_pads_scale() {
        let five = quantize(Decimal::from(5));
        assert_eq!(five.scale(), 2);
        assert_eq!(five.to_string(), "5.00");
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(4906).to_string(), "49.06");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic_keeps_two_places() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);

        assert_eq!((a + b).to_string(), "12.50");
        assert_eq!((a - b).to_string(), "7.50");
        assert_eq!((b * 3).to_string(), "7.50");
        assert_eq!((a * 3).amount().scale(), 2);
    }

    #[test]
    fn test_new_quantizes() {
        // 2.00 × 0.95 = 1.9000 → 1.90
        let unit = Money::new(Decimal::new(200, 2) * Decimal::new(95, 2));
        assert_eq!(unit.to_string(), "1.90");
        assert_eq!((unit * 4).to_string(), "7.60");
    }

    #[test]
    fn test_percentage() {
        let base = Money::from_cents(4810); // 48.10
        let fee = base.percentage(Rate::from_bps(200)); // 2%
        assert_eq!(fee.to_string(), "0.96");

        let digital = Money::from_cents(1425).percentage(Rate::zero());
        assert!(digital.is_zero());
        assert_eq!(digital.to_string(), "0.00");
    }

    #[test]
    fn test_sum() {
        let lines = [
            Money::from_cents(5700),
            Money::from_cents(760),
            Money::from_cents(1425),
        ];
        let total: Money = lines.iter().sum();
        assert_eq!(total.to_string(), "78.85");
    }

    #[test]
    fn test_serde_quantizes_input() {
        let money: Money = serde_json::from_str("\"12.345\"").unwrap();
        assert_eq!(money.to_string(), "12.35");

        let from_number: Money = serde_json::from_str("5").unwrap();
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"5.00\"");
    }

    #[test]
    fn test_rate_fraction() {
        assert_eq!(Rate::from_bps(400).as_fraction(), Decimal::new(4, 2));
        assert_eq!(Rate::from_bps(1900).as_fraction(), Decimal::new(19, 2));
        assert!(Rate::default().is_zero());
    }
}
