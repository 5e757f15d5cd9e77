//! # folio-core: Pure Checkout Logic for Folio
//!
//! This crate prices shopping-cart orders. It contains every checkout rule
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Folio Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    folio-cli                                    │   │
//! │  │    order.json + inventory.json + checkout.toml ──► receipt     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &Order, &mut Inventory, &mut Customer │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ checkout  │  │   money   │  │  coupon   │  │  config   │  │   │
//! │  │   │ pipeline  │  │   Money   │  │   rules   │  │  tariffs  │  │   │
//! │  │   │  Receipt  │  │   Rate    │  │  catalog  │  │ tax table │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`checkout`] - The checkout pipeline and its entry points
//! - [`types`] - Domain types (Order, Inventory, Receipt, etc.)
//! - [`money`] - Decimal money, always at two places
//! - [`coupon`] - Coupon rules as ordered data
//! - [`config`] - Tax, shipping and payment settings
//! - [`error`] - Domain error types
//! - [`validation`] - Input and config range checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same order and state in, same receipt out
//! 2. **No I/O**: files and environment are the caller's business
//! 3. **Decimal Money**: half-up rounding to the cent after every step
//! 4. **Atomic Checkout**: a rejected order leaves stock and credit untouched
//!
//! ## Example Usage
//!
//! ```rust
//! use folio_core::{checkout, Category, Customer, Inventory, InventoryRecord, Money, Order, OrderLine};
//! use rust_decimal::Decimal;
//!
//! let mut inventory = Inventory::new();
//! inventory.insert("BK1", InventoryRecord::new(Category::Book, Decimal::new(3000, 2), Decimal::new(5, 1), Some(10)));
//! inventory.insert("ST1", InventoryRecord::new(Category::Stationery, Decimal::new(500, 2), Decimal::new(2, 1), Some(100)));
//!
//! let order = Order::new(vec![OrderLine::new("BK1", 1), OrderLine::new("ST1", 2)]);
//! let mut customer = Customer::default();
//!
//! let receipt = checkout(&order, &mut inventory, Some(&mut customer)).unwrap();
//! assert_eq!(receipt.total, Money::from_cents(4906));
//! assert_eq!(inventory.stock_of("ST1"), Some(98));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod coupon;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{checkout, Checkout};
pub use config::CheckoutConfig;
pub use error::{CheckoutError, ConfigError, ValidationError};
pub use money::{Money, Rate};
pub use types::*;
