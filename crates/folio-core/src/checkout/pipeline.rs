//! Checkout stages.
//!
//! Every stage except [`commit`] is a pure function of its inputs. `commit`
//! is the only code that writes to the borrowed inventory and customer, and
//! it runs after every fallible stage has succeeded.

use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::config::{CheckoutConfig, PaymentTerms, ShippingQuote, TaxTable};
use crate::coupon::{apply_rules, CouponRule};
use crate::error::{CheckoutError, CheckoutResult};
use crate::money::Money;
use crate::types::{
    Category, Customer, Inventory, LineResult, Order, PaymentMethod, ShippingMethod,
};
use crate::validation::{amount_out_of_range, validate_amount, validate_quantity};

// =============================================================================
// Stage 1: Validate
// =============================================================================

/// An order line joined with its inventory record.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedLine {
    pub sku: String,
    pub qty: u32,
    pub category: Category,
    /// Inventory price as given, not yet rounded.
    pub unit_price: Decimal,
}

/// An order that passed every check that does not depend on the total.
#[derive(Debug, Clone)]
pub(crate) struct ValidatedOrder {
    pub shipping: ShippingMethod,
    pub payment: PaymentMethod,
    pub lines: Vec<ResolvedLine>,
    /// Units across all lines; drives quantity-threshold coupons.
    pub qty_total: u64,
    pub subtotal_before_discounts: Decimal,
    pub total_weight: Decimal,
}

/// Parses methods, resolves SKUs and checks stock.
///
/// ## Check Order
/// ```text
/// shipping method ──► per line: qty > 0, SKU known, price/weight, stock ──► payment method
/// ```
/// The first failing check is the one reported. The inventory lookup is the
/// only SKU check: any string keyed in the inventory is sellable.
///
/// Stock is checked against the quantity requested so far for that SKU, so
/// an order naming the same SKU on two lines cannot oversell it.
pub(crate) fn validate(order: &Order, inventory: &Inventory) -> CheckoutResult<ValidatedOrder> {
    let shipping: ShippingMethod = order.shipping.method.parse()?;

    let mut requested: HashMap<&str, u64> = HashMap::new();
    let mut lines = Vec::with_capacity(order.lines.len());
    let mut qty_total: u64 = 0;
    let mut subtotal_before_discounts = Decimal::ZERO;
    let mut total_weight = Decimal::ZERO;

    for line in &order.lines {
        validate_quantity(line.qty)?;

        let record = inventory
            .get(&line.sku)
            .ok_or_else(|| CheckoutError::UnknownSku(line.sku.clone()))?;
        validate_amount(&format!("{}.price", line.sku), record.price)?;
        validate_amount(&format!("{}.weight", line.sku), record.weight)?;

        if record.category.tracks_stock() {
            let available = record
                .stock
                .ok_or_else(|| CheckoutError::MissingStock(line.sku.clone()))?;

            let wanted = requested.entry(line.sku.as_str()).or_insert(0);
            *wanted += u64::from(line.qty);
            if *wanted > u64::from(available) {
                return Err(CheckoutError::InsufficientStock {
                    sku: line.sku.clone(),
                    available,
                    requested: *wanted,
                });
            }
        }

        let qty = Decimal::from(line.qty);
        qty_total += u64::from(line.qty);
        subtotal_before_discounts = record
            .price
            .checked_mul(qty)
            .and_then(|line_total| subtotal_before_discounts.checked_add(line_total))
            .ok_or_else(|| amount_out_of_range("subtotal_before_discounts"))?;
        total_weight = record
            .weight
            .checked_mul(qty)
            .and_then(|line_weight| total_weight.checked_add(line_weight))
            .ok_or_else(|| amount_out_of_range("weight"))?;

        lines.push(ResolvedLine {
            sku: line.sku.clone(),
            qty: line.qty,
            category: record.category,
            unit_price: record.price,
        });
    }

    validate_amount("subtotal_before_discounts", subtotal_before_discounts)?;
    validate_amount("weight", total_weight)?;

    let payment: PaymentMethod = order.payment.method.parse()?;

    debug!(
        lines = lines.len(),
        qty_total,
        weight = %total_weight,
        %shipping,
        %payment,
        "Order validated"
    );

    Ok(ValidatedOrder {
        shipping,
        payment,
        lines,
        qty_total,
        subtotal_before_discounts,
        total_weight,
    })
}

// =============================================================================
// Stage 2: Price Lines
// =============================================================================

/// A line after coupons, before tax.
#[derive(Debug, Clone)]
pub(crate) struct PricedLine {
    pub sku: String,
    pub category: Category,
    pub qty: u32,
    pub unit_price_final: Money,
    pub line_subtotal: Money,
}

/// Runs each line's unit price through the active coupon rules.
///
/// The line subtotal is computed from the discounted price before that price
/// is stored as Money, so an undiscounted price with sub-cent digits is
/// rounded once, on the subtotal.
pub(crate) fn price_lines(
    order: &ValidatedOrder,
    rules: &[CouponRule],
    coupon_codes: &[String],
) -> CheckoutResult<Vec<PricedLine>> {
    let active: HashSet<&str> = coupon_codes.iter().map(String::as_str).collect();

    let priced = order
        .lines
        .iter()
        .map(|line| {
            let unit = apply_rules(rules, &active, line.unit_price, line.category, order.qty_total);
            let line_subtotal = unit
                .checked_mul(Decimal::from(line.qty))
                .ok_or_else(|| amount_out_of_range(&format!("{}.line_subtotal", line.sku)))?;
            Ok(PricedLine {
                sku: line.sku.clone(),
                category: line.category,
                qty: line.qty,
                unit_price_final: Money::new(unit),
                line_subtotal: Money::new(line_subtotal),
            })
        })
        .collect::<CheckoutResult<Vec<_>>>()?;

    debug!(
        lines = priced.len(),
        coupons = active.len(),
        "Coupons applied"
    );
    Ok(priced)
}

// =============================================================================
// Stage 3: Aggregate
// =============================================================================

/// Post-discount subtotal.
pub(crate) fn aggregate(lines: &[PricedLine]) -> Money {
    lines.iter().map(|line| line.line_subtotal).sum()
}

// =============================================================================
// Stage 4: Shipping
// =============================================================================

pub(crate) fn quote_shipping(
    order: &ValidatedOrder,
    subtotal_after_discounts: Money,
    config: &CheckoutConfig,
) -> ShippingQuote {
    let quote = config.shipping.tariff(order.shipping).quote(
        order.total_weight,
        config.weight_allowance_kg,
        subtotal_after_discounts,
    );

    debug!(
        method = %order.shipping,
        cost = %quote.cost,
        free = quote.free,
        "Shipping quoted"
    );
    quote
}

// =============================================================================
// Stage 5: Tax
// =============================================================================

/// Taxes each line at its category rate and returns the lines with the sum.
pub(crate) fn tax_lines(lines: Vec<PricedLine>, table: &TaxTable) -> (Vec<LineResult>, Money) {
    let results: Vec<LineResult> = lines
        .into_iter()
        .map(|line| {
            let tax_line = line.line_subtotal.percentage(table.rate_for(line.category));
            LineResult {
                sku: line.sku,
                category: line.category,
                qty: line.qty,
                unit_price_final: line.unit_price_final,
                line_subtotal: line.line_subtotal,
                tax_line,
            }
        })
        .collect();

    let tax_total: Money = results.iter().map(|line| line.tax_line).sum();
    debug!(tax_total = %tax_total, "Tax computed");
    (results, tax_total)
}

// =============================================================================
// Stage 6: Payment
// =============================================================================

/// What the payment method adds to the order and takes from the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Settlement {
    pub fee: Money,
    pub hold_days: u32,
    /// Amount to deduct from store credit at commit.
    pub credit_debit: Option<Money>,
}

/// Computes the fee and hold for a payment method.
///
/// Store credit must cover the base total plus the (zero) store-credit fee.
pub(crate) fn settle_payment(
    method: PaymentMethod,
    base_total: Money,
    available_credit: Money,
    terms: &PaymentTerms,
) -> CheckoutResult<Settlement> {
    let settlement = match method {
        PaymentMethod::Card => Settlement {
            fee: base_total.percentage(terms.card_fee),
            hold_days: 0,
            credit_debit: None,
        },
        PaymentMethod::BankTransfer => Settlement {
            fee: Money::zero(),
            hold_days: terms.bank_transfer_hold_days,
            credit_debit: None,
        },
        PaymentMethod::StoreCredit => {
            let fee = Money::zero();
            let required = base_total + fee;
            if available_credit < required {
                warn!(
                    available = %available_credit,
                    required = %required,
                    "Store credit payment rejected"
                );
                return Err(CheckoutError::InsufficientStoreCredit {
                    available: available_credit,
                    required,
                });
            }
            Settlement {
                fee,
                hold_days: 0,
                credit_debit: Some(required),
            }
        }
    };

    debug!(
        %method,
        fee = %settlement.fee,
        hold_days = settlement.hold_days,
        "Payment settled"
    );
    Ok(settlement)
}

// =============================================================================
// Stage 7: Commit
// =============================================================================

/// Applies the order to the borrowed state. Cannot fail.
pub(crate) fn commit(
    order: &ValidatedOrder,
    settlement: &Settlement,
    inventory: &mut Inventory,
    customer: Option<&mut Customer>,
) {
    for line in order.lines.iter().filter(|line| line.category.tracks_stock()) {
        if let Some(stock) = inventory
            .get_mut(&line.sku)
            .and_then(|record| record.stock.as_mut())
        {
            // validate() bounded the cumulative quantity by the stock on hand
            *stock = stock.saturating_sub(line.qty);
        }
    }

    if let (Some(debit), Some(customer)) = (settlement.credit_debit, customer) {
        customer.store_credit = customer.store_credit - debit;
        debug!(remaining = %customer.store_credit, "Store credit debited");
    }
}
