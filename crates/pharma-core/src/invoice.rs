//! # Invoice Draft
//!
//! Builds an invoice before it is persisted: line items, totals, and the
//! caller-boundary stock check.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Invoice Creation Flow                          │
//! │                                                                     │
//! │  InvoiceDraft::new(now, client)                                     │
//! │       │                                                             │
//! │       ├── check_stock(product, qty)   ← caller boundary; the        │
//! │       │                                 transaction never           │
//! │       │                                 re-validates stock          │
//! │       ├── add_product(product, qty)                                 │
//! │       ├── add_product(product, qty)                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  draft.totals()  → subtotal / tax (16% if taxed) / total            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  InvoiceRepository::create(&draft)   ← one transaction:             │
//! │       header + lines + stock decrements, commit or rollback         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, TaxRate};
use crate::{MAX_INVOICE_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Draft Line
// =============================================================================

/// One pending line item of an invoice draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftLine {
    /// Product reference; None for lines without a catalog product.
    pub product_id: Option<String>,
    /// Name snapshot captured at draft time.
    pub product_name: String,
    pub quantity: i64,
    /// Unit price in cents; defaults to the product's price, may be
    /// overridden at sale time.
    pub unit_price_cents: i64,
}

impl DraftLine {
    /// Line total before tax.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Invoice Totals
// =============================================================================

/// The monetary breakdown of a draft, computed once and persisted as-is.
///
/// Invariant: `total == subtotal + tax`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
}

// =============================================================================
// Invoice Draft
// =============================================================================

/// An invoice being assembled, before persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Timestamp the invoice will carry.
    pub created_at: DateTime<Utc>,
    /// Optional client reference.
    pub client_id: Option<String>,
    /// Whether VAT (16%) is applied to the pre-tax amount.
    pub apply_tax: bool,
    /// Ordered line items.
    pub lines: Vec<DraftLine>,
}

impl InvoiceDraft {
    /// Creates an empty draft.
    pub fn new(created_at: DateTime<Utc>, client_id: Option<String>, apply_tax: bool) -> Self {
        InvoiceDraft {
            created_at,
            client_id,
            apply_tax,
            lines: Vec::new(),
        }
    }

    /// Adds a line for a catalog product at its current price.
    ///
    /// The product name is snapshotted so the invoice stays readable if
    /// the product is deleted later.
    pub fn add_product(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        self.add_line(DraftLine {
            product_id: Some(product.id.clone()),
            product_name: product.name.clone(),
            quantity,
            unit_price_cents: product.price_cents,
        })
    }

    /// Adds a line for a catalog product with an overridden unit price.
    pub fn add_product_at(
        &mut self,
        product: &Product,
        quantity: i64,
        unit_price_cents: i64,
    ) -> CoreResult<()> {
        self.add_line(DraftLine {
            product_id: Some(product.id.clone()),
            product_name: product.name.clone(),
            quantity,
            unit_price_cents,
        })
    }

    /// Adds a raw line.
    pub fn add_line(&mut self, line: DraftLine) -> CoreResult<()> {
        if self.lines.len() >= MAX_INVOICE_LINES {
            return Err(CoreError::TooManyLines {
                max: MAX_INVOICE_LINES,
            });
        }
        if line.quantity <= 0 || line.quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: line.quantity,
                max: MAX_LINE_QUANTITY,
            });
        }
        self.lines.push(line);
        Ok(())
    }

    /// Whether the draft has any lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Computes subtotal, tax and total for the current lines.
    ///
    /// - subtotal = Σ(quantity × unit price)
    /// - tax = subtotal × 16% when `apply_tax`, else 0 (uniform per
    ///   invoice, never per line)
    /// - total = subtotal + tax
    pub fn totals(&self) -> InvoiceTotals {
        let subtotal = self
            .lines
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.line_total());

        let tax = if self.apply_tax {
            subtotal.calculate_tax(TaxRate::vat())
        } else {
            Money::zero()
        };

        InvoiceTotals {
            subtotal_cents: subtotal.cents(),
            tax_cents: tax.cents(),
            total_cents: (subtotal + tax).cents(),
        }
    }
}

// =============================================================================
// Stock Check (caller boundary)
// =============================================================================

/// Validates that a product's stock covers the requested quantity.
///
/// This check lives at the caller boundary: run it for every line BEFORE
/// submitting the invoice transaction. The transaction itself only applies
/// the caller-validated decrement and never re-checks availability.
pub fn check_stock(product: &Product, requested: i64) -> CoreResult<()> {
    if product.can_cover(requested) {
        Ok(())
    } else {
        Err(CoreError::InsufficientStock {
            name: product.name.clone(),
            available: product.stock,
            requested,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, price_cents: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            barcode: None,
            price_cents,
            stock,
            taxable: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_totals_with_tax() {
        // 2 × 10.00 + 1 × 5.00 = 25.00; 16% VAT = 4.00; total 29.00
        let a = product("a", "Paracetamol 500mg", 1000, 50);
        let b = product("b", "Vitamin C 1g", 500, 20);

        let mut draft = InvoiceDraft::new(Utc::now(), None, true);
        draft.add_product(&a, 2).unwrap();
        draft.add_product(&b, 1).unwrap();

        let totals = draft.totals();
        assert_eq!(totals.subtotal_cents, 2500);
        assert_eq!(totals.tax_cents, 400);
        assert_eq!(totals.total_cents, 2900);
    }

    #[test]
    fn test_totals_without_tax() {
        let a = product("a", "Paracetamol 500mg", 1000, 50);

        let mut draft = InvoiceDraft::new(Utc::now(), None, false);
        draft.add_product(&a, 2).unwrap();

        let totals = draft.totals();
        assert_eq!(totals.subtotal_cents, 2000);
        assert_eq!(totals.tax_cents, 0);
        assert_eq!(totals.total_cents, 2000);
    }

    #[test]
    fn test_total_equals_subtotal_plus_tax() {
        let a = product("a", "Ibuprofen 200mg", 1099, 50);

        let mut draft = InvoiceDraft::new(Utc::now(), None, true);
        draft.add_product(&a, 3).unwrap();

        let totals = draft.totals();
        assert_eq!(
            totals.total_cents,
            totals.subtotal_cents + totals.tax_cents
        );
    }

    #[test]
    fn test_price_override() {
        let a = product("a", "Paracetamol 500mg", 1000, 50);

        let mut draft = InvoiceDraft::new(Utc::now(), None, false);
        draft.add_product_at(&a, 2, 900).unwrap();

        assert_eq!(draft.totals().subtotal_cents, 1800);
    }

    #[test]
    fn test_rejects_bad_quantity() {
        let a = product("a", "Paracetamol 500mg", 1000, 50);
        let mut draft = InvoiceDraft::new(Utc::now(), None, true);

        assert!(draft.add_product(&a, 0).is_err());
        assert!(draft.add_product(&a, -1).is_err());
        assert!(draft.add_product(&a, 1000).is_err());
        assert!(draft.is_empty());
    }

    #[test]
    fn test_check_stock() {
        let a = product("a", "Paracetamol 500mg", 1000, 5);
        assert!(check_stock(&a, 5).is_ok());

        let err = check_stock(&a, 6).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 5,
                requested: 6,
                ..
            }
        ));
    }
}
