//! # Domain Types
//!
//! Core domain types used throughout Pharma POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  Catalog:   Product   Client   Supplier   User (+ Role)             │
//! │                                                                     │
//! │  Sales:     Invoice ──1:N── InvoiceLine (snapshot of product name)  │
//! │                                                                     │
//! │  Revenue:   LedgerEntry     PeriodTotal     Granularity             │
//! │             (persisted)     (query result)  (Day/Month/Year)        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity id is a UUID v4 string - immutable, generated without
//! coordination, used for all database relations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::VAT_RATE_BPS;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1600 bps = 16%, the pharmacy VAT rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// The standard VAT rate (16%) applied to taxed invoices.
    #[inline]
    pub const fn vat() -> Self {
        TaxRate(VAT_RATE_BPS)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the pharmacy catalog.
///
/// Stock is mutated only by invoice creation (decrement) and explicit
/// manual edits through the product repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to the cashier and on invoices.
    pub name: String,

    /// Barcode (EAN-13 etc.), optional.
    pub barcode: Option<String>,

    /// Unit price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Current stock level.
    pub stock: i64,

    /// Whether this product is subject to VAT.
    pub taxable: bool,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether current stock covers the requested quantity.
    #[inline]
    pub fn can_cover(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Client & Supplier
// =============================================================================

/// A pharmacy client. Referenced by invoices but never required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Client {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// A supplier in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

// =============================================================================
// User & Role
// =============================================================================

/// The closed set of user roles.
///
/// Replaces role-name string comparisons at call sites: every permission
/// decision goes through [`Role::allows`](crate::session) and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including user management and invoice deletion.
    Admin,
    /// Catalogs, invoices and reports; no user management.
    Manager,
    /// Clients and invoices only.
    Cashier,
}

impl Role {
    /// Stable lowercase tag, matching the database representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Cashier => "cashier",
        }
    }
}

/// A user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: String,
    pub name: String,
    /// Login identifier, unique.
    pub email: String,
    /// Login secret. Never serialized out to callers.
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
}

// =============================================================================
// Invoice
// =============================================================================

/// An invoice header. Created once, immutable thereafter except for
/// admin-only deletion (which cascades to its lines).
///
/// Invariant: `total_cents == subtotal_cents + tax_cents` and
/// `subtotal_cents == Σ(line.quantity × line.unit_price_cents)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Optional client reference - walk-in sales have none.
    pub client_id: Option<String>,
    /// Pre-tax amount in cents.
    pub subtotal_cents: i64,
    /// VAT amount in cents (0 when the invoice is untaxed).
    pub tax_cents: i64,
    /// Total with tax in cents.
    pub total_cents: i64,
}

impl Invoice {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A line item on an invoice.
///
/// ## Snapshot Pattern
/// The product name is copied onto the line at sale time, and `product_id`
/// is nullable: deleting a product later never orphans invoice history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InvoiceLine {
    pub id: String,
    pub invoice_id: String,
    /// Product reference; None when the product has since been deleted
    /// or the line was imported without one.
    pub product_id: Option<String>,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    /// Quantity sold.
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
}

impl InvoiceLine {
    /// Line total before tax (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Revenue
// =============================================================================

/// Aggregation granularity for revenue reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Bucket key is the full date: `YYYY-MM-DD`.
    Day,
    /// Bucket key is year-month: `YYYY-MM`.
    Month,
    /// Bucket key is the year: `YYYY`.
    Year,
}

impl Granularity {
    /// Stable lowercase tag, matching the ledger's period-type column.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }

    /// Expands a period key to the first ISO date of that period.
    ///
    /// Used when a synthesized ledger row needs a concrete date:
    /// `2026-03` becomes `2026-03-01`, `2026` becomes `2026-01-01`,
    /// and a day key passes through unchanged.
    pub fn first_date_of_period(&self, period: &str) -> String {
        match self {
            Granularity::Day => period.to_string(),
            Granularity::Month => format!("{period}-01"),
            Granularity::Year => format!("{period}-01-01"),
        }
    }
}

/// Which source of truth a revenue aggregation reads from.
///
/// The ledger and the live invoice aggregation are deliberately two
/// independent sources, reconciled only by the explicit rebuild step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevenueSource {
    /// Stored amounts in the revenue ledger.
    Ledger,
    /// Live sum of invoice totals (with tax).
    Invoices,
}

/// An independently persisted revenue record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LedgerEntry {
    pub id: String,
    pub date: NaiveDate,
    pub amount_cents: i64,
    /// Granularity tag recorded when the row was written.
    pub period_type: Granularity,
}

impl LedgerEntry {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// One bucket of a period-grouped revenue sum.
///
/// Buckets are returned in ascending period order; periods with no
/// records are omitted, never zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PeriodTotal {
    /// Period key at the requested granularity.
    pub period: String,
    /// Summed amount in cents.
    pub total_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vat_rate() {
        let rate = TaxRate::vat();
        assert_eq!(rate.bps(), 1600);
        assert!((rate.percentage() - 16.0).abs() < 0.001);
    }

    #[test]
    fn test_role_tags() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Manager.as_str(), "manager");
        assert_eq!(Role::Cashier.as_str(), "cashier");
    }

    #[test]
    fn test_product_can_cover() {
        let product = Product {
            id: "p1".to_string(),
            name: "Paracetamol 500mg".to_string(),
            barcode: None,
            price_cents: 450,
            stock: 10,
            taxable: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(product.can_cover(10));
        assert!(!product.can_cover(11));
    }

    #[test]
    fn test_first_date_of_period() {
        assert_eq!(
            Granularity::Day.first_date_of_period("2026-03-15"),
            "2026-03-15"
        );
        assert_eq!(
            Granularity::Month.first_date_of_period("2026-03"),
            "2026-03-01"
        );
        assert_eq!(Granularity::Year.first_date_of_period("2026"), "2026-01-01");
    }

    #[test]
    fn test_line_total() {
        let line = InvoiceLine {
            id: "l1".to_string(),
            invoice_id: "f1".to_string(),
            product_id: Some("p1".to_string()),
            product_name: "Ibuprofen 200mg".to_string(),
            quantity: 3,
            unit_price_cents: 299,
        };
        assert_eq!(line.line_total().cents(), 897);
    }
}
