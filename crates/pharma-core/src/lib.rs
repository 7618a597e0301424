//! # pharma-core: Pure Business Logic for Pharma POS
//!
//! This crate is the heart of the pharmacy point-of-sale system. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Pharma POS Architecture                        │
//! │                                                                     │
//! │  Presentation layer (external collaborator, not in this workspace)  │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐    │
//! │  │              ★ pharma-core (THIS CRATE) ★                   │    │
//! │  │                                                             │    │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌───────┐ │    │
//! │  │  │  types  │ │  money  │ │ invoice │ │ session │ │ valid │ │    │
//! │  │  │ Product │ │  Money  │ │  Draft  │ │  Role   │ │ ation │ │    │
//! │  │  │ Invoice │ │ TaxRate │ │ totals  │ │ checks  │ │ rules │ │    │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └─────────┘ └───────┘ │    │
//! │  │                                                             │    │
//! │  │  NO I/O • NO DATABASE • NO FILES • PURE FUNCTIONS           │    │
//! │  └─────────────────────────────┬───────────────────────────────┘    │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼───────────────────────────────┐    │
//! │  │                 pharma-db (Database Layer)                  │    │
//! │  │           SQLite queries, migrations, repositories          │    │
//! │  └─────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Client, Invoice, LedgerEntry, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`invoice`] - Invoice draft: line items, totals, stock checks
//! - [`session`] - Logged-in user context and role-based authorization
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use pharma_core::money::Money;
//! use pharma_core::types::TaxRate;
//!
//! // Create money from cents (never from floats!)
//! let subtotal = Money::from_cents(2500);
//!
//! // Pharmacy VAT is a flat 16% applied per invoice
//! let tax = subtotal.calculate_tax(TaxRate::vat());
//! assert_eq!(tax.cents(), 400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod invoice;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pharma_core::Money` instead of
// `use pharma_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{check_stock, DraftLine, InvoiceDraft, InvoiceTotals};
pub use money::Money;
pub use session::{Permission, Session};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Value-added tax rate in basis points (1600 = 16%).
///
/// The rate is applied uniformly to an invoice's pre-tax amount when the
/// invoice's tax flag is set; it is never applied per line.
pub const VAT_RATE_BPS: u32 = 1600;

/// Maximum line items allowed on a single invoice.
///
/// Prevents runaway drafts and keeps transaction sizes reasonable.
pub const MAX_INVOICE_LINES: usize = 100;

/// Maximum quantity of a single line item.
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
