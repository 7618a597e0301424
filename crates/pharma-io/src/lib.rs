//! # Pharma POS File Exchange
//!
//! CSV import/export between the pharmacy database and spreadsheets.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        pharma-io crate                              │
//! │                                                                     │
//! │  CSV file ──► rows.rs (typed row mapping) ──► import.rs ──► db      │
//! │  db ──► export.rs ──► rows.rs ──► CSV file                          │
//! │                                                                     │
//! │  Imports are row-granular: a bad row is logged and skipped, the     │
//! │  rest of the file still lands.                                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use pharma_io::{import_products, export_ledger};
//!
//! let report = import_products(&db, Path::new("catalog.csv")).await?;
//! println!("{} imported, {} skipped", report.imported, report.skipped);
//! ```

pub mod error;
pub mod export;
pub mod import;
pub mod rows;

// Re-export main types at crate root
pub use error::{IoError, IoResult, RowError};
pub use export::{
    export_clients, export_invoices, export_ledger, export_products, export_suppliers,
};
pub use import::{
    import_clients, import_ledger, import_products, import_suppliers, ImportReport,
};
pub use rows::{ClientRow, LedgerRow, ProductRow, SupplierRow};
