//! # Pharma POS Database Layer
//!
//! SQLite persistence for the pharmacy point of sale.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        pharma-db crate                              │
//! │                                                                     │
//! │  Database (pool.rs)                                                 │
//! │       │                                                             │
//! │       ├── products()  ──► ProductRepository                         │
//! │       ├── clients()   ──► ClientRepository                          │
//! │       ├── suppliers() ──► SupplierRepository                        │
//! │       ├── users()     ──► UserRepository                            │
//! │       ├── invoices()  ──► InvoiceRepository                         │
//! │       └── ledger()    ──► LedgerRepository                          │
//! │                                                                     │
//! │  migrations.rs ← embedded SQL migrations, run on startup            │
//! │  error.rs      ← DbError / DbResult                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use pharma_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("/path/to/pharmacy.db")).await?;
//! db.users().ensure_default_admin().await?;
//! let products = db.products().list().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// Re-export main types at crate root
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::client::ClientRepository;
pub use repository::invoice::InvoiceRepository;
pub use repository::ledger::LedgerRepository;
pub use repository::product::ProductRepository;
pub use repository::supplier::SupplierRepository;
pub use repository::user::UserRepository;
