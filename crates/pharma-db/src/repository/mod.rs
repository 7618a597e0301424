//! # Repository Layer
//!
//! One repository per aggregate, each a cheap clone around the shared
//! pool:
//!
//! - [`product::ProductRepository`] - catalog, stock deltas, guarded delete
//! - [`client::ClientRepository`] - client directory
//! - [`supplier::SupplierRepository`] - supplier directory
//! - [`user::UserRepository`] - accounts, login, default admin seeding
//! - [`invoice::InvoiceRepository`] - atomic invoice creation, admin delete
//! - [`ledger::LedgerRepository`] - revenue ledger, aggregation, rebuild

pub mod client;
pub mod invoice;
pub mod ledger;
pub mod product;
pub mod supplier;
pub mod user;
