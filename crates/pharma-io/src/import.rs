//! # CSV Import
//!
//! Reads catalog and ledger CSV files into the database.
//!
//! ## Row-Granular Error Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  for each data row:                                                 │
//! │     parse ──ok──► insert ──ok──► imported += 1                      │
//! │       │             │                                               │
//! │       └──err──►     └──err──►    warn!(row, reason); skipped += 1   │
//! │                                                                     │
//! │  One bad row never aborts the file. Whole-file problems (missing    │
//! │  file, unreadable CSV) still surface as IoError.                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first row is a header and is always skipped. Short rows are
//! tolerated (missing trailing columns read as empty).

use std::path::Path;

use tracing::{info, warn};

use crate::error::IoResult;
use crate::rows::{ClientRow, LedgerRow, ProductRow, SupplierRow};
use pharma_db::Database;

/// Outcome of an import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Rows successfully written to the database.
    pub imported: usize,
    /// Rows skipped (parse failure or per-row database failure).
    pub skipped: usize,
}

fn reader(path: &Path) -> IoResult<csv::Reader<std::fs::File>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // tolerate short rows
        .from_path(path)?;
    Ok(reader)
}

/// Imports products from `Name, Barcode, Price, Quantity, Taxable` rows.
pub async fn import_products(db: &Database, path: &Path) -> IoResult<ImportReport> {
    let mut report = ImportReport::default();
    let repo = db.products();

    for (line, record) in reader(path)?.records().enumerate() {
        let row_number = line + 2; // 1-based, after the header
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(row = row_number, error = %e, "Skipping unreadable product row");
                report.skipped += 1;
                continue;
            }
        };

        let product = match ProductRow::from_record(&record) {
            Ok(row) => row.into_product(),
            Err(e) => {
                warn!(row = row_number, error = %e, "Skipping invalid product row");
                report.skipped += 1;
                continue;
            }
        };

        if let Err(e) = repo.insert(&product).await {
            warn!(row = row_number, name = %product.name, error = %e, "Skipping product row: insert failed");
            report.skipped += 1;
            continue;
        }
        report.imported += 1;
    }

    info!(
        path = %path.display(),
        imported = report.imported,
        skipped = report.skipped,
        "Product import finished"
    );
    Ok(report)
}

/// Imports clients from `Name, Phone, Email` rows.
pub async fn import_clients(db: &Database, path: &Path) -> IoResult<ImportReport> {
    let mut report = ImportReport::default();
    let repo = db.clients();

    for (line, record) in reader(path)?.records().enumerate() {
        let row_number = line + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(row = row_number, error = %e, "Skipping unreadable client row");
                report.skipped += 1;
                continue;
            }
        };

        let client = match ClientRow::from_record(&record) {
            Ok(row) => row.into_client(),
            Err(e) => {
                warn!(row = row_number, error = %e, "Skipping invalid client row");
                report.skipped += 1;
                continue;
            }
        };

        if let Err(e) = repo.insert(&client).await {
            warn!(row = row_number, name = %client.name, error = %e, "Skipping client row: insert failed");
            report.skipped += 1;
            continue;
        }
        report.imported += 1;
    }

    info!(
        path = %path.display(),
        imported = report.imported,
        skipped = report.skipped,
        "Client import finished"
    );
    Ok(report)
}

/// Imports suppliers from `Name, Phone, Email, Address` rows.
pub async fn import_suppliers(db: &Database, path: &Path) -> IoResult<ImportReport> {
    let mut report = ImportReport::default();
    let repo = db.suppliers();

    for (line, record) in reader(path)?.records().enumerate() {
        let row_number = line + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(row = row_number, error = %e, "Skipping unreadable supplier row");
                report.skipped += 1;
                continue;
            }
        };

        let supplier = match SupplierRow::from_record(&record) {
            Ok(row) => row.into_supplier(),
            Err(e) => {
                warn!(row = row_number, error = %e, "Skipping invalid supplier row");
                report.skipped += 1;
                continue;
            }
        };

        if let Err(e) = repo.insert(&supplier).await {
            warn!(row = row_number, name = %supplier.name, error = %e, "Skipping supplier row: insert failed");
            report.skipped += 1;
            continue;
        }
        report.imported += 1;
    }

    info!(
        path = %path.display(),
        imported = report.imported,
        skipped = report.skipped,
        "Supplier import finished"
    );
    Ok(report)
}

/// Imports ledger entries from `Date, Amount, PeriodType` rows.
pub async fn import_ledger(db: &Database, path: &Path) -> IoResult<ImportReport> {
    let mut report = ImportReport::default();
    let repo = db.ledger();

    for (line, record) in reader(path)?.records().enumerate() {
        let row_number = line + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(row = row_number, error = %e, "Skipping unreadable ledger row");
                report.skipped += 1;
                continue;
            }
        };

        let entry = match LedgerRow::from_record(&record) {
            Ok(row) => row.into_entry(),
            Err(e) => {
                warn!(row = row_number, error = %e, "Skipping invalid ledger row");
                report.skipped += 1;
                continue;
            }
        };

        if let Err(e) = repo.insert(&entry).await {
            warn!(row = row_number, date = %entry.date, error = %e, "Skipping ledger row: insert failed");
            report.skipped += 1;
            continue;
        }
        report.imported += 1;
    }

    info!(
        path = %path.display(),
        imported = report.imported,
        skipped = report.skipped,
        "Ledger import finished"
    );
    Ok(report)
}
