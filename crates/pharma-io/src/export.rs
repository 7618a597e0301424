//! # CSV Export
//!
//! Writes catalog, ledger and invoice data to CSV files. Every export
//! starts with a header row; amounts are written as decimals (`12.50`).

use std::path::Path;

use tracing::info;

use crate::error::IoResult;
use crate::rows::{format_cents, ClientRow, LedgerRow, ProductRow, SupplierRow};
use pharma_db::Database;

fn write_all(
    path: &Path,
    header: &[&str],
    rows: impl IntoIterator<Item = Vec<String>>,
) -> IoResult<usize> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;

    let mut written = 0;
    for row in rows {
        writer.write_record(&row)?;
        written += 1;
    }
    writer.flush()?;

    Ok(written)
}

/// Exports the product catalog.
pub async fn export_products(db: &Database, path: &Path) -> IoResult<usize> {
    let products = db.products().list().await?;
    let written = write_all(
        path,
        ProductRow::HEADER,
        products.iter().map(ProductRow::to_record),
    )?;

    info!(path = %path.display(), rows = written, "Exported products");
    Ok(written)
}

/// Exports the client directory.
pub async fn export_clients(db: &Database, path: &Path) -> IoResult<usize> {
    let clients = db.clients().list().await?;
    let written = write_all(
        path,
        ClientRow::HEADER,
        clients.iter().map(ClientRow::to_record),
    )?;

    info!(path = %path.display(), rows = written, "Exported clients");
    Ok(written)
}

/// Exports the supplier directory.
pub async fn export_suppliers(db: &Database, path: &Path) -> IoResult<usize> {
    let suppliers = db.suppliers().list().await?;
    let written = write_all(
        path,
        SupplierRow::HEADER,
        suppliers.iter().map(SupplierRow::to_record),
    )?;

    info!(path = %path.display(), rows = written, "Exported suppliers");
    Ok(written)
}

/// Exports the revenue ledger.
pub async fn export_ledger(db: &Database, path: &Path) -> IoResult<usize> {
    let entries = db.ledger().list().await?;
    let written = write_all(
        path,
        LedgerRow::HEADER,
        entries.iter().map(LedgerRow::to_record),
    )?;

    info!(path = %path.display(), rows = written, "Exported ledger");
    Ok(written)
}

/// Exports invoice headers as `ID, Date, Client, Total`.
///
/// The client column carries the client's current name, or stays empty
/// for walk-in sales and deleted clients.
pub async fn export_invoices(db: &Database, path: &Path) -> IoResult<usize> {
    let invoices = db.invoices().list().await?;
    let clients = db.clients().list().await?;

    let client_names: std::collections::HashMap<&str, &str> = clients
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    let rows = invoices.iter().map(|invoice| {
        let client = invoice
            .client_id
            .as_deref()
            .and_then(|id| client_names.get(id).copied())
            .unwrap_or("");
        vec![
            invoice.id.clone(),
            invoice.created_at.to_rfc3339(),
            client.to_string(),
            format_cents(invoice.total_cents),
        ]
    });

    let written = write_all(path, &["ID", "Date", "Client", "Total"], rows)?;

    info!(path = %path.display(), rows = written, "Exported invoices");
    Ok(written)
}
