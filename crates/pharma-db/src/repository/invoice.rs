//! # Invoice Repository
//!
//! Invoice persistence: atomic creation with stock decrements, and the
//! admin-only delete.
//!
//! ## Creation Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    create(&draft) - one transaction                 │
//! │                                                                     │
//! │  BEGIN                                                              │
//! │    INSERT invoice header (totals computed from the draft)           │
//! │    for each line:                                                   │
//! │      INSERT invoice_lines (name snapshot + frozen unit price)       │
//! │      UPDATE products SET stock = stock - qty   (when product_id)    │
//! │  COMMIT     ← all lines and decrements land together, or none do    │
//! │                                                                     │
//! │  Any failure → tx dropped → automatic ROLLBACK                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock availability is validated at the caller boundary
//! ([`pharma_core::check_stock`]); this transaction applies the decrement
//! without re-checking.

use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use pharma_core::{Invoice, InvoiceDraft, InvoiceLine, Permission, Session};

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Persists a draft as an invoice: header, line snapshots and stock
    /// decrements in a single transaction.
    ///
    /// ## Returns
    /// The persisted invoice header.
    ///
    /// ## Errors
    /// * `DbError::QueryFailed` - Empty draft
    /// * `DbError::NotFound` - A line references a product that vanished
    ///   between the caller's stock check and this call (whole invoice
    ///   rolls back)
    pub async fn create(&self, draft: &InvoiceDraft) -> DbResult<Invoice> {
        if draft.is_empty() {
            return Err(DbError::QueryFailed(
                "Cannot create an invoice with no lines".to_string(),
            ));
        }

        let totals = draft.totals();
        let invoice = Invoice {
            id: generate_invoice_id(),
            created_at: draft.created_at,
            client_id: draft.client_id.clone(),
            subtotal_cents: totals.subtotal_cents,
            tax_cents: totals.tax_cents,
            total_cents: totals.total_cents,
        };

        debug!(
            id = %invoice.id,
            lines = draft.lines.len(),
            total_cents = invoice.total_cents,
            "Creating invoice"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO invoices (id, created_at, client_id, subtotal_cents, tax_cents, total_cents)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&invoice.id)
        .bind(invoice.created_at)
        .bind(&invoice.client_id)
        .bind(invoice.subtotal_cents)
        .bind(invoice.tax_cents)
        .bind(invoice.total_cents)
        .execute(&mut *tx)
        .await?;

        for line in &draft.lines {
            sqlx::query(
                r#"
                INSERT INTO invoice_lines (id, invoice_id, product_id, product_name, quantity, unit_price_cents)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&invoice.id)
            .bind(&line.product_id)
            .bind(&line.product_name)
            .bind(line.quantity)
            .bind(line.unit_price_cents)
            .execute(&mut *tx)
            .await?;

            // Decrement stock for lines tied to a catalog product. Lines
            // without one (free-form entries) carry only the snapshot.
            if let Some(product_id) = &line.product_id {
                let result = sqlx::query(
                    "UPDATE products SET stock = stock - ?2, updated_at = ?3 WHERE id = ?1",
                )
                .bind(product_id)
                .bind(line.quantity)
                .bind(draft.created_at)
                .execute(&mut *tx)
                .await?;

                if result.rows_affected() == 0 {
                    // tx dropped here → rollback, nothing persisted
                    return Err(DbError::not_found("Product", product_id));
                }
            }
        }

        tx.commit().await?;

        info!(
            id = %invoice.id,
            total_cents = invoice.total_cents,
            "Invoice created"
        );

        Ok(invoice)
    }

    /// Deletes an invoice and its lines. Admin only.
    ///
    /// Stock is NOT restored: sold goods left the shelf, and a deletion
    /// is a record correction, not a return.
    ///
    /// ## Returns
    /// * `Ok(true)` - Invoice deleted
    /// * `Ok(false)` - Declined (caller lacks the permission) or missing
    pub async fn delete(&self, id: &str, session: &Session) -> DbResult<bool> {
        if !session.allows(Permission::DeleteInvoices) {
            warn!(
                id = %id,
                role = %session.role().as_str(),
                "Invoice delete declined: insufficient role"
            );
            return Ok(false);
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM invoice_lines WHERE invoice_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM invoices WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(id = %id, "Invoice deleted");
        }

        Ok(deleted)
    }

    /// Lists all invoices, newest first.
    pub async fn list(&self) -> DbResult<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, created_at, client_id, subtotal_cents, tax_cents, total_cents
            FROM invoices
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    /// Gets an invoice header by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, created_at, client_id, subtotal_cents, tax_cents, total_cents
            FROM invoices
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Lists the line items of an invoice, in insertion order.
    pub async fn lines_for(&self, invoice_id: &str) -> DbResult<Vec<InvoiceLine>> {
        let lines = sqlx::query_as::<_, InvoiceLine>(
            r#"
            SELECT id, invoice_id, product_id, product_name, quantity, unit_price_cents
            FROM invoice_lines
            WHERE invoice_id = ?1
            ORDER BY rowid ASC
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Counts invoices (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new invoice ID.
pub fn generate_invoice_id() -> String {
    Uuid::new_v4().to_string()
}
