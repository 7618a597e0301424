//! # Revenue Ledger Repository
//!
//! The revenue ledger and period-grouped revenue aggregation.
//!
//! ## Two Sources of Truth
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Revenue Aggregation                            │
//! │                                                                     │
//! │  RevenueSource::Ledger     → SUM(revenue_ledger.amount_cents)       │
//! │  RevenueSource::Invoices   → SUM(invoices.total_cents)  (with tax)  │
//! │                                                                     │
//! │  Both: GROUP BY period key, inclusive date range, ascending order,  │
//! │  empty buckets omitted.                                             │
//! │                                                                     │
//! │  rebuild_from_invoices() reconciles: replaces every ledger row in   │
//! │  the range with one synthesized row per invoice bucket.             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Period Keys
//! Buckets are keyed by text prefixes of the ISO date: `substr(date, 1, 10)`
//! for days, `substr(date, 1, 7)` for months, `substr(date, 1, 4)` for
//! years. The prefix works on ledger dates (`YYYY-MM-DD`) and invoice
//! timestamps (ISO-8601) alike.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbResult;
use pharma_core::{Granularity, LedgerEntry, PeriodTotal, RevenueSource};

/// Repository for the revenue ledger and revenue reporting.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LedgerRepository { pool }
    }

    /// Inserts a ledger entry.
    pub async fn insert(&self, entry: &LedgerEntry) -> DbResult<()> {
        debug!(
            id = %entry.id,
            date = %entry.date,
            amount_cents = entry.amount_cents,
            "Inserting ledger entry"
        );

        sqlx::query(
            "INSERT INTO revenue_ledger (id, date, amount_cents, period_type) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&entry.id)
        .bind(entry.date)
        .bind(entry.amount_cents)
        .bind(entry.period_type)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists all ledger entries in ascending date order.
    pub async fn list(&self) -> DbResult<Vec<LedgerEntry>> {
        let entries = sqlx::query_as::<_, LedgerEntry>(
            "SELECT id, date, amount_cents, period_type FROM revenue_ledger ORDER BY date ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Lists ledger entries whose date falls in `[start, end]`, both
    /// endpoints included.
    pub async fn entries_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<LedgerEntry>> {
        let entries = sqlx::query_as::<_, LedgerEntry>(
            r#"
            SELECT id, date, amount_cents, period_type
            FROM revenue_ledger
            WHERE date BETWEEN ?1 AND ?2
            ORDER BY date ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Deletes a ledger entry.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM revenue_ledger WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sums revenue per period over `[start, end]` (inclusive).
    ///
    /// ## Semantics
    /// - Buckets are returned in ascending period order
    /// - Periods with no records are omitted, never zero-filled
    /// - `Invoices` sums totals with tax; `Ledger` sums stored amounts
    pub async fn aggregate(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        granularity: Granularity,
        source: RevenueSource,
    ) -> DbResult<Vec<PeriodTotal>> {
        let sql = match source {
            RevenueSource::Ledger => {
                let period = match granularity {
                    Granularity::Day => "substr(date, 1, 10)",
                    Granularity::Month => "substr(date, 1, 7)",
                    Granularity::Year => "substr(date, 1, 4)",
                };
                format!(
                    "SELECT {period} AS period, SUM(amount_cents) AS total_cents \
                     FROM revenue_ledger \
                     WHERE substr(date, 1, 10) BETWEEN ?1 AND ?2 \
                     GROUP BY period \
                     ORDER BY period ASC"
                )
            }
            RevenueSource::Invoices => {
                let period = match granularity {
                    Granularity::Day => "substr(created_at, 1, 10)",
                    Granularity::Month => "substr(created_at, 1, 7)",
                    Granularity::Year => "substr(created_at, 1, 4)",
                };
                format!(
                    "SELECT {period} AS period, SUM(total_cents) AS total_cents \
                     FROM invoices \
                     WHERE substr(created_at, 1, 10) BETWEEN ?1 AND ?2 \
                     GROUP BY period \
                     ORDER BY period ASC"
                )
            }
        };

        let buckets = sqlx::query_as::<_, PeriodTotal>(&sql)
            .bind(start.to_string())
            .bind(end.to_string())
            .fetch_all(&self.pool)
            .await?;

        Ok(buckets)
    }

    /// Replaces the ledger contents for `[start, end]` with one entry per
    /// invoice bucket at the given granularity.
    ///
    /// ## Semantics
    /// - Destructive: every existing ledger row in the range is deleted,
    ///   regardless of its period type
    /// - Idempotent: invoices are the source of truth, so running twice
    ///   lands on the same ledger state
    /// - Atomic: delete and inserts share one transaction
    /// - Synthesized rows are dated at the first day of their period.
    ///   Align `start` to a period boundary at the chosen granularity: a
    ///   first-of-period date before `start` lands outside the delete
    ///   range and would survive a later rebuild of the same range
    ///
    /// ## Returns
    /// The number of ledger entries written.
    pub async fn rebuild_from_invoices(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        granularity: Granularity,
    ) -> DbResult<usize> {
        let buckets = self
            .aggregate(start, end, granularity, RevenueSource::Invoices)
            .await?;

        info!(
            start = %start,
            end = %end,
            granularity = %granularity.as_str(),
            buckets = buckets.len(),
            "Rebuilding revenue ledger from invoices"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM revenue_ledger WHERE date BETWEEN ?1 AND ?2")
            .bind(start)
            .bind(end)
            .execute(&mut *tx)
            .await?;

        for bucket in &buckets {
            let date = granularity.first_date_of_period(&bucket.period);

            sqlx::query(
                "INSERT INTO revenue_ledger (id, date, amount_cents, period_type) VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&date)
            .bind(bucket.total_cents)
            .bind(granularity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(buckets.len())
    }
}

/// Helper to generate a new ledger entry ID.
pub fn generate_ledger_id() -> String {
    Uuid::new_v4().to_string()
}
