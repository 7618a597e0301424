//! # Typed CSV Rows
//!
//! One row type per entity, mapping between a [`csv::StringRecord`] and
//! the domain. Parsing is deliberately tolerant:
//!
//! - Short rows are padded with empty fields (missing trailing columns)
//! - Amounts accept both `12.50` and `12,50` spellings
//! - Optional fields become `None` when blank
//!
//! A row that still fails to parse yields a [`RowError`] for the importer
//! to log and skip.
//!
//! ## Column Orders
//! ```text
//! products:  Name, Barcode, Price, Quantity, Taxable
//! clients:   Name, Phone, Email
//! suppliers: Name, Phone, Email, Address
//! ledger:    Date, Amount, PeriodType
//! ```

use chrono::{NaiveDate, Utc};
use csv::StringRecord;
use uuid::Uuid;

use crate::error::RowError;
use pharma_core::{Client, Granularity, LedgerEntry, Product, Supplier};

// =============================================================================
// Field helpers
// =============================================================================

/// Reads field `i`, treating a missing trailing column as empty.
fn field(record: &StringRecord, i: usize) -> &str {
    record.get(i).unwrap_or("").trim()
}

/// Reads field `i` as an optional value (blank becomes None).
fn optional(record: &StringRecord, i: usize) -> Option<String> {
    let value = field(record, i);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parses a decimal money amount into cents.
///
/// Accepts `12.50`, `12,50`, `12` and a leading minus. Fractions beyond
/// two digits are truncated.
pub fn parse_cents(field_name: &'static str, raw: &str) -> Result<i64, RowError> {
    let value = raw.trim().replace(',', ".");
    if value.is_empty() {
        return Err(RowError::MissingField(field_name));
    }

    let invalid = || RowError::InvalidAmount {
        field: field_name,
        value: raw.to_string(),
    };

    let (sign, unsigned) = match value.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, value.as_str()),
    };

    let (whole, frac) = match unsigned.split_once('.') {
        Some((w, f)) => (w, f),
        None => (unsigned, ""),
    };

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };

    // Normalize the fraction to exactly two digits
    let frac_digits: String = frac.chars().take(2).collect();
    if !frac_digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let frac_cents: i64 = match frac_digits.len() {
        0 => 0,
        1 => frac_digits.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => frac_digits.parse().map_err(|_| invalid())?,
    };

    Ok(sign * (whole * 100 + frac_cents))
}

/// Formats cents as a decimal string (`1250` becomes `12.50`).
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

fn parse_integer(field_name: &'static str, raw: &str) -> Result<i64, RowError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value.parse().map_err(|_| RowError::InvalidInteger {
        field: field_name,
        value: raw.to_string(),
    })
}

/// Parses a boolean-ish flag. Blank defaults to true (taxed).
fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "non"
    )
}

// =============================================================================
// Product rows
// =============================================================================

/// CSV row for a product: `Name, Barcode, Price, Quantity, Taxable`.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub name: String,
    pub barcode: Option<String>,
    pub price_cents: i64,
    pub stock: i64,
    pub taxable: bool,
}

impl ProductRow {
    pub const HEADER: &'static [&'static str] = &["Name", "Barcode", "Price", "Quantity", "Taxable"];

    pub fn from_record(record: &StringRecord) -> Result<Self, RowError> {
        let name = field(record, 0);
        if name.is_empty() {
            return Err(RowError::MissingField("Name"));
        }

        Ok(ProductRow {
            name: name.to_string(),
            barcode: optional(record, 1),
            price_cents: parse_cents("Price", field(record, 2))?,
            stock: parse_integer("Quantity", field(record, 3))?,
            taxable: parse_flag(field(record, 4)),
        })
    }

    /// Builds a new catalog product from the row (fresh id and timestamps).
    pub fn into_product(self) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            barcode: self.barcode,
            price_cents: self.price_cents,
            stock: self.stock,
            taxable: self.taxable,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_record(product: &Product) -> Vec<String> {
        vec![
            product.name.clone(),
            product.barcode.clone().unwrap_or_default(),
            format_cents(product.price_cents),
            product.stock.to_string(),
            product.taxable.to_string(),
        ]
    }
}

// =============================================================================
// Client rows
// =============================================================================

/// CSV row for a client: `Name, Phone, Email`.
#[derive(Debug, Clone)]
pub struct ClientRow {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ClientRow {
    pub const HEADER: &'static [&'static str] = &["Name", "Phone", "Email"];

    pub fn from_record(record: &StringRecord) -> Result<Self, RowError> {
        let name = field(record, 0);
        if name.is_empty() {
            return Err(RowError::MissingField("Name"));
        }

        Ok(ClientRow {
            name: name.to_string(),
            phone: optional(record, 1),
            email: optional(record, 2),
        })
    }

    pub fn into_client(self) -> Client {
        Client {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            phone: self.phone,
            email: self.email,
        }
    }

    pub fn to_record(client: &Client) -> Vec<String> {
        vec![
            client.name.clone(),
            client.phone.clone().unwrap_or_default(),
            client.email.clone().unwrap_or_default(),
        ]
    }
}

// =============================================================================
// Supplier rows
// =============================================================================

/// CSV row for a supplier: `Name, Phone, Email, Address`.
#[derive(Debug, Clone)]
pub struct SupplierRow {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl SupplierRow {
    pub const HEADER: &'static [&'static str] = &["Name", "Phone", "Email", "Address"];

    pub fn from_record(record: &StringRecord) -> Result<Self, RowError> {
        let name = field(record, 0);
        if name.is_empty() {
            return Err(RowError::MissingField("Name"));
        }

        Ok(SupplierRow {
            name: name.to_string(),
            phone: optional(record, 1),
            email: optional(record, 2),
            address: optional(record, 3),
        })
    }

    pub fn into_supplier(self) -> Supplier {
        Supplier {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
        }
    }

    pub fn to_record(supplier: &Supplier) -> Vec<String> {
        vec![
            supplier.name.clone(),
            supplier.phone.clone().unwrap_or_default(),
            supplier.email.clone().unwrap_or_default(),
            supplier.address.clone().unwrap_or_default(),
        ]
    }
}

// =============================================================================
// Ledger rows
// =============================================================================

/// CSV row for a ledger entry: `Date, Amount, PeriodType`.
#[derive(Debug, Clone)]
pub struct LedgerRow {
    pub date: NaiveDate,
    pub amount_cents: i64,
    pub period_type: Granularity,
}

impl LedgerRow {
    pub const HEADER: &'static [&'static str] = &["Date", "Amount", "PeriodType"];

    pub fn from_record(record: &StringRecord) -> Result<Self, RowError> {
        let raw_date = field(record, 0);
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .map_err(|_| RowError::InvalidDate(raw_date.to_string()))?;

        let amount_cents = parse_cents("Amount", field(record, 1))?;

        // Blank period type defaults to day
        let period_type = match field(record, 2).to_ascii_lowercase().as_str() {
            "" | "day" => Granularity::Day,
            "month" => Granularity::Month,
            "year" => Granularity::Year,
            other => return Err(RowError::InvalidPeriodType(other.to_string())),
        };

        Ok(LedgerRow {
            date,
            amount_cents,
            period_type,
        })
    }

    pub fn into_entry(self) -> LedgerEntry {
        LedgerEntry {
            id: Uuid::new_v4().to_string(),
            date: self.date,
            amount_cents: self.amount_cents,
            period_type: self.period_type,
        }
    }

    pub fn to_record(entry: &LedgerEntry) -> Vec<String> {
        vec![
            entry.date.to_string(),
            format_cents(entry.amount_cents),
            entry.period_type.as_str().to_string(),
        ]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("Price", "12.50").unwrap(), 1250);
        assert_eq!(parse_cents("Price", "12,50").unwrap(), 1250);
        assert_eq!(parse_cents("Price", "12").unwrap(), 1200);
        assert_eq!(parse_cents("Price", "0.5").unwrap(), 50);
        assert_eq!(parse_cents("Price", "-3.25").unwrap(), -325);
        assert_eq!(parse_cents("Price", " 7.00 ").unwrap(), 700);

        assert!(parse_cents("Price", "").is_err());
        assert!(parse_cents("Price", "abc").is_err());
        assert!(parse_cents("Price", "1.x5").is_err());
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(1250), "12.50");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(-325), "-3.25");
    }

    #[test]
    fn test_product_row_full() {
        let row = ProductRow::from_record(&record(&[
            "Paracetamol 500mg",
            "6110000000017",
            "4.50",
            "20",
            "true",
        ]))
        .unwrap();

        assert_eq!(row.name, "Paracetamol 500mg");
        assert_eq!(row.barcode.as_deref(), Some("6110000000017"));
        assert_eq!(row.price_cents, 450);
        assert_eq!(row.stock, 20);
        assert!(row.taxable);
    }

    #[test]
    fn test_product_row_short_is_padded() {
        // Only name and price; barcode empty, stock 0, taxable defaults on
        let row = ProductRow::from_record(&record(&["Cotton Wool", "", "1,99"])).unwrap();
        assert_eq!(row.price_cents, 199);
        assert_eq!(row.stock, 0);
        assert!(row.barcode.is_none());
        assert!(row.taxable);
    }

    #[test]
    fn test_product_row_missing_name() {
        let err = ProductRow::from_record(&record(&["", "", "1.00"])).unwrap_err();
        assert!(matches!(err, RowError::MissingField("Name")));
    }

    #[test]
    fn test_client_row_short() {
        let row = ClientRow::from_record(&record(&["Amina Haddad"])).unwrap();
        assert_eq!(row.name, "Amina Haddad");
        assert!(row.phone.is_none());
        assert!(row.email.is_none());
    }

    #[test]
    fn test_ledger_row() {
        let row = LedgerRow::from_record(&record(&["2026-03-15", "125.00", "day"])).unwrap();
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());
        assert_eq!(row.amount_cents, 12500);
        assert_eq!(row.period_type, Granularity::Day);

        // Blank period type defaults to day
        let row = LedgerRow::from_record(&record(&["2026-03-15", "10"])).unwrap();
        assert_eq!(row.period_type, Granularity::Day);

        assert!(LedgerRow::from_record(&record(&["15/03/2026", "10"])).is_err());
        assert!(LedgerRow::from_record(&record(&["2026-03-15", "10", "week"])).is_err());
    }
}
