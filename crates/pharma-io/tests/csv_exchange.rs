//! Integration tests for CSV import/export against an in-memory database.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use uuid::Uuid;

use pharma_core::{Granularity, LedgerEntry};
use pharma_db::{Database, DbConfig};
use pharma_io::{
    export_invoices, export_products, import_clients, import_ledger, import_products,
};

async fn test_db() -> Database {
    Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database")
}

/// Writes CSV content to a unique temp file and returns its path.
fn temp_csv(content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("pharma-io-test-{}.csv", Uuid::new_v4()));
    fs::write(&path, content).expect("write temp csv");
    path
}

#[tokio::test]
async fn product_import_skips_bad_rows() {
    let db = test_db().await;

    // Header + 2 good rows, 1 bad price, 1 missing name, 1 short-but-valid
    let path = temp_csv(
        "Name,Barcode,Price,Quantity,Taxable\n\
         Paracetamol 500mg,6110000000017,4.50,20,true\n\
         Ibuprofen 200mg,,2.99,15,false\n\
         Broken Row,,not-a-price,5,true\n\
         ,,1.00,3,true\n\
         Cotton Wool,,1.25\n",
    );

    let report = import_products(&db, &path).await.unwrap();
    assert_eq!(report.imported, 3);
    assert_eq!(report.skipped, 2);

    let products = db.products().list().await.unwrap();
    assert_eq!(products.len(), 3);

    let ibuprofen = products
        .iter()
        .find(|p| p.name == "Ibuprofen 200mg")
        .unwrap();
    assert_eq!(ibuprofen.price_cents, 299);
    assert!(!ibuprofen.taxable);

    // Short row: missing trailing columns default
    let cotton = products.iter().find(|p| p.name == "Cotton Wool").unwrap();
    assert_eq!(cotton.price_cents, 125);
    assert_eq!(cotton.stock, 0);
    assert!(cotton.taxable);

    fs::remove_file(path).ok();
}

#[tokio::test]
async fn product_import_accepts_comma_decimals() {
    let db = test_db().await;

    let path = temp_csv(
        "Name,Barcode,Price,Quantity,Taxable\n\
         Vitamin C 1g,,\"6,50\",10,true\n",
    );

    let report = import_products(&db, &path).await.unwrap();
    assert_eq!(report.imported, 1);

    let products = db.products().list().await.unwrap();
    assert_eq!(products[0].price_cents, 650);

    fs::remove_file(path).ok();
}

#[tokio::test]
async fn missing_file_is_a_whole_file_error() {
    let db = test_db().await;
    let path = std::env::temp_dir().join(format!("does-not-exist-{}.csv", Uuid::new_v4()));
    assert!(import_products(&db, &path).await.is_err());
}

#[tokio::test]
async fn client_import_and_short_rows() {
    let db = test_db().await;

    let path = temp_csv(
        "Name,Phone,Email\n\
         Amina Haddad,555-0101,amina@test.local\n\
         Karim Benali\n",
    );

    let report = import_clients(&db, &path).await.unwrap();
    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 0);

    let clients = db.clients().list().await.unwrap();
    let karim = clients.iter().find(|c| c.name == "Karim Benali").unwrap();
    assert!(karim.phone.is_none());
    assert!(karim.email.is_none());

    fs::remove_file(path).ok();
}

#[tokio::test]
async fn ledger_import_validates_dates_and_periods() {
    let db = test_db().await;

    let path = temp_csv(
        "Date,Amount,PeriodType\n\
         2026-03-15,125.00,day\n\
         2026-03-01,2400.00,month\n\
         15/03/2026,10.00,day\n\
         2026-03-16,10.00,week\n",
    );

    let report = import_ledger(&db, &path).await.unwrap();
    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 2);

    let entries = db.ledger().list().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    assert_eq!(entries[0].period_type, Granularity::Month);
    assert_eq!(entries[0].amount_cents, 240000);

    fs::remove_file(path).ok();
}

#[tokio::test]
async fn export_writes_header_and_decimal_amounts() {
    let db = test_db().await;

    let import_path = temp_csv(
        "Name,Barcode,Price,Quantity,Taxable\n\
         Paracetamol 500mg,6110000000017,4.50,20,true\n",
    );
    import_products(&db, &import_path).await.unwrap();

    let export_path =
        std::env::temp_dir().join(format!("pharma-io-export-{}.csv", Uuid::new_v4()));
    let written = export_products(&db, &export_path).await.unwrap();
    assert_eq!(written, 1);

    let content = fs::read_to_string(&export_path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next().unwrap(), "Name,Barcode,Price,Quantity,Taxable");
    let data = lines.next().unwrap();
    assert!(data.starts_with("Paracetamol 500mg,6110000000017,4.50,20"));

    fs::remove_file(import_path).ok();
    fs::remove_file(export_path).ok();
}

#[tokio::test]
async fn export_then_reimport_preserves_ledger() {
    let db = test_db().await;

    db.ledger()
        .insert(&LedgerEntry {
            id: Uuid::new_v4().to_string(),
            date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            amount_cents: 12345,
            period_type: Granularity::Day,
        })
        .await
        .unwrap();

    let path = std::env::temp_dir().join(format!("pharma-io-ledger-{}.csv", Uuid::new_v4()));
    pharma_io::export_ledger(&db, &path).await.unwrap();

    let other = test_db().await;
    let report = import_ledger(&other, &path).await.unwrap();
    assert_eq!(report.imported, 1);

    let entries = other.ledger().list().await.unwrap();
    assert_eq!(entries[0].amount_cents, 12345);
    assert_eq!(entries[0].period_type, Granularity::Day);

    fs::remove_file(path).ok();
}

#[tokio::test]
async fn invoice_export_resolves_client_names() {
    let db = test_db().await;

    let client = pharma_core::Client {
        id: Uuid::new_v4().to_string(),
        name: "Amina Haddad".to_string(),
        phone: None,
        email: None,
    };
    db.clients().insert(&client).await.unwrap();

    let product = pharma_core::Product {
        id: Uuid::new_v4().to_string(),
        name: "Aspirin 100mg".to_string(),
        barcode: None,
        price_cents: 1000,
        stock: 10,
        taxable: true,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    };
    db.products().insert(&product).await.unwrap();

    let mut draft =
        pharma_core::InvoiceDraft::new(chrono::Utc::now(), Some(client.id.clone()), true);
    draft.add_product(&product, 1).unwrap();
    db.invoices().create(&draft).await.unwrap();

    let path = std::env::temp_dir().join(format!("pharma-io-invoices-{}.csv", Uuid::new_v4()));
    let written = export_invoices(&db, &path).await.unwrap();
    assert_eq!(written, 1);

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.lines().next().unwrap().contains("ID,Date,Client,Total"));
    assert!(content.contains("Amina Haddad"));
    // 10.00 + 16% VAT
    assert!(content.contains("11.60"));

    fs::remove_file(path).ok();
}
