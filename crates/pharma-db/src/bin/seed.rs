//! # Seed Data Generator
//!
//! Populates a development database with a pharmacy catalog.
//!
//! ## Usage
//! ```bash
//! # Generate 500 products (default)
//! cargo run -p pharma-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p pharma-db --bin seed -- --count 2000
//!
//! # Specify database path
//! cargo run -p pharma-db --bin seed -- --db ./data/pharmacy.db
//! ```
//!
//! ## Generated Data
//! - Products across pharmacy categories (analgesics, antibiotics,
//!   vitamins, dermatology, first aid), with barcode, price, stock
//! - A handful of clients and suppliers
//! - The default admin account

use chrono::Utc;
use std::env;
use uuid::Uuid;

use pharma_core::{Client, Product, Supplier};
use pharma_db::{Database, DbConfig};

/// Product categories with base names for realistic test data
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "ANL",
        &[
            "Paracetamol",
            "Ibuprofen",
            "Aspirin",
            "Naproxen",
            "Diclofenac",
            "Tramadol",
            "Codeine Syrup",
            "Ketoprofen Gel",
        ],
    ),
    (
        "ATB",
        &[
            "Amoxicillin",
            "Azithromycin",
            "Ciprofloxacin",
            "Doxycycline",
            "Cephalexin",
            "Metronidazole",
            "Clarithromycin",
            "Erythromycin",
        ],
    ),
    (
        "VIT",
        &[
            "Vitamin C",
            "Vitamin D3",
            "Vitamin B12",
            "Multivitamin",
            "Folic Acid",
            "Iron Supplement",
            "Zinc",
            "Magnesium",
            "Calcium",
            "Omega-3",
        ],
    ),
    (
        "DRM",
        &[
            "Hydrocortisone Cream",
            "Clotrimazole Cream",
            "Sunscreen SPF50",
            "Moisturizing Lotion",
            "Acne Gel",
            "Antiseptic Cream",
            "Petroleum Jelly",
        ],
    ),
    (
        "AID",
        &[
            "Adhesive Bandages",
            "Sterile Gauze",
            "Medical Tape",
            "Antiseptic Solution",
            "Cotton Wool",
            "Thermometer",
            "Elastic Bandage",
            "Saline Solution",
        ],
    ),
];

/// Dosage/pack variants
const VARIANTS: &[(&str, i64)] = &[
    ("250mg", 0),
    ("500mg", 150),
    ("1g", 300),
    ("10 tabs", 0),
    ("20 tabs", 200),
    ("30 tabs", 350),
    ("100ml", 100),
    ("200ml", 250),
];

const SAMPLE_CLIENTS: &[(&str, &str)] = &[
    ("Amina Haddad", "555-0101"),
    ("Karim Benali", "555-0102"),
    ("Leila Mansour", "555-0103"),
    ("Omar Cherif", "555-0104"),
];

const SAMPLE_SUPPLIERS: &[(&str, &str)] = &[
    ("MedSupply Distribution", "12 Industrial Road"),
    ("PharmaGross Wholesale", "48 Harbor Avenue"),
    ("VitaLab Laboratories", "7 Science Park"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 500;
    let mut db_path = String::from("./pharmacy_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(500);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Pharma POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 500)");
                println!("  -d, --db <PATH>    Database file path (default: ./pharmacy_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Pharma POS Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Seed the admin account (no-op if accounts exist)
    if db.users().ensure_default_admin().await? {
        println!("✓ Default admin created");
    }

    // Check existing products
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Generate products
    println!();
    println!("Generating products...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    for (category_idx, (_category_code, names)) in CATEGORIES.iter().enumerate() {
        for (name_idx, name) in names.iter().enumerate() {
            for (variant_idx, (variant, price_addon)) in VARIANTS.iter().enumerate() {
                if generated >= count {
                    break;
                }

                let seed = category_idx * 1000 + name_idx * 20 + variant_idx;
                let product = generate_product(name, variant, *price_addon, seed);

                if let Err(e) = db.products().insert(&product).await {
                    eprintln!("Failed to insert {}: {}", product.name, e);
                    continue;
                }

                generated += 1;

                if generated % 100 == 0 {
                    println!("  Generated {} products...", generated);
                }
            }

            if generated >= count {
                break;
            }
        }

        if generated >= count {
            break;
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    // Clients and suppliers
    for (name, phone) in SAMPLE_CLIENTS {
        let client = Client {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            phone: Some(phone.to_string()),
            email: None,
        };
        db.clients().insert(&client).await?;
    }
    println!("✓ Inserted {} clients", SAMPLE_CLIENTS.len());

    for (name, address) in SAMPLE_SUPPLIERS {
        let supplier = Supplier {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            phone: None,
            email: None,
            address: Some(address.to_string()),
        };
        db.suppliers().insert(&supplier).await?;
    }
    println!("✓ Inserted {} suppliers", SAMPLE_SUPPLIERS.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product with realistic data.
fn generate_product(name: &str, variant: &str, price_addon: i64, seed: usize) -> Product {
    let now = Utc::now();

    // EAN-13 shaped barcode (checksum not validated)
    let barcode = Some(format!("611{:010}", seed));

    // Base price 1.49 - 9.49 plus the variant addon
    let base_price = 149 + ((seed * 17) % 800) as i64;
    let price_cents = base_price + price_addon;

    // Stock 0-100; every 13th product taxfree (prescription-only lines)
    let stock = (seed % 101) as i64;
    let taxable = seed % 13 != 0;

    Product {
        id: Uuid::new_v4().to_string(),
        name: format!("{} {}", name, variant),
        barcode,
        price_cents,
        stock,
        taxable,
        created_at: now,
        updated_at: now,
    }
}
