//! # Seed Data Generator
//!
//! Populates the database with sample lab consumables for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p labstock-db --bin seed
//!
//! # Specify database path
//! cargo run -p labstock-db --bin seed -- --db ./data/labstock.db
//!
//! # Also pre-issue a few tickets per product
//! cargo run -p labstock-db --bin seed -- --tickets 3
//! ```
//!
//! Each product gets a unique tag, a display name, a unit, and a starting
//! stock level. The generator refuses to run against a non-empty registry.

use chrono::Utc;
use std::env;
use uuid::Uuid;

use labstock_core::validation::{validate_product_name, validate_tag};
use labstock_core::Product;
use labstock_db::{Database, DbConfig};

/// Sample consumables: (tag, name, unit, starting stock)
const CONSUMABLES: &[(&str, &str, &str, i64)] = &[
    ("GLOVE-S", "Nitrile gloves (S)", "box", 12),
    ("GLOVE-M", "Nitrile gloves (M)", "box", 20),
    ("GLOVE-L", "Nitrile gloves (L)", "box", 8),
    ("TIP-10", "Pipette tips 10 uL", "rack", 30),
    ("TIP-200", "Pipette tips 200 uL", "rack", 25),
    ("TIP-1000", "Pipette tips 1000 uL", "rack", 18),
    ("TUBE-15", "Centrifuge tubes 1.5 mL", "bag", 10),
    ("TUBE-50", "Centrifuge tubes 50 mL", "bag", 6),
    ("PCR-PLATE", "96-well PCR plates", "pack", 5),
    ("DISH-90", "Petri dishes 90 mm", "sleeve", 14),
    ("PARAFILM", "Sealing film rolls", "roll", 4),
    ("WIPES", "Lint-free wipes", "box", 16),
    ("ETOH-70", "Ethanol 70% spray", "bottle", 9),
    ("SYRINGE-5", "Syringes 5 mL", "pack", 7),
    ("FILTER-022", "Syringe filters 0.22 um", "pack", 3),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./labstock.db");
    let mut tickets_per_product: i64 = 0;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--tickets" | "-t" => {
                if i + 1 < args.len() {
                    tickets_per_product = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Labstock Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>       Database file path (default: ./labstock.db)");
                println!("  -t, --tickets <N>     Tickets to pre-issue per product (default: 0)");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Labstock Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database (runs migrations)
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Refuse to seed on top of existing data
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Inserting products...");

    let now = Utc::now();
    for (tag, name, unit, stock) in CONSUMABLES {
        // Seed data goes through the same field rules as form input
        validate_tag(tag)?;
        validate_product_name(name)?;

        let product = Product {
            id: Uuid::new_v4().to_string(),
            tag: tag.to_string(),
            name: name.to_string(),
            current_stock: *stock,
            unit: unit.to_string(),
            latest_ticket_seq: 0,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = db.products().insert(&product).await {
            eprintln!("Failed to insert {}: {}", tag, e);
            continue;
        }

        for _ in 0..tickets_per_product {
            let ticket = db.tickets().issue(&product.id).await?;
            println!("  issued {}", ticket.ticket_id);
        }
    }

    let total = db.products().count().await?;
    let tickets = db.tickets().count().await?;

    println!();
    println!("✓ Seed complete: {} products, {} tickets", total, tickets);

    Ok(())
}
