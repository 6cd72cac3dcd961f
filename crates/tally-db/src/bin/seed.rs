//! # Seed Data Generator
//!
//! Populates the database with demo customers, items and a few sales for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p tally-db --bin seed
//!
//! # Specify database path
//! cargo run -p tally-db --bin seed -- --db ./data/tally.db
//!
//! # Skip the demo sales
//! cargo run -p tally-db --bin seed -- --no-sales
//! ```
//!
//! Everything goes through the engine, so the seeded data passes the same
//! validation and balance rules as API traffic.

use std::env;

use tally_core::{CustomerDraft, ItemDraft, Page, TransactionDraft};
use tally_db::{Database, DbConfig};

/// Demo customers: (name, opening balance in cents)
const CUSTOMERS: &[(&str, i64)] = &[
    ("Alice Martin", 50_000),
    ("Bobby Tables", 25_000),
    ("Carol Nguyen", 100_000),
    ("Diego Alvarez", 10_000),
    ("Erika Lindqvist", 75_000),
];

/// Demo items: (name, cost cents, price cents)
const ITEMS: &[(&str, i64, i64)] = &[
    ("Espresso", 80, 250),
    ("Cappuccino", 120, 375),
    ("Croissant", 90, 300),
    ("Bagel", 60, 225),
    ("Orange Juice", 110, 350),
    ("Green Tea", 40, 200),
    ("Muffin", 70, 275),
    ("Sandwich", 300, 850),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./tally.db");
    let mut with_sales = true;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--no-sales" => with_sales = false,
            "--help" | "-h" => {
                println!("Tally Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./tally.db)");
                println!("      --no-sales     Only create customers and items");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Tally Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if !db.customers().list(Page::new(1, 0)).await?.is_empty() {
        println!("⚠ Database already has customers");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let engine = db.engine();

    println!();
    println!("Creating customers...");
    let mut customer_ids = Vec::with_capacity(CUSTOMERS.len());
    for (name, balance_cents) in CUSTOMERS {
        let draft = CustomerDraft {
            name: name.to_string(),
            balance_cents: *balance_cents,
        };
        match engine.customers.create(draft).await {
            Ok(reply) => customer_ids.push(reply.into_value()),
            Err(status) => eprintln!("Failed to create {}: {}", name, status),
        }
    }
    println!("  {} customers", customer_ids.len());

    println!("Creating items...");
    let mut item_ids = Vec::with_capacity(ITEMS.len());
    for (sort, (name, cost_cents, price_cents)) in ITEMS.iter().enumerate() {
        let draft = ItemDraft {
            name: name.to_string(),
            cost_cents: *cost_cents,
            price_cents: *price_cents,
            sort: sort as i64 + 1,
        };
        match engine.items.create(draft).await {
            Ok(reply) => item_ids.push(reply.into_value()),
            Err(status) => eprintln!("Failed to create {}: {}", name, status),
        }
    }
    println!("  {} items", item_ids.len());

    if with_sales && !item_ids.is_empty() {
        println!("Recording sales...");
        let mut recorded = 0;
        for (n, customer_id) in customer_ids.iter().enumerate() {
            for k in 0..3 {
                let draft = TransactionDraft {
                    customer_id: *customer_id,
                    item_id: item_ids[(n * 3 + k) % item_ids.len()],
                    qty: (k + 1) as i64,
                    price_cents: None,
                };
                match engine.transactions.create(draft).await {
                    Ok(_) => recorded += 1,
                    Err(status) => eprintln!("Sale for customer {} rejected: {}", customer_id, status),
                }
            }
        }
        println!("  {} sales", recorded);
    }

    println!();
    println!("Balances:");
    for customer in engine.customers.get_all(Page::all()).await?.into_value() {
        println!("  {:<16} {:>10}", customer.name, customer.balance());
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
