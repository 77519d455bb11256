//! # Seed Data Generator
//!
//! Populates the database with demo products and members for development.
//!
//! ## Usage
//! ```bash
//! # Generate default amounts (200 products, 50 members)
//! cargo run -p coop-db --bin seed
//!
//! # Generate custom amounts
//! cargo run -p coop-db --bin seed -- --products 500 --members 120
//!
//! # Specify database path
//! cargo run -p coop-db --bin seed -- --db ./data/coop.db
//! ```
//!
//! ## Generated Data
//! Products across typical cooperative store shelves (grocery, household,
//! drinks, garden) with deterministic pseudo-random prices and stock.
//! Members join across the trailing twelve months so the dashboard growth
//! series has something to show.

use chrono::{Months, Utc};
use std::env;

use coop_core::validation::{MemberInput, ProductInput};
use coop_core::MemberStatus;
use coop_db::{Database, DbConfig};

/// Product categories for realistic demo data
const SHELVES: &[(&str, &str, &[&str])] = &[
    (
        "Grocery",
        "GRO",
        &[
            "Rice 5kg",
            "Rice 10kg",
            "Flour 1kg",
            "Sugar 1kg",
            "Salt 500g",
            "Tinned Fish",
            "Tinned Beef",
            "Instant Noodles",
            "Breakfast Crackers",
            "Cooking Oil 1L",
            "Tea Bags 50",
            "Coffee 200g",
            "Powdered Milk 400g",
            "Canned Corn",
            "Canned Tomatoes",
        ],
    ),
    (
        "Drinks",
        "DRK",
        &[
            "Bottled Water 1.5L",
            "Lemonade 1L",
            "Cola Can",
            "Orange Juice 1L",
            "Coconut Water",
            "Cordial 2L",
        ],
    ),
    (
        "Household",
        "HSE",
        &[
            "Laundry Soap",
            "Bath Soap",
            "Dish Liquid",
            "Bleach 750ml",
            "Matches",
            "Kerosene 1L",
            "Mosquito Coils",
            "Batteries AA",
            "Candles Pack",
            "Toilet Paper 4pk",
        ],
    ),
    (
        "Garden",
        "GDN",
        &[
            "Bush Knife",
            "Garden Fork",
            "Seed Packet Tomato",
            "Seed Packet Cabbage",
            "Twine Roll",
            "Rake",
        ],
    ),
];

/// Given names for member generation
const GIVEN_NAMES: &[&str] = &[
    "Alice", "Ben", "Carol", "David", "Esther", "Frank", "Grace", "Henry", "Iris", "John", "Kathy",
    "Leo", "Mary", "Noah", "Olive", "Peter", "Ruth", "Samuel", "Tina", "Walter",
];

/// Family names for member generation
const FAMILY_NAMES: &[&str] = &[
    "Aru", "Bani", "Kalo", "Lini", "Moli", "Natu", "Obed", "Rara", "Sope", "Tari",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut product_count: usize = 200;
    let mut member_count: usize = 50;
    let mut db_path = String::from("./coop_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--products" | "-p" => {
                if i + 1 < args.len() {
                    product_count = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "--members" | "-m" => {
                if i + 1 < args.len() {
                    member_count = args[i + 1].parse().unwrap_or(50);
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
                println!("Coop POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --products <N>  Number of products to generate (default: 200)");
                println!("  -m, --members <N>   Number of members to generate (default: 50)");
                println!("  -d, --db <PATH>     Database file path (default: ./coop_dev.db)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Coop POS Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!("Products: {}", product_count);
    println!("Members:  {}", member_count);
    println!();

    // Connect to database (runs migrations)
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("Connected to database, migrations applied");

    // Refuse to double-seed
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("Database already has {} products", existing);
        println!("Skipping seed to avoid duplicates.");
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let mut generated = 0;
    'shelves: for (category, code, names) in SHELVES {
        for (idx, name) in names.iter().enumerate() {
            if generated >= product_count {
                break 'shelves;
            }

            let input = generate_product(category, code, name, generated * 31 + idx);
            if let Err(e) = db.products().create(&input).await {
                eprintln!("Failed to insert {}: {}", input.name, e);
                continue;
            }
            generated += 1;
        }
    }

    println!("  {} products", generated);
    println!();
    println!("Generating members...");

    let mut joined = 0;
    for idx in 0..member_count {
        let input = generate_member(idx);
        if let Err(e) = db.members().create(&input).await {
            eprintln!("Failed to insert {}: {}", input.member_code, e);
            continue;
        }
        joined += 1;
    }

    println!("  {} members", joined);
    println!();
    println!("Seed complete!");

    Ok(())
}

/// Generates a single product with deterministic pseudo-random fields.
fn generate_product(category: &str, code: &str, name: &str, seed: usize) -> ProductInput {
    // Price 1.50 - 25.00, cost 60-80% of price
    let selling_price_cents = 150 + ((seed * 173) % 2350) as i64;
    let cost_pct = 60 + (seed % 20) as i64;
    let cost_price_cents = selling_price_cents * cost_pct / 100;

    ProductInput {
        name: name.to_string(),
        barcode: Some(format!("978{:010}", seed)),
        sku: Some(format!("{}-{:03}", code, seed % 1000)),
        category: category.to_string(),
        selling_price_cents,
        cost_price_cents,
        current_stock: ((seed * 7) % 101) as i64,
        min_stock: (5 + seed % 16) as i64,
        unit: "piece".to_string(),
        description: None,
    }
}

/// Generates a single member joined somewhere in the trailing year.
fn generate_member(idx: usize) -> MemberInput {
    let given = GIVEN_NAMES[idx % GIVEN_NAMES.len()];
    let family = FAMILY_NAMES[(idx / GIVEN_NAMES.len() + idx) % FAMILY_NAMES.len()];
    let name = format!("{} {}", given, family);

    let email = format!(
        "{}.{}{}@coop.example",
        given.to_lowercase(),
        family.to_lowercase(),
        idx
    );

    let months_back = (idx * 5) % 12;
    let join_date = Utc::now()
        .date_naive()
        .checked_sub_months(Months::new(months_back as u32))
        .unwrap_or_else(|| Utc::now().date_naive());

    MemberInput {
        name,
        email: Some(email),
        phone: None,
        member_code: format!("MBR-{:04}", idx + 1),
        join_date,
        status: if idx % 13 == 0 {
            MemberStatus::Inactive
        } else {
            MemberStatus::Active
        },
        notes: None,
    }
}
