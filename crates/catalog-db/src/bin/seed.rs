//! # Seed Data Generator
//!
//! Populates the catalog with sample products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p catalog-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p catalog-db --bin seed -- --count 1000
//!
//! # Specify database path
//! cargo run -p catalog-db --bin seed -- --db ./data/catalog.db
//! ```
//!
//! ## Generated Products
//! Names are drawn from the four catalog categories and combined with a
//! variant suffix. Prices range over $1.99 - $99.99 and roughly one product
//! in seven is out of stock. Every product goes through the same validation
//! as an API create.

use catalog_core::{ProductDraft, ProductFilter};
use catalog_db::{CatalogService, Database, DbConfig};
use std::env;

/// Product names per category wire name.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "ELECTRONICS",
        &[
            "Wireless Mouse",
            "Mechanical Keyboard",
            "USB-C Hub",
            "Noise Cancelling Headphones",
            "Portable Speaker",
            "Webcam",
            "Desk Lamp",
            "Power Bank",
            "Smart Watch",
            "Monitor Stand",
        ],
    ),
    (
        "CLOTHING",
        &[
            "Cotton T-Shirt",
            "Denim Jacket",
            "Wool Socks",
            "Rain Coat",
            "Running Shorts",
            "Linen Shirt",
            "Knit Beanie",
            "Leather Belt",
            "Hoodie",
            "Chino Pants",
        ],
    ),
    (
        "BOOKS",
        &[
            "Systems Programming Primer",
            "Gardening for Beginners",
            "World Atlas",
            "Mystery Novel",
            "Cookbook: 100% Vegetarian",
            "History of Maps",
            "Poetry Collection",
            "Field Guide to Birds",
            "Travel Journal",
            "Children's Picture Book",
        ],
    ),
    (
        "FOOD",
        &[
            "Dark Chocolate",
            "Green Tea",
            "Espresso Beans",
            "Olive Oil",
            "Wildflower Honey",
            "Basmati Rice",
            "Granola",
            "Sea Salt",
            "Maple Syrup",
            "Peanut Butter",
        ],
    ),
];

/// Variant suffixes appended to each name.
const VARIANTS: &[&str] = &["", "Mini", "Pro", "XL", "Classic", "Deluxe"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./catalog.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
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
                println!("Product Catalog Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./catalog.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Product Catalog Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database, migrations applied");

    // Check existing products
    let existing = db.products().count(&ProductFilter::new()).await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let catalog = CatalogService::new(db.clone());

    println!();
    println!("Generating products...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let draft = generate_draft(seed);
        let name = draft.name.clone().unwrap_or_default();

        if let Err(e) = catalog.create_product(draft).await {
            eprintln!("Failed to insert {}: {}", name, e);
            continue;
        }

        generated += 1;
        if generated % 50 == 0 {
            println!("  Generated {} products...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    let stats = db.products().stats(&ProductFilter::new()).await?;
    println!(
        "  Stats: total={} inStock={} outOfStock={}",
        stats.total, stats.in_stock, stats.out_of_stock
    );

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds the `seed`-th sample product. Deterministic, so reruns on an empty
/// store produce the same catalog (with fresh ids).
fn generate_draft(seed: usize) -> ProductDraft {
    let (category, names) = CATEGORIES[seed % CATEGORIES.len()];
    let base = names[(seed / CATEGORIES.len()) % names.len()];
    let variant = VARIANTS[(seed / (CATEGORIES.len() * names.len())) % VARIANTS.len()];

    let name = if variant.is_empty() {
        base.to_string()
    } else {
        format!("{} {}", base, variant)
    };

    // $1.99 - $99.99
    let price_cents = 199 + (seed * 37) % 9801;
    let stock = if seed % 7 == 0 { 0 } else { (seed * 13) % 120 + 1 };

    ProductDraft {
        description: Some(format!("{} from the {} range.", name, category.to_lowercase())),
        name: Some(name),
        price: Some(price_cents as f64 / 100.0),
        stock: Some(stock as f64),
        category: Some(category.to_string()),
    }
}
