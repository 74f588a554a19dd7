//! # Sample Data Seeder
//!
//! Writes the three Los Angeles sample locations into the local snapshot.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p waymark-db --bin seed
//!
//! # Specify database path, overwrite an existing snapshot
//! cargo run -p waymark-db --bin seed -- --db ./data/waymark.db --force
//! ```
//!
//! See [`waymark_db::seed`] for the sample set.

use std::env;
use waymark_db::seed::demo_locations;
use waymark_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./waymark_dev.db");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Waymark Sample Data Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./waymark_dev.db)");
                println!("  -f, --force        Overwrite an existing location snapshot");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Waymark Sample Data Seeder");
    println!("==========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.snapshots().load().await?;
    if !existing.is_empty() && !force {
        println!("⚠ Snapshot already has {} locations", existing.len());
        println!("  Skipping seed. Pass --force to overwrite.");
        return Ok(());
    }

    let locations = demo_locations();
    db.snapshots().save(&locations).await?;

    println!();
    for location in &locations {
        println!(
            "  {:>2}  {:<22} {:<8} ({:.6}, {:.6})",
            location.id.get(),
            location.name,
            location.category.as_str(),
            location.lat,
            location.lng
        );
    }
    println!();
    println!("✓ Seeded {} locations", locations.len());

    db.close().await;
    Ok(())
}
