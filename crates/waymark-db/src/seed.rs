//! Demo data for local-only mode.
//!
//! The three samples come from data that used the categories `beach` and
//! `entertainment`. Those are outside the closed enumeration, so Santa
//! Monica is stored as `nature` and Hollywood as `other`.

use chrono::Utc;
use tracing::info;
use waymark_core::{Category, Location, LocationId};

use crate::error::DbResult;
use crate::pool::Database;

/// (name, lat, lng, category, description)
const SAMPLES: &[(&str, f64, f64, Category, &str)] = &[
    (
        "Los Angeles Downtown",
        34.052235,
        -118.243683,
        Category::City,
        "Central Los Angeles. High-rises, sightseeing and the business district.",
    ),
    (
        "Santa Monica",
        34.019454,
        -118.491191,
        Category::Nature,
        "Resort area known for its beach and pier. Relaxed atmosphere.",
    ),
    (
        "Hollywood",
        34.092809,
        -118.328659,
        Category::Other,
        "The film town. Plenty of sights and entertainment venues.",
    ),
];

/// The sample locations with ids 1..=3, stamped with the current time.
pub fn demo_locations() -> Vec<Location> {
    let now = Utc::now();
    SAMPLES
        .iter()
        .enumerate()
        .map(|(i, (name, lat, lng, category, description))| Location {
            id: LocationId::new(i as i64 + 1),
            name: name.to_string(),
            lat: *lat,
            lng: *lng,
            category: *category,
            description: description.to_string(),
            image_url: None,
            place_id: None,
            created_at: Some(now),
        })
        .collect()
}

/// Writes the demo locations unless a snapshot already exists.
///
/// ## Returns
/// The number of locations written (0 when skipped).
pub async fn seed_demo(db: &Database, force: bool) -> DbResult<usize> {
    let snapshots = db.snapshots();
    let existing = snapshots.load().await?;
    if !existing.is_empty() && !force {
        info!(count = existing.len(), "Snapshot already populated, skipping demo seed");
        return Ok(0);
    }

    let locations = demo_locations();
    snapshots.save(&locations).await?;
    info!(count = locations.len(), "Seeded demo locations");
    Ok(locations.len())
}
