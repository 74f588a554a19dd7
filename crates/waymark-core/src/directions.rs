//! External directions links for a location.
//!
//! The link opens the maps provider's route planner. Without an origin the
//! provider starts from the device position.

use url::Url;

use crate::error::ValidationError;
use crate::types::Location;
use crate::validation::{parse_coordinate, ValidationResult};

/// Route planner endpoint of the maps provider.
pub const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/";

/// Builds the directions link to `destination`.
///
/// ## Example
/// ```rust
/// use waymark_core::directions::directions_url;
/// use waymark_core::{LocationDraft, LocationId};
/// use waymark_core::validation::validate_draft;
///
/// let pier = validate_draft(&LocationDraft::new("Santa Monica", "34.019454", "-118.491191"))
///     .unwrap()
///     .into_location(LocationId::new(2), None);
///
/// let url = directions_url(None, &pier).unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://www.google.com/maps/dir/?api=1&destination=34.019454,-118.491191"
/// );
/// ```
pub fn directions_url(origin: Option<(f64, f64)>, destination: &Location) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(DIRECTIONS_BASE_URL)?;

    let mut query = String::from("api=1");
    if let Some((lat, lng)) = origin {
        query.push_str(&format!("&origin={lat},{lng}"));
    }
    query.push_str(&format!("&destination={},{}", destination.lat, destination.lng));

    url.set_query(Some(&query));
    Ok(url)
}

/// Parses an origin written as `lat,lng`.
pub fn parse_origin(raw: &str) -> ValidationResult<(f64, f64)> {
    let (lat, lng) = raw.split_once(',').ok_or_else(|| ValidationError::NotANumber {
        field: "origin".to_string(),
        value: raw.trim().to_string(),
    })?;

    Ok((parse_coordinate("lat", lat)?, parse_coordinate("lng", lng)?))
}
