//! # Views
//!
//! Text rendering of the two views. Both receive the same derived state
//! from [`AppState`].
//!
//! ## Map View
//! ```text
//! Map view · 2 of 3 locations · filter: all · query: "holly" · 1 favorite
//! Center: 34.092809, -118.328659 (zoom 15)
//!
//!   > [2] Hollywood                      other        34.092809, -118.328659 *
//!     [3] Holly Hill Museum              museum       34.000000, -118.400000
//!
//! ── Hollywood ─────────────────────────────────────────────────────────────
//!   ...detail panel...
//! ```
//!
//! ## Favorites View
//! Favorite locations in store order, plus the detail panel when the
//! selection is one of them.

use std::fmt::Write;

use waymark_core::directions::{directions_url, parse_origin};
use waymark_core::{Location, DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM};

use crate::commands::ViewKind;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Zoom used when the map pans to the selected location.
pub const FOCUS_ZOOM: u8 = 15;

/// The two navigation routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Map,
    Favorites,
}

impl From<ViewKind> for View {
    fn from(kind: ViewKind) -> Self {
        match kind {
            ViewKind::Map => View::Map,
            ViewKind::Favorites => View::Favorites,
        }
    }
}

pub fn render(state: &AppState, view: View) -> String {
    match view {
        View::Map => render_map(state),
        View::Favorites => render_favorites(state),
    }
}

/// Map center and zoom: the selection, or the default center.
pub fn map_focus(state: &AppState) -> ((f64, f64), u8) {
    match state.selection().focused() {
        Some(location) => (location.coordinates(), FOCUS_ZOOM),
        None => (DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM),
    }
}

pub fn render_map(state: &AppState) -> String {
    let visible = state.visible();
    let filter = state.filter();
    let mut out = String::new();

    let _ = write!(
        out,
        "Map view · {} of {} locations · filter: {}",
        visible.len(),
        state.locations().len(),
        filter.category
    );
    if !filter.query.is_empty() {
        let _ = write!(out, " · query: \"{}\"", filter.query);
    }
    let _ = writeln!(out, " · {}", favorites_label(state.favorite_count()));

    let ((lat, lng), zoom) = map_focus(state);
    let _ = writeln!(out, "Center: {lat:.6}, {lng:.6} (zoom {zoom})");
    out.push('\n');

    if visible.is_empty() {
        out.push_str("  No locations match.\n");
    }
    for location in &visible {
        out.push_str(&row(state, location));
    }

    if let Some(selected) = state.selection().focused() {
        out.push('\n');
        out.push_str(&render_detail(selected, state.is_selected_favorite()));
    }
    out
}

pub fn render_favorites(state: &AppState) -> String {
    let favorites = state.favorite_locations();
    let mut out = String::new();
    let _ = writeln!(out, "Favorites · {}", favorites_label(favorites.len()));
    out.push('\n');

    if favorites.is_empty() {
        out.push_str("  No favorites yet. Select a location and type `fav`.\n");
    }
    for location in &favorites {
        out.push_str(&row(state, location));
    }

    if state.is_selected_favorite() {
        if let Some(selected) = state.selection().focused() {
            out.push('\n');
            out.push_str(&render_detail(selected, true));
        }
    }
    out
}

fn favorites_label(count: usize) -> String {
    if count == 1 {
        "1 favorite".to_string()
    } else {
        format!("{count} favorites")
    }
}

fn row(state: &AppState, location: &Location) -> String {
    let marker = if state.selection().is_focused_on(location.id) {
        '>'
    } else {
        ' '
    };
    let star = if state.is_favorite(location.id) { " *" } else { "" };
    format!(
        "  {marker} [{}] {:<30} {:<12} {:.6}, {:.6}{star}\n",
        location.id,
        location.name,
        location.category.as_str(),
        location.lat,
        location.lng
    )
}

/// The detail panel of one location.
pub fn render_detail(location: &Location, is_favorite: bool) -> String {
    let mut out = String::new();
    let title = format!("── {} ", location.name);
    let width = 74usize.saturating_sub(title.chars().count());
    let _ = writeln!(out, "{title}{}", "─".repeat(width));
    let _ = writeln!(out, "  id:          {}", location.id);
    let _ = writeln!(out, "  category:    {}", location.category);
    let _ = writeln!(out, "  coordinates: {:.6}, {:.6}", location.lat, location.lng);
    if !location.description.is_empty() {
        let _ = writeln!(out, "  description: {}", location.description);
    }
    if let Some(image_url) = &location.image_url {
        let _ = writeln!(out, "  image:       {image_url}");
    }
    if let Some(place_id) = &location.place_id {
        let _ = writeln!(out, "  place:       {place_id}");
    }
    if let Some(created_at) = location.created_at {
        let _ = writeln!(out, "  added:       {}", created_at.format("%Y-%m-%d %H:%M"));
    }
    let _ = writeln!(
        out,
        "  favorite:    {} (type `fav` to toggle)",
        if is_favorite { "yes" } else { "no" }
    );
    out
}

/// Directions link to the selected location.
pub fn route(state: &AppState, from: Option<&str>) -> AppResult<String> {
    let destination = state.selection().focused().ok_or_else(AppError::no_selection)?;
    let origin = from
        .map(parse_origin)
        .transpose()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let url = directions_url(origin, destination)
        .map_err(|e| AppError::internal(format!("Cannot build directions link: {e}")))?;
    Ok(format!("Directions to {}: {url}", destination.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::{AppState, LocalBackend, LocalFavorites};
    use waymark_core::{CategoryFilter, Category, LocationId};
    use waymark_db::{Database, DbConfig};

    async fn demo_state() -> AppState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        waymark_db::seed::seed_demo(&db, false).await.unwrap();
        let mut state = AppState::new(
            Box::new(LocalBackend::new(db.snapshots())),
            Box::new(LocalFavorites::new(db.favorites())),
        );
        state.load().await.unwrap();
        state
    }

    #[tokio::test]
    async fn test_map_view_lists_visible_locations() {
        let mut state = demo_state().await;
        state.set_category(CategoryFilter::Only(Category::Nature));

        let text = render_map(&state);
        assert!(text.starts_with("Map view · 1 of 3 locations · filter: nature"));
        assert!(text.contains("Santa Monica"));
        assert!(!text.contains("Hollywood"));
        assert!(text.contains("Center: 34.052235, -118.243683 (zoom 12)"));
    }

    #[tokio::test]
    async fn test_map_view_shows_selection_detail() {
        let mut state = demo_state().await;
        state.select(LocationId::new(3));
        state.toggle_selected_favorite().await.unwrap();

        let text = render_map(&state);
        assert!(text.contains("> [3] Hollywood"));
        assert!(text.contains("── Hollywood "));
        assert!(text.contains("favorite:    yes"));
        assert!(text.contains("(zoom 15)"));
        assert!(text.contains("1 favorite"));
    }

    #[tokio::test]
    async fn test_favorites_view() {
        let mut state = demo_state().await;
        assert!(render_favorites(&state).contains("No favorites yet"));

        state.toggle_favorite(LocationId::new(2)).await.unwrap();
        state.select(LocationId::new(1));
        let text = render_favorites(&state);
        assert!(text.contains("Santa Monica"));
        assert!(!text.contains("LA Downtown"));
        assert!(!text.contains("──"));

        state.select(LocationId::new(2));
        assert!(render_favorites(&state).contains("── Santa Monica "));
    }

    #[tokio::test]
    async fn test_route_needs_selection() {
        let mut state = demo_state().await;
        assert_eq!(route(&state, None).unwrap_err().code, ErrorCode::NoSelection);

        state.select(LocationId::new(2));
        let text = route(&state, Some("34.05,-118.24")).unwrap();
        assert!(text.contains("origin=34.05,-118.24"));
        assert!(text.contains("destination="));

        assert!(route(&state, Some("nowhere")).is_err());
    }
}
