//! # Location Commands
//!
//! ## Edit Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐  add    ┌──────────┐  edit / broken-image  ┌──────────┐  │
//! │  │  Draft   │────────►│  Stored  │──────────────────────►│ Updated  │  │
//! │  └──────────┘         └──────────┘                       └──────────┘  │
//! │                            │                                  │        │
//! │                            └────────────► delete ◄────────────┘        │
//! │                                      (favorite + selection pruned)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::warn;
use waymark_core::validation::{parse_coordinate, validate_category_input};
use waymark_core::{LocationDraft, LocationId, LocationPatch};

use crate::commands::view::{self, View};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Fields of the `add` command, as typed.
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    pub name: String,
    pub lat: String,
    pub lng: String,
    pub category: String,
    pub description: String,
    pub image_url: Option<String>,
    pub place_id: Option<String>,
}

impl From<AddForm> for LocationDraft {
    fn from(form: AddForm) -> Self {
        LocationDraft {
            name: form.name,
            lat: form.lat,
            lng: form.lng,
            category: form.category,
            description: form.description,
            image_url: form.image_url,
            place_id: form.place_id,
        }
    }
}

/// Fields of the `edit` command; unset flags leave a field alone.
#[derive(Debug, Clone, Default)]
pub struct EditForm {
    pub name: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub place_id: Option<String>,
}

impl EditForm {
    /// Parses the typed values into a patch.
    pub fn into_patch(self) -> AppResult<LocationPatch> {
        let lat = self
            .lat
            .map(|raw| parse_coordinate("lat", &raw))
            .transpose()
            .map_err(|e| AppError::validation(e.to_string()))?;
        let lng = self
            .lng
            .map(|raw| parse_coordinate("lng", &raw))
            .transpose()
            .map_err(|e| AppError::validation(e.to_string()))?;
        let category = self
            .category
            .map(|raw| validate_category_input(&raw))
            .transpose()
            .map_err(|e| AppError::validation(e.to_string()))?;

        Ok(LocationPatch {
            name: self.name.map(|n| n.trim().to_string()),
            lat,
            lng,
            category,
            description: self.description.map(|d| d.trim().to_string()),
            image_url: self.image_url,
            place_id: self.place_id,
        })
    }
}

pub async fn add(state: &mut AppState, form: AddForm) -> AppResult<String> {
    let created = state.add(&LocationDraft::from(form)).await?;
    Ok(format!(
        "Added [{}] {} ({})",
        created.id, created.name, created.category
    ))
}

pub async fn edit(state: &mut AppState, id: i64, form: EditForm) -> AppResult<String> {
    let patch = form.into_patch()?;
    if patch.is_empty() {
        return Err(AppError::validation("Nothing to change"));
    }

    let updated = state
        .update(LocationId::new(id), &patch)
        .await?
        .ok_or_else(|| AppError::not_found(id))?;
    Ok(format!("Updated [{}] {}", updated.id, updated.name))
}

pub async fn delete(state: &mut AppState, id: i64) -> AppResult<String> {
    let removed = state
        .delete(LocationId::new(id))
        .await?
        .ok_or_else(|| AppError::not_found(id))?;
    Ok(format!("Deleted [{}] {}", removed.id, removed.name))
}

pub async fn broken_image(state: &mut AppState, id: i64) -> AppResult<String> {
    let updated = state
        .clear_broken_image(LocationId::new(id))
        .await?
        .ok_or_else(|| AppError::not_found(id))?;
    Ok(format!("Removed image of [{}] {}", updated.id, updated.name))
}

/// Focuses a location and shows the view with its detail panel.
pub fn select(state: &mut AppState, current: View, id: i64) -> AppResult<String> {
    if state.select(LocationId::new(id)).is_none() {
        return Err(AppError::not_found(id));
    }
    Ok(view::render(state, current))
}

pub fn clear(state: &mut AppState, current: View) -> String {
    state.clear_selection();
    view::render(state, current)
}

/// Reloads from storage. A failed load keeps the current state and is only
/// reported.
pub async fn reload(state: &mut AppState, current: View) -> AppResult<String> {
    if let Err(e) = state.load().await {
        warn!(error = %e, "Reload failed, keeping current locations");
        return Err(e.into());
    }
    Ok(view::render(state, current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_core::Category;

    #[test]
    fn test_edit_form_into_patch() {
        let form = EditForm {
            name: Some("  Hollywood Bowl ".into()),
            lng: Some("-118.3389".into()),
            category: Some("City".into()),
            image_url: Some(String::new()),
            ..Default::default()
        };
        let patch = form.into_patch().unwrap();

        assert_eq!(patch.name.as_deref(), Some("Hollywood Bowl"));
        assert_eq!(patch.lat, None);
        assert_eq!(patch.lng, Some(-118.3389));
        assert_eq!(patch.category, Some(Category::City));
        assert_eq!(patch.image_url.as_deref(), Some(""));
    }

    #[test]
    fn test_edit_form_rejects_bad_values() {
        let form = EditForm {
            lat: Some("north".into()),
            ..Default::default()
        };
        assert!(form.into_patch().is_err());

        let form = EditForm {
            category: Some("beach".into()),
            ..Default::default()
        };
        assert!(form.into_patch().is_err());
    }

    #[test]
    fn test_empty_edit_form_is_empty_patch() {
        assert!(EditForm::default().into_patch().unwrap().is_empty());
    }
}
