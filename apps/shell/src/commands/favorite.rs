//! Favorite toggling from the detail panel (`fav`) or by id (`fav <id>`).

use waymark_core::LocationId;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub async fn toggle(state: &mut AppState, id: Option<i64>) -> AppResult<String> {
    let (id, now_favorite) = match id {
        Some(raw) => {
            let id = LocationId::new(raw);
            let now_favorite = state
                .toggle_favorite(id)
                .await?
                .ok_or_else(|| AppError::not_found(raw))?;
            (id, now_favorite)
        }
        None => {
            let id = state
                .selection()
                .focused_id()
                .ok_or_else(AppError::no_selection)?;
            let now_favorite = state
                .toggle_selected_favorite()
                .await?
                .ok_or_else(AppError::no_selection)?;
            (id, now_favorite)
        }
    };

    let name = state
        .location(id)
        .map(|l| l.name.as_str())
        .unwrap_or("location");
    let verb = if now_favorite { "Added" } else { "Removed" };
    let preposition = if now_favorite { "to" } else { "from" };
    Ok(format!(
        "{verb} {name} {preposition} favorites ({} total)",
        state.favorite_count()
    ))
}
