//! Search bar and category selector.

use waymark_core::CategoryFilter;

use crate::commands::view::{self, View};
use crate::error::AppResult;
use crate::state::AppState;

/// Runs a text search. The selection is cleared as part of it.
pub fn search(state: &mut AppState, current: View, query: &str) -> String {
    state.search(query);
    view::render(state, current)
}

/// Changes the category projection over the last search.
pub fn category(state: &mut AppState, current: View, raw: &str) -> AppResult<String> {
    let filter: CategoryFilter = raw.parse()?;
    state.set_category(filter);
    Ok(view::render(state, current))
}
