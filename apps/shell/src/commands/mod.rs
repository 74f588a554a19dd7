//! # Shell Commands
//!
//! Every line typed at the prompt is tokenized, parsed into a
//! [`ShellCommand`] with clap, and dispatched to a handler.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (tokenizer, parser, dispatch)
//! ├── location.rs  ◄─── list, add, edit, delete, select, reload
//! ├── favorite.rs  ◄─── fav
//! ├── search.rs    ◄─── search, category
//! └── view.rs      ◄─── map / favorites rendering, route
//! ```
//!
//! ## How a Line Is Handled
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  waymark> add "Venice Beach" 33.985 -118.4695 --category nature         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  tokenize()  ──► ["add", "Venice Beach", "33.985", "-118.4695", ...]    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CommandLine::try_parse_from ──► ShellCommand::Add { .. }              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Session::execute ──► location::add(&mut AppState, ..)                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Outcome::Continue(rendered view) ──► stdout                           │
//! │  Err(AppError)                    ──► "error: ..." notification         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod favorite;
pub mod location;
pub mod search;
pub mod view;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use view::View;

// =============================================================================
// Tokenizer
// =============================================================================

/// Splits a line on whitespace, keeping double-quoted runs together.
///
/// `\"` inside quotes is a literal quote.
pub fn tokenize(line: &str) -> AppResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            '\\' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        return Err(AppError::validation("Unterminated quote"));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

// =============================================================================
// Command Set
// =============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "waymark",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct CommandLine {
    #[command(subcommand)]
    command: ShellCommand,
}

/// Which of the two views is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewKind {
    Map,
    Favorites,
}

/// Commands accepted at the prompt.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum ShellCommand {
    /// Show the current view
    #[command(alias = "ls")]
    List,

    /// Search location names (empty query shows everything)
    Search {
        #[arg(num_args = 0..)]
        query: Vec<String>,
    },

    /// Filter by category: all, city, nature, restaurant, museum, hotel, other
    Category { filter: String },

    /// Focus a location
    Select { id: i64 },

    /// Clear the selection
    Clear,

    /// Add a location
    #[command(allow_negative_numbers = true)]
    Add {
        name: String,
        lat: String,
        lng: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        place_id: Option<String>,
    },

    /// Edit fields of a location
    #[command(allow_negative_numbers = true)]
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        lat: Option<String>,
        #[arg(long)]
        lng: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Empty string removes the image
        #[arg(long)]
        image_url: Option<String>,
        #[arg(long)]
        place_id: Option<String>,
    },

    /// Delete a location
    #[command(alias = "rm")]
    Delete { id: i64 },

    /// Remove the image of a location whose image does not load
    BrokenImage { id: i64 },

    /// Toggle a favorite (the selected location when no id is given)
    Fav { id: Option<i64> },

    /// Switch between the map view and the favorites view
    View {
        #[arg(value_enum)]
        which: ViewKind,
    },

    /// Directions link to the selected location
    Route {
        /// Start point as lat,lng
        #[arg(long, allow_hyphen_values = true)]
        from: Option<String>,
    },

    /// Reload locations and favorites from storage
    Reload,

    /// Show the command list
    Help,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Parses one input line. `Ok(None)` for a blank line.
pub fn parse_line(line: &str) -> AppResult<Option<ShellCommand>> {
    let tokens = tokenize(line)?;
    if tokens.is_empty() {
        return Ok(None);
    }

    CommandLine::try_parse_from(tokens)
        .map(|parsed| Some(parsed.command))
        .map_err(|e| AppError::validation(e.render().to_string().trim_end().to_string()))
}

// =============================================================================
// Session
// =============================================================================

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text and read the next line.
    Continue(String),
    Quit,
}

/// The controller plus the view currently on screen.
pub struct Session {
    pub state: AppState,
    pub view: View,
}

impl Session {
    pub fn new(state: AppState) -> Self {
        Session {
            state,
            view: View::Map,
        }
    }

    /// Parses and runs one input line.
    pub async fn handle_line(&mut self, line: &str) -> AppResult<Outcome> {
        match parse_line(line)? {
            Some(command) => self.execute(command).await,
            None => Ok(Outcome::Continue(String::new())),
        }
    }

    /// Runs a parsed command.
    pub async fn execute(&mut self, command: ShellCommand) -> AppResult<Outcome> {
        debug!(?command, "Executing command");

        let output = match command {
            ShellCommand::List => view::render(&self.state, self.view),
            ShellCommand::Search { query } => search::search(&mut self.state, self.view, &query.join(" ")),
            ShellCommand::Category { filter } => search::category(&mut self.state, self.view, &filter)?,
            ShellCommand::Select { id } => location::select(&mut self.state, self.view, id)?,
            ShellCommand::Clear => location::clear(&mut self.state, self.view),
            ShellCommand::Add {
                name,
                lat,
                lng,
                category,
                description,
                image_url,
                place_id,
            } => {
                let form = location::AddForm {
                    name,
                    lat,
                    lng,
                    category,
                    description,
                    image_url,
                    place_id,
                };
                location::add(&mut self.state, form).await?
            }
            ShellCommand::Edit {
                id,
                name,
                lat,
                lng,
                category,
                description,
                image_url,
                place_id,
            } => {
                let form = location::EditForm {
                    name,
                    lat,
                    lng,
                    category,
                    description,
                    image_url,
                    place_id,
                };
                location::edit(&mut self.state, id, form).await?
            }
            ShellCommand::Delete { id } => location::delete(&mut self.state, id).await?,
            ShellCommand::BrokenImage { id } => location::broken_image(&mut self.state, id).await?,
            ShellCommand::Fav { id } => favorite::toggle(&mut self.state, id).await?,
            ShellCommand::View { which } => {
                self.view = View::from(which);
                view::render(&self.state, self.view)
            }
            ShellCommand::Route { from } => view::route(&self.state, from.as_deref())?,
            ShellCommand::Reload => location::reload(&mut self.state, self.view).await?,
            ShellCommand::Help => help_text(),
            ShellCommand::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Continue(output))
    }
}

/// The command list, as clap renders it.
pub fn help_text() -> String {
    use clap::CommandFactory;
    CommandLine::command().render_help().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"add "Venice Beach" 33.985 -118.4695"#).unwrap(),
            vec!["add", "Venice Beach", "33.985", "-118.4695"]
        );
        assert_eq!(
            tokenize(r#"edit 1 --description "the \"big\" pier""#).unwrap(),
            vec!["edit", "1", "--description", r#"the "big" pier"#]
        );
        assert_eq!(tokenize(r#"edit 1 --image-url """#).unwrap(), vec!["edit", "1", "--image-url", ""]);
        assert!(tokenize("   ").unwrap().is_empty());
        assert!(tokenize(r#"add "Venice"#).is_err());
    }

    #[test]
    fn test_parse_add_with_negative_longitude() {
        let command = parse_line(r#"add "Venice Beach" 33.985 -118.4695 --category nature"#)
            .unwrap()
            .unwrap();
        match command {
            ShellCommand::Add { name, lat, lng, category, .. } => {
                assert_eq!(name, "Venice Beach");
                assert_eq!(lat, "33.985");
                assert_eq!(lng, "-118.4695");
                assert_eq!(category, "nature");
            }
            other => panic!("expected Add, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_search_joins_words() {
        let command = parse_line("search santa monica").unwrap().unwrap();
        assert_eq!(
            command,
            ShellCommand::Search {
                query: vec!["santa".into(), "monica".into()]
            }
        );
        assert_eq!(
            parse_line("search").unwrap().unwrap(),
            ShellCommand::Search { query: vec![] }
        );
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_line("fav").unwrap().unwrap(), ShellCommand::Fav { id: None });
        assert_eq!(parse_line("fav 3").unwrap().unwrap(), ShellCommand::Fav { id: Some(3) });
        assert_eq!(
            parse_line("view favorites").unwrap().unwrap(),
            ShellCommand::View {
                which: ViewKind::Favorites
            }
        );
        assert_eq!(
            parse_line("route --from 34.05,-118.24").unwrap().unwrap(),
            ShellCommand::Route {
                from: Some("34.05,-118.24".into())
            }
        );
        assert_eq!(parse_line("exit").unwrap().unwrap(), ShellCommand::Quit);
        assert_eq!(parse_line("").unwrap(), None);
    }

    #[test]
    fn test_parse_errors_are_validation() {
        let err = parse_line("select abc").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::Validation);
        assert!(parse_line("teleport").is_err());
    }

    #[test]
    fn test_help_lists_commands() {
        let help = help_text();
        assert!(help.contains("search"));
        assert!(help.contains("broken-image"));
    }
}
