//! # Waymark Shell Library
//!
//! Interactive front-end for the Waymark state layer.
//!
//! ## Module Organization
//! ```text
//! waymark_shell/
//! ├── lib.rs          ◄─── You are here (startup & loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── app.rs      ◄─── AppState controller
//! │   ├── backend.rs  ◄─── Local / remote persistence targets
//! │   └── config.rs   ◄─── Configuration loading
//! ├── commands/
//! │   ├── mod.rs      ◄─── Tokenizer, parser, dispatch
//! │   ├── location.rs ◄─── add / edit / delete / select
//! │   ├── favorite.rs ◄─── fav
//! │   ├── search.rs   ◄─── search / category
//! │   └── view.rs     ◄─── map and favorites rendering
//! └── error.rs        ◄─── StoreError / AppError
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use waymark_db::{Database, DbConfig};
use waymark_remote::RemoteClient;

use commands::{Outcome, Session};
use error::{AppError, AppResult};
use state::{AppConfig, AppState, LocalBackend, LocalFavorites, LocationBackend, RemoteBackend, StorageMode};

/// Name given to the trip created on first remote start.
pub const DEFAULT_TRIP_NAME: &str = "Your Trip";

/// Startup flags.
#[derive(Debug, Parser)]
#[command(name = "waymark", version, about = "Bookmark places, mark favorites, plan routes")]
pub struct Args {
    /// Config file (defaults to waymark.toml in the platform config dir)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Where locations are stored: local or remote
    #[arg(long)]
    pub storage: Option<StorageMode>,

    /// Trip to attach to in remote mode
    #[arg(long)]
    pub trip: Option<String>,

    /// Write the sample locations to the local snapshot before starting
    #[arg(long)]
    pub seed_demo: bool,
}

/// Runs the shell.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Shell Startup                                     │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → waymark.toml → WAYMARK_* → flags                       │
/// │                                                                         │
/// │  3. Open Local Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, migrations applied                          │
/// │     • favorites always live here                                        │
/// │                                                                         │
/// │  4. Pick Location Backend ────────────────────────────────────────────► │
/// │     • local: snapshot in the same database                              │
/// │     • remote: hosted table (trip created when none is configured)       │
/// │                                                                         │
/// │  5. Initial Load (failure logged only) ───────────────────────────────► │
/// │                                                                         │
/// │  6. Read commands from stdin until `quit` or EOF                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(args: Args) -> AppResult<()> {
    init_tracing();
    info!("Starting Waymark");

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(mode) = args.storage {
        config.storage.mode = mode;
    }
    if let Some(trip) = args.trip {
        config.trip_id = Some(trip);
    }
    config.validate()?;

    let db_path = config.database_path()?;
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::config(format!("Cannot create {}: {e}", parent.display())))?;
    }
    info!(?db_path, mode = %config.mode(), "Opening local database");
    let db = Database::new(DbConfig::new(db_path)).await?;

    if args.seed_demo {
        let written = waymark_db::seed::seed_demo(&db, false).await?;
        info!(written, "Demo seed finished");
    }

    let mut notices = Vec::new();
    let backend: Box<dyn LocationBackend> = match config.mode() {
        StorageMode::Local => Box::new(LocalBackend::new(db.snapshots())),
        StorageMode::Remote => {
            let client = RemoteClient::new(&config.remote)?;
            notices.push(ensure_trip(&client, &config).await);
            Box::new(RemoteBackend::new(client, config.remote.table.clone()))
        }
    };

    let mut state = AppState::new(backend, Box::new(LocalFavorites::new(db.favorites())));
    if let Err(e) = state.load().await {
        warn!(error = %e, "Initial load failed, starting with an empty list");
    }

    let session = Session::new(state);
    let result = interaction_loop(session, notices).await;

    db.close().await;
    info!("Waymark stopped");
    result
}

/// Creates a trip when remote mode starts without one.
///
/// ## Returns
/// A line for the user: the trip in use, the newly created id, or the
/// failure. A failure does not stop the shell.
async fn ensure_trip(client: &RemoteClient, config: &AppConfig) -> String {
    match config.trip_id() {
        Ok(Some(trip)) => format!("Trip: {trip}"),
        Ok(None) => match client.create_trip(DEFAULT_TRIP_NAME).await {
            Ok(trip) => {
                info!(%trip, "Created trip");
                format!("Created trip \"{DEFAULT_TRIP_NAME}\": {trip} (pass --trip {trip} to reuse it)")
            }
            Err(e) => {
                error!(error = %e, "Failed to create trip");
                format!("error: {}", AppError::from(e).message)
            }
        },
        Err(e) => format!("error: {}", e.message),
    }
}

/// Reads stdin line by line until `quit` or end of input.
async fn interaction_loop(mut session: Session, notices: Vec<String>) -> AppResult<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut banner = format!(
        "Waymark · {} · type `help` for commands\n",
        session.state.backend_name()
    );
    for notice in notices {
        banner.push_str(&notice);
        banner.push('\n');
    }
    banner.push('\n');
    banner.push_str(&commands::view::render(&session.state, session.view));
    write_out(&mut stdout, &banner).await?;

    loop {
        write_out(&mut stdout, "waymark> ").await?;
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(AppError::internal(format!("Cannot read input: {e}"))),
        };

        match session.handle_line(&line).await {
            Ok(Outcome::Continue(output)) => {
                if !output.is_empty() {
                    write_out(&mut stdout, &format!("{}\n", output.trim_end())).await?;
                }
            }
            Ok(Outcome::Quit) => break,
            Err(e) => write_out(&mut stdout, &format!("error: {}\n", e.message)).await?,
        }
    }
    Ok(())
}

async fn write_out(stdout: &mut tokio::io::Stdout, text: &str) -> AppResult<()> {
    stdout
        .write_all(text.as_bytes())
        .await
        .map_err(|e| AppError::internal(format!("Cannot write output: {e}")))?;
    stdout
        .flush()
        .await
        .map_err(|e| AppError::internal(format!("Cannot write output: {e}")))
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so the views on stdout stay readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=waymark=trace` - Show trace for waymark crates only
/// - Default: `info,waymark=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,waymark=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
