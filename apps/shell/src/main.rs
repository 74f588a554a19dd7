//! # Waymark Shell Entry Point
//!
//! ## Startup Sequence
//! 1. Parse startup flags
//! 2. Initialize tracing (logging)
//! 3. Load configuration
//! 4. Open the local database & run migrations
//! 5. Pick the location backend
//! 6. Read commands until `quit`

use clap::Parser;
use waymark_shell::Args;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let args = Args::parse();

    // The actual setup is in lib.rs for better testability
    match waymark_shell::run(args).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("waymark: {}", e.message);
            std::process::ExitCode::FAILURE
        }
    }
}
