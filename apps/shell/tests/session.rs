//! End-to-end command handling against an in-memory database.

use waymark_core::LocationId;
use waymark_db::{Database, DbConfig};
use waymark_shell::commands::view::View;
use waymark_shell::commands::{Outcome, Session};
use waymark_shell::error::ErrorCode;
use waymark_shell::state::{AppState, LocalBackend, LocalFavorites};

async fn session_with_demo_data() -> (Session, Database) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    waymark_db::seed::seed_demo(&db, false).await.unwrap();

    let mut state = AppState::new(
        Box::new(LocalBackend::new(db.snapshots())),
        Box::new(LocalFavorites::new(db.favorites())),
    );
    state.load().await.unwrap();
    (Session::new(state), db)
}

async fn run(session: &mut Session, line: &str) -> String {
    match session.handle_line(line).await {
        Ok(Outcome::Continue(text)) => text,
        Ok(Outcome::Quit) => panic!("unexpected quit on {line:?}"),
        Err(e) => panic!("{line:?} failed: {e}"),
    }
}

#[tokio::test]
async fn add_select_favorite_and_delete() {
    let (mut session, db) = session_with_demo_data().await;

    let added = run(
        &mut session,
        r#"add "Venice Beach" 33.985 -118.4695 --category nature --description "Boardwalk""#,
    )
    .await;
    assert_eq!(added, "Added [4] Venice Beach (nature)");

    let text = run(&mut session, "select 4").await;
    assert!(text.contains("> [4] Venice Beach"));

    let text = run(&mut session, "fav").await;
    assert_eq!(text, "Added Venice Beach to favorites (1 total)");

    let text = run(&mut session, "view favorites").await;
    assert_eq!(session.view, View::Favorites);
    assert!(text.contains("── Venice Beach "));

    run(&mut session, "delete 4").await;
    assert!(session.state.selection().is_empty());
    assert_eq!(session.state.favorite_count(), 0);

    assert_eq!(db.snapshots().load().await.unwrap().len(), 3);
    assert!(db.favorites().load().await.is_empty());
}

#[tokio::test]
async fn search_then_category_projection() {
    let (mut session, _db) = session_with_demo_data().await;
    run(&mut session, "select 1").await;

    let text = run(&mut session, "search santa").await;
    assert!(text.contains("Map view · 1 of 3 locations"));
    assert!(session.state.selection().is_empty());

    run(&mut session, "select 2").await;
    let text = run(&mut session, "category city").await;
    assert!(text.contains("No locations match."));
    assert!(session.state.selection().is_focused_on(LocationId::new(2)));

    let text = run(&mut session, "search").await;
    assert!(text.contains("Map view · 1 of 3 locations · filter: city"));
}

#[tokio::test]
async fn invalid_input_reports_errors_without_changes() {
    let (mut session, db) = session_with_demo_data().await;

    let err = session.handle_line(r#"add "" 1 2"#).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);

    let err = session.handle_line("add Pier abc 2").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);

    let err = session.handle_line("category beach").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::Validation);

    let err = session.handle_line("delete 99").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);

    let err = session.handle_line("fav").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NoSelection);

    assert_eq!(db.snapshots().load().await.unwrap().len(), 3);
}

#[tokio::test]
async fn edit_and_broken_image() {
    let (mut session, db) = session_with_demo_data().await;

    run(
        &mut session,
        r#"edit 3 --name "Hollywood Sign" --image-url https://img.example/sign.jpg"#,
    )
    .await;
    run(&mut session, "select 3").await;
    assert_eq!(
        session.state.selection().focused().unwrap().image_url.as_deref(),
        Some("https://img.example/sign.jpg")
    );

    let text = run(&mut session, "broken-image 3").await;
    assert_eq!(text, "Removed image of [3] Hollywood Sign");
    assert_eq!(session.state.selection().focused().unwrap().image_url, None);

    let stored = db.snapshots().load().await.unwrap();
    assert_eq!(stored[2].name, "Hollywood Sign");
    assert_eq!(stored[2].image_url, None);
}

#[tokio::test]
async fn route_and_quit() {
    let (mut session, _db) = session_with_demo_data().await;
    run(&mut session, "select 2").await;

    let text = run(&mut session, "route").await;
    assert!(text.starts_with("Directions to Santa Monica: https://www.google.com/maps/dir/?api=1"));

    assert_eq!(session.handle_line("quit").await.unwrap(), Outcome::Quit);
}
