mod common;

use std::sync::Arc;
use std::time::Duration;

use api::services::Topic;
use async_graphql::Variables;
use common::*;
use futures_util::StreamExt;
use infra::repos::GameState;
use infra::MemoryStore;
use serde_json::json;
use tokio::time::timeout;

const GAME_WON: &str = "subscription { gameWon { id state winner } }";

const SET_WINNER: &str = r#"
    mutation SetWinner($username: String!) {
        setWinner(username: $username) { id }
    }
"#;

async fn declare(app: &TestApp, username: &str) {
    let variables = Variables::from_json(json!({ "username": username }));
    let response = execute_graphql(&app.schema, SET_WINNER, Some(variables)).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
}

/// Poll the stream once so the resolver runs and registers with the hub.
async fn prime<S: futures_util::Stream + Unpin>(stream: &mut S) {
    let _ = timeout(Duration::from_millis(20), stream.next()).await;
}

#[tokio::test]
async fn test_subscriber_receives_one_event_per_win() {
    let app = setup_test_app();
    let game = create_test_game(&app.store, GameState::InProgress, 15).await;

    let mut stream = app.schema.execute_stream(GAME_WON);
    prime(&mut stream).await;
    assert_eq!(app.state.hub.subscriber_count(Topic::GameWon), 1);

    declare(&app, "Alice").await;

    let response = timeout(Duration::from_secs(1), stream.next())
        .await
        .expect("event should arrive")
        .expect("stream should stay open");
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(
        data["gameWon"],
        json!({ "id": game.id, "state": "WON", "winner": "Alice" })
    );

    // Nothing else is pending
    assert!(timeout(Duration::from_millis(50), stream.next())
        .await
        .is_err());
}

#[tokio::test]
async fn test_late_subscriber_gets_no_replay() {
    let app = setup_test_app();
    create_test_game(&app.store, GameState::InProgress, 15).await;

    declare(&app, "Alice").await;

    let mut stream = app.schema.execute_stream(GAME_WON);
    prime(&mut stream).await;

    assert!(timeout(Duration::from_millis(100), stream.next())
        .await
        .is_err());
}

#[tokio::test]
async fn test_every_subscriber_sees_events_in_order() {
    let app = setup_test_app();
    let first = create_test_game(&app.store, GameState::InProgress, 120).await;
    let second = create_test_game(&app.store, GameState::InProgress, 10).await;

    let mut left = app.schema.execute_stream(GAME_WON);
    let mut right = app.schema.execute_stream(GAME_WON);
    prime(&mut left).await;
    prime(&mut right).await;
    assert_eq!(app.state.hub.subscriber_count(Topic::GameWon), 2);

    // The newest active game is won first
    declare(&app, "Alice").await;
    declare(&app, "Bob").await;

    for stream in [&mut left, &mut right] {
        let mut seen = Vec::new();
        for _ in 0..2 {
            let response = timeout(Duration::from_secs(1), stream.next())
                .await
                .expect("event should arrive")
                .expect("stream should stay open");
            let data = response.data.into_json().unwrap();
            seen.push((
                data["gameWon"]["id"].as_i64().unwrap(),
                data["gameWon"]["winner"].as_str().unwrap().to_string(),
            ));
        }
        assert_eq!(
            seen,
            vec![
                (i64::from(second.id), "Alice".to_string()),
                (i64::from(first.id), "Bob".to_string()),
            ]
        );
    }
}

#[tokio::test]
async fn test_dropping_stream_unregisters_subscriber() {
    let app = setup_test_app();

    let mut stream = app.schema.execute_stream(GAME_WON);
    prime(&mut stream).await;
    assert_eq!(app.state.hub.subscriber_count(Topic::GameWon), 1);

    drop(stream);
    assert_eq!(app.state.hub.subscriber_count(Topic::GameWon), 0);
}

#[tokio::test]
async fn test_losing_winner_publishes_nothing() {
    let inner = MemoryStore::new();
    let game = create_test_game(&inner, GameState::InProgress, 15).await;
    let (state, schema) = setup_with_store(Arc::new(StaleActiveGameStore {
        inner,
        game: game.clone(),
    }));

    let mut stream = schema.execute_stream(GAME_WON);
    prime(&mut stream).await;
    assert_eq!(state.hub.subscriber_count(Topic::GameWon), 1);

    let variables = Variables::from_json(json!({ "username": "Alice" }));
    let response = execute_graphql(&schema, SET_WINNER, Some(variables)).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);

    let variables = Variables::from_json(json!({ "username": "Bob" }));
    let response = execute_graphql(&schema, SET_WINNER, Some(variables)).await;
    assert_eq!(first_error_code(&response).as_deref(), Some("CONFLICT"));

    let response = timeout(Duration::from_secs(1), stream.next())
        .await
        .expect("event should arrive")
        .expect("stream should stay open");
    let data = response.data.into_json().unwrap();
    assert_eq!(
        data["gameWon"],
        json!({ "id": game.id, "state": "WON", "winner": "Alice" })
    );

    // The losing call must not have produced a second event
    assert!(timeout(Duration::from_millis(50), stream.next())
        .await
        .is_err());
}
