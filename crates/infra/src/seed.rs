use chrono::{Duration, Utc};

use crate::error::StoreResult;
use crate::models::GameRow;
use crate::repos::{CreateAnswer, CreateClue, CreateGame, GameState, IdFilter};
use crate::store::Store;

/// Length of the demo game's play window.
const DEMO_GAME_HOURS: i64 = 8;

/// Insert one in-progress game with a single answered clue.
///
/// Does nothing and returns `None` when the store already holds a game.
pub async fn seed_demo_data(store: &dyn Store) -> StoreResult<Option<GameRow>> {
    if !store.find_games(IdFilter::default()).await?.is_empty() {
        tracing::debug!("store already has games; skipping demo seed");
        return Ok(None);
    }

    let start = Utc::now();
    let game = store
        .create_game(CreateGame {
            start_time: Some(start),
            end_time: Some(start + Duration::hours(DEMO_GAME_HOURS)),
            state: GameState::InProgress,
        })
        .await?;
    let clue = store
        .create_clue(CreateClue {
            game_id: game.id,
            text: "What is love?".to_string(),
        })
        .await?;
    store
        .create_answer(CreateAnswer {
            clue_id: clue.id,
            text: "Baby don't hurt me".to_string(),
        })
        .await?;

    tracing::info!(game_id = game.id, "seeded demo game");
    Ok(Some(game))
}
