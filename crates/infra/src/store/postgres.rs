use async_trait::async_trait;

use super::Store;
use crate::db::Db;
use crate::error::{StoreError, StoreResult};
use crate::models::{AnswerRow, ClueRow, GameRow};
use crate::repos::{
    answers, clues, games, CreateAnswer, CreateClue, CreateGame, GamePatch, GameState, IdFilter,
};

/// [`Store`] backed by the Postgres schema in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: Db,
}

impl PgStore {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

/// Map constraint violations onto store errors; anything else stays a database error.
fn classify_insert_error(
    err: sqlx::Error,
    parent: &'static str,
    parent_id: i32,
    duplicate: impl FnOnce() -> String,
) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return StoreError::not_found(parent, parent_id);
        }
        if db_err.is_unique_violation() {
            return StoreError::Conflict(duplicate());
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl Store for PgStore {
    async fn find_games(&self, filter: IdFilter) -> StoreResult<Vec<GameRow>> {
        Ok(games::list(&self.pool, filter).await?)
    }

    async fn find_game(&self, id: i32) -> StoreResult<Option<GameRow>> {
        Ok(games::get_by_id(&self.pool, id).await?)
    }

    async fn find_active_game(&self) -> StoreResult<Option<GameRow>> {
        Ok(games::find_active(&self.pool).await?)
    }

    async fn update_game(
        &self,
        id: i32,
        patch: GamePatch,
        expected_state: Option<GameState>,
    ) -> StoreResult<bool> {
        Ok(games::update(&self.pool, id, &patch, expected_state).await?)
    }

    async fn find_clues(&self, filter: IdFilter) -> StoreResult<Vec<ClueRow>> {
        Ok(clues::list(&self.pool, filter).await?)
    }

    async fn clues_for_games(&self, game_ids: &[i32]) -> StoreResult<Vec<ClueRow>> {
        if game_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(clues::list_by_game_ids(&self.pool, game_ids).await?)
    }

    async fn find_answers(&self, filter: IdFilter) -> StoreResult<Vec<AnswerRow>> {
        Ok(answers::list(&self.pool, filter).await?)
    }

    async fn answers_for_clues(&self, clue_ids: &[i32]) -> StoreResult<Vec<AnswerRow>> {
        if clue_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(answers::list_by_clue_ids(&self.pool, clue_ids).await?)
    }

    async fn create_game(&self, data: CreateGame) -> StoreResult<GameRow> {
        Ok(games::create(&self.pool, &data).await?)
    }

    async fn create_clue(&self, data: CreateClue) -> StoreResult<ClueRow> {
        clues::create(&self.pool, &data).await.map_err(|e| {
            classify_insert_error(e, "game", data.game_id, || "duplicate clue".to_string())
        })
    }

    async fn create_answer(&self, data: CreateAnswer) -> StoreResult<AnswerRow> {
        answers::create(&self.pool, &data).await.map_err(|e| {
            classify_insert_error(e, "clue", data.clue_id, || {
                format!("clue {} already has an answer", data.clue_id)
            })
        })
    }

    async fn health_check(&self) -> StoreResult<()> {
        let _one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
