//! Repository-style access to games, clues and answers.
//!
//! The API layer only ever talks to a [`Store`] trait object; the Postgres and
//! in-memory backends are interchangeable behind it.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{AnswerRow, ClueRow, GameRow};
use crate::repos::{CreateAnswer, CreateClue, CreateGame, GamePatch, GameState, IdFilter};

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_games(&self, filter: IdFilter) -> StoreResult<Vec<GameRow>>;

    async fn find_game(&self, id: i32) -> StoreResult<Option<GameRow>>;

    /// The most recent game in progress: latest `start_time` (unset sorts last),
    /// then highest id.
    async fn find_active_game(&self) -> StoreResult<Option<GameRow>>;

    /// Apply `patch` to game `id` as a single compare-and-swap.
    ///
    /// Returns `false` without touching the row when the game does not exist,
    /// its state differs from `expected_state`, the patch would move the state
    /// backwards, or the patch would overwrite an existing winner.
    async fn update_game(
        &self,
        id: i32,
        patch: GamePatch,
        expected_state: Option<GameState>,
    ) -> StoreResult<bool>;

    async fn find_clues(&self, filter: IdFilter) -> StoreResult<Vec<ClueRow>>;

    async fn clues_for_games(&self, game_ids: &[i32]) -> StoreResult<Vec<ClueRow>>;

    async fn find_answers(&self, filter: IdFilter) -> StoreResult<Vec<AnswerRow>>;

    async fn answers_for_clues(&self, clue_ids: &[i32]) -> StoreResult<Vec<AnswerRow>>;

    async fn create_game(&self, data: CreateGame) -> StoreResult<GameRow>;

    /// Fails with `NotFound` when the referenced game does not exist.
    async fn create_clue(&self, data: CreateClue) -> StoreResult<ClueRow>;

    /// Fails with `NotFound` for an unknown clue and `Conflict` when the clue
    /// already has an answer.
    async fn create_answer(&self, data: CreateAnswer) -> StoreResult<AnswerRow>;

    async fn health_check(&self) -> StoreResult<()>;

    async fn clues_for_game(&self, game_id: i32) -> StoreResult<Vec<ClueRow>> {
        self.clues_for_games(&[game_id]).await
    }

    async fn answer_for_clue(&self, clue_id: i32) -> StoreResult<Option<AnswerRow>> {
        Ok(self.answers_for_clues(&[clue_id]).await?.into_iter().next())
    }
}
