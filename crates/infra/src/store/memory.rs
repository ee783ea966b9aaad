use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use super::Store;
use crate::error::{StoreError, StoreResult};
use crate::models::{AnswerRow, ClueRow, GameRow};
use crate::repos::{CreateAnswer, CreateClue, CreateGame, GamePatch, GameState, IdFilter};

#[derive(Default)]
struct Tables {
    games: BTreeMap<i32, GameRow>,
    clues: BTreeMap<i32, ClueRow>,
    answers: BTreeMap<i32, AnswerRow>,
    last_game_id: i32,
    last_clue_id: i32,
    last_answer_id: i32,
}

/// In-process [`Store`] with the same integrity rules as the Postgres schema.
/// Rows come back ordered by id, like the SQL queries.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_games(&self, filter: IdFilter) -> StoreResult<Vec<GameRow>> {
        let tables = self.tables.read();
        Ok(tables
            .games
            .values()
            .filter(|g| filter.matches(g.id))
            .cloned()
            .collect())
    }

    async fn find_game(&self, id: i32) -> StoreResult<Option<GameRow>> {
        Ok(self.tables.read().games.get(&id).cloned())
    }

    async fn find_active_game(&self) -> StoreResult<Option<GameRow>> {
        let tables = self.tables.read();
        // `None < Some(_)`, so games without a start time lose to any started one.
        Ok(tables
            .games
            .values()
            .filter(|g| g.state == GameState::InProgress)
            .max_by_key(|g| (g.start_time, g.id))
            .cloned())
    }

    async fn update_game(
        &self,
        id: i32,
        patch: GamePatch,
        expected_state: Option<GameState>,
    ) -> StoreResult<bool> {
        let mut tables = self.tables.write();
        let Some(game) = tables.games.get_mut(&id) else {
            return Ok(false);
        };

        if expected_state.is_some_and(|expected| game.state != expected) {
            return Ok(false);
        }
        if patch.state.is_some_and(|next| !game.state.can_advance_to(next)) {
            return Ok(false);
        }
        if patch.winner.is_some() && game.winner.is_some() {
            return Ok(false);
        }

        if let Some(state) = patch.state {
            game.state = state;
        }
        if let Some(winner) = patch.winner {
            game.winner = Some(winner);
        }
        if let Some(end_time) = patch.end_time {
            game.end_time = Some(end_time);
        }
        game.updated_at = Utc::now();
        Ok(true)
    }

    async fn find_clues(&self, filter: IdFilter) -> StoreResult<Vec<ClueRow>> {
        let tables = self.tables.read();
        Ok(tables
            .clues
            .values()
            .filter(|c| filter.matches(c.id))
            .cloned()
            .collect())
    }

    async fn clues_for_games(&self, game_ids: &[i32]) -> StoreResult<Vec<ClueRow>> {
        let tables = self.tables.read();
        Ok(tables
            .clues
            .values()
            .filter(|c| game_ids.contains(&c.game_id))
            .cloned()
            .collect())
    }

    async fn find_answers(&self, filter: IdFilter) -> StoreResult<Vec<AnswerRow>> {
        let tables = self.tables.read();
        Ok(tables
            .answers
            .values()
            .filter(|a| filter.matches(a.id))
            .cloned()
            .collect())
    }

    async fn answers_for_clues(&self, clue_ids: &[i32]) -> StoreResult<Vec<AnswerRow>> {
        let tables = self.tables.read();
        Ok(tables
            .answers
            .values()
            .filter(|a| clue_ids.contains(&a.clue_id))
            .cloned()
            .collect())
    }

    async fn create_game(&self, data: CreateGame) -> StoreResult<GameRow> {
        let mut tables = self.tables.write();
        tables.last_game_id += 1;
        let now = Utc::now();
        let row = GameRow {
            id: tables.last_game_id,
            start_time: data.start_time,
            end_time: data.end_time,
            state: data.state,
            winner: None,
            created_at: now,
            updated_at: now,
        };
        tables.games.insert(row.id, row.clone());
        Ok(row)
    }

    async fn create_clue(&self, data: CreateClue) -> StoreResult<ClueRow> {
        let mut tables = self.tables.write();
        if !tables.games.contains_key(&data.game_id) {
            return Err(StoreError::not_found("game", data.game_id));
        }

        tables.last_clue_id += 1;
        let now = Utc::now();
        let row = ClueRow {
            id: tables.last_clue_id,
            game_id: data.game_id,
            text: data.text,
            created_at: now,
            updated_at: now,
        };
        tables.clues.insert(row.id, row.clone());
        Ok(row)
    }

    async fn create_answer(&self, data: CreateAnswer) -> StoreResult<AnswerRow> {
        let mut tables = self.tables.write();
        if !tables.clues.contains_key(&data.clue_id) {
            return Err(StoreError::not_found("clue", data.clue_id));
        }
        if tables.answers.values().any(|a| a.clue_id == data.clue_id) {
            return Err(StoreError::Conflict(format!(
                "clue {} already has an answer",
                data.clue_id
            )));
        }

        tables.last_answer_id += 1;
        let now = Utc::now();
        let row = AnswerRow {
            id: tables.last_answer_id,
            clue_id: data.clue_id,
            text: data.text,
            created_at: now,
            updated_at: now,
        };
        tables.answers.insert(row.id, row.clone());
        Ok(row)
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
