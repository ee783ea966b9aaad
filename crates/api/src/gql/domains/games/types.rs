use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, Enum, Result, SimpleObject};
use chrono::{DateTime, Utc};

use crate::gql::domains::clues::Clue;
use crate::gql::error::ResultExt;
use crate::gql::loaders::CluesByGameLoader;

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    #[graphql(name = "NOT_STARTED")]
    NotStarted,
    #[graphql(name = "IN_PROGRESS")]
    InProgress,
    #[graphql(name = "WON")]
    Won,
    #[graphql(name = "COMPLETED")]
    Completed,
}

impl From<infra::repos::GameState> for GameState {
    fn from(state: infra::repos::GameState) -> Self {
        match state {
            infra::repos::GameState::NotStarted => GameState::NotStarted,
            infra::repos::GameState::InProgress => GameState::InProgress,
            infra::repos::GameState::Won => GameState::Won,
            infra::repos::GameState::Completed => GameState::Completed,
        }
    }
}

/// A trivia game.
#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Game {
    pub id: i32,
    #[graphql(name = "start_time")]
    pub start_time: Option<DateTime<Utc>>,
    #[graphql(name = "end_time")]
    pub end_time: Option<DateTime<Utc>>,
    pub state: GameState,
    pub winner: Option<String>,
}

impl From<infra::models::GameRow> for Game {
    fn from(row: infra::models::GameRow) -> Self {
        Self {
            id: row.id,
            start_time: row.start_time,
            end_time: row.end_time,
            state: row.state.into(),
            winner: row.winner,
        }
    }
}

#[ComplexObject]
impl Game {
    /// Clues of this game, looked up by game id when requested.
    async fn clues(&self, ctx: &Context<'_>) -> Result<Option<Vec<Clue>>> {
        let loader = ctx.data::<DataLoader<CluesByGameLoader>>()?;
        let rows = loader.load_one(self.id).await.into_gql()?;
        Ok(Some(
            rows.unwrap_or_default()
                .into_iter()
                .map(Clue::from)
                .collect(),
        ))
    }
}
