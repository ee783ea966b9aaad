use async_graphql::{Context, Object, Result};
use infra::repos::IdFilter;
use infra::Store;
use tracing::info;

use super::service;
use super::types::Game;
use crate::gql::error::ResultExt;
use crate::services::HubEvent;
use crate::state::AppState;

#[derive(Default)]
pub struct GameQuery;

#[Object]
impl GameQuery {
    /// All games, or the one with `id`.
    async fn games(&self, ctx: &Context<'_>, id: Option<i32>) -> Result<Option<Vec<Game>>> {
        let state = ctx.data::<AppState>()?;
        let rows = state.store.find_games(IdFilter { id }).await.into_gql()?;
        Ok(Some(rows.into_iter().map(Game::from).collect()))
    }
}

#[derive(Default)]
pub struct GameMutation;

#[Object]
impl GameMutation {
    /// Declare `username` the winner of the game currently in progress and
    /// notify `gameWon` subscribers.
    async fn set_winner(&self, ctx: &Context<'_>, username: String) -> Result<Game> {
        let state = ctx.data::<AppState>()?;

        // Validate before touching the store
        let username = service::validate_username(&username).into_gql()?;

        let row = service::declare_winner(state.store.as_ref(), username)
            .await
            .into_gql()?;

        let delivered = state.hub.publish(HubEvent::GameWon(row.clone()));
        info!(game_id = row.id, winner = username, delivered, "game won");

        Ok(Game::from(row))
    }
}
