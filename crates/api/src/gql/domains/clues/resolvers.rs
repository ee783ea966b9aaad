use async_graphql::{Context, Object, Result};
use infra::repos::IdFilter;
use infra::Store;

use super::types::Clue;
use crate::gql::error::ResultExt;
use crate::state::AppState;

#[derive(Default)]
pub struct ClueQuery;

#[Object]
impl ClueQuery {
    /// All clues, or the one with `id`.
    async fn clues(&self, ctx: &Context<'_>, id: Option<i32>) -> Result<Option<Vec<Clue>>> {
        let state = ctx.data::<AppState>()?;
        let rows = state.store.find_clues(IdFilter { id }).await.into_gql()?;
        Ok(Some(rows.into_iter().map(Clue::from).collect()))
    }
}
