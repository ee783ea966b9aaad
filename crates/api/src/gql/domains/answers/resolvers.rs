use async_graphql::{Context, Object, Result};
use infra::repos::IdFilter;
use infra::Store;

use super::types::Answer;
use crate::gql::error::ResultExt;
use crate::state::AppState;

#[derive(Default)]
pub struct AnswerQuery;

#[Object]
impl AnswerQuery {
    /// All answers, or the one with `id`. Unknown ids give an empty list.
    async fn answers(&self, ctx: &Context<'_>, id: Option<i32>) -> Result<Option<Vec<Answer>>> {
        let state = ctx.data::<AppState>()?;
        let rows = state.store.find_answers(IdFilter { id }).await.into_gql()?;
        Ok(Some(rows.into_iter().map(Answer::from).collect()))
    }
}
