use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, Result, SimpleObject};

use crate::gql::domains::answers::Answer;
use crate::gql::error::ResultExt;
use crate::gql::loaders::AnswerByClueLoader;

/// A clue belonging to a game.
#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Clue {
    pub id: i32,
    pub text: String,
    #[graphql(skip)]
    pub game_id: i32,
}

impl From<infra::models::ClueRow> for Clue {
    fn from(row: infra::models::ClueRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
            game_id: row.game_id,
        }
    }
}

#[ComplexObject]
impl Clue {
    /// Resolved on demand from the clue id; null when the clue has no answer.
    async fn answer(&self, ctx: &Context<'_>) -> Result<Option<Answer>> {
        let loader = ctx.data::<DataLoader<AnswerByClueLoader>>()?;
        let row = loader.load_one(self.id).await.into_gql()?;
        Ok(row.map(Answer::from))
    }
}
