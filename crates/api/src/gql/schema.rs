use async_graphql::dataloader::DataLoader;
use async_graphql::Schema;

use super::error::ValidationErrorCode;
use super::loaders::{AnswerByClueLoader, CluesByGameLoader};
use super::{MutationRoot, QueryRoot, SubscriptionRoot};
use crate::state::AppState;

pub type TriviaSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

/// Build the GraphQL schema and inject shared state (AppState) into the context.
pub fn build_schema(state: AppState) -> TriviaSchema {
    let clues_loader = DataLoader::new(CluesByGameLoader::new(state.store.clone()), tokio::spawn);
    let answer_loader = DataLoader::new(AnswerByClueLoader::new(state.store.clone()), tokio::spawn);

    let introspection_enabled = state.config().introspection_enabled;

    let mut builder = Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        SubscriptionRoot,
    )
    .data(state) // AppState is Clone; available in resolvers via ctx.data::<AppState>()
    .data(clues_loader)
    .data(answer_loader)
    .extension(ValidationErrorCode)
    .limit_depth(15)
    .limit_complexity(200);

    if !introspection_enabled {
        builder = builder.disable_introspection();
    }

    builder.finish()
}
