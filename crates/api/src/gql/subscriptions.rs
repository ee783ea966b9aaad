use async_graphql::{Context, Result, Subscription};
use futures_util::{Stream, StreamExt};

use crate::gql::domains::games::Game;
use crate::services::{HubEvent, Topic};
use crate::state::AppState;

#[derive(Default)]
pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Listens for when a game has been won
    async fn game_won(&self, ctx: &Context<'_>) -> Result<impl Stream<Item = Game>> {
        let state = ctx.data::<AppState>()?;

        // Dropping the stream (client gone) drops the subscription and unregisters it.
        let subscription = state.hub.subscribe(Topic::GameWon);

        Ok(subscription.map(|event| match event {
            HubEvent::GameWon(row) => Game::from(row),
        }))
    }
}
