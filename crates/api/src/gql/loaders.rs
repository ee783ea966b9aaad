use async_graphql::dataloader::Loader;
use infra::{
    models::{AnswerRow, ClueRow},
    Store, StoreError,
};
use std::{collections::HashMap, future::Future, sync::Arc};

// CluesByGameLoader - batch load the clues of many games at once
#[derive(Clone)]
pub struct CluesByGameLoader {
    store: Arc<dyn Store>,
}

impl CluesByGameLoader {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl Loader<i32> for CluesByGameLoader {
    type Value = Vec<ClueRow>;
    type Error = Arc<StoreError>;

    fn load(
        &self,
        keys: &[i32],
    ) -> impl Future<Output = std::result::Result<HashMap<i32, Self::Value>, Self::Error>> + Send
    {
        let store = Arc::clone(&self.store);
        let ids: Vec<i32> = keys.to_vec();

        async move {
            if ids.is_empty() {
                return Ok(HashMap::new());
            }

            let rows = store.clues_for_games(&ids).await.map_err(Arc::new)?;

            // Every requested game gets an entry, so clue-less games resolve to [].
            let mut grouped: HashMap<i32, Vec<ClueRow>> =
                ids.iter().map(|id| (*id, Vec::new())).collect();
            for row in rows {
                grouped.entry(row.game_id).or_default().push(row);
            }
            Ok(grouped)
        }
    }
}

// AnswerByClueLoader - batch load answers keyed by their clue
#[derive(Clone)]
pub struct AnswerByClueLoader {
    store: Arc<dyn Store>,
}

impl AnswerByClueLoader {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl Loader<i32> for AnswerByClueLoader {
    type Value = AnswerRow;
    type Error = Arc<StoreError>;

    fn load(
        &self,
        keys: &[i32],
    ) -> impl Future<Output = std::result::Result<HashMap<i32, Self::Value>, Self::Error>> + Send
    {
        let store = Arc::clone(&self.store);
        let ids: Vec<i32> = keys.to_vec();

        async move {
            if ids.is_empty() {
                return Ok(HashMap::new());
            }

            let rows = store.answers_for_clues(&ids).await.map_err(Arc::new)?;

            Ok(rows.into_iter().map(|r| (r.clue_id, r)).collect())
        }
    }
}
