use std::sync::Arc;

use api::gql::{build_schema, TriviaSchema};
use api::services::NotificationHub;
use api::{AppConfig, AppState};
use async_graphql::{Request, Variables};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use infra::models::{AnswerRow, ClueRow, GameRow};
use infra::repos::{CreateAnswer, CreateClue, CreateGame, GamePatch, GameState, IdFilter};
use infra::{MemoryStore, Store, StoreError, StoreResult};

pub struct TestApp {
    pub state: AppState,
    pub schema: TriviaSchema,
    pub store: Arc<MemoryStore>,
}

/// Fresh app over an empty memory store, with its own notification hub.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with_config(AppConfig::default())
}

pub fn setup_test_app_with_config(config: AppConfig) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), NotificationHub::default(), config);
    let schema = build_schema(state.clone());
    TestApp {
        state,
        schema,
        store,
    }
}

/// App over an arbitrary store implementation.
#[allow(dead_code)]
pub fn setup_with_store(store: Arc<dyn Store>) -> (AppState, TriviaSchema) {
    let state = AppState::new(store, NotificationHub::default(), AppConfig::default());
    let schema = build_schema(state.clone());
    (state, schema)
}

/// Helper function to execute GraphQL queries and mutations
pub async fn execute_graphql(
    schema: &TriviaSchema,
    query: &str,
    variables: Option<Variables>,
) -> async_graphql::Response {
    let mut request = Request::new(query);

    if let Some(vars) = variables {
        request = request.variables(vars);
    }

    schema.execute(request).await
}

/// `extensions.code` of the first error in `response`.
#[allow(dead_code)]
pub fn first_error_code(response: &async_graphql::Response) -> Option<String> {
    let json = serde_json::to_value(response).expect("response serializes");
    json["errors"][0]["extensions"]["code"]
        .as_str()
        .map(String::from)
}

/// Create a game in `state` that started `started_minutes_ago` minutes ago
#[allow(dead_code)]
pub async fn create_test_game(
    store: &MemoryStore,
    state: GameState,
    started_minutes_ago: i64,
) -> GameRow {
    let start: DateTime<Utc> = Utc::now() - Duration::minutes(started_minutes_ago);
    store
        .create_game(CreateGame {
            start_time: Some(start),
            end_time: Some(start + Duration::hours(8)),
            state,
        })
        .await
        .expect("Failed to create test game")
}

/// Create a clue for `game_id`, optionally answered
#[allow(dead_code)]
pub async fn create_test_clue(
    store: &MemoryStore,
    game_id: i32,
    text: &str,
    answer: Option<&str>,
) -> (ClueRow, Option<AnswerRow>) {
    let clue = store
        .create_clue(CreateClue {
            game_id,
            text: text.to_string(),
        })
        .await
        .expect("Failed to create test clue");

    let answer = match answer {
        Some(text) => Some(
            store
                .create_answer(CreateAnswer {
                    clue_id: clue.id,
                    text: text.to_string(),
                })
                .await
                .expect("Failed to create test answer"),
        ),
        None => None,
    };

    (clue, answer)
}

/// Memory store whose answer lookups always fail, for partial-result checks.
#[allow(dead_code)]
pub struct BrokenAnswersStore {
    pub inner: MemoryStore,
}

#[async_trait]
impl Store for BrokenAnswersStore {
    async fn find_games(&self, filter: IdFilter) -> StoreResult<Vec<GameRow>> {
        self.inner.find_games(filter).await
    }

    async fn find_game(&self, id: i32) -> StoreResult<Option<GameRow>> {
        self.inner.find_game(id).await
    }

    async fn find_active_game(&self) -> StoreResult<Option<GameRow>> {
        self.inner.find_active_game().await
    }

    async fn update_game(
        &self,
        id: i32,
        patch: GamePatch,
        expected_state: Option<GameState>,
    ) -> StoreResult<bool> {
        self.inner.update_game(id, patch, expected_state).await
    }

    async fn find_clues(&self, filter: IdFilter) -> StoreResult<Vec<ClueRow>> {
        self.inner.find_clues(filter).await
    }

    async fn clues_for_games(&self, game_ids: &[i32]) -> StoreResult<Vec<ClueRow>> {
        self.inner.clues_for_games(game_ids).await
    }

    async fn find_answers(&self, _filter: IdFilter) -> StoreResult<Vec<AnswerRow>> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn answers_for_clues(&self, _clue_ids: &[i32]) -> StoreResult<Vec<AnswerRow>> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn create_game(&self, data: CreateGame) -> StoreResult<GameRow> {
        self.inner.create_game(data).await
    }

    async fn create_clue(&self, data: CreateClue) -> StoreResult<ClueRow> {
        self.inner.create_clue(data).await
    }

    async fn create_answer(&self, data: CreateAnswer) -> StoreResult<AnswerRow> {
        self.inner.create_answer(data).await
    }

    async fn health_check(&self) -> StoreResult<()> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

/// Keeps reporting `game` as the active one after it has been won, like a
/// caller that read it just before a competing update landed.
#[allow(dead_code)]
pub struct StaleActiveGameStore {
    pub inner: MemoryStore,
    pub game: GameRow,
}

#[async_trait]
impl Store for StaleActiveGameStore {
    async fn find_games(&self, filter: IdFilter) -> StoreResult<Vec<GameRow>> {
        self.inner.find_games(filter).await
    }

    async fn find_game(&self, id: i32) -> StoreResult<Option<GameRow>> {
        self.inner.find_game(id).await
    }

    async fn find_active_game(&self) -> StoreResult<Option<GameRow>> {
        Ok(Some(self.game.clone()))
    }

    async fn update_game(
        &self,
        id: i32,
        patch: GamePatch,
        expected_state: Option<GameState>,
    ) -> StoreResult<bool> {
        self.inner.update_game(id, patch, expected_state).await
    }

    async fn find_clues(&self, filter: IdFilter) -> StoreResult<Vec<ClueRow>> {
        self.inner.find_clues(filter).await
    }

    async fn clues_for_games(&self, game_ids: &[i32]) -> StoreResult<Vec<ClueRow>> {
        self.inner.clues_for_games(game_ids).await
    }

    async fn find_answers(&self, filter: IdFilter) -> StoreResult<Vec<AnswerRow>> {
        self.inner.find_answers(filter).await
    }

    async fn answers_for_clues(&self, clue_ids: &[i32]) -> StoreResult<Vec<AnswerRow>> {
        self.inner.answers_for_clues(clue_ids).await
    }

    async fn create_game(&self, data: CreateGame) -> StoreResult<GameRow> {
        self.inner.create_game(data).await
    }

    async fn create_clue(&self, data: CreateClue) -> StoreResult<ClueRow> {
        self.inner.create_clue(data).await
    }

    async fn create_answer(&self, data: CreateAnswer) -> StoreResult<AnswerRow> {
        self.inner.create_answer(data).await
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.inner.health_check().await
    }
}
