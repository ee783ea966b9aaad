use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, Result as SqlxResult};

use super::IdFilter;
use crate::models::GameRow;

/// Lifecycle of a game. Declaration order is the only legal direction of travel,
/// and matches the order of the Postgres `game_state` enum.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    sqlx::Type,
    serde::Serialize,
    serde::Deserialize,
)]
#[sqlx(type_name = "game_state", rename_all = "snake_case")]
pub enum GameState {
    #[default]
    NotStarted,
    InProgress,
    Won,
    Completed,
}

impl GameState {
    /// Whether a game in `self` may be moved to `next`. Staying put is allowed.
    pub fn can_advance_to(self, next: GameState) -> bool {
        next >= self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateGame {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub state: GameState,
}

/// Partial update applied by [`update`]. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct GamePatch {
    pub state: Option<GameState>,
    pub winner: Option<String>,
    pub end_time: Option<DateTime<Utc>>,
}

pub async fn list<'e>(executor: impl PgExecutor<'e>, filter: IdFilter) -> SqlxResult<Vec<GameRow>> {
    sqlx::query_as::<_, GameRow>(
        r#"
        SELECT id, start_time, end_time, state, winner, created_at, updated_at
        FROM games
        WHERE ($1::int4 IS NULL OR id = $1)
        ORDER BY id ASC
        "#,
    )
    .bind(filter.id)
    .fetch_all(executor)
    .await
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: i32) -> SqlxResult<Option<GameRow>> {
    sqlx::query_as::<_, GameRow>(
        r#"
        SELECT id, start_time, end_time, state, winner, created_at, updated_at
        FROM games
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// The most recently started game that is still in progress.
pub async fn find_active<'e>(executor: impl PgExecutor<'e>) -> SqlxResult<Option<GameRow>> {
    sqlx::query_as::<_, GameRow>(
        r#"
        SELECT id, start_time, end_time, state, winner, created_at, updated_at
        FROM games
        WHERE state = 'in_progress'
        ORDER BY start_time DESC NULLS LAST, id DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(executor)
    .await
}

/// Apply `patch` to game `id` and report whether a row was changed.
///
/// The row is left alone when `expected_state` is given and does not match, when
/// the patch would move the state backwards, or when it would overwrite a winner.
pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    id: i32,
    patch: &GamePatch,
    expected_state: Option<GameState>,
) -> SqlxResult<bool> {
    let result = sqlx::query(
        r#"
        UPDATE games
        SET state = COALESCE($2, state),
            winner = COALESCE($3, winner),
            end_time = COALESCE($4, end_time),
            updated_at = NOW()
        WHERE id = $1
          AND ($5::game_state IS NULL OR state = $5)
          AND ($2::game_state IS NULL OR state <= $2)
          AND ($3::text IS NULL OR winner IS NULL)
        "#,
    )
    .bind(id)
    .bind(patch.state)
    .bind(patch.winner.as_deref())
    .bind(patch.end_time)
    .bind(expected_state)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, data: &CreateGame) -> SqlxResult<GameRow> {
    sqlx::query_as::<_, GameRow>(
        r#"
        INSERT INTO games (start_time, end_time, state)
        VALUES ($1, $2, $3)
        RETURNING id, start_time, end_time, state, winner, created_at, updated_at
        "#,
    )
    .bind(data.start_time)
    .bind(data.end_time)
    .bind(data.state)
    .fetch_one(executor)
    .await
}
