use sqlx::{PgExecutor, Result as SqlxResult};

use super::IdFilter;
use crate::models::ClueRow;

#[derive(Debug, Clone)]
pub struct CreateClue {
    pub game_id: i32,
    pub text: String,
}

pub async fn list<'e>(executor: impl PgExecutor<'e>, filter: IdFilter) -> SqlxResult<Vec<ClueRow>> {
    sqlx::query_as::<_, ClueRow>(
        r#"
        SELECT id, game_id, text, created_at, updated_at
        FROM clues
        WHERE ($1::int4 IS NULL OR id = $1)
        ORDER BY id ASC
        "#,
    )
    .bind(filter.id)
    .fetch_all(executor)
    .await
}

/// All clues belonging to any of `game_ids`, in one round trip.
pub async fn list_by_game_ids<'e>(
    executor: impl PgExecutor<'e>,
    game_ids: &[i32],
) -> SqlxResult<Vec<ClueRow>> {
    sqlx::query_as::<_, ClueRow>(
        r#"
        SELECT id, game_id, text, created_at, updated_at
        FROM clues
        WHERE game_id = ANY($1::int4[])
        ORDER BY id ASC
        "#,
    )
    .bind(game_ids)
    .fetch_all(executor)
    .await
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, data: &CreateClue) -> SqlxResult<ClueRow> {
    sqlx::query_as::<_, ClueRow>(
        r#"
        INSERT INTO clues (game_id, text)
        VALUES ($1, $2)
        RETURNING id, game_id, text, created_at, updated_at
        "#,
    )
    .bind(data.game_id)
    .bind(&data.text)
    .fetch_one(executor)
    .await
}
