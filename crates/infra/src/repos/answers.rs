use sqlx::{PgExecutor, Result as SqlxResult};

use super::IdFilter;
use crate::models::AnswerRow;

#[derive(Debug, Clone)]
pub struct CreateAnswer {
    pub clue_id: i32,
    pub text: String,
}

pub async fn list<'e>(
    executor: impl PgExecutor<'e>,
    filter: IdFilter,
) -> SqlxResult<Vec<AnswerRow>> {
    sqlx::query_as::<_, AnswerRow>(
        r#"
        SELECT id, clue_id, text, created_at, updated_at
        FROM answers
        WHERE ($1::int4 IS NULL OR id = $1)
        ORDER BY id ASC
        "#,
    )
    .bind(filter.id)
    .fetch_all(executor)
    .await
}

/// Answers for any of `clue_ids`. A clue has at most one answer (unique `clue_id`).
pub async fn list_by_clue_ids<'e>(
    executor: impl PgExecutor<'e>,
    clue_ids: &[i32],
) -> SqlxResult<Vec<AnswerRow>> {
    sqlx::query_as::<_, AnswerRow>(
        r#"
        SELECT id, clue_id, text, created_at, updated_at
        FROM answers
        WHERE clue_id = ANY($1::int4[])
        ORDER BY id ASC
        "#,
    )
    .bind(clue_ids)
    .fetch_all(executor)
    .await
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: &CreateAnswer,
) -> SqlxResult<AnswerRow> {
    sqlx::query_as::<_, AnswerRow>(
        r#"
        INSERT INTO answers (clue_id, text)
        VALUES ($1, $2)
        RETURNING id, clue_id, text, created_at, updated_at
        "#,
    )
    .bind(data.clue_id)
    .bind(&data.text)
    .fetch_one(executor)
    .await
}
