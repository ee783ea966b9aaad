use async_graphql::SimpleObject;

/// The answer to a game clue.
#[derive(SimpleObject, Clone, Debug)]
pub struct Answer {
    pub id: i32,
    pub text: String,
}

impl From<infra::models::AnswerRow> for Answer {
    fn from(row: infra::models::AnswerRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
        }
    }
}
