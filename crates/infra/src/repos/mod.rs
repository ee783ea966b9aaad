pub mod answers;
pub mod clues;
pub mod games;

pub use answers::CreateAnswer;
pub use clues::CreateClue;
pub use games::{CreateGame, GamePatch, GameState};

/// Optional identity filter shared by the list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdFilter {
    pub id: Option<i32>,
}

impl IdFilter {
    pub fn by_id(id: i32) -> Self {
        Self { id: Some(id) }
    }

    pub fn matches(&self, id: i32) -> bool {
        self.id.map_or(true, |wanted| wanted == id)
    }
}
