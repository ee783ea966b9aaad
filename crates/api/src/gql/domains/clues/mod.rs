pub mod resolvers;
pub mod types;

pub use resolvers::ClueQuery;
pub use types::Clue;
