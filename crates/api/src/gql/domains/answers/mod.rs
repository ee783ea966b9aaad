pub mod resolvers;
pub mod types;

pub use resolvers::AnswerQuery;
pub use types::Answer;
