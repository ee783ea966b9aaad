pub mod resolvers;
pub mod service;
pub mod types;

pub use resolvers::{GameMutation, GameQuery};
pub use types::{Game, GameState};
