// Each domain contains: mod.rs, resolvers.rs, types.rs

pub mod answers;
pub mod clues;
pub mod games;
