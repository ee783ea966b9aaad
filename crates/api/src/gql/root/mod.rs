pub mod mutation_root;
pub mod query_root;

pub use mutation_root::MutationRoot;
pub use query_root::QueryRoot;
