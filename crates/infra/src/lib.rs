pub mod db;
pub mod error;
pub mod models;
pub mod repos;
pub mod seed;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{MemoryStore, PgStore, Store};
