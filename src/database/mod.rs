pub mod manager;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::DatabaseManager;
pub use postgres::PgStore;
pub use store::{Store, StoreError, StoreResult, StoreTx};
