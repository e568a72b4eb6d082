//! Database infrastructure: connection management and schema lifecycle.

pub mod database;
pub mod schema_manager;

pub use database::{Database, DatabaseConfig, DbConnection, Pool, PooledConnection};
pub use schema_manager::{rebuild_schema, EntityKind};
