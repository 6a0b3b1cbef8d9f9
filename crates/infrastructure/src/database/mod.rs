//! SQLite: одно соединение на процесс, версионированная схема

pub mod connection;
pub mod errors;
pub mod schema;

pub use connection::{ConnectionGuard, ConnectionProvider};
pub use errors::DatabaseError;
pub use schema::{Migration, MigrationReport, SchemaManager, MIGRATIONS};
