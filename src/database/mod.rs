//! PostgreSQL connectivity and the comment repository.
//!
//! - [`Postgres`] — Parses a connection string and opens sessions over TLS
//! - [`PgSession`] — One open connection plus its driver task
//! - [`CommentRepository`] — Reads and writes for the comment API
mod check;
mod connect;
mod repository;

pub use connect::*;
pub use repository::*;

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;
