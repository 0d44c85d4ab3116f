//! Table names and the SQL schema file.
//!
//! The schema file is opaque to this crate: it is read and forwarded to
//! the database verbatim. Only the table names below are known here.
mod file;
mod tables;

pub use file::*;
pub use tables::*;
