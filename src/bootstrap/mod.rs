//! One-shot schema bootstrap.
//!
//! Reads the schema file, runs it against one database session, and checks
//! the catalog for the expected tables.
//!
//! - [`Connector`] — Opens a [`Session`] against the target database
//! - [`Session`] — Batch execution, catalog lookup, and release
//! - [`Bootstrap`] — The routine tying the two together
//! - [`Report`] — Which expected tables were found
mod report;
mod routine;
mod session;

pub use report::*;
pub use routine::*;
pub use session::*;
