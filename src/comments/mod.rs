//! Comment domain types and request validation.
//!
//! - [`Status`] — Review state of a comment
//! - [`Comment`] — Full stored row, as seen by the admin dashboard
//! - [`Summary`] — Public subset shown on storyboard pages
//! - [`Listing`], [`Submission`], [`Filter`], [`Triage`] — Validated requests
mod comment;
mod request;
mod status;

pub use comment::*;
pub use request::*;
pub use status::*;
