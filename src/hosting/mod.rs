//! actix-web server for the storyboard comment API.
//!
//! - [`Server`] — Route table and listener
//! - [`handlers`] — Request handlers for viewer and admin routes
pub mod handlers;
mod server;

pub use handlers::AdminKey;
pub use server::*;
