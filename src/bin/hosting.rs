//! Hosting Server Binary
//!
//! Runs the HTTP server for storyboard comments.
//! Viewer routes under /api/comments, admin routes under /api/admin/comments.

use clap::Parser;
use storyboards::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log();
    hosting::Server::run(Hosting::parse()).await
}
