//! Storyboard comment storage.
//!
//! Creates the comment tables on a hosted PostgreSQL database and serves
//! the review API that reads and writes them.
//!
//! ## Modules
//!
//! - [`schema`] — Table names and the SQL schema file
//! - [`bootstrap`] — One-shot schema execution and catalog verification
//! - [`comments`] — Comment domain types and request validation
//! - [`database`] — PostgreSQL connectivity and the comment repository
//! - [`hosting`] — actix-web server for the comment API
//! - [`config`] — Command line and environment configuration
pub mod bootstrap;
pub mod comments;
pub mod config;
pub mod schema;

#[cfg(feature = "database")]
pub mod database;
#[cfg(feature = "server")]
pub mod hosting;

pub use bootstrap::*;
pub use comments::*;
pub use config::*;
pub use schema::*;

#[cfg(feature = "database")]
pub use database::*;

/// Directory that receives one DEBUG log file per process run.
pub const LOGS: &str = "logs";

/// Route status lines to stdout and keep a DEBUG trail of each run on disk.
///
/// Setup runs are one-shot, so the file named after the start time is the
/// only record of what the schema batch did once the terminal is gone.
pub fn log() {
    std::fs::create_dir_all(LOGS).expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let started = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock after epoch")
        .as_secs();
    let ref path = std::path::Path::new(LOGS).join(format!("{}.log", started));
    let trail = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(path).expect("create log file"),
    );
    let status = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Stdout,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![status, trail]).expect("initialize logger");
}
