//! Schema Setup Binary
//!
//! Creates the storyboard comment tables on the configured database and
//! verifies they exist. Run once per database; safe to repeat.
//!
//! Options: --url (DB_URL), --schema (SCHEMA_PATH), --check

use clap::Parser;
use std::process::ExitCode;
use storyboards::*;

#[tokio::main]
async fn main() -> ExitCode {
    log();
    let setup = Setup::parse();
    let connector = match Postgres::parse(&setup.url) {
        Ok(connector) => connector,
        Err(e) => {
            log::error!("error: invalid DB_URL: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let bootstrap = Bootstrap::new(connector, &setup.schema);
    let result = if setup.check {
        bootstrap.verify().await
    } else {
        bootstrap.run().await
    };
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
