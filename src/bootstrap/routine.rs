use super::*;
use crate::EXPECTED;
use crate::SchemaFile;
use anyhow::Context;
use std::path::PathBuf;

/// Runs a schema file once against a database and verifies the result.
///
/// Failures are logged once here and returned unchanged. Once a session
/// has been opened it is closed on every exit path, success or failure.
pub struct Bootstrap<C> {
    connector: C,
    path: PathBuf,
}

impl<C> Bootstrap<C>
where
    C: Connector,
{
    pub fn new(connector: C, path: impl Into<PathBuf>) -> Self {
        Self {
            connector,
            path: path.into(),
        }
    }

    /// Execute the schema, then report which expected tables exist.
    pub async fn run(&self) -> anyhow::Result<Report> {
        self.execute()
            .await
            .inspect_err(|e| log::error!("error: {:#}", e))
    }

    /// Report which expected tables exist without executing anything.
    pub async fn verify(&self) -> anyhow::Result<Report> {
        self.inspect()
            .await
            .inspect_err(|e| log::error!("error: {:#}", e))
    }

    async fn execute(&self) -> anyhow::Result<Report> {
        let ref schema = SchemaFile::read(&self.path)?;
        let session = self.open().await?;
        let result = Self::apply(&session, schema).await;
        session.close().await;
        result
    }
    async fn inspect(&self) -> anyhow::Result<Report> {
        let session = self.open().await?;
        let result = Self::check(&session).await;
        session.close().await;
        result
    }
    async fn open(&self) -> anyhow::Result<C::Session> {
        log::info!("connecting to database");
        self.connector
            .connect()
            .await
            .context("connect to database")
    }
    async fn apply(session: &C::Session, schema: &SchemaFile) -> anyhow::Result<Report> {
        log::info!("executing schema {}", schema.path().display());
        session
            .batch(schema.sql())
            .await
            .context("execute schema")?;
        log::info!("[OK] schema created successfully");
        Self::check(session).await
    }
    async fn check(session: &C::Session) -> anyhow::Result<Report> {
        let report = session
            .tables(&EXPECTED)
            .await
            .map(Report::from)
            .context("verify tables")?;
        log::info!("[OK] verified tables: {}", report);
        if let Some(shortfall) = report.shortfall() {
            log::warn!("{}", shortfall);
        }
        Ok(report)
    }
}
