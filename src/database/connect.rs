use super::*;
use crate::Connector;
use crate::Session;
use anyhow::Context;
use postgres_native_tls::MakeTlsConnector;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::AsyncRead;
use tokio::io::AsyncWrite;
use tokio::task::JoinHandle;
use tokio_postgres::Client;
use tokio_postgres::Config;
use tokio_postgres::Connection;
use tokio_postgres::NoTls;
use tokio_postgres::config::SslMode;

/// Connection settings for a PostgreSQL endpoint.
///
/// TLS is negotiated for every `sslmode` except `disable`. Certificates
/// and hostnames are verified against the system trust store.
#[derive(Clone)]
pub struct Postgres {
    config: Config,
}

impl Postgres {
    pub fn parse(url: &str) -> Result<Self, PgErr> {
        Config::from_str(url).map(|config| Self { config })
    }
    pub fn tls(&self) -> bool {
        self.config.get_ssl_mode() != SslMode::Disable
    }
    pub fn dbname(&self) -> Option<&str> {
        self.config.get_dbname()
    }
    async fn open(&self) -> anyhow::Result<PgSession> {
        if self.tls() {
            let connector = native_tls::TlsConnector::builder()
                .build()
                .context("build TLS connector")?;
            let (client, connection) = self
                .config
                .connect(MakeTlsConnector::new(connector))
                .await?;
            Ok(PgSession::spawn(client, connection))
        } else {
            let (client, connection) = self.config.connect(NoTls).await?;
            Ok(PgSession::spawn(client, connection))
        }
    }
}

#[async_trait::async_trait]
impl Connector for Postgres {
    type Session = PgSession;
    async fn connect(&self) -> anyhow::Result<PgSession> {
        log::debug!(
            "opening session to {} (tls: {})",
            self.dbname().unwrap_or("<default>"),
            self.tls()
        );
        self.open()
            .await?
            .prepare("SET client_min_messages TO WARNING")
            .await
            .context("set client_min_messages")
    }
}

/// An open client together with the task driving its socket.
pub struct PgSession {
    client: Client,
    driver: JoinHandle<()>,
}

impl PgSession {
    fn spawn<S, T>(client: Client, connection: Connection<S, T>) -> Self
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
        T: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                log::error!("database connection error: {}", e);
            }
        });
        Self { client, driver }
    }
    pub fn client(&self) -> &Client {
        &self.client
    }
    /// Detach the driver and share the client with long-lived callers.
    pub fn shared(self) -> Arc<Client> {
        Arc::new(self.client)
    }
    /// Drop the client and wait for the driver to observe the hangup.
    pub async fn release(self) {
        drop(self.client);
        if let Err(e) = self.driver.await {
            log::warn!("database driver task ended abnormally: {}", e);
        }
        log::debug!("database session closed");
    }
}
