/// Opens sessions against a database endpoint.
#[async_trait::async_trait]
pub trait Connector: Send + Sync {
    type Session: Session;
    async fn connect(&self) -> anyhow::Result<Self::Session>;
}

/// A single open connection, released exactly once through [`Session::close`].
#[async_trait::async_trait]
pub trait Session: Send + Sync + Sized {
    /// Executes a semicolon-separated batch with autocommit semantics.
    async fn batch(&self, sql: &str) -> anyhow::Result<()>;
    /// Returns the subset of `names` present in the catalog.
    async fn tables(&self, names: &[&str]) -> anyhow::Result<Vec<String>>;
    /// Releases the connection.
    async fn close(self);

    /// Runs session setup on a freshly opened connection.
    /// A session whose setup fails is closed before the error returns.
    async fn prepare(self, sql: &str) -> anyhow::Result<Self> {
        match self.batch(sql).await {
            Ok(()) => Ok(self),
            Err(e) => {
                self.close().await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    struct Flaky {
        fails: bool,
        closed: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl Session for Flaky {
        async fn batch(&self, _: &str) -> anyhow::Result<()> {
            match self.fails {
                true => anyhow::bail!("permission denied to set parameter"),
                false => Ok(()),
            }
        }
        async fn tables(&self, _: &[&str]) -> anyhow::Result<Vec<String>> {
            Ok(vec![])
        }
        async fn close(self) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn failed_setup_closes_session() {
        let closed = Arc::new(AtomicUsize::new(0));
        let session = Flaky {
            fails: true,
            closed: closed.clone(),
        };
        assert!(session.prepare("SET client_min_messages TO WARNING").await.is_err());
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }
    #[tokio::test]
    async fn successful_setup_keeps_session_open() {
        let closed = Arc::new(AtomicUsize::new(0));
        let session = Flaky {
            fails: false,
            closed: closed.clone(),
        };
        let session = session.prepare("SET client_min_messages TO WARNING").await.unwrap();
        assert_eq!(closed.load(Ordering::SeqCst), 0);
        session.close().await;
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }
}
