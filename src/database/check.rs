use super::*;
use crate::NAMESPACE;
use crate::Session;

/// Catalog lookup for tables in the public namespace.
///
/// `information_schema` columns are `sql_identifier` domains, so both sides
/// of the comparison are cast to text.
const TABLES: &str = const_format::concatcp!(
    "SELECT table_name::text ",
    "FROM   information_schema.tables ",
    "WHERE  table_schema = '",
    NAMESPACE,
    "' ",
    "AND    table_name::text = ANY($1::text[]) ",
    "ORDER  BY table_name"
);

#[async_trait::async_trait]
impl Session for PgSession {
    async fn batch(&self, sql: &str) -> anyhow::Result<()> {
        Ok(self.client().batch_execute(sql).await?)
    }
    async fn tables(&self, names: &[&str]) -> anyhow::Result<Vec<String>> {
        Ok(self
            .client()
            .query(TABLES, &[&names])
            .await?
            .iter()
            .map(|row| row.get::<_, String>(0))
            .collect())
    }
    async fn close(self) {
        self.release().await
    }
}
