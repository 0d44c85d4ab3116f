use anyhow::Context;
use std::path::Path;
use std::path::PathBuf;

/// Default location of the bundled schema, next to the crate manifest.
pub const DEFAULT_SCHEMA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/schema/comments.sql");

/// SQL text loaded from disk, forwarded to the database as a single batch.
#[derive(Debug, Clone)]
pub struct SchemaFile {
    path: PathBuf,
    sql: String,
}

impl SchemaFile {
    pub fn read(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let sql = std::fs::read_to_string(path)
            .with_context(|| format!("read schema file {}", path.display()))?;
        if sql.trim().is_empty() {
            log::warn!("schema file {} is empty", path.display());
        }
        Ok(Self {
            path: path.to_path_buf(),
            sql,
        })
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    pub fn sql(&self) -> &str {
        &self.sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EXPECTED;
    use std::io::Write;

    #[test]
    fn reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "CREATE TABLE IF NOT EXISTS t (id INT);").unwrap();
        let schema = SchemaFile::read(file.path()).unwrap();
        assert_eq!(schema.sql(), "CREATE TABLE IF NOT EXISTS t (id INT);");
        assert_eq!(schema.path(), file.path());
    }
    #[test]
    fn empty_file_is_not_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let schema = SchemaFile::read(file.path()).unwrap();
        assert!(schema.sql().is_empty());
    }
    #[test]
    fn missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.sql");
        let err = SchemaFile::read(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.sql"));
    }
    #[test]
    fn bundled_schema_creates_expected_tables() {
        let schema = SchemaFile::read(DEFAULT_SCHEMA).unwrap();
        for table in EXPECTED {
            let create = format!("CREATE TABLE IF NOT EXISTS {}", table);
            assert!(schema.sql().contains(&create), "missing {}", create);
        }
    }
}
