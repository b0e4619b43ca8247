//! SQLite connection handle.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::common::error::StoreResult;

/// Handle to the Winona SQLite database.
///
/// Table-specific operations live in the sibling modules as `impl Database`
/// blocks.
#[derive(Debug)]
pub struct Database {
    pub(crate) conn: Connection,
}

impl Database {
    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        debug!("Opening database {}", path.display());
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an existing database file without creating it.
    ///
    /// A missing file means the store is unavailable rather than empty.
    pub fn open_existing(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        debug!("Opening existing database {}", path.display());
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Create every table the application uses.
    pub fn create_all_tables(&self) -> StoreResult<()> {
        self.create_species_table()?;
        self.create_users_table()?;
        self.create_guilds_table()?;
        self.create_tournaments_table()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_existing_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Database::open_existing(dir.path().join("missing.db")).is_err());
    }

    #[test]
    fn test_open_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("winona.db");
        let db = Database::open(&path).unwrap();
        db.create_all_tables().unwrap();
        drop(db);

        assert!(path.exists());
        let db = Database::open_existing(&path).unwrap();
        assert!(db.all_species().unwrap().is_empty());
        assert!(db.all_tournaments().unwrap().is_empty());
    }
}
