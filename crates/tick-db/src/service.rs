//! The task store adapter shared by the reminder scheduler and the interpreter.
//!
//! `TaskStore` wraps `TickDb` (raw database access). All repo methods are
//! implemented as `impl TaskStore` blocks under `repos/`.

use crate::TickDb;
use crate::error::DatabaseError;

/// Typed read/write operations over tasks and their owners' contact records.
///
/// Cheap to share behind an `Arc`; the underlying libSQL connection is safe
/// for concurrent use, and every contended write is a conditional `UPDATE`.
pub struct TaskStore {
    db: TickDb,
}

impl TaskStore {
    /// Open a store backed by a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn open_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = TickDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `TickDb`.
    #[must_use]
    pub const fn from_db(db: TickDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &TickDb {
        &self.db
    }
}
