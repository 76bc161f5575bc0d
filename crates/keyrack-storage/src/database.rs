// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use keyrack_core::KeyrackError;

use crate::migrations;

/// Handle to the vault database: a single `tokio-rusqlite` connection.
///
/// Constructed once at startup and handed to the service (dependency
/// injection, no module-level singleton). Clones share the one background
/// writer thread. [`Database::close`] must be called on shutdown so the WAL
/// is checkpointed.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs, and run all
    /// pending migrations.
    pub async fn open(path: &str) -> Result<Self, KeyrackError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| KeyrackError::Storage {
                source: Box::new(e),
            })?;

        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.pragma_update(None, "busy_timeout", 5000)?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(migrations::run_migrations)
            .await
            .map_err(|e| KeyrackError::Storage {
                source: Box::new(e),
            })?;

        tracing::debug!(path, "database opened");
        Ok(Self { conn })
    }

    /// The underlying single-writer connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Close the connection, checkpointing the WAL.
    pub async fn close(self) -> Result<(), KeyrackError> {
        self.conn.close().await.map_err(|e| KeyrackError::Storage {
            source: Box::new(e),
        })?;
        tracing::debug!("database closed");
        Ok(())
    }
}

/// Convert tokio-rusqlite errors to [`KeyrackError::Storage`].
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> KeyrackError {
    KeyrackError::Storage {
        source: Box::new(e),
    }
}

/// Like [`map_tr_err`], but turns a unique-index violation into
/// [`KeyrackError::Conflict`] with the given message.
///
/// The unique indexes are the authoritative uniqueness guard; the service
/// layer's findOne probe only exists for a fast path and a friendlier
/// message when there is no race.
pub(crate) fn map_unique_violation(
    e: tokio_rusqlite::Error<rusqlite::Error>,
    conflict_msg: &str,
) -> KeyrackError {
    if e.to_string().contains("UNIQUE constraint failed") {
        KeyrackError::Conflict(conflict_msg.to_string())
    } else {
        map_tr_err(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_schema_and_close_succeeds() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();

        // Both tables exist after migration.
        let tables: Vec<String> = db
            .connection()
            .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
                )?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                rows.collect()
            })
            .await
            .unwrap();
        assert!(tables.contains(&"users".to_string()));
        assert!(tables.contains(&"vault_secrets".to_string()));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn reopen_is_idempotent() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        db.close().await.unwrap();
        // Migrations must not fail on an already-migrated database.
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        db.close().await.unwrap();
    }
}
