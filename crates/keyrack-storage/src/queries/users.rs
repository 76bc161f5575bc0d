// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User account CRUD operations.

use keyrack_core::KeyrackError;
use rusqlite::params;

use crate::database::{Database, map_tr_err, map_unique_violation};
use crate::models::UserAccount;

/// Insert a new user account and return the store-assigned id.
///
/// A duplicate email surfaces as [`KeyrackError::Conflict`] via the unique
/// index, even when two registrations race past the service-level probe.
pub async fn insert_user(
    db: &Database,
    email: &str,
    credential_hash: &str,
) -> Result<String, KeyrackError> {
    let id = uuid::Uuid::new_v4().to_string();
    let email = email.to_string();
    let credential_hash = credential_hash.to_string();
    let created_at = chrono::Utc::now().to_rfc3339();

    let id_out = id.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO users (id, email, credential_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id, email, credential_hash, created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| map_unique_violation(e, "email already registered"))?;

    Ok(id_out)
}

/// Look up a user account by email.
pub async fn find_by_email(
    db: &Database,
    email: &str,
) -> Result<Option<UserAccount>, KeyrackError> {
    let email = email.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<UserAccount>, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT id, email, credential_hash, created_at FROM users WHERE email = ?1",
            )?;
            let result = stmt.query_row(params![email], |row| {
                Ok(UserAccount {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    credential_hash: row.get(2)?,
                    created_at: row.get(3)?,
                })
            });
            match result {
                Ok(account) => Ok(Some(account)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn insert_and_find_by_email_roundtrips() {
        let (db, _dir) = setup_db().await;

        let id = insert_user(&db, "a@x.com", "$argon2id$stub").await.unwrap();
        let found = find_by_email(&db, "a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.email, "a@x.com");
        assert_eq!(found.credential_hash, "$argon2id$stub");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn find_unknown_email_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(find_by_email(&db, "no@x.com").await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let (db, _dir) = setup_db().await;
        insert_user(&db, "a@x.com", "h1").await.unwrap();
        match insert_user(&db, "a@x.com", "h2").await {
            Err(KeyrackError::Conflict(_)) => {}
            other => panic!("expected Conflict, got {other:?}"),
        }
        db.close().await.unwrap();
    }
}
