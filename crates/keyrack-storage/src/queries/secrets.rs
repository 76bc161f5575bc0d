// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault secret record CRUD operations.
//!
//! This layer treats the ciphertext/nonce/tag triple as opaque strings.
//! Encryption happens in the service layer before anything reaches here.

use keyrack_core::{EncryptedSecret, KeyrackError};
use rusqlite::params;

use crate::database::{Database, map_tr_err, map_unique_violation};
use crate::models::{NewSecretRecord, SecretRecordPatch, UpdateOutcome, VaultSecretRecord};

const SELECT_COLUMNS: &str = "id, owner_id, site, login_email, ciphertext, nonce, tag, \
     description, created_at, updated_at";

fn record_from_row(row: &rusqlite::Row<'_>) -> Result<VaultSecretRecord, rusqlite::Error> {
    Ok(VaultSecretRecord {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        site: row.get(2)?,
        login_email: row.get(3)?,
        secret: EncryptedSecret {
            ciphertext: row.get(4)?,
            nonce: row.get(5)?,
            tag: row.get(6)?,
        },
        description: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

/// Insert a new vault secret record and return the store-assigned id.
///
/// A duplicate (owner_id, site) pair surfaces as [`KeyrackError::Conflict`]
/// via the unique index.
pub async fn insert_secret(db: &Database, record: NewSecretRecord) -> Result<String, KeyrackError> {
    let id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    let id_out = id.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO vault_secrets
                   (id, owner_id, site, login_email, ciphertext, nonce, tag,
                    description, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    id,
                    record.owner_id,
                    record.site,
                    record.login_email,
                    record.secret.ciphertext,
                    record.secret.nonce,
                    record.secret.tag,
                    record.description,
                    now,
                    now,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| map_unique_violation(e, "site already registered for this user"))?;

    Ok(id_out)
}

/// All secret records belonging to an owner, in insertion order.
pub async fn find_by_owner(
    db: &Database,
    owner_id: &str,
) -> Result<Vec<VaultSecretRecord>, KeyrackError> {
    let owner_id = owner_id.to_string();
    db.connection()
        .call(move |conn| -> Result<Vec<VaultSecretRecord>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM vault_secrets WHERE owner_id = ?1 ORDER BY rowid",
            ))?;
            let rows = stmt.query_map(params![owner_id], |row| record_from_row(row))?;
            rows.collect()
        })
        .await
        .map_err(map_tr_err)
}

/// Point lookup by the unique (owner_id, site) pair.
pub async fn find_by_owner_and_site(
    db: &Database,
    owner_id: &str,
    site: &str,
) -> Result<Option<VaultSecretRecord>, KeyrackError> {
    let owner_id = owner_id.to_string();
    let site = site.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<VaultSecretRecord>, rusqlite::Error> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM vault_secrets WHERE owner_id = ?1 AND site = ?2",
            ))?;
            let result = stmt.query_row(params![owner_id, site], |row| record_from_row(row));
            match result {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Apply a partial update to a record by id, bumping `updated_at`.
///
/// The caller guarantees the patch is non-empty. When the patch carries a
/// new secret, the whole triple is replaced; the old ciphertext, nonce, and
/// tag are discarded and never reused.
pub async fn update_by_id(
    db: &Database,
    id: &str,
    patch: SecretRecordPatch,
) -> Result<UpdateOutcome, KeyrackError> {
    let id = id.to_string();
    let updated_at = chrono::Utc::now().to_rfc3339();

    db.connection()
        .call(move |conn| -> Result<UpdateOutcome, rusqlite::Error> {
            let mut sets: Vec<&str> = Vec::new();
            let mut values: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

            if let Some(site) = patch.site {
                sets.push("site = ?");
                values.push(Box::new(site));
            }
            if let Some(login_email) = patch.login_email {
                sets.push("login_email = ?");
                values.push(Box::new(login_email));
            }
            if let Some(secret) = patch.secret {
                sets.push("ciphertext = ?");
                values.push(Box::new(secret.ciphertext));
                sets.push("nonce = ?");
                values.push(Box::new(secret.nonce));
                sets.push("tag = ?");
                values.push(Box::new(secret.tag));
            }
            if let Some(description) = patch.description {
                sets.push("description = ?");
                values.push(Box::new(description));
            }
            sets.push("updated_at = ?");
            values.push(Box::new(updated_at));
            values.push(Box::new(id));

            let sql = format!(
                "UPDATE vault_secrets SET {} WHERE id = ?",
                sets.join(", ")
            );
            let changed = conn.execute(
                &sql,
                rusqlite::params_from_iter(values.iter().map(|v| v.as_ref())),
            )?;
            Ok(UpdateOutcome {
                matched: changed,
                modified: changed,
            })
        })
        .await
        .map_err(|e| map_unique_violation(e, "site already registered for this user"))
}

/// Delete a record by id. Returns the number of rows removed (0 or 1).
pub async fn delete_by_id(db: &Database, id: &str) -> Result<usize, KeyrackError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| -> Result<usize, rusqlite::Error> {
            conn.execute("DELETE FROM vault_secrets WHERE id = ?1", params![id])
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

    fn make_record(owner: &str, site: &str) -> NewSecretRecord {
        NewSecretRecord {
            owner_id: owner.to_string(),
            site: site.to_string(),
            login_email: "dev@x.com".to_string(),
            secret: EncryptedSecret {
                ciphertext: "Y2lwaGVy".to_string(),
                nonce: "bm9uY2UhISE=".to_string(),
                tag: "dGFnIHRhZyB0YWcgdGFn".to_string(),
            },
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn insert_and_find_by_owner() {
        let (db, _dir) = setup_db().await;
        insert_secret(&db, make_record("u1", "github.com")).await.unwrap();
        insert_secret(&db, make_record("u1", "gitlab.com")).await.unwrap();
        insert_secret(&db, make_record("u2", "github.com")).await.unwrap();

        let records = find_by_owner(&db, "u1").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].site, "github.com");
        assert_eq!(records[1].site, "gitlab.com");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn duplicate_owner_site_is_conflict() {
        let (db, _dir) = setup_db().await;
        insert_secret(&db, make_record("u1", "github.com")).await.unwrap();
        match insert_secret(&db, make_record("u1", "github.com")).await {
            Err(KeyrackError::Conflict(_)) => {}
            other => panic!("expected Conflict, got {other:?}"),
        }
        // Same site under a different owner is fine.
        insert_secret(&db, make_record("u3", "github.com")).await.unwrap();
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn find_by_owner_and_site_point_lookup() {
        let (db, _dir) = setup_db().await;
        let id = insert_secret(&db, make_record("u1", "github.com")).await.unwrap();

        let found = find_by_owner_and_site(&db, "u1", "github.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, id);

        assert!(
            find_by_owner_and_site(&db, "u1", "gitlab.com")
                .await
                .unwrap()
                .is_none()
        );
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_replaces_triple_wholesale() {
        let (db, _dir) = setup_db().await;
        let id = insert_secret(&db, make_record("u1", "github.com")).await.unwrap();

        let patch = SecretRecordPatch {
            secret: Some(EncryptedSecret {
                ciphertext: "bmV3".to_string(),
                nonce: "bmV3LW5vbmNl".to_string(),
                tag: "bmV3LXRhZyBuZXctdGFn".to_string(),
            }),
            ..Default::default()
        };
        let outcome = update_by_id(&db, &id, patch).await.unwrap();
        assert_eq!(outcome.matched, 1);

        let record = find_by_owner_and_site(&db, "u1", "github.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.secret.ciphertext, "bmV3");
        assert_eq!(record.secret.nonce, "bmV3LW5vbmNl");
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_unknown_id_matches_nothing() {
        let (db, _dir) = setup_db().await;
        let patch = SecretRecordPatch {
            description: Some("x".to_string()),
            ..Default::default()
        };
        let outcome = update_by_id(&db, "no-such-id", patch).await.unwrap();
        assert_eq!(outcome.matched, 0);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_to_duplicate_site_is_conflict() {
        let (db, _dir) = setup_db().await;
        insert_secret(&db, make_record("u1", "github.com")).await.unwrap();
        let id = insert_secret(&db, make_record("u1", "gitlab.com")).await.unwrap();

        let patch = SecretRecordPatch {
            site: Some("github.com".to_string()),
            ..Default::default()
        };
        match update_by_id(&db, &id, patch).await {
            Err(KeyrackError::Conflict(_)) => {}
            other => panic!("expected Conflict, got {other:?}"),
        }
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn delete_by_id_reports_count() {
        let (db, _dir) = setup_db().await;
        let id = insert_secret(&db, make_record("u1", "github.com")).await.unwrap();

        assert_eq!(delete_by_id(&db, &id).await.unwrap(), 1);
        assert_eq!(delete_by_id(&db, &id).await.unwrap(), 0);
        db.close().await.unwrap();
    }
}
