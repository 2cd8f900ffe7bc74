//! Admin accounts, kept in their own database next to the catalog.

use super::password::HASHER_NAME;
use crate::sqlite_column;
use crate::sqlite_persistence::{
    migrate_if_needed, Column, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP,
};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

const ADMINS_TABLE_V_0: Table = Table {
    name: "admins",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("username", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("password_hash", &SqlType::Text, non_null = true),
        sqlite_column!("hasher", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[],
    unique_constraints: &[],
};

pub const ADMIN_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[ADMINS_TABLE_V_0],
    migration: None,
}];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminAccount {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub hasher: String,
    pub created: i64,
}

#[derive(Clone)]
pub struct SqliteAdminStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteAdminStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let mut conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open admin database {:?}", db_path))?;
        migrate_if_needed(&mut conn, ADMIN_VERSIONED_SCHEMAS)?;
        info!("Opened admin database {:?}", db_path);
        Ok(SqliteAdminStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn get_admin(&self, username: &str) -> Result<Option<AdminAccount>> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let account = conn
            .query_row(
                "SELECT id, username, password_hash, hasher, created FROM admins WHERE username = ?1",
                params![username],
                |row| {
                    Ok(AdminAccount {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        password_hash: row.get(2)?,
                        hasher: row.get(3)?,
                        created: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(account)
    }

    /// Inserts the account unless one with the same username exists.
    /// Returns whether a row was written.
    pub fn insert_admin_if_absent(&self, username: &str, password_hash: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let inserted = conn.execute(
            "INSERT INTO admins (username, password_hash, hasher) VALUES (?1, ?2, ?3) \
             ON CONFLICT(username) DO NOTHING",
            params![username, password_hash, HASHER_NAME],
        )?;
        Ok(inserted > 0)
    }

    #[cfg(test)]
    pub fn check_password(&self, username: &str, password: &str) -> Result<bool> {
        match self.get_admin(username)? {
            Some(account) => super::password::verify_password(password, &account.password_hash),
            None => Ok(false),
        }
    }

    pub fn count_admins(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM admins", [], |r| r.get(0))?;
        Ok(count as usize)
    }
}
