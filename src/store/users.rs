//! `users` table.

use rusqlite::{params, ErrorCode, OptionalExtension, Row};

use crate::common::error::{StoreError, StoreResult};
use crate::common::types::User;
use crate::store::Database;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    discord_name TEXT NOT NULL,
    discord_name_in_server TEXT,
    discord_id INTEGER UNIQUE NOT NULL,
    pogo_trainer_name TEXT,
    pogo_trainer_code TEXT,
    timezone TEXT
);
"#;

const SELECT_USERS: &str = "SELECT id, discord_name, discord_name_in_server, discord_id, \
                            pogo_trainer_name, pogo_trainer_code, timezone FROM users";

fn map_user(row: &Row<'_>) -> rusqlite::Result<User> {
    let discord_id: i64 = row.get(3)?;
    Ok(User {
        id: Some(row.get(0)?),
        discord_name: row.get(1)?,
        discord_name_in_server: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        discord_id: discord_id as u64,
        pogo_trainer_name: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        pogo_trainer_code: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        timezone: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
    })
}

fn is_constraint_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

impl Database {
    pub fn create_users_table(&self) -> StoreResult<()> {
        self.conn.execute_batch(CREATE_USERS_TABLE)?;
        Ok(())
    }

    /// Insert a user and return its row id.
    pub fn insert_user(&self, user: &User) -> StoreResult<i64> {
        self.conn
            .execute(
                "INSERT INTO users (discord_name, discord_name_in_server, discord_id,
                                    pogo_trainer_name, pogo_trainer_code, timezone)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    user.discord_name,
                    user.discord_name_in_server,
                    user.discord_id as i64,
                    user.pogo_trainer_name,
                    user.pogo_trainer_code,
                    user.timezone,
                ],
            )
            .map_err(|e| {
                if is_constraint_violation(&e) {
                    StoreError::DuplicateUser {
                        discord_id: user.discord_id,
                    }
                } else {
                    StoreError::Sqlite(e)
                }
            })?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn user_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self
            .conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_USERS), [id], map_user)
            .optional()?)
    }

    pub fn user_by_discord_id(&self, discord_id: u64) -> StoreResult<Option<User>> {
        Ok(self
            .conn
            .query_row(
                &format!("{} WHERE discord_id = ?1", SELECT_USERS),
                [discord_id as i64],
                map_user,
            )
            .optional()?)
    }

    pub fn all_users(&self) -> StoreResult<Vec<User>> {
        let mut stmt = self.conn.prepare(&format!("{} ORDER BY id", SELECT_USERS))?;
        let rows = stmt.query_map([], map_user)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Update a stored user. Returns `false` if no row has the user's id.
    pub fn update_user(&self, user: &User) -> StoreResult<bool> {
        let Some(id) = user.id else {
            return Ok(false);
        };
        let changed = self.conn.execute(
            "UPDATE users
             SET discord_name = ?1, discord_name_in_server = ?2, discord_id = ?3,
                 pogo_trainer_name = ?4, pogo_trainer_code = ?5, timezone = ?6
             WHERE id = ?7",
            params![
                user.discord_name,
                user.discord_name_in_server,
                user.discord_id as i64,
                user.pogo_trainer_name,
                user.pogo_trainer_code,
                user.timezone,
                id,
            ],
        )?;
        Ok(changed > 0)
    }

    pub fn delete_user(&self, id: i64) -> StoreResult<bool> {
        Ok(self.conn.execute("DELETE FROM users WHERE id = ?1", [id])? > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user(discord_id: u64) -> User {
        User {
            id: None,
            discord_name: "misty".to_string(),
            discord_name_in_server: "Misty".to_string(),
            discord_id,
            pogo_trainer_name: "CeruleanMisty".to_string(),
            pogo_trainer_code: "1234 5678 9012".to_string(),
            timezone: "UTC".to_string(),
        }
    }

    fn db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.create_users_table().unwrap();
        db
    }

    #[test]
    fn test_insert_and_lookup() {
        let db = db();
        let id = db.insert_user(&make_user(1001)).unwrap();

        let by_id = db.user_by_id(id).unwrap().unwrap();
        assert_eq!(by_id.discord_name, "misty");
        assert_eq!(by_id.id, Some(id));

        let by_discord = db.user_by_discord_id(1001).unwrap().unwrap();
        assert_eq!(by_discord, by_id);
    }

    #[test]
    fn test_duplicate_discord_id_rejected() {
        let db = db();
        db.insert_user(&make_user(1001)).unwrap();

        let err = db.insert_user(&make_user(1001)).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUser { discord_id: 1001 }));
    }

    #[test]
    fn test_update_and_delete() {
        let db = db();
        let id = db.insert_user(&make_user(1001)).unwrap();

        let mut user = db.user_by_id(id).unwrap().unwrap();
        user.timezone = "America/New_York".to_string();
        assert!(db.update_user(&user).unwrap());
        assert_eq!(db.user_by_id(id).unwrap().unwrap().timezone, "America/New_York");

        assert!(db.delete_user(id).unwrap());
        assert!(db.all_users().unwrap().is_empty());
        assert!(!db.delete_user(id).unwrap());
    }

    #[test]
    fn test_update_unsaved_user_is_noop() {
        let db = db();
        assert!(!db.update_user(&make_user(5)).unwrap());
    }
}
