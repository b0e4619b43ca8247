//! `tournaments` table.

use rusqlite::{params, OptionalExtension, Row};

use crate::common::error::{StoreError, StoreResult};
use crate::common::types::Tournament;
use crate::store::Database;

const CREATE_TOURNAMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tournaments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    discord_server_name TEXT,
    discord_server_id INTEGER NOT NULL,
    trainer_role_id INTEGER,
    tournament_name TEXT,
    tournament_description TEXT,
    cp_cap INTEGER,
    round_length INTEGER,
    ban_rounds INTEGER,
    dracoviz_link TEXT
);
"#;

const SELECT_TOURNAMENTS: &str = "SELECT id, discord_server_name, discord_server_id, trainer_role_id, \
                                  tournament_name, tournament_description, cp_cap, round_length, \
                                  ban_rounds, dracoviz_link FROM tournaments";

fn map_tournament(row: &Row<'_>) -> rusqlite::Result<Tournament> {
    let server_id: i64 = row.get(2)?;
    let role_id: Option<i64> = row.get(3)?;
    Ok(Tournament {
        id: Some(row.get(0)?),
        discord_server_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        discord_server_id: server_id as u64,
        trainer_role_id: role_id.unwrap_or(0) as u64,
        name: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        description: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        cp_cap: row.get::<_, Option<u32>>(6)?.unwrap_or(Tournament::DEFAULT_CP_CAP),
        round_length: row
            .get::<_, Option<u32>>(7)?
            .unwrap_or(Tournament::DEFAULT_ROUND_LENGTH),
        ban_rounds: row
            .get::<_, Option<u32>>(8)?
            .unwrap_or(Tournament::DEFAULT_BAN_ROUNDS),
        dracoviz_link: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
    })
}

fn check_tournament(tournament: &Tournament) -> StoreResult<()> {
    if tournament.discord_server_id == 0 || tournament.discord_server_id > i64::MAX as u64 {
        return Err(StoreError::InvalidTournament {
            message: "invalid Discord server ID".to_string(),
        });
    }
    if tournament.name.trim().is_empty() {
        return Err(StoreError::InvalidTournament {
            message: "tournament name cannot be empty".to_string(),
        });
    }
    Ok(())
}

impl Database {
    pub fn create_tournaments_table(&self) -> StoreResult<()> {
        self.conn.execute_batch(CREATE_TOURNAMENTS_TABLE)?;
        Ok(())
    }

    /// Insert a tournament and return its row id.
    pub fn insert_tournament(&self, tournament: &Tournament) -> StoreResult<i64> {
        check_tournament(tournament)?;
        self.conn.execute(
            "INSERT INTO tournaments (discord_server_name, discord_server_id, trainer_role_id,
                                      tournament_name, tournament_description, cp_cap,
                                      round_length, ban_rounds, dracoviz_link)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                tournament.discord_server_name,
                tournament.discord_server_id as i64,
                tournament.trainer_role_id as i64,
                tournament.name,
                tournament.description,
                tournament.cp_cap,
                tournament.round_length,
                tournament.ban_rounds,
                tournament.dracoviz_link,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update a stored tournament. Returns `false` if no row has its id.
    pub fn update_tournament(&self, tournament: &Tournament) -> StoreResult<bool> {
        let Some(id) = tournament.id else {
            return Ok(false);
        };
        check_tournament(tournament)?;
        let changed = self.conn.execute(
            "UPDATE tournaments
             SET discord_server_name = ?1, discord_server_id = ?2, trainer_role_id = ?3,
                 tournament_name = ?4, tournament_description = ?5, cp_cap = ?6,
                 round_length = ?7, ban_rounds = ?8, dracoviz_link = ?9
             WHERE id = ?10",
            params![
                tournament.discord_server_name,
                tournament.discord_server_id as i64,
                tournament.trainer_role_id as i64,
                tournament.name,
                tournament.description,
                tournament.cp_cap,
                tournament.round_length,
                tournament.ban_rounds,
                tournament.dracoviz_link,
                id,
            ],
        )?;
        Ok(changed > 0)
    }

    pub fn tournament_by_id(&self, id: i64) -> StoreResult<Option<Tournament>> {
        Ok(self
            .conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_TOURNAMENTS), [id], map_tournament)
            .optional()?)
    }

    /// Tournaments of one Discord server, oldest first.
    pub fn tournaments_by_server(&self, discord_server_id: u64) -> StoreResult<Vec<Tournament>> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE discord_server_id = ?1 ORDER BY id",
            SELECT_TOURNAMENTS
        ))?;
        let rows = stmt.query_map([discord_server_id as i64], map_tournament)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn all_tournaments(&self) -> StoreResult<Vec<Tournament>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY id", SELECT_TOURNAMENTS))?;
        let rows = stmt.query_map([], map_tournament)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn delete_tournament(&self, id: i64) -> StoreResult<bool> {
        Ok(self.conn.execute("DELETE FROM tournaments WHERE id = ?1", [id])? > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.create_tournaments_table().unwrap();
        db
    }

    fn summer_cup() -> Tournament {
        Tournament {
            trainer_role_id: 987654321,
            description: "A friendly 3v3 tournament".to_string(),
            dracoviz_link: "https://dracoviz.com/mytournament".to_string(),
            ..Tournament::new(123456789, "My Discord Server", "Summer 2024 Classic")
        }
    }

    #[test]
    fn test_insert_and_fetch() {
        let db = db();
        let id = db.insert_tournament(&summer_cup()).unwrap();

        let stored = db.tournament_by_id(id).unwrap().unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.name, "Summer 2024 Classic");
        assert_eq!(stored.trainer_role_id, 987654321);
        assert_eq!(stored.cp_cap, 1500);
        assert_eq!(Tournament { id: None, ..stored }, summer_cup());
        assert!(db.tournament_by_id(id + 1).unwrap().is_none());
    }

    #[test]
    fn test_by_server_keeps_servers_apart() {
        let db = db();
        db.insert_tournament(&summer_cup()).unwrap();
        db.insert_tournament(&Tournament::new(123456789, "My Discord Server", "Winter Cup"))
            .unwrap();
        db.insert_tournament(&Tournament::new(5, "Elsewhere", "Other Cup")).unwrap();

        let names: Vec<_> = db
            .tournaments_by_server(123456789)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Summer 2024 Classic", "Winter Cup"]);
        assert!(db.tournaments_by_server(6).unwrap().is_empty());
        assert_eq!(db.all_tournaments().unwrap().len(), 3);
    }

    #[test]
    fn test_update() {
        let db = db();
        let id = db.insert_tournament(&summer_cup()).unwrap();

        let mut tournament = db.tournament_by_id(id).unwrap().unwrap();
        tournament.cp_cap = 2500;
        tournament.ban_rounds = 2;
        assert!(db.update_tournament(&tournament).unwrap());

        let stored = db.tournament_by_id(id).unwrap().unwrap();
        assert_eq!(stored.cp_cap, 2500);
        assert_eq!(stored.ban_rounds, 2);

        assert!(!db.update_tournament(&summer_cup()).unwrap());
    }

    #[test]
    fn test_invalid_tournaments_rejected() {
        let db = db();
        let unnamed = Tournament::new(1, "Server", "  ");
        assert!(matches!(
            db.insert_tournament(&unnamed),
            Err(StoreError::InvalidTournament { .. })
        ));

        let no_server = Tournament::new(0, "Server", "Cup");
        assert!(matches!(
            db.insert_tournament(&no_server),
            Err(StoreError::InvalidTournament { .. })
        ));
    }

    #[test]
    fn test_delete() {
        let db = db();
        let id = db.insert_tournament(&summer_cup()).unwrap();
        assert!(db.delete_tournament(id).unwrap());
        assert!(!db.delete_tournament(id).unwrap());
        assert!(db.all_tournaments().unwrap().is_empty());
    }
}
