//! `guilds` table.

use rusqlite::{params, OptionalExtension};

use crate::common::error::{StoreError, StoreResult};
use crate::common::types::Guild;
use crate::store::Database;

const CREATE_GUILDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS guilds (
    guild_id INTEGER PRIMARY KEY,
    guild_name TEXT,
    admin_channel_id INTEGER NOT NULL DEFAULT 0,
    tournament_channel_ids TEXT NOT NULL DEFAULT '[]'
);
"#;

const SELECT_GUILDS: &str =
    "SELECT guild_id, guild_name, admin_channel_id, tournament_channel_ids FROM guilds";

type GuildRow = (i64, Option<String>, i64, String);

fn read_guild_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<GuildRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn into_guild((guild_id, guild_name, admin_channel_id, channels): GuildRow) -> StoreResult<Guild> {
    let guild_id = guild_id as u64;
    let tournament_channel_ids = serde_json::from_str(&channels)
        .map_err(|source| StoreError::ChannelList { guild_id, source })?;
    Ok(Guild {
        guild_id,
        guild_name,
        admin_channel_id: admin_channel_id as u64,
        tournament_channel_ids,
    })
}

fn encode_channels(guild: &Guild) -> StoreResult<String> {
    serde_json::to_string(&guild.tournament_channel_ids).map_err(|source| StoreError::ChannelList {
        guild_id: guild.guild_id,
        source,
    })
}

impl Database {
    pub fn create_guilds_table(&self) -> StoreResult<()> {
        self.conn.execute_batch(CREATE_GUILDS_TABLE)?;
        Ok(())
    }

    /// Register a guild. The id must be positive and the name non-empty.
    pub fn insert_guild(&self, guild: &Guild) -> StoreResult<()> {
        if guild.guild_id == 0 || guild.guild_id > i64::MAX as u64 {
            return Err(StoreError::InvalidGuild {
                message: "invalid guild ID".to_string(),
            });
        }
        if guild.guild_name.as_deref().map_or(true, str::is_empty) {
            return Err(StoreError::InvalidGuild {
                message: "guild name cannot be empty".to_string(),
            });
        }

        self.conn.execute(
            "INSERT INTO guilds (guild_id, guild_name, admin_channel_id, tournament_channel_ids)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                guild.guild_id as i64,
                guild.guild_name,
                guild.admin_channel_id as i64,
                encode_channels(guild)?,
            ],
        )?;
        Ok(())
    }

    pub fn guild_by_id(&self, guild_id: u64) -> StoreResult<Option<Guild>> {
        self.conn
            .query_row(
                &format!("{} WHERE guild_id = ?1", SELECT_GUILDS),
                [guild_id as i64],
                read_guild_row,
            )
            .optional()?
            .map(into_guild)
            .transpose()
    }

    pub fn all_guilds(&self) -> StoreResult<Vec<Guild>> {
        let mut stmt = self.conn.prepare(&format!("{} ORDER BY guild_id", SELECT_GUILDS))?;
        let rows = stmt
            .query_map([], read_guild_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(into_guild).collect()
    }

    pub fn update_guild(&self, guild: &Guild) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE guilds SET guild_name = ?1, admin_channel_id = ?2, tournament_channel_ids = ?3
             WHERE guild_id = ?4",
            params![
                guild.guild_name,
                guild.admin_channel_id as i64,
                encode_channels(guild)?,
                guild.guild_id as i64,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::GuildNotFound {
                guild_id: guild.guild_id,
            });
        }
        Ok(())
    }

    pub fn delete_guild(&self, guild_id: u64) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM guilds WHERE guild_id = ?1", [guild_id as i64])?;
        if changed == 0 {
            return Err(StoreError::GuildNotFound { guild_id });
        }
        Ok(())
    }

    fn require_guild(&self, guild_id: u64) -> StoreResult<Guild> {
        self.guild_by_id(guild_id)?
            .ok_or(StoreError::GuildNotFound { guild_id })
    }

    pub fn set_admin_channel(&self, guild_id: u64, channel_id: u64) -> StoreResult<()> {
        let mut guild = self.require_guild(guild_id)?;
        guild.admin_channel_id = channel_id;
        self.update_guild(&guild)
    }

    /// Add a tournament channel. Returns `false` if it was already listed.
    pub fn add_tournament_channel(&self, guild_id: u64, channel_id: u64) -> StoreResult<bool> {
        let mut guild = self.require_guild(guild_id)?;
        if guild.tournament_channel_ids.contains(&channel_id) {
            return Ok(false);
        }
        guild.tournament_channel_ids.push(channel_id);
        self.update_guild(&guild)?;
        Ok(true)
    }

    /// Remove a tournament channel. Returns `false` if it was not listed.
    pub fn remove_tournament_channel(&self, guild_id: u64, channel_id: u64) -> StoreResult<bool> {
        let mut guild = self.require_guild(guild_id)?;
        let before = guild.tournament_channel_ids.len();
        guild.tournament_channel_ids.retain(|id| *id != channel_id);
        if guild.tournament_channel_ids.len() == before {
            return Ok(false);
        }
        self.update_guild(&guild)?;
        Ok(true)
    }
}
