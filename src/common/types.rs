//! Shared types used across the application.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A canonical Pokémon species entry.
///
/// `string_id` is the stable external key. Regional, shadow and mega
/// variants share their base species' dex number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub name: String,
    pub string_id: String,
    pub dex_number: u32,
    pub region: Option<String>,
    pub form: Option<String>,
    pub is_shadow: bool,
    pub is_mega: bool,
}

impl SpeciesRecord {
    /// Create a plain species with no region, form, shadow or mega flags.
    pub fn new(name: impl Into<String>, string_id: impl Into<String>, dex_number: u32) -> Self {
        Self {
            name: name.into(),
            string_id: string_id.into(),
            dex_number,
            region: None,
            form: None,
            is_shadow: false,
            is_mega: false,
        }
    }
}

impl fmt::Display for SpeciesRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Dex #{})", self.name, self.dex_number)?;
        if let Some(region) = &self.region {
            write!(f, " - {}", region)?;
        }
        if let Some(form) = &self.form {
            write!(f, " - {}", form)?;
        }
        if self.is_shadow {
            write!(f, " - Shadow")?;
        }
        if self.is_mega {
            write!(f, " - Mega")?;
        }
        Ok(())
    }
}

/// A registered player with Discord and Pokémon GO identities.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct User {
    /// Row id, `None` until stored.
    pub id: Option<i64>,
    pub discord_name: String,
    pub discord_name_in_server: String,
    pub discord_id: u64,
    pub pogo_trainer_name: String,
    pub pogo_trainer_code: String,
    pub timezone: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()))?;
        writeln!(f, "Discord: {} ({}) [{}]", self.discord_name, self.discord_name_in_server, self.discord_id)?;
        writeln!(f, "Trainer: {} [{}]", self.pogo_trainer_name, self.pogo_trainer_code)?;
        write!(f, "Timezone: {}", self.timezone)
    }
}

/// Per-guild bot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Guild {
    pub guild_id: u64,
    pub guild_name: Option<String>,
    /// Channel where admin commands are accepted (0 = unset).
    pub admin_channel_id: u64,
    /// Channels where tournament commands are allowed.
    pub tournament_channel_ids: Vec<u64>,
}

impl fmt::Display for Guild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Guild(guild_id={}, admin_channel_id={}, tournament_channel_ids={:?}, guild_name={})",
            self.guild_id,
            self.admin_channel_id,
            self.tournament_channel_ids,
            self.guild_name.as_deref().unwrap_or("None")
        )
    }
}

/// A draft tournament run in one Discord server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tournament {
    /// Row id, `None` until stored.
    pub id: Option<i64>,
    pub discord_server_name: String,
    pub discord_server_id: u64,
    /// Role given to participating trainers (0 = unset).
    pub trainer_role_id: u64,
    pub name: String,
    pub description: String,
    pub cp_cap: u32,
    /// Round length in minutes.
    pub round_length: u32,
    pub ban_rounds: u32,
    pub dracoviz_link: String,
}

impl Tournament {
    pub const DEFAULT_CP_CAP: u32 = 1500;
    pub const DEFAULT_ROUND_LENGTH: u32 = 60;
    pub const DEFAULT_BAN_ROUNDS: u32 = 1;

    /// A new tournament with default rules.
    pub fn new(
        discord_server_id: u64,
        discord_server_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            discord_server_name: discord_server_name.into(),
            discord_server_id,
            trainer_role_id: 0,
            name: name.into(),
            description: String::new(),
            cp_cap: Self::DEFAULT_CP_CAP,
            round_length: Self::DEFAULT_ROUND_LENGTH,
            ban_rounds: Self::DEFAULT_BAN_ROUNDS,
            dracoviz_link: String::new(),
        }
    }

    /// One-line rules summary.
    pub fn rules(&self) -> String {
        format!(
            "CP cap: {}, Rounds: {} min, Ban rounds: {}",
            self.cp_cap, self.round_length, self.ban_rounds
        )
    }
}

impl fmt::Display for Tournament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tournament: {} ({})", self.name, self.discord_server_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_display_plain() {
        let species = SpeciesRecord::new("Bulbasaur", "bulbasaur", 1);
        assert_eq!(species.to_string(), "Bulbasaur (Dex #1)");
    }

    #[test]
    fn test_species_display_with_flags() {
        let species = SpeciesRecord {
            region: Some("Alolan".to_string()),
            is_shadow: true,
            ..SpeciesRecord::new("Raichu (Alolan) (Shadow)", "raichu_alolan_shadow", 26)
        };
        assert_eq!(
            species.to_string(),
            "Raichu (Alolan) (Shadow) (Dex #26) - Alolan - Shadow"
        );
    }

    #[test]
    fn test_guild_display() {
        let guild = Guild {
            guild_id: 42,
            guild_name: Some("League".to_string()),
            admin_channel_id: 7,
            tournament_channel_ids: vec![1, 2],
        };
        assert_eq!(
            guild.to_string(),
            "Guild(guild_id=42, admin_channel_id=7, tournament_channel_ids=[1, 2], guild_name=League)"
        );
    }

    #[test]
    fn test_tournament_defaults() {
        let tournament = Tournament::new(42, "League", "Summer Cup");
        assert_eq!(tournament.to_string(), "Tournament: Summer Cup (League)");
        assert_eq!(tournament.rules(), "CP cap: 1500, Rounds: 60 min, Ban rounds: 1");
        assert!(tournament.id.is_none());
    }
}
