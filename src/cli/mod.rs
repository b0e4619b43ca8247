//! Command-line interface.

pub mod actions;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::catalog::ingest::DEFAULT_GAMEMASTER_PATH;
use crate::common::types::Tournament;

#[derive(Parser, Debug)]
#[command(name = "winona")]
#[command(about = "Draft tournament helper: Discord bot, species/user/guild store and draft sheet checks")]
#[command(version)]
pub struct Cli {
    /// SQLite database file (overrides the config file)
    #[arg(long, global = true)]
    pub db_file: Option<PathBuf>,

    /// Published Google Sheet URL with the draft picks (overrides the config file)
    #[arg(long, global = true)]
    pub draft_sheet_url: Option<String>,

    /// Read the draft sheet from a local CSV export instead of fetching it
    #[arg(long, global = true, conflicts_with = "draft_sheet_url")]
    pub sheet_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the Discord bot
    Bot,

    /// Create every table
    CreateDb,

    /// Rebuild the species table from a PvPoke gamemaster file
    CreatePokemonDb {
        /// Gamemaster pokemon.json
        #[arg(long, default_value = DEFAULT_GAMEMASTER_PATH)]
        filename: PathBuf,
    },

    /// List every species
    ListAllPokemon,

    /// List species sharing a dex number
    ListPokemonByDex {
        #[arg(long)]
        dex: u32,
    },

    /// Show one species by row id
    ListPokemonById {
        #[arg(long)]
        id: i64,
    },

    /// Change fields of one species
    UpdatePokemon {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        string_id: Option<String>,
        #[arg(long)]
        dex: Option<u32>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        form: Option<String>,
        #[arg(long)]
        shadow: Option<bool>,
        #[arg(long)]
        mega: Option<bool>,
    },

    /// Remove one species by row id
    RemovePokemon {
        #[arg(long)]
        id: i64,
    },

    /// Create the users table
    CreateUserDb,

    /// Register a user
    AddUser {
        #[arg(long, default_value = "")]
        discord_name: String,
        #[arg(long, default_value = "")]
        discord_nick: String,
        #[arg(long)]
        discord_id: u64,
        #[arg(long, default_value = "")]
        pogo_name: String,
        #[arg(long, default_value = "")]
        pogo_code: String,
        #[arg(long, default_value = "")]
        timezone: String,
    },

    /// Change a registered user's details
    UpdateUser {
        #[arg(long)]
        discord_id: u64,
        #[arg(long)]
        discord_name: Option<String>,
        #[arg(long)]
        discord_nick: Option<String>,
        #[arg(long)]
        pogo_name: Option<String>,
        #[arg(long)]
        pogo_code: Option<String>,
        #[arg(long)]
        timezone: Option<String>,
    },

    /// Remove a registered user
    RemoveUser {
        #[arg(long)]
        discord_id: u64,
    },

    /// List registered users
    ListUsers,

    /// Create the guilds table
    CreateGuildDb,

    /// Register a guild
    AddGuild {
        #[arg(long)]
        guild_id: u64,
        #[arg(long)]
        guild_name: String,
    },

    /// Remove a guild
    RemoveGuild {
        #[arg(long)]
        guild_id: u64,
    },

    /// List registered guilds
    ListGuilds,

    /// Set the channel where admin commands are accepted
    SetAdminChannelId {
        #[arg(long)]
        guild_id: u64,
        #[arg(long)]
        channel_id: u64,
    },

    /// Allow tournament commands in a channel
    AddTournamentChannelId {
        #[arg(long)]
        guild_id: u64,
        #[arg(long)]
        channel_id: u64,
    },

    /// Disallow tournament commands in a channel
    RemoveTournamentChannelId {
        #[arg(long)]
        guild_id: u64,
        #[arg(long)]
        channel_id: u64,
    },

    /// Create the tournaments table
    CreateTournamentDb,

    /// Register a tournament for a guild
    AddTournament {
        #[arg(long)]
        guild_id: u64,
        #[arg(long, default_value = "")]
        guild_name: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = Tournament::DEFAULT_CP_CAP)]
        cp_cap: u32,
        /// Round length in minutes
        #[arg(long, default_value_t = Tournament::DEFAULT_ROUND_LENGTH)]
        round_length: u32,
        #[arg(long, default_value_t = Tournament::DEFAULT_BAN_ROUNDS)]
        ban_rounds: u32,
        #[arg(long, default_value = "")]
        dracoviz_link: String,
        #[arg(long, default_value_t = 0)]
        trainer_role_id: u64,
    },

    /// Change the rules or details of a tournament
    UpdateTournament {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        cp_cap: Option<u32>,
        /// Round length in minutes
        #[arg(long)]
        round_length: Option<u32>,
        #[arg(long)]
        ban_rounds: Option<u32>,
        #[arg(long)]
        dracoviz_link: Option<String>,
        #[arg(long)]
        trainer_role_id: Option<u64>,
    },

    /// List tournaments, optionally for one guild
    ListTournaments {
        #[arg(long)]
        guild_id: Option<u64>,
    },

    /// Remove a tournament by row id
    RemoveTournament {
        #[arg(long)]
        id: i64,
    },

    /// Print the draft sheet as a table
    DisplayDraftSheet,

    /// Check picks and bans on the draft sheet
    ValidateDraftSheet,

    /// Canonicalize the ban column and list accepted bans
    ParseBans,

    /// Show one trainer's picks and ban
    ShowPlayerPicks {
        #[arg(long)]
        player_name: String,
    },

    /// Print rosters from a Dracoviz JSON export
    ShowDracovizData {
        #[arg(long)]
        filename: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "winona",
            "validate-draft-sheet",
            "--db-file",
            "test.db",
            "--draft-sheet-url",
            "https://example.com/sheet",
        ])
        .unwrap();
        assert_eq!(cli.command, Command::ValidateDraftSheet);
        assert_eq!(cli.db_file, Some(PathBuf::from("test.db")));
        assert_eq!(cli.draft_sheet_url.as_deref(), Some("https://example.com/sheet"));
    }

    #[test]
    fn test_parse_guild_command() {
        let cli = Cli::try_parse_from([
            "winona",
            "set-admin-channel-id",
            "--guild-id",
            "42",
            "--channel-id",
            "7",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::SetAdminChannelId {
                guild_id: 42,
                channel_id: 7
            }
        );
    }

    #[test]
    fn test_parse_add_tournament_defaults() {
        let cli = Cli::try_parse_from([
            "winona",
            "add-tournament",
            "--guild-id",
            "42",
            "--name",
            "Summer Cup",
            "--cp-cap",
            "2500",
        ])
        .unwrap();
        let Command::AddTournament {
            guild_id,
            name,
            cp_cap,
            round_length,
            ban_rounds,
            trainer_role_id,
            ..
        } = cli.command
        else {
            panic!("unexpected {:?}", cli.command);
        };
        assert_eq!(guild_id, 42);
        assert_eq!(name, "Summer Cup");
        assert_eq!(cp_cap, 2500);
        assert_eq!(round_length, Tournament::DEFAULT_ROUND_LENGTH);
        assert_eq!(ban_rounds, Tournament::DEFAULT_BAN_ROUNDS);
        assert_eq!(trainer_role_id, 0);
    }

    #[test]
    fn test_parse_update_pokemon() {
        let cli = Cli::try_parse_from([
            "winona",
            "update-pokemon",
            "--id",
            "3",
            "--shadow",
            "true",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::UpdatePokemon {
                id: 3,
                name: None,
                string_id: None,
                dex: None,
                region: None,
                form: None,
                shadow: Some(true),
                mega: None,
            }
        );
    }

    #[test]
    fn test_sheet_sources_conflict() {
        let result = Cli::try_parse_from([
            "winona",
            "parse-bans",
            "--sheet-file",
            "draft.csv",
            "--draft-sheet-url",
            "https://example.com/sheet",
        ]);
        assert!(result.is_err());
    }
}
