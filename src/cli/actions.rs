//! CLI command execution.

use std::path::Path;

use anyhow::{anyhow, Context as _, Result};
use tracing::info;

use crate::catalog::ingest::ingest_species_file;
use crate::cli::Command;
use crate::common::types::{Guild, Tournament, User};
use crate::sheet::dracoviz::load_players;
use crate::sheet::SheetSource;
use crate::store::Database;
use crate::validation::bans::canonicalize_bans;
use crate::validation::orchestrator::{load_catalog, validate_draft_sheet};

/// Execute a non-bot CLI command.
pub async fn run(command: Command, db_path: &Path, sheet: Option<SheetSource>) -> Result<()> {
    match command {
        Command::Bot => Err(anyhow!("the bot is started from main")),

        Command::CreateDb => {
            Database::open(db_path)?.create_all_tables()?;
            println!("All tables ready in {}", db_path.display());
            Ok(())
        }

        Command::CreatePokemonDb { filename } => {
            let db = Database::open(db_path)?;
            let count = ingest_species_file(&db, &filename)?;
            println!("Stored {} species in {}", count, db_path.display());
            Ok(())
        }
        Command::ListAllPokemon => {
            let db = open_existing(db_path)?;
            let all = db.all_species()?;
            for species in &all {
                println!("{}", species);
            }
            println!("{} species, {} dex numbers", all.len(), db.species_dex_numbers()?.len());
            Ok(())
        }
        Command::ListPokemonByDex { dex } => {
            let found = open_existing(db_path)?.species_by_dex(dex)?;
            if found.is_empty() {
                println!("No pokemon with dex number {}", dex);
            }
            for species in found {
                println!("{}", species);
            }
            Ok(())
        }
        Command::ListPokemonById { id } => {
            match open_existing(db_path)?.species_by_id(id)? {
                Some(species) => println!("{}", species),
                None => println!("No pokemon with id {}", id),
            }
            Ok(())
        }
        Command::UpdatePokemon {
            id,
            name,
            string_id,
            dex,
            region,
            form,
            shadow,
            mega,
        } => {
            let db = open_existing(db_path)?;
            let mut species = db
                .species_by_id(id)?
                .ok_or_else(|| anyhow!("No pokemon with id {}", id))?;
            if let Some(name) = name {
                species.name = name;
            }
            if let Some(string_id) = string_id {
                species.string_id = string_id;
            }
            if let Some(dex) = dex {
                species.dex_number = dex;
            }
            if let Some(region) = region {
                species.region = Some(region).filter(|r| !r.is_empty());
            }
            if let Some(form) = form {
                species.form = Some(form).filter(|f| !f.is_empty());
            }
            if let Some(shadow) = shadow {
                species.is_shadow = shadow;
            }
            if let Some(mega) = mega {
                species.is_mega = mega;
            }
            db.update_species(id, &species)?;
            println!("Updated {}", species);
            Ok(())
        }
        Command::RemovePokemon { id } => {
            if open_existing(db_path)?.delete_species(id)? {
                println!("Removed pokemon {}", id);
            } else {
                println!("No pokemon with id {}", id);
            }
            Ok(())
        }

        Command::CreateUserDb => {
            Database::open(db_path)?.create_users_table()?;
            println!("Users table ready in {}", db_path.display());
            Ok(())
        }
        Command::AddUser {
            discord_name,
            discord_nick,
            discord_id,
            pogo_name,
            pogo_code,
            timezone,
        } => {
            let user = User {
                id: None,
                discord_name,
                discord_name_in_server: discord_nick,
                discord_id,
                pogo_trainer_name: pogo_name,
                pogo_trainer_code: pogo_code,
                timezone,
            };
            let db = open_existing(db_path)?;
            let id = db.insert_user(&user)?;
            if let Some(stored) = db.user_by_id(id)? {
                println!("Added user\n{}", stored);
            }
            Ok(())
        }
        Command::UpdateUser {
            discord_id,
            discord_name,
            discord_nick,
            pogo_name,
            pogo_code,
            timezone,
        } => {
            let db = open_existing(db_path)?;
            let mut user = db
                .user_by_discord_id(discord_id)?
                .ok_or_else(|| anyhow!("No user with Discord ID {}", discord_id))?;
            if let Some(name) = discord_name {
                user.discord_name = name;
            }
            if let Some(nick) = discord_nick {
                user.discord_name_in_server = nick;
            }
            if let Some(name) = pogo_name {
                user.pogo_trainer_name = name;
            }
            if let Some(code) = pogo_code {
                user.pogo_trainer_code = code;
            }
            if let Some(timezone) = timezone {
                user.timezone = timezone;
            }
            db.update_user(&user)?;
            println!("Updated user\n{}", user);
            Ok(())
        }
        Command::RemoveUser { discord_id } => {
            let db = open_existing(db_path)?;
            match db.user_by_discord_id(discord_id)?.and_then(|u| u.id) {
                Some(id) => {
                    db.delete_user(id)?;
                    println!("Removed user {}", discord_id);
                }
                None => println!("No user with Discord ID {}", discord_id),
            }
            Ok(())
        }
        Command::ListUsers => {
            let users = open_existing(db_path)?.all_users()?;
            if users.is_empty() {
                println!("No users found in the database.");
            }
            for user in users {
                println!("{}\n", user);
            }
            Ok(())
        }

        Command::CreateGuildDb => {
            Database::open(db_path)?.create_guilds_table()?;
            println!("Guilds table ready in {}", db_path.display());
            Ok(())
        }
        Command::AddGuild { guild_id, guild_name } => {
            let guild = Guild {
                guild_id,
                guild_name: Some(guild_name),
                ..Guild::default()
            };
            open_existing(db_path)?.insert_guild(&guild)?;
            println!("Added {}", guild);
            Ok(())
        }
        Command::RemoveGuild { guild_id } => {
            open_existing(db_path)?.delete_guild(guild_id)?;
            println!("Removed guild {}", guild_id);
            Ok(())
        }
        Command::ListGuilds => {
            for guild in open_existing(db_path)?.all_guilds()? {
                println!("{}", guild);
            }
            Ok(())
        }
        Command::SetAdminChannelId { guild_id, channel_id } => {
            open_existing(db_path)?.set_admin_channel(guild_id, channel_id)?;
            println!("Admin channel for guild {} set to {}", guild_id, channel_id);
            Ok(())
        }
        Command::AddTournamentChannelId { guild_id, channel_id } => {
            if open_existing(db_path)?.add_tournament_channel(guild_id, channel_id)? {
                println!("Added tournament channel {} to guild {}", channel_id, guild_id);
            } else {
                println!("Channel {} is already a tournament channel", channel_id);
            }
            Ok(())
        }
        Command::RemoveTournamentChannelId { guild_id, channel_id } => {
            if open_existing(db_path)?.remove_tournament_channel(guild_id, channel_id)? {
                println!("Removed tournament channel {} from guild {}", channel_id, guild_id);
            } else {
                println!("Channel {} is not a tournament channel", channel_id);
            }
            Ok(())
        }

        Command::CreateTournamentDb => {
            Database::open(db_path)?.create_tournaments_table()?;
            println!("Tournaments table ready in {}", db_path.display());
            Ok(())
        }
        Command::AddTournament {
            guild_id,
            guild_name,
            name,
            description,
            cp_cap,
            round_length,
            ban_rounds,
            dracoviz_link,
            trainer_role_id,
        } => {
            let tournament = Tournament {
                trainer_role_id,
                description,
                cp_cap,
                round_length,
                ban_rounds,
                dracoviz_link,
                ..Tournament::new(guild_id, guild_name, name)
            };
            let id = open_existing(db_path)?.insert_tournament(&tournament)?;
            println!("Added {} with id {}", tournament, id);
            Ok(())
        }
        Command::UpdateTournament {
            id,
            name,
            description,
            cp_cap,
            round_length,
            ban_rounds,
            dracoviz_link,
            trainer_role_id,
        } => {
            let db = open_existing(db_path)?;
            let mut tournament = db
                .tournament_by_id(id)?
                .ok_or_else(|| anyhow!("No tournament with id {}", id))?;
            if let Some(name) = name {
                tournament.name = name;
            }
            if let Some(description) = description {
                tournament.description = description;
            }
            if let Some(cp_cap) = cp_cap {
                tournament.cp_cap = cp_cap;
            }
            if let Some(round_length) = round_length {
                tournament.round_length = round_length;
            }
            if let Some(ban_rounds) = ban_rounds {
                tournament.ban_rounds = ban_rounds;
            }
            if let Some(link) = dracoviz_link {
                tournament.dracoviz_link = link;
            }
            if let Some(role_id) = trainer_role_id {
                tournament.trainer_role_id = role_id;
            }
            db.update_tournament(&tournament)?;
            println!("Updated {} - {}", tournament, tournament.rules());
            Ok(())
        }
        Command::ListTournaments { guild_id } => {
            let db = open_existing(db_path)?;
            let tournaments = match guild_id {
                Some(guild_id) => db.tournaments_by_server(guild_id)?,
                None => db.all_tournaments()?,
            };
            if tournaments.is_empty() {
                println!("There are no active tournaments.");
            }
            for tournament in tournaments {
                println!(
                    "{:4} {} - {}",
                    tournament.id.unwrap_or_default(),
                    tournament,
                    tournament.rules()
                );
            }
            Ok(())
        }
        Command::RemoveTournament { id } => {
            if open_existing(db_path)?.delete_tournament(id)? {
                println!("Removed tournament {}", id);
            } else {
                println!("No tournament with id {}", id);
            }
            Ok(())
        }

        Command::DisplayDraftSheet => {
            let sheet = require_sheet(sheet)?.load().await?;
            if sheet.is_empty() {
                println!("The draft sheet has no rows.");
                return Ok(());
            }
            print!("{}", sheet.render_table());
            Ok(())
        }
        Command::ValidateDraftSheet => {
            let source = require_sheet(sheet)?;
            let report = validate_draft_sheet(db_path, &source).await?;
            println!("{}", report.render());
            Ok(())
        }
        Command::ParseBans => {
            let catalog = load_catalog(db_path).await?;
            let sheet = require_sheet(sheet)?.load().await?;
            let resolution = canonicalize_bans(&catalog, &sheet);
            for diagnostic in &resolution.diagnostics {
                println!("{}", diagnostic);
            }
            if resolution.bans_by_name.is_empty() {
                println!("No bans accepted.");
            }

            let mut bans: Vec<_> = resolution.bans_by_name.iter().collect();
            bans.sort_by_key(|(name, claim)| (claim.row_index, *name));
            for (name, claim) in bans {
                println!("{} ({}) banned by {}", name, claim.species, claim);
            }
            Ok(())
        }
        Command::ShowPlayerPicks { player_name } => {
            let sheet = require_sheet(sheet)?.load().await?;
            match sheet.player_entry(&player_name) {
                Some((index, row)) => println!("{:4} {}", index, row.summary()),
                None => println!("Trainer '{}' not found in the draft sheet.", player_name),
            }
            Ok(())
        }
        Command::ShowDracovizData { filename } => {
            let players = load_players(&filename)?;
            info!("Loaded {} players from {}", players.len(), filename.display());
            for player in &players {
                println!("{}", player.roster_line());
            }
            Ok(())
        }
    }
}

fn open_existing(db_path: &Path) -> Result<Database> {
    Database::open_existing(db_path)
        .with_context(|| format!("Database file not found at {}", db_path.display()))
}

fn require_sheet(sheet: Option<SheetSource>) -> Result<SheetSource> {
    sheet.ok_or_else(|| anyhow!("No draft sheet: pass --draft-sheet-url or --sheet-file, or set sheet.draft_url"))
}
