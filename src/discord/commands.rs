//! Discord bot commands (!ping, !help, !winona ...).
//!
//! Handles command parsing and execution for Discord commands.

use std::path::PathBuf;
use std::time::Duration;

use serenity::builder::{CreateEmbed, CreateMessage};
use serenity::model::channel::Message;
use serenity::model::id::{GuildId, RoleId};
use serenity::prelude::*;
use tracing::{debug, info, warn};

use crate::common::types::Tournament;
use crate::config::types::Config;
use crate::discord::embeds::{build_field_messages, build_messages, notice, truncate_field};
use crate::discord::roles::{find_role, guild_roles, visible_roles};
use crate::sheet::SheetSource;
use crate::store::Database;
use crate::validation::orchestrator::validate_draft_sheet;
use crate::validation::NO_ISSUES;

const HELP_TEXT: &str = r#"**Available Commands:**
• `!ping` - Check that the bot is alive
• `!winona validate-draft-sheet` - Check the draft sheet for illegal or duplicate picks and bans
• `!winona picks <trainer>` - Show a trainer's picks and ban
• `!winona list-users` - List registered users
• `!winona tournament create <name>` - Create a tournament for this server
• `!winona tournament list` - List this server's tournaments
• `!winona list-roles` - List the server's roles
• `!winona role-info <role>` - Show a role by name, id or mention
• `!help` - Show this help message"#;

const GUILD_ONLY: &str = "This command can only be used in a server.";
const ADMIN_ONLY: &str = "This command can only be used in the admin channel.";
const GUILD_NOT_CACHED: &str = "Server details are not available yet, try again shortly.";

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Ping,
    Help,
    ValidateDraftSheet,
    Picks { trainer: String },
    ListUsers,
    TournamentCreate { name: String },
    TournamentList,
    ListRoles,
    RoleInfo { role: String },
}

impl BotCommand {
    /// Commands restricted to the admin channel.
    pub fn is_admin_only(&self) -> bool {
        !matches!(self, BotCommand::Ping | BotCommand::Help)
    }
}

/// Parse a message into a command. Returns `None` for anything else.
pub fn parse_command(prefix: &str, content: &str) -> Option<BotCommand> {
    let rest = content.trim().strip_prefix(prefix)?;
    let mut words = rest.split_whitespace();
    let command = words.next()?.to_lowercase();

    match command.as_str() {
        "ping" => Some(BotCommand::Ping),
        "help" => Some(BotCommand::Help),
        "winona" => {
            let sub = words.next()?.to_lowercase();
            match sub.as_str() {
                "validate-draft-sheet" => Some(BotCommand::ValidateDraftSheet),
                "picks" => Some(BotCommand::Picks {
                    trainer: words.collect::<Vec<_>>().join(" "),
                }),
                "list-users" => Some(BotCommand::ListUsers),
                "tournament" => match words.next()?.to_lowercase().as_str() {
                    "create" => Some(BotCommand::TournamentCreate {
                        name: words.collect::<Vec<_>>().join(" "),
                    }),
                    "list" => Some(BotCommand::TournamentList),
                    _ => None,
                },
                "list-roles" => Some(BotCommand::ListRoles),
                "role-info" => Some(BotCommand::RoleInfo {
                    role: words.collect::<Vec<_>>().join(" "),
                }),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Embed fields for a tournament listing.
pub fn tournament_fields(tournaments: &[Tournament]) -> Vec<(String, String)> {
    tournaments
        .iter()
        .map(|t| {
            (
                format!("Tournament ID: {}", t.id.unwrap_or_default()),
                format!("Name: {}, {}", t.name, t.rules()),
            )
        })
        .collect()
}

/// Admin channel for a guild: the stored one if set, else the configured one.
pub fn resolve_admin_channel(stored: Option<u64>, configured: Option<u64>) -> Option<u64> {
    stored.filter(|&id| id != 0).or(configured.filter(|&id| id != 0))
}

/// Settings the command handler needs from the configuration.
#[derive(Debug, Clone)]
pub struct BotSettings {
    pub prefix: String,
    pub db_path: PathBuf,
    pub sheet_url: Option<String>,
    pub fetch_timeout: Duration,
    pub admin_channel_id: Option<u64>,
}

impl BotSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            prefix: config.discord.prefix.clone(),
            db_path: PathBuf::from(&config.database.path),
            sheet_url: config.sheet.draft_url.clone(),
            fetch_timeout: Duration::from_secs(config.sheet.fetch_timeout_secs),
            admin_channel_id: config.discord.admin_channel_id,
        }
    }
}

/// Command handler for Discord bot.
pub struct CommandHandler {
    settings: BotSettings,
}

impl CommandHandler {
    pub fn new(settings: BotSettings) -> Self {
        Self { settings }
    }

    /// Parse and execute a command from Discord.
    ///
    /// Returns `true` if the message was a command, `false` otherwise.
    pub async fn handle_command(
        &self,
        ctx: &Context,
        msg: &Message,
        content: &str,
    ) -> anyhow::Result<bool> {
        let Some(command) = parse_command(&self.settings.prefix, content) else {
            return Ok(false);
        };
        debug!("Processing command {:?} from {}", command, msg.author.name);

        if command.is_admin_only() && !self.check_admin_channel(ctx, msg).await? {
            return Ok(true);
        }

        match command {
            BotCommand::Ping => {
                msg.channel_id.say(&ctx.http, "Pong!").await?;
            }
            BotCommand::Help => {
                msg.channel_id.say(&ctx.http, HELP_TEXT).await?;
            }
            BotCommand::ValidateDraftSheet => self.handle_validate(ctx, msg).await?,
            BotCommand::Picks { trainer } => self.handle_picks(ctx, msg, &trainer).await?,
            BotCommand::ListUsers => self.handle_list_users(ctx, msg).await?,
            BotCommand::TournamentCreate { name } => {
                self.handle_tournament_create(ctx, msg, &name).await?
            }
            BotCommand::TournamentList => self.handle_tournament_list(ctx, msg).await?,
            BotCommand::ListRoles => self.handle_list_roles(ctx, msg).await?,
            BotCommand::RoleInfo { role } => self.handle_role_info(ctx, msg, &role).await?,
        }
        Ok(true)
    }

    /// Reply and return `false` unless the message came from the admin channel.
    async fn check_admin_channel(&self, ctx: &Context, msg: &Message) -> anyhow::Result<bool> {
        let Some(guild_id) = msg.guild_id else {
            msg.channel_id.say(&ctx.http, GUILD_ONLY).await?;
            return Ok(false);
        };

        let stored = self.stored_admin_channel(guild_id.get()).await;
        let admin = resolve_admin_channel(stored, self.settings.admin_channel_id);
        if admin != Some(msg.channel_id.get()) {
            msg.channel_id.say(&ctx.http, ADMIN_ONLY).await?;
            return Ok(false);
        }
        Ok(true)
    }

    async fn stored_admin_channel(&self, guild_id: u64) -> Option<u64> {
        let db_path = self.settings.db_path.clone();
        let lookup = tokio::task::spawn_blocking(move || {
            Database::open_existing(&db_path)?.guild_by_id(guild_id)
        })
        .await;

        match lookup {
            Ok(Ok(guild)) => guild.map(|g| g.admin_channel_id),
            Ok(Err(e)) => {
                debug!("No stored guild settings for {}: {}", guild_id, e);
                None
            }
            Err(e) => {
                warn!("Guild lookup task failed: {}", e);
                None
            }
        }
    }

    fn sheet_source(&self) -> Option<SheetSource> {
        self.settings.sheet_url.as_ref().map(|url| SheetSource::Url {
            url: url.clone(),
            timeout: self.settings.fetch_timeout,
        })
    }

    async fn handle_validate(&self, ctx: &Context, msg: &Message) -> anyhow::Result<()> {
        info!("validate-draft-sheet from {}", msg.author.name);
        let Some(source) = self.sheet_source() else {
            msg.channel_id.say(&ctx.http, "Error: No draft sheet URL configured.").await?;
            return Ok(());
        };
        msg.react(&ctx.http, '👀').await.ok();

        let report = match validate_draft_sheet(self.settings.db_path.clone(), &source).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Draft sheet validation failed: {}", e);
                msg.channel_id.say(&ctx.http, format!("Error: {}", e)).await?;
                return Ok(());
            }
        };

        if report.is_empty() {
            msg.channel_id.say(&ctx.http, NO_ISSUES).await?;
            return Ok(());
        }
        info!("Reporting {} draft sheet issues", report.len());
        for message in build_messages("Issues", &report.lines()) {
            msg.channel_id.send_message(&ctx.http, message).await?;
        }
        Ok(())
    }

    async fn handle_picks(&self, ctx: &Context, msg: &Message, trainer: &str) -> anyhow::Result<()> {
        if trainer.is_empty() {
            msg.channel_id.say(&ctx.http, "Usage: `!winona picks <trainer>`").await?;
            return Ok(());
        }
        let Some(source) = self.sheet_source() else {
            msg.channel_id.say(&ctx.http, "Error: No draft sheet URL configured.").await?;
            return Ok(());
        };

        let reply = match source.load().await {
            Ok(sheet) => match sheet.player_entry(trainer) {
                Some((index, row)) => format!("Row {}: {}", index, row.summary()),
                None => format!("Trainer '{}' not found in the draft sheet.", trainer),
            },
            Err(e) => format!("Error: {}", e),
        };
        msg.channel_id.say(&ctx.http, reply).await?;
        Ok(())
    }

    async fn handle_list_users(&self, ctx: &Context, msg: &Message) -> anyhow::Result<()> {
        let db_path = self.settings.db_path.clone();
        let users = tokio::task::spawn_blocking(move || Database::open_existing(&db_path)?.all_users())
            .await??;

        if users.is_empty() {
            msg.channel_id.say(&ctx.http, "No users found in the database.").await?;
            return Ok(());
        }
        let lines: Vec<String> = users
            .iter()
            .map(|u| format!("{} ({})", u.discord_name_in_server, u.discord_id))
            .collect();
        for message in build_messages("Users", &lines) {
            msg.channel_id.send_message(&ctx.http, message).await?;
        }
        Ok(())
    }

    async fn handle_tournament_create(
        &self,
        ctx: &Context,
        msg: &Message,
        name: &str,
    ) -> anyhow::Result<()> {
        let Some(guild_id) = msg.guild_id else {
            msg.channel_id.say(&ctx.http, GUILD_ONLY).await?;
            return Ok(());
        };
        if name.is_empty() {
            msg.channel_id
                .say(&ctx.http, "Usage: `!winona tournament create <name>`")
                .await?;
            return Ok(());
        }

        let server_name = ctx
            .cache
            .guild(guild_id)
            .map(|guild| guild.name.clone())
            .unwrap_or_default();
        let tournament = Tournament::new(guild_id.get(), server_name, name);
        let db_path = self.settings.db_path.clone();
        let stored = tournament.clone();
        let created = tokio::task::spawn_blocking(move || {
            let db = Database::open_existing(&db_path)?;
            db.create_tournaments_table()?;
            db.insert_tournament(&stored)
        })
        .await?;

        match created {
            Ok(id) => {
                info!("Created tournament {} ({}) in guild {}", tournament.name, id, guild_id);
                let description = format!(
                    "Tournament '{}' created with ID {}. {}.",
                    tournament.name,
                    id,
                    tournament.rules()
                );
                msg.channel_id
                    .send_message(&ctx.http, notice("Tournament Created", &description))
                    .await?;
            }
            Err(e) => {
                warn!("Failed to create tournament: {}", e);
                msg.channel_id.say(&ctx.http, format!("Error: {}", e)).await?;
            }
        }
        Ok(())
    }

    async fn handle_tournament_list(&self, ctx: &Context, msg: &Message) -> anyhow::Result<()> {
        let Some(guild_id) = msg.guild_id else {
            msg.channel_id.say(&ctx.http, GUILD_ONLY).await?;
            return Ok(());
        };

        let db_path = self.settings.db_path.clone();
        let server_id = guild_id.get();
        let tournaments = tokio::task::spawn_blocking(move || {
            let db = Database::open_existing(&db_path)?;
            db.create_tournaments_table()?;
            db.tournaments_by_server(server_id)
        })
        .await??;

        if tournaments.is_empty() {
            msg.channel_id.say(&ctx.http, "There are no active tournaments.").await?;
            return Ok(());
        }
        for message in build_field_messages("Current Tournaments", &tournament_fields(&tournaments)) {
            msg.channel_id.send_message(&ctx.http, message).await?;
        }
        Ok(())
    }

    async fn handle_list_roles(&self, ctx: &Context, msg: &Message) -> anyhow::Result<()> {
        let Some(guild_id) = msg.guild_id else {
            msg.channel_id.say(&ctx.http, GUILD_ONLY).await?;
            return Ok(());
        };

        let Some(roles) = ctx.cache.guild(guild_id).map(|guild| guild_roles(&guild)) else {
            msg.channel_id.say(&ctx.http, GUILD_NOT_CACHED).await?;
            return Ok(());
        };
        let roles = visible_roles(guild_id.get(), roles);
        if roles.is_empty() {
            msg.channel_id.say(&ctx.http, "This guild has no roles.").await?;
            return Ok(());
        }

        let fields: Vec<_> = roles
            .iter()
            .map(|role| (role.name.clone(), format!("ID: {}", role.id)))
            .collect();
        for message in build_field_messages("Guild Roles", &fields) {
            msg.channel_id.send_message(&ctx.http, message).await?;
        }
        Ok(())
    }

    async fn handle_role_info(&self, ctx: &Context, msg: &Message, query: &str) -> anyhow::Result<()> {
        let Some(guild_id) = msg.guild_id else {
            msg.channel_id.say(&ctx.http, GUILD_ONLY).await?;
            return Ok(());
        };
        if query.is_empty() {
            msg.channel_id.say(&ctx.http, "Usage: `!winona role-info <role>`").await?;
            return Ok(());
        }

        let reply = role_info(ctx, guild_id, query);
        match reply {
            Ok(message) => msg.channel_id.send_message(&ctx.http, message).await?,
            Err(text) => msg.channel_id.say(&ctx.http, text).await?,
        };
        Ok(())
    }
}

/// Build the role-info embed from the cache, or the reply text when the role is unknown.
fn role_info(ctx: &Context, guild_id: GuildId, query: &str) -> Result<CreateMessage, String> {
    let guild = ctx.cache.guild(guild_id).ok_or_else(|| GUILD_NOT_CACHED.to_string())?;
    let roles = guild_roles(&guild);
    let found = find_role(&roles, query).ok_or_else(|| format!("Role '{}' not found.", query))?;
    let role = guild
        .roles
        .get(&RoleId::new(found.id))
        .ok_or_else(|| format!("Role '{}' not found.", query))?;

    let members: Vec<String> = guild
        .members
        .values()
        .filter(|member| member.roles.contains(&role.id))
        .map(|member| format!("<@{}>", member.user.id.get()))
        .collect();
    let members = if members.is_empty() {
        "No members in this role.".to_string()
    } else {
        truncate_field(&members.join(", "))
    };

    let embed = CreateEmbed::new()
        .title(format!("Role Info: {}", role.name))
        .colour(role.colour)
        .field("ID", role.id.get().to_string(), false)
        .field("Color", format!("#{:06X}", role.colour.0), false)
        .field("Mentionable", role.mentionable.to_string(), false)
        .field("Hoisted", role.hoist.to_string(), false)
        .field("Position", role.position.to_string(), false)
        .field("Created At", role.id.created_at().to_string(), false)
        .field("Members", members, false);
    Ok(CreateMessage::new().embed(embed))
}
