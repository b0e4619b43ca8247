//! Discord message event handling.

use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{error, info};

use crate::discord::commands::{BotSettings, CommandHandler};

/// Discord event handler.
pub struct WinonaHandler {
    /// Command handler.
    command_handler: CommandHandler,
}

impl WinonaHandler {
    pub fn new(settings: BotSettings) -> Self {
        Self {
            command_handler: CommandHandler::new(settings),
        }
    }

    pub fn handle_ready(&self, ready: &Ready) {
        info!(
            "Discord bot connected as {} ({} guilds)",
            ready.user.name,
            ready.guilds.len()
        );
    }

    pub async fn handle_message(&self, ctx: Context, msg: Message) {
        // Ignore our own messages
        if msg.author.id == ctx.cache.current_user().id {
            return;
        }

        // Ignore bots
        if msg.author.bot {
            return;
        }

        let content = msg.content.trim();
        if content.is_empty() {
            return;
        }

        if let Err(e) = self.command_handler.handle_command(&ctx, &msg, content).await {
            error!("Command handler error: {}", e);
        }
    }
}
