//! Report rendering for Discord.
//!
//! Discord caps an embed at 25 fields and 1024 characters per field value,
//! and a message at 10 embeds and 6000 characters across all of them.

use serenity::builder::{CreateEmbed, CreateMessage};

pub const MAX_FIELDS_PER_EMBED: usize = 25;
pub const MAX_EMBEDS_PER_MESSAGE: usize = 10;
pub const MAX_FIELD_VALUE_CHARS: usize = 1024;
pub const MAX_MESSAGE_CHARS: usize = 6000;
pub const MAX_FIELD_NAME_CHARS: usize = 256;

const EMBED_COLOUR: u32 = 0x00FF00;
const FIELD_NAME: &str = "MSG:";

/// Clip a field value to Discord's limit.
pub fn truncate_field(value: &str) -> String {
    clip(value, MAX_FIELD_VALUE_CHARS)
}

fn clip(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let mut clipped: String = value.chars().take(limit - 3).collect();
    clipped.push_str("...");
    clipped
}

/// Field values grouped into embeds, and embeds into messages.
pub type MessagePlan = Vec<Vec<Vec<String>>>;

/// Lay out report lines so that every message stays within Discord's limits.
pub fn plan_messages(title: &str, lines: &[String]) -> MessagePlan {
    let title_cost = title.chars().count();
    let mut messages: MessagePlan = Vec::new();
    let mut embeds: Vec<Vec<String>> = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut used = title_cost;

    for line in lines {
        let value = truncate_field(&format!("Info: {}", line));
        let cost = FIELD_NAME.len() + value.chars().count();

        if fields.len() == MAX_FIELDS_PER_EMBED {
            embeds.push(std::mem::take(&mut fields));
            used += title_cost;
        }
        if used + cost > MAX_MESSAGE_CHARS || embeds.len() == MAX_EMBEDS_PER_MESSAGE {
            if !fields.is_empty() {
                embeds.push(std::mem::take(&mut fields));
            }
            messages.push(std::mem::take(&mut embeds));
            used = title_cost;
        }

        used += cost;
        fields.push(value);
    }

    if !fields.is_empty() {
        embeds.push(fields);
    }
    if !embeds.is_empty() {
        messages.push(embeds);
    }
    messages
}

/// Build one embed from its field values.
pub fn build_embed(title: &str, values: &[String]) -> CreateEmbed {
    values.iter().fold(
        CreateEmbed::new().title(title).colour(EMBED_COLOUR),
        |embed, value| embed.field(FIELD_NAME, value, false),
    )
}

/// Build the messages carrying `lines` as embed fields.
pub fn build_messages(title: &str, lines: &[String]) -> Vec<CreateMessage> {
    plan_messages(title, lines)
        .into_iter()
        .map(|embeds| {
            CreateMessage::new().embeds(embeds.iter().map(|values| build_embed(title, values)).collect())
        })
        .collect()
}

/// A single embed message with a title and description.
pub fn notice(title: &str, description: &str) -> CreateMessage {
    CreateMessage::new().embed(
        CreateEmbed::new()
            .title(title)
            .description(description)
            .colour(EMBED_COLOUR),
    )
}

/// One embed per message, each carrying up to 25 named fields.
pub fn build_field_messages(title: &str, fields: &[(String, String)]) -> Vec<CreateMessage> {
    fields
        .chunks(MAX_FIELDS_PER_EMBED)
        .map(|chunk| {
            let embed = chunk.iter().fold(
                CreateEmbed::new().title(title).colour(EMBED_COLOUR),
                |embed, (name, value)| {
                    embed.field(clip(name, MAX_FIELD_NAME_CHARS), truncate_field(value), false)
                },
            );
            CreateMessage::new().embed(embed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(count: usize, len: usize) -> Vec<String> {
        (0..count).map(|i| format!("{:0>width$}", i, width = len)).collect()
    }

    #[test]
    fn test_single_embed() {
        let plan = plan_messages("Issues", &lines(3, 10));
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].len(), 1);
        assert_eq!(plan[0][0][0], "Info: 0000000000");
    }

    #[test]
    fn test_field_limit_starts_new_embed() {
        let plan = plan_messages("Issues", &lines(30, 10));
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].len(), 2);
        assert_eq!(plan[0][0].len(), MAX_FIELDS_PER_EMBED);
        assert_eq!(plan[0][1].len(), 5);
    }

    #[test]
    fn test_character_budget_starts_new_message() {
        let plan = plan_messages("Issues", &lines(40, 300));
        assert!(plan.len() > 1);
        for message in &plan {
            assert!(message.len() <= MAX_EMBEDS_PER_MESSAGE);
            let chars: usize = message
                .iter()
                .map(|embed| 6 + embed.iter().map(|v| FIELD_NAME.len() + v.len()).sum::<usize>())
                .sum();
            assert!(chars <= MAX_MESSAGE_CHARS);
        }
        let total: usize = plan.iter().flatten().map(Vec::len).sum();
        assert_eq!(total, 40);
    }

    #[test]
    fn test_truncate_field() {
        let long = "x".repeat(2000);
        let clipped = truncate_field(&long);
        assert_eq!(clipped.chars().count(), MAX_FIELD_VALUE_CHARS);
        assert!(clipped.ends_with("..."));
        assert_eq!(truncate_field("short"), "short");
    }

    #[test]
    fn test_empty_report_plans_nothing() {
        assert!(plan_messages("Issues", &[]).is_empty());
    }

    #[test]
    fn test_field_messages_chunk_at_field_limit() {
        let fields: Vec<_> = (0..30)
            .map(|i| (format!("Role {}", i), format!("ID: {}", i)))
            .collect();
        assert_eq!(build_field_messages("Guild Roles", &fields).len(), 2);
        assert!(build_field_messages("Guild Roles", &[]).is_empty());
    }

    #[test]
    fn test_clip_field_name() {
        let name = clip(&"n".repeat(300), MAX_FIELD_NAME_CHARS);
        assert_eq!(name.chars().count(), MAX_FIELD_NAME_CHARS);
    }
}
