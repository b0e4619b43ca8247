//! Guild role lookups for the role commands.

use serenity::model::guild::Guild;

/// The parts of a role the listing needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSummary {
    pub id: u64,
    pub name: String,
    pub position: u16,
}

impl RoleSummary {
    pub fn new(id: u64, name: impl Into<String>, position: u16) -> Self {
        Self {
            id,
            name: name.into(),
            position,
        }
    }
}

/// Roles of a cached guild.
pub fn guild_roles(guild: &Guild) -> Vec<RoleSummary> {
    guild
        .roles
        .values()
        .map(|role| RoleSummary::new(role.id.get(), role.name.clone(), role.position))
        .collect()
}

/// Roles worth listing: everything but `@everyone`, highest position first.
///
/// The `@everyone` role shares its id with the guild.
pub fn visible_roles(guild_id: u64, roles: Vec<RoleSummary>) -> Vec<RoleSummary> {
    let mut visible: Vec<_> = roles.into_iter().filter(|r| r.id != guild_id).collect();
    visible.sort_by(|a, b| b.position.cmp(&a.position).then_with(|| a.name.cmp(&b.name)));
    visible
}

/// Find a role by mention (`<@&id>`), raw id, or name ignoring case.
pub fn find_role<'a>(roles: &'a [RoleSummary], query: &str) -> Option<&'a RoleSummary> {
    let query = query.trim();
    let id = query
        .strip_prefix("<@&")
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(query)
        .parse::<u64>()
        .ok();

    if let Some(id) = id {
        if let Some(role) = roles.iter().find(|r| r.id == id) {
            return Some(role);
        }
    }
    let wanted = query.to_lowercase();
    roles.iter().find(|r| r.name.to_lowercase() == wanted)
}
