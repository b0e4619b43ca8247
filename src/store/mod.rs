//! SQLite-backed store for species, users, guild settings and tournaments.

pub mod database;
pub mod guilds;
pub mod species;
pub mod tournaments;
pub mod users;

pub use database::Database;
