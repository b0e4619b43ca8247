//! Discord bot integration.
//!
//! Prefix commands that run draft sheet validation and report the result
//! as embeds, plus tournament and role utilities.

pub mod client;
pub mod commands;
pub mod embeds;
pub mod handler;
pub mod roles;

pub use client::DiscordBot;
