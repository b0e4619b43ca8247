//! Dracoviz tournament export reader.

use std::path::Path;

use serde::Deserialize;

use crate::common::error::SheetError;

/// Roster size every registered player must have.
pub const ROSTER_SIZE: usize = 6;

#[derive(Debug, Clone, Deserialize)]
pub struct DracovizPlayer {
    pub name: String,
    #[serde(default)]
    pub pokemon: Vec<DracovizPokemon>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DracovizPokemon {
    #[serde(rename = "speciesName")]
    pub species_name: String,
}

impl DracovizPlayer {
    /// Player name followed by their roster, or `***` for an incomplete roster.
    pub fn roster_line(&self) -> String {
        if self.pokemon.len() != ROSTER_SIZE {
            return format!("{} ***", self.name);
        }
        let names: Vec<&str> = self.pokemon.iter().map(|p| p.species_name.as_str()).collect();
        format!("{} {}", self.name, names.join(" "))
    }
}

pub fn parse_players(json: &str) -> Result<Vec<DracovizPlayer>, SheetError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_players(path: impl AsRef<Path>) -> Result<Vec<DracovizPlayer>, SheetError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| SheetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_players(&json)
}
