//! Species ingest from the PvPoke gamemaster `pokemon.json`.
//!
//! Region, form, shadow and mega flags are derived from the species name and
//! identifier. The gamemaster `tags` are only used to cross-check.

use std::path::Path;
use std::sync::OnceLock;

use fancy_regex::Regex;
use serde::Deserialize;
use tracing::{info, warn};

use crate::common::error::IngestError;
use crate::common::types::SpeciesRecord;
use crate::store::Database;

/// Default location of the gamemaster file inside a PvPoke checkout.
pub const DEFAULT_GAMEMASTER_PATH: &str = "./external/pvpoke/src/data/gamemaster/pokemon.json";

/// Regional qualifiers that appear in parentheses in species names.
const REGIONS: [&str; 4] = ["Alolan", "Galarian", "Hisuian", "Paldean"];

static PARENTHESISED: OnceLock<Regex> = OnceLock::new();

/// One entry of the gamemaster species array.
#[derive(Debug, Clone, Deserialize)]
pub struct GamemasterEntry {
    #[serde(rename = "speciesName")]
    pub species_name: String,
    #[serde(rename = "speciesId")]
    pub species_id: String,
    pub dex: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl GamemasterEntry {
    pub fn is_shadow(&self) -> bool {
        let by_id = self.species_id.ends_with("_shadow");
        check_tag(self, "shadow", by_id);
        by_id
    }

    pub fn is_mega(&self) -> bool {
        let by_id = self.species_id.ends_with("_mega") || self.species_id.contains("_mega_");
        check_tag(self, "mega", by_id);
        by_id
    }

    pub fn to_record(&self) -> SpeciesRecord {
        SpeciesRecord {
            region: region_from_name(&self.species_name),
            form: form_from_name(&self.species_name),
            is_shadow: self.is_shadow(),
            is_mega: self.is_mega(),
            ..SpeciesRecord::new(self.species_name.clone(), self.species_id.clone(), self.dex)
        }
    }
}

fn check_tag(entry: &GamemasterEntry, tag: &str, by_id: bool) {
    let by_tag = entry.tags.iter().any(|t| t == tag);
    if by_id != by_tag {
        warn!(
            "Conflicting {} flag for '{}': id says {}, tags {:?}",
            tag, entry.species_id, by_id, entry.tags
        );
    }
}

fn parenthesised_parts(name: &str) -> Vec<String> {
    let pattern = PARENTHESISED.get_or_init(|| Regex::new(r"\((.*?)\)").unwrap());
    pattern
        .captures_iter(name)
        .filter_map(|caps| caps.ok())
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Regional qualifier from a name like `"Raichu (Alolan)"`.
pub fn region_from_name(name: &str) -> Option<String> {
    parenthesised_parts(name)
        .into_iter()
        .find(|part| REGIONS.contains(&part.as_str()))
}

/// Form from a name like `"Giratina (Origin)"`; shadow, mega and regions are not forms.
pub fn form_from_name(name: &str) -> Option<String> {
    parenthesised_parts(name).into_iter().find(|part| {
        part != "Shadow" && part != "Mega" && !REGIONS.contains(&part.as_str())
    })
}

/// Parse a gamemaster species array.
pub fn parse_gamemaster(json: &str) -> Result<Vec<GamemasterEntry>, IngestError> {
    Ok(serde_json::from_str(json)?)
}

/// Rebuild the species table from a gamemaster file. Returns the number of species stored.
pub fn ingest_species_file(db: &Database, path: impl AsRef<Path>) -> Result<usize, IngestError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IngestError::NotFound {
            path: path.display().to_string(),
        });
    }

    let json = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let entries = parse_gamemaster(&json)?;

    db.drop_species_table()?;
    db.create_species_table()?;
    for entry in &entries {
        db.insert_species(&entry.to_record())?;
    }

    info!("Ingested {} species from {}", entries.len(), path.display());
    Ok(entries.len())
}
