//! Ban column canonicalization.
//!
//! A ban cell is a comma-separated list of species names or identifiers that
//! must resolve to exactly one dex number. Accepted cells are written in
//! canonical form: the matched identifiers, sorted and joined with `", "`.
//! Rows are processed last to first, so when two trainers ban the same
//! species the later row owns it.

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::common::types::SpeciesRecord;
use crate::sheet::{DraftSheet, BAN_COLUMN};
use crate::validation::claims::{Claim, ClaimBook};
use crate::validation::diagnostic::Diagnostic;

/// Outcome of resolving a single ban cell against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellResolution {
    NoMatch,
    /// Names of the matched species, spanning more than one dex number.
    TooMany(Vec<String>),
    /// Resolves to one species but is not written canonically.
    NeedsCorrection { canonical: String },
    /// Matched species ordered by identifier.
    Canonical(Vec<SpeciesRecord>),
}

/// Result of canonicalizing the whole ban column.
#[derive(Debug, Clone, Default)]
pub struct BanResolution {
    pub diagnostics: Vec<Diagnostic>,
    /// Accepted bans keyed by species name.
    pub bans_by_name: ClaimBook,
}

/// Resolve one raw ban cell.
pub fn resolve_ban_cell(catalog: &Catalog, raw: &str) -> CellResolution {
    let mut matched: Vec<&SpeciesRecord> = Vec::new();
    let mut dex_numbers: Vec<u32> = Vec::new();

    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        for species in catalog.lookup_exact(token) {
            if !matched.iter().any(|m| m.string_id == species.string_id) {
                matched.push(species);
            }
            if !dex_numbers.contains(&species.dex_number) {
                dex_numbers.push(species.dex_number);
            }
        }
    }

    match dex_numbers.len() {
        0 => CellResolution::NoMatch,
        1 => {
            matched.sort_by(|a, b| a.string_id.cmp(&b.string_id));
            let canonical = join(matched.iter().map(|s| s.string_id.as_str()));
            let by_name = join(matched.iter().map(|s| s.name.as_str())).to_lowercase();

            let written = raw.trim().to_lowercase();
            if written == canonical || written == by_name {
                CellResolution::Canonical(matched.into_iter().cloned().collect())
            } else {
                CellResolution::NeedsCorrection { canonical }
            }
        }
        _ => CellResolution::TooMany(matched.iter().map(|s| s.name.clone()).collect()),
    }
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(", ")
}

/// Canonicalize every ban cell and collect the accepted bans.
pub fn canonicalize_bans(catalog: &Catalog, sheet: &DraftSheet) -> BanResolution {
    let mut resolution = BanResolution::default();
    let mut bans_by_id = ClaimBook::new();

    for (index, row) in sheet.rows().iter().enumerate().rev() {
        let Some(raw) = row.ban() else {
            continue;
        };
        let trainer = row.trainer_name.as_str();
        let prefix = format!("{} {:4} {}", BAN_COLUMN, index, trainer);

        match resolve_ban_cell(catalog, raw) {
            CellResolution::NoMatch => {
                debug!("Ban '{}' in row {} has no match", raw, index);
                resolution.diagnostics.push(Diagnostic::unresolved(format!(
                    "{}: '{}' has no match to a pokemon.",
                    prefix, raw
                )));
            }
            CellResolution::TooMany(names) => {
                debug!("Ban '{}' in row {} matches {} species", raw, index, names.len());
                resolution.diagnostics.push(Diagnostic::unresolved(format!(
                    "{}: '{}' matches too many pokemon: {}.",
                    prefix,
                    raw,
                    names.join(", ")
                )));
            }
            CellResolution::NeedsCorrection { canonical } => {
                resolution.diagnostics.push(Diagnostic::unresolved(format!(
                    "{}: '{}' is not in canonical form. Use '{}'.",
                    prefix, raw, canonical
                )));
            }
            CellResolution::Canonical(species) => {
                for record in species {
                    let claim = Claim::new(&record.string_id, index, trainer, BAN_COLUMN);
                    match bans_by_id.insert_if_absent(&record.string_id, claim.clone()) {
                        Ok(()) => {
                            debug!("{} banned by {}", record.string_id, trainer);
                            if let Err(conflict) =
                                resolution.bans_by_name.insert_if_absent(&record.name, claim)
                            {
                                warn!(
                                    "Species name '{}' is shared by {} and {}",
                                    record.name, conflict.owner.species, conflict.contender.species
                                );
                            }
                        }
                        Err(conflict) => {
                            resolution.diagnostics.push(Diagnostic::collision(format!(
                                "{} already banned by '{}'. '{}' needs to try again.",
                                record.string_id, conflict.owner, conflict.contender
                            )));
                        }
                    }
                }
            }
        }
    }

    info!(
        "Resolved {} bans with {} issues",
        bans_by_id.len(),
        resolution.diagnostics.len()
    );
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::table::SheetRow;
    use crate::validation::diagnostic::DiagnosticKind;

    fn catalog() -> Catalog {
        vec![
            SpeciesRecord::new("Bulbasaur", "bulbasaur", 1),
            SpeciesRecord::new("Charizard", "charizard", 6),
            SpeciesRecord::new("Charizard (Shadow)", "charizard_shadow", 6),
            SpeciesRecord::new("Raichu (Alolan)", "raichu_alolan", 26),
        ]
        .into_iter()
        .collect()
    }

    fn ban_sheet(bans: &[(&str, &str)]) -> DraftSheet {
        DraftSheet::from_rows(
            bans.iter()
                .map(|(trainer, ban)| SheetRow::new(*trainer).with_ban(*ban))
                .collect(),
        )
    }

    #[test]
    fn test_exact_name_or_id_resolves_cleanly() {
        let catalog = catalog();
        for species in catalog.species() {
            for cell in [species.name.as_str(), species.string_id.as_str()] {
                let result = canonicalize_bans(&catalog, &ban_sheet(&[("Ash", cell)]));
                assert!(result.diagnostics.is_empty(), "cell {:?}", cell);
                let claim = result.bans_by_name.get(&species.name).unwrap();
                assert_eq!(claim.species, species.string_id);
            }
        }
    }

    #[test]
    fn test_no_match_is_one_diagnostic() {
        let result = canonicalize_bans(&catalog(), &ban_sheet(&[("Ash", "Mewtwo, Mew")]));
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::UnresolvedCell);
        assert_eq!(
            result.diagnostics[0].message,
            "BAN    0 Ash: 'Mewtwo, Mew' has no match to a pokemon."
        );
        assert!(result.bans_by_name.is_empty());
    }

    #[test]
    fn test_several_dex_numbers_is_too_many() {
        let result = canonicalize_bans(&catalog(), &ban_sheet(&[("Ash", "bulbasaur, charizard")]));
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0]
            .message
            .contains("matches too many pokemon: Bulbasaur, Charizard."));
        assert!(result.bans_by_name.is_empty());
    }

    #[test]
    fn test_variants_of_one_dex_number() {
        let catalog = catalog();

        assert_eq!(
            resolve_ban_cell(&catalog, "charizard_shadow, Charizard"),
            CellResolution::NeedsCorrection {
                canonical: "charizard, charizard_shadow".to_string()
            }
        );

        match resolve_ban_cell(&catalog, "Charizard, charizard_shadow") {
            CellResolution::Canonical(species) => assert_eq!(species.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unmatched_tokens_are_dropped() {
        assert_eq!(
            resolve_ban_cell(&catalog(), "Bulbasaur, Missingno"),
            CellResolution::NeedsCorrection {
                canonical: "bulbasaur".to_string()
            }
        );
    }

    #[test]
    fn test_later_row_wins_contested_ban() {
        let sheet = ban_sheet(&[("Misty", "Bulbasaur"), ("Brock", "bulbasaur")]);
        let result = canonicalize_bans(&catalog(), &sheet);

        assert_eq!(result.bans_by_name.get("Bulbasaur").unwrap().trainer_name, "Brock");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::Collision);
        assert_eq!(
            result.diagnostics[0].message,
            "bulbasaur already banned by '[1, 'Brock', 'BAN']'. '[0, 'Misty', 'BAN']' needs to try again."
        );
    }

    #[test]
    fn test_partially_claimed_ban_cell() {
        let sheet = ban_sheet(&[
            ("Ash", ""),
            ("Misty", "Charizard, charizard_shadow"),
            ("Brock", "charizard_shadow"),
        ]);
        let result = canonicalize_bans(&catalog(), &sheet);

        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::Collision);
        assert_eq!(
            result.diagnostics[0].message,
            "charizard_shadow already banned by '[2, 'Brock', 'BAN']'. '[1, 'Misty', 'BAN']' needs to try again."
        );
        assert_eq!(result.bans_by_name.get("Charizard").unwrap().trainer_name, "Misty");
        assert_eq!(
            result.bans_by_name.get("Charizard (Shadow)").unwrap().trainer_name,
            "Brock"
        );
        assert_eq!(result.bans_by_name.len(), 2);
    }

    #[test]
    fn test_blank_cells_are_skipped() {
        let sheet = DraftSheet::from_rows(vec![
            SheetRow::new("Ash"),
            SheetRow::new("Misty").with_ban("  "),
        ]);
        let result = canonicalize_bans(&catalog(), &sheet);
        assert!(result.diagnostics.is_empty());
        assert!(result.bans_by_name.is_empty());
    }
}
