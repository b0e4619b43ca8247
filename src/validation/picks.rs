//! Pick column validation.
//!
//! Picks are checked column by column (all of `PICK 1`, then `PICK 2`, ...),
//! rows ascending within a column. That order decides who owns a species
//! picked twice.

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::sheet::{DraftSheet, PICK_COLUMNS};
use crate::validation::claims::{Claim, ClaimBook};
use crate::validation::diagnostic::Diagnostic;
use crate::validation::matcher::{best_match, SimilarityScorer, TokenSortRatio};

/// Validate every pick with the default scorer.
pub fn validate_picks(catalog: &Catalog, sheet: &DraftSheet, bans_by_name: &ClaimBook) -> Vec<Diagnostic> {
    validate_picks_with(&TokenSortRatio, catalog, sheet, bans_by_name)
}

/// Validate every pick against the catalog and the accepted bans.
pub fn validate_picks_with<S>(
    scorer: &S,
    catalog: &Catalog,
    sheet: &DraftSheet,
    bans_by_name: &ClaimBook,
) -> Vec<Diagnostic>
where
    S: SimilarityScorer + ?Sized,
{
    let mut diagnostics = Vec::new();
    let mut picks = ClaimBook::new();

    for (column, label) in PICK_COLUMNS.iter().enumerate() {
        for (index, row) in sheet.rows().iter().enumerate() {
            let Some(raw) = row.pick(column) else {
                continue;
            };
            let trainer = row.trainer_name.as_str();

            let best = match best_match(scorer, raw, catalog.names()) {
                Ok(best) => best,
                Err(_) => {
                    diagnostics.push(Diagnostic::unresolved(format!(
                        "{} {:4} {}: '{}' has no match to a pokemon.",
                        label, index, trainer, raw
                    )));
                    continue;
                }
            };

            if best != raw {
                debug!("Pick '{}' in row {} is closest to '{}'", raw, index, best);
                diagnostics.push(Diagnostic::unresolved(format!(
                    "{} {:4} {}: '{}' needs correction. Did you mean '{}'?",
                    label, index, trainer, raw, best
                )));
                continue;
            }

            let claim = Claim::new(best, index, trainer, *label);
            // Banned species never enter the pick book.
            if let Some(ban) = bans_by_name.get(best) {
                diagnostics.push(Diagnostic::banned(format!(
                    "{} is banned by '{}'. '{}' needs to try again.",
                    best, ban, claim
                )));
                continue;
            }
            match picks.insert_if_absent(best, claim) {
                Ok(()) => debug!("{} picked by {}", best, trainer),
                Err(conflict) => diagnostics.push(Diagnostic::collision(format!(
                    "{} already picked by '{}'. '{}' needs to try again.",
                    best, conflict.owner, conflict.contender
                ))),
            }
        }
    }

    info!("Validated {} picks with {} issues", picks.len(), diagnostics.len());
    diagnostics
}
