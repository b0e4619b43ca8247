//! Reconciliation report assembly.

use tracing::info;

use crate::catalog::Catalog;
use crate::sheet::DraftSheet;
use crate::validation::bans::canonicalize_bans;
use crate::validation::diagnostic::{Diagnostic, DiagnosticKind};
use crate::validation::picks::validate_picks;

/// Shown when a run produced no diagnostics.
pub const NO_ISSUES: &str = "No issues found.";

/// Ordered diagnostics of one run: ban issues, then pick issues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    pub fn lines(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Plain-text rendering, one diagnostic per line.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return NO_ISSUES.to_string();
        }
        self.lines().join("\n")
    }
}

/// Reconcile a sheet against an already loaded catalog.
pub fn reconcile(catalog: &Catalog, sheet: &DraftSheet) -> Report {
    let bans = canonicalize_bans(catalog, sheet);
    let picks = validate_picks(catalog, sheet, &bans.bans_by_name);

    let mut diagnostics = bans.diagnostics;
    diagnostics.extend(picks);

    info!("Reconciled {} rows: {} issues", sheet.len(), diagnostics.len());
    Report { diagnostics }
}
