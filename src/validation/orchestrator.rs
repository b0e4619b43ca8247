//! Gathers the inputs of a reconciliation run.
//!
//! The catalog is read first so that an unavailable store fails the run
//! before the sheet is fetched.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogSource};
use crate::common::error::{ReconcileError, StoreError};
use crate::sheet::SheetSource;
use crate::store::Database;
use crate::validation::diagnostic::DiagnosticKind;
use crate::validation::report::{reconcile, Report};

/// Read the species catalog off the async runtime.
pub async fn load_catalog(db_path: impl Into<PathBuf>) -> Result<Catalog, ReconcileError> {
    let db_path = db_path.into();
    tokio::task::spawn_blocking(move || {
        let db = Database::open_existing(&db_path)?;
        db.load_catalog()
    })
    .await
    .map_err(|e| StoreError::Worker {
        message: e.to_string(),
    })?
}

/// Validate the draft sheet from `source` against the catalog at `db_path`.
pub async fn validate_draft_sheet(
    db_path: impl Into<PathBuf>,
    source: &SheetSource,
) -> Result<Report, ReconcileError> {
    let catalog = load_catalog(db_path).await?;
    if catalog.is_empty() {
        warn!("Species catalog is empty, every pick will be reported");
    }
    debug!("Loaded {} species", catalog.len());

    let sheet = source.load().await?;
    let report = reconcile(&catalog, &sheet);
    info!(
        "Draft sheet validation finished: {} unresolved, {} collisions, {} banned picks",
        report.count(DiagnosticKind::UnresolvedCell),
        report.count(DiagnosticKind::Collision),
        report.count(DiagnosticKind::CrossConstraintViolation)
    );
    Ok(report)
}
