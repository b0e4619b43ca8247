//! Species catalog.
//!
//! The catalog is a read-only snapshot of every known species, loaded once
//! per validation run from a [`CatalogSource`].

pub mod ingest;

use crate::common::error::ReconcileError;
use crate::common::types::SpeciesRecord;
use crate::store::Database;

/// Anything that can hand over the full species list.
pub trait CatalogSource {
    /// Load every species. Failure here aborts a reconciliation run.
    fn load_catalog(&self) -> Result<Catalog, ReconcileError>;
}

/// In-memory species list in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    species: Vec<SpeciesRecord>,
}

impl Catalog {
    pub fn new(species: Vec<SpeciesRecord>) -> Self {
        Self { species }
    }

    #[cfg(test)]
    pub fn species(&self) -> &[SpeciesRecord] {
        &self.species
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Species names in catalog order; the candidate list for pick matching.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.species.iter().map(|s| s.name.as_str())
    }

    /// Species whose name or string identifier equals `token`, ignoring case.
    pub fn lookup_exact<'a>(&'a self, token: &str) -> impl Iterator<Item = &'a SpeciesRecord> + 'a {
        let needle = token.to_lowercase();
        self.species.iter().filter(move |s| {
            s.name.to_lowercase() == needle || s.string_id.to_lowercase() == needle
        })
    }
}

impl FromIterator<SpeciesRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = SpeciesRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl CatalogSource for Catalog {
    fn load_catalog(&self) -> Result<Catalog, ReconcileError> {
        Ok(self.clone())
    }
}

impl CatalogSource for Database {
    fn load_catalog(&self) -> Result<Catalog, ReconcileError> {
        Ok(Catalog::new(self.all_species()?))
    }
}
