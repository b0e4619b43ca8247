//! First-claim-wins bookkeeping for picks and bans.

use std::collections::HashMap;
use std::fmt;

/// Who first claimed a species, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    /// Species name for picks, string identifier for bans.
    pub species: String,
    pub row_index: usize,
    pub trainer_name: String,
    pub column_label: String,
}

impl Claim {
    pub fn new(
        species: impl Into<String>,
        row_index: usize,
        trainer_name: impl Into<String>,
        column_label: impl Into<String>,
    ) -> Self {
        Self {
            species: species.into(),
            row_index,
            trainer_name: trainer_name.into(),
            column_label: column_label.into(),
        }
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, '{}', '{}']",
            self.row_index, self.trainer_name, self.column_label
        )
    }
}

/// A rejected claim together with the claim that already holds the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimConflict {
    pub owner: Claim,
    pub contender: Claim,
}

/// Claims keyed by canonical name or identifier. Entries are never overwritten.
#[derive(Debug, Clone, Default)]
pub struct ClaimBook {
    claims: HashMap<String, Claim>,
}

impl ClaimBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `claim` under `key` unless the key is already owned.
    pub fn insert_if_absent(&mut self, key: &str, claim: Claim) -> Result<(), ClaimConflict> {
        if let Some(owner) = self.claims.get(key) {
            return Err(ClaimConflict {
                owner: owner.clone(),
                contender: claim,
            });
        }
        self.claims.insert(key.to_string(), claim);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Claim> {
        self.claims.get(key)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Claim)> {
        self.claims.iter().map(|(key, claim)| (key.as_str(), claim))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_claim_wins() {
        let mut book = ClaimBook::new();
        book.insert_if_absent("Onix", Claim::new("Onix", 0, "Brock", "PICK 1"))
            .unwrap();

        let conflict = book
            .insert_if_absent("Onix", Claim::new("Onix", 3, "Ash", "PICK 2"))
            .unwrap_err();
        assert_eq!(conflict.owner.trainer_name, "Brock");
        assert_eq!(conflict.contender.trainer_name, "Ash");
        assert_eq!(book.get("Onix").unwrap().row_index, 0);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_claim_display() {
        let claim = Claim::new("Onix", 2, "Brock", "PICK 1");
        assert_eq!(claim.to_string(), "[2, 'Brock', 'PICK 1']");
    }
}
