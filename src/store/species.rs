//! `pokemon_species` table.

use rusqlite::{params, OptionalExtension, Row};

use crate::common::error::StoreResult;
use crate::common::types::SpeciesRecord;
use crate::store::Database;

const CREATE_SPECIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS pokemon_species (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    string_id TEXT NOT NULL UNIQUE,
    dex_number INTEGER NOT NULL,
    region TEXT,
    form TEXT,
    shadow BOOLEAN DEFAULT 0,
    mega BOOLEAN DEFAULT 0
);
"#;

const SELECT_SPECIES: &str =
    "SELECT name, string_id, dex_number, region, form, shadow, mega FROM pokemon_species";

fn map_species(row: &Row<'_>) -> rusqlite::Result<SpeciesRecord> {
    Ok(SpeciesRecord {
        name: row.get(0)?,
        string_id: row.get(1)?,
        dex_number: row.get(2)?,
        region: row.get(3)?,
        form: row.get(4)?,
        is_shadow: row.get(5)?,
        is_mega: row.get(6)?,
    })
}

impl Database {
    pub fn create_species_table(&self) -> StoreResult<()> {
        self.conn.execute_batch(CREATE_SPECIES_TABLE)?;
        Ok(())
    }

    pub fn drop_species_table(&self) -> StoreResult<()> {
        self.conn.execute("DROP TABLE IF EXISTS pokemon_species", [])?;
        Ok(())
    }

    /// Insert a species and return its row id.
    pub fn insert_species(&self, species: &SpeciesRecord) -> StoreResult<i64> {
        self.conn.execute(
            "INSERT INTO pokemon_species (name, string_id, dex_number, region, form, shadow, mega)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                species.name,
                species.string_id,
                species.dex_number,
                species.region,
                species.form,
                species.is_shadow,
                species.is_mega,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All species in insertion order.
    pub fn all_species(&self) -> StoreResult<Vec<SpeciesRecord>> {
        let mut stmt = self.conn.prepare(&format!("{} ORDER BY id", SELECT_SPECIES))?;
        let rows = stmt.query_map([], map_species)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// All species sharing a dex number.
    pub fn species_by_dex(&self, dex_number: u32) -> StoreResult<Vec<SpeciesRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE dex_number = ?1 ORDER BY id", SELECT_SPECIES))?;
        let rows = stmt.query_map([dex_number], map_species)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn species_by_id(&self, id: i64) -> StoreResult<Option<SpeciesRecord>> {
        Ok(self
            .conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_SPECIES), [id], map_species)
            .optional()?)
    }

    /// Distinct dex numbers in ascending order.
    pub fn species_dex_numbers(&self) -> StoreResult<Vec<u32>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT dex_number FROM pokemon_species ORDER BY dex_number")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Overwrite the species stored under row `id`. Returns `false` if there is none.
    pub fn update_species(&self, id: i64, species: &SpeciesRecord) -> StoreResult<bool> {
        let changed = self.conn.execute(
            "UPDATE pokemon_species
             SET name = ?1, string_id = ?2, dex_number = ?3, region = ?4, form = ?5,
                 shadow = ?6, mega = ?7
             WHERE id = ?8",
            params![
                species.name,
                species.string_id,
                species.dex_number,
                species.region,
                species.form,
                species.is_shadow,
                species.is_mega,
                id,
            ],
        )?;
        Ok(changed > 0)
    }

    pub fn delete_species(&self, id: i64) -> StoreResult<bool> {
        Ok(self.conn.execute("DELETE FROM pokemon_species WHERE id = ?1", [id])? > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.create_species_table().unwrap();
        db.insert_species(&SpeciesRecord::new("Raichu", "raichu", 26)).unwrap();
        db.insert_species(&SpeciesRecord {
            region: Some("Alolan".to_string()),
            ..SpeciesRecord::new("Raichu (Alolan)", "raichu_alolan", 26)
        })
        .unwrap();
        db.insert_species(&SpeciesRecord::new("Bulbasaur", "bulbasaur", 1)).unwrap();
        db
    }

    #[test]
    fn test_all_species_round_trip_in_order() {
        let db = seeded();
        let all = db.all_species().unwrap();
        let ids: Vec<_> = all.iter().map(|s| s.string_id.as_str()).collect();
        assert_eq!(ids, vec!["raichu", "raichu_alolan", "bulbasaur"]);
        assert_eq!(all[1].region.as_deref(), Some("Alolan"));
        assert!(!all[1].is_shadow);
    }

    #[test]
    fn test_species_by_dex_returns_variants() {
        let db = seeded();
        assert_eq!(db.species_by_dex(26).unwrap().len(), 2);
        assert!(db.species_by_dex(999).unwrap().is_empty());
    }

    #[test]
    fn test_species_by_id() {
        let db = seeded();
        assert_eq!(db.species_by_id(1).unwrap().unwrap().name, "Raichu");
        assert!(db.species_by_id(10_000).unwrap().is_none());
    }

    #[test]
    fn test_update_species() {
        let db = seeded();
        let mut raichu = db.species_by_id(1).unwrap().unwrap();
        raichu.form = Some("Costume".to_string());
        raichu.is_shadow = true;
        assert!(db.update_species(1, &raichu).unwrap());

        let stored = db.species_by_id(1).unwrap().unwrap();
        assert_eq!(stored.form.as_deref(), Some("Costume"));
        assert!(stored.is_shadow);
        assert!(!db.update_species(10_000, &raichu).unwrap());
    }

    #[test]
    fn test_update_species_keeps_string_id_unique() {
        let db = seeded();
        let bulbasaur = db.species_by_id(3).unwrap().unwrap();
        assert!(db.update_species(1, &bulbasaur).is_err());
    }

    #[test]
    fn test_delete_species() {
        let db = seeded();
        assert!(db.delete_species(2).unwrap());
        assert!(!db.delete_species(2).unwrap());
        assert_eq!(db.species_by_dex(26).unwrap().len(), 1);
    }

    #[test]
    fn test_dex_numbers_are_distinct_and_sorted() {
        let db = seeded();
        assert_eq!(db.species_dex_numbers().unwrap(), vec![1, 26]);
    }

    #[test]
    fn test_drop_table() {
        let db = seeded();
        db.drop_species_table().unwrap();
        assert!(db.all_species().is_err());
    }
}
