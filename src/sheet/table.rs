//! Draft sheet snapshot.
//!
//! A draft sheet has one row per trainer with a `Trainer` column, a `BAN`
//! column and six pick columns. Row position is significant: it is echoed in
//! every diagnostic and decides ban precedence.

use std::fmt::Write as _;

use tracing::debug;

use crate::common::error::SheetError;

pub const TRAINER_COLUMN: &str = "Trainer";
pub const BAN_COLUMN: &str = "BAN";
pub const PICK_COLUMNS: [&str; 6] = ["PICK 1", "PICK 2", "PICK 3", "PICK 4", "PICK 5", "PICK 6"];

/// Returns the cell text unless it is missing or whitespace-only.
pub fn filled(cell: Option<&String>) -> Option<&str> {
    cell.map(String::as_str).filter(|text| !text.trim().is_empty())
}

/// One trainer's draft entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SheetRow {
    pub trainer_name: String,
    /// Raw pick cells, indexed like [`PICK_COLUMNS`].
    pub picks: Vec<Option<String>>,
    pub ban_cell: Option<String>,
}

impl SheetRow {
    #[cfg(test)]
    pub fn new(trainer_name: impl Into<String>) -> Self {
        Self {
            trainer_name: trainer_name.into(),
            picks: vec![None; PICK_COLUMNS.len()],
            ban_cell: None,
        }
    }

    /// Set the pick in column `index` (0 is `PICK 1`).
    #[cfg(test)]
    pub fn with_pick(mut self, index: usize, value: impl Into<String>) -> Self {
        if index >= self.picks.len() {
            self.picks.resize(index + 1, None);
        }
        self.picks[index] = Some(value.into());
        self
    }

    #[cfg(test)]
    pub fn with_ban(mut self, value: impl Into<String>) -> Self {
        self.ban_cell = Some(value.into());
        self
    }

    /// Non-blank pick text in column `index`.
    pub fn pick(&self, index: usize) -> Option<&str> {
        filled(self.picks.get(index).and_then(Option::as_ref))
    }

    /// Non-blank ban text.
    pub fn ban(&self) -> Option<&str> {
        filled(self.ban_cell.as_ref())
    }

    /// One-line summary of the row's picks and ban.
    pub fn summary(&self) -> String {
        let picks: Vec<&str> = (0..PICK_COLUMNS.len())
            .map(|i| self.pick(i).unwrap_or("-"))
            .collect();
        format!(
            "{}: picks [{}], ban [{}]",
            self.trainer_name,
            picks.join(", "),
            self.ban().unwrap_or("-")
        )
    }
}

/// A parsed draft sheet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftSheet {
    rows: Vec<SheetRow>,
}

impl DraftSheet {
    #[cfg(test)]
    pub fn from_rows(rows: Vec<SheetRow>) -> Self {
        Self { rows }
    }

    /// Parse the CSV export of a draft sheet.
    ///
    /// The header row must contain the trainer, ban and six pick columns.
    /// Extra columns are ignored; cells are kept verbatim.
    pub fn from_csv(text: &str) -> Result<Self, SheetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| SheetError::MissingColumn {
                    column: name.to_string(),
                })
        };

        let trainer_idx = column(TRAINER_COLUMN)?;
        let ban_idx = column(BAN_COLUMN)?;
        let pick_idx = PICK_COLUMNS
            .iter()
            .map(|name| column(*name))
            .collect::<Result<Vec<_>, _>>()?;

        let cell = |record: &csv::StringRecord, idx: usize| {
            record
                .get(idx)
                .filter(|text| !text.trim().is_empty())
                .map(str::to_string)
        };

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(SheetRow {
                trainer_name: record.get(trainer_idx).unwrap_or("").trim().to_string(),
                picks: pick_idx.iter().map(|&idx| cell(&record, idx)).collect(),
                ban_cell: cell(&record, ban_idx),
            });
        }

        debug!("Parsed draft sheet with {} rows", rows.len());
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find a trainer's row, ignoring case and surrounding whitespace.
    pub fn player_entry(&self, trainer_name: &str) -> Option<(usize, &SheetRow)> {
        let wanted = trainer_name.trim().to_lowercase();
        self.rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.trainer_name.to_lowercase() == wanted)
    }

    /// Render the sheet as a fixed-width text table.
    pub fn render_table(&self) -> String {
        let width = 16;
        let mut out = String::new();

        let _ = write!(out, "{:>4} {:<width$} {:<width$}", "", TRAINER_COLUMN, BAN_COLUMN);
        for name in PICK_COLUMNS {
            let _ = write!(out, " {:<width$}", name);
        }
        out.push('\n');

        for (index, row) in self.rows.iter().enumerate() {
            let _ = write!(
                out,
                "{:>4} {:<width$} {:<width$}",
                index,
                clip(&row.trainer_name, width),
                clip(row.ban().unwrap_or("NaN"), width)
            );
            for i in 0..PICK_COLUMNS.len() {
                let _ = write!(out, " {:<width$}", clip(row.pick(i).unwrap_or("NaN"), width));
            }
            out.push('\n');
        }
        out
    }
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Trainer,BAN,PICK 1,PICK 2,PICK 3,PICK 4,PICK 5,PICK 6,Notes
Misty,Bulbasaur,Starmie,,,,,,
Brock, ,Onix,Geodude,,,,,late
";

    #[test]
    fn test_from_csv() {
        let sheet = DraftSheet::from_csv(CSV).unwrap();
        assert_eq!(sheet.len(), 2);

        let misty = &sheet.rows()[0];
        assert_eq!(misty.trainer_name, "Misty");
        assert_eq!(misty.ban(), Some("Bulbasaur"));
        assert_eq!(misty.pick(0), Some("Starmie"));
        assert_eq!(misty.pick(1), None);

        let brock = &sheet.rows()[1];
        assert_eq!(brock.ban(), None);
        assert_eq!(brock.pick(1), Some("Geodude"));
    }

    #[test]
    fn test_cells_kept_verbatim() {
        let csv = "Trainer,BAN,PICK 1,PICK 2,PICK 3,PICK 4,PICK 5,PICK 6\nAsh,,charizard ,,,,,\n";
        let sheet = DraftSheet::from_csv(csv).unwrap();
        assert_eq!(sheet.rows()[0].pick(0), Some("charizard "));
    }

    #[test]
    fn test_missing_column() {
        let csv = "Trainer,BAN,PICK 1\nAsh,,Pikachu\n";
        let err = DraftSheet::from_csv(csv).unwrap_err();
        assert!(matches!(err, SheetError::MissingColumn { ref column } if column == "PICK 2"));
    }

    #[test]
    fn test_short_rows_are_blank() {
        let csv = "Trainer,BAN,PICK 1,PICK 2,PICK 3,PICK 4,PICK 5,PICK 6\nAsh,Mew\n";
        let sheet = DraftSheet::from_csv(csv).unwrap();
        let row = &sheet.rows()[0];
        assert_eq!(row.ban(), Some("Mew"));
        assert!((0..6).all(|i| row.pick(i).is_none()));
    }

    #[test]
    fn test_player_entry() {
        let sheet = DraftSheet::from_csv(CSV).unwrap();
        let (index, row) = sheet.player_entry(" brock ").unwrap();
        assert_eq!(index, 1);
        assert_eq!(row.summary(), "Brock: picks [Onix, Geodude, -, -, -, -], ban [-]");
        assert!(sheet.player_entry("Gary").is_none());
    }

    #[test]
    fn test_blank_detection() {
        let row = SheetRow::new("Ash").with_pick(0, "   ").with_ban("");
        assert_eq!(row.pick(0), None);
        assert_eq!(row.ban(), None);
    }

    #[test]
    fn test_render_table_has_row_per_trainer() {
        let sheet = DraftSheet::from_csv(CSV).unwrap();
        let table = sheet.render_table();
        assert_eq!(table.lines().count(), 3);
        assert!(table.lines().nth(1).unwrap().contains("Starmie"));
    }
}
