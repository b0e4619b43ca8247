//! Draft sheet input: fetching, parsing and tournament exports.

pub mod dracoviz;
pub mod fetch;
pub mod source;
pub mod table;

pub use source::SheetSource;
pub use table::{DraftSheet, BAN_COLUMN, PICK_COLUMNS};
