//! Draft sheet reconciliation.
//!
//! Cross-checks the ban and pick columns of a draft sheet against the species
//! catalog and produces an ordered list of diagnostics. Everything here is
//! synchronous and I/O free except [`orchestrator`], which gathers the inputs.

pub mod bans;
pub mod claims;
pub mod diagnostic;
pub mod matcher;
pub mod orchestrator;
pub mod picks;
pub mod report;

pub use report::NO_ISSUES;
