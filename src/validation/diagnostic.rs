//! Diagnostics emitted while reconciling a draft sheet.

use std::fmt;

/// What went wrong with a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The cell does not map unambiguously to one canonical species.
    UnresolvedCell,
    /// The species was already picked or banned by someone else.
    Collision,
    /// A pick names a banned species.
    CrossConstraintViolation,
}

/// One report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn unresolved(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::UnresolvedCell,
            message: message.into(),
        }
    }

    pub fn collision(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Collision,
            message: message.into(),
        }
    }

    pub fn banned(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::CrossConstraintViolation,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
