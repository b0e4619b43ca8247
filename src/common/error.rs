//! Error types for the application.

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {message}")]
    IoError { path: String, message: String },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// SQLite store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("A user with Discord ID '{discord_id}' already exists")]
    DuplicateUser { discord_id: u64 },

    #[error("Guild with ID {guild_id} not found in database")]
    GuildNotFound { guild_id: u64 },

    #[error("Invalid guild: {message}")]
    InvalidGuild { message: String },

    #[error("Invalid tournament: {message}")]
    InvalidTournament { message: String },

    #[error("Corrupt channel list for guild {guild_id}: {source}")]
    ChannelList {
        guild_id: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store worker failed: {message}")]
    Worker { message: String },
}

/// Draft sheet fetch and parse errors.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Failed to fetch sheet '{url}': {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Sheet '{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sheet is missing required column '{column}'")]
    MissingColumn { column: String },
}

impl SheetError {
    /// Whether retrying the fetch could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SheetError::Fetch { source, .. } => source.is_timeout() || source.is_connect(),
            SheetError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Species catalog ingest errors.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Source file not found: {path}")]
    NotFound { path: String },

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed gamemaster JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Fatal reconciliation errors.
///
/// Only source access fails a run. Problems with individual cells are
/// reported as diagnostics instead.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("Species catalog unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("Draft sheet unavailable: {0}")]
    SheetUnavailable(#[from] SheetError),
}

/// Fuzzy matcher errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("No candidate names to match against")]
    NotFound,
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
