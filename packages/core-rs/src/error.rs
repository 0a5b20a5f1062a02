//! Error types for the analysis core. One enum per concern, `thiserror` only.

use std::io;
use std::path::PathBuf;

/// The risk category table is unusable. Raised while building the table, before any row is read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("risk category table is empty")]
    EmptyTable,

    #[error("category '{name}' starts at {min}; the lowest category must start at 0")]
    DoesNotStartAtZero { name: String, min: i64 },

    #[error("category '{name}' has min {min} above max {max}")]
    InvertedRange { name: String, min: i64, max: i64 },

    #[error("category '{name}' is open-ended but is not the last category")]
    UnboundedBeforeEnd { name: String },

    #[error("top category '{name}' ends at {max}; scores above it would be uncovered")]
    BoundedTop { name: String, max: i64 },

    #[error("scores {from}..={to} fall between '{lower}' and '{upper}'")]
    Gap {
        lower: String,
        upper: String,
        from: i64,
        to: i64,
    },

    #[error("categories '{lower}' and '{upper}' overlap at score {at}")]
    Overlap {
        lower: String,
        upper: String,
        at: i64,
    },

    #[error("category name '{name}' is used more than once")]
    DuplicateName { name: String },

    #[error("no category covers score {score}")]
    NoCategoryForScore { score: i64 },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to read scoring config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid scoring config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV export failed: {0}")]
    Io(#[from] io::Error),

    #[error("CSV export produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
