//! Error types shared by the generators, the catalog loader and progress storage.
//!
//! Wrong taps during play are not errors; they are reported through
//! [`CollectOutcome`](crate::game::session::CollectOutcome).

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ShopError>;

#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    /// The level asks for more list items than the shelves can hold.
    #[error(
        "level {level} needs {target_count} target slots but its shelves only hold {capacity}"
    )]
    Configuration {
        level: u32,
        target_count: usize,
        capacity: usize,
    },

    /// Slots remain to be filled but the level's categories have no items.
    #[error("level {level} has {missing} unfilled slots and no filler items")]
    EmptyPool { level: u32, missing: usize },

    #[error("failed to parse product catalog: {0}")]
    Catalog(#[source] serde_json::Error),

    #[error("product catalog lists item '{0}' more than once")]
    DuplicateItem(String),

    #[error("failed to parse settings: {0}")]
    Settings(#[source] serde_json::Error),

    #[error("progress file {path} is not valid: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
