use thiserror::Error;

/// Errors that can arise in the game core and its storage layer.
#[derive(Debug, Error)]
pub enum GameError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around IO errors (directory creation, seed files, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when fetching a record that is not present.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Returned when deserializing a record with an unexpected schema version.
    #[error("schema mismatch for {entity}: expected {expected}, got {found}")]
    SchemaMismatch {
        entity: &'static str,
        expected: u8,
        found: u8,
    },

    /// Referenced content id (item, recipe, encounter node) missing from the
    /// loaded content tables.
    #[error("unknown content id: {0}")]
    UnknownContent(String),

    /// Seed file parsed but failed a consistency check.
    #[error("invalid seed data: {0}")]
    InvalidSeed(String),
}
