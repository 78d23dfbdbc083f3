//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Seed file error: {0}")]
    SeedFile(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Write error: {0}")]
    Write(String),
}

/// Callback payload parse errors. These never advance conversation state;
/// the user gets a short error acknowledgment instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CallbackParseError {
    #[error("unexpected token count in payload")]
    BadShape,

    #[error("unknown callback kind: {0}")]
    UnknownKind(String),

    #[error("profession id is not an integer: {0}")]
    BadId(String),
}
