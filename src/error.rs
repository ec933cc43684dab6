use std::io;
use thiserror::Error;

/// Why a submitted VIN did not produce a record.
///
/// The display strings are the user-facing messages shown next to the
/// search field.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    #[error("Bitte eine VIN eingeben.")]
    EmptyInput,

    #[error("Fahrzeug mit dieser VIN nicht gefunden.")]
    NotFound,
}

/// Clipboard write failures. Always surfaced as a blocking notification.
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Kopieren nicht möglich. Bitte manuell kopieren.")]
    WriteFailed(#[source] arboard::Error),

    #[error("Kopieren nicht möglich. Bitte manuell kopieren.")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum VinError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("An unexpected error occurred: {0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, VinError>;
