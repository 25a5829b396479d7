use std::{fmt, io, num::ParseIntError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use serde_json::Error as JsonError;

use crate::graph::UserId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum TrustPathError {
    /// An operation was invoked against a node or graph in the wrong lifecycle stage, e.g.
    /// classifying a node whose tiers are already populated.
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("User not found in trust graph: {0}")]
    MissingIdentifier(UserId),
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("File System error: {0}")]
    Io(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl TrustPathError {
    /// Short, stable name of the error kind, suitable for diagnostics output.
    pub fn kind(&self) -> &'static str {
        match self {
            TrustPathError::InvalidState(_) => "invalid-state",
            TrustPathError::MissingIdentifier(_) => "missing-identifier",
            TrustPathError::MalformedInput(_) => "malformed-input",
            TrustPathError::Io(_) => "io",
            TrustPathError::Serialization(_) => "serialization",
        }
    }
}

impl From<toml::de::Error> for TrustPathError {
    fn from(src: toml::de::Error) -> TrustPathError {
        TrustPathError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for TrustPathError {
    fn from(src: toml::ser::Error) -> TrustPathError {
        TrustPathError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<JsonError> for TrustPathError {
    fn from(src: JsonError) -> TrustPathError {
        TrustPathError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<ParseIntError> for TrustPathError {
    fn from(src: ParseIntError) -> TrustPathError {
        TrustPathError::MalformedInput(format!("Invalid integer field: {src}"))
    }
}

impl From<io::Error> for TrustPathError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::InvalidData => TrustPathError::MalformedInput(format!("{x}")),
            _ => TrustPathError::Io(format!("IOError: {}: {x}", x.kind())),
        }
    }
}

impl From<fmt::Error> for TrustPathError {
    fn from(x: fmt::Error) -> Self {
        TrustPathError::Serialization(format!("{x}"))
    }
}
