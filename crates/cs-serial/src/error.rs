use std::path::PathBuf;

use cs_core::CmdScriptError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerialError {
    #[error("Deserialization error: unknown dialect \"{dialect}\".")]
    UnknownDialect { dialect: String },
    #[error("Deserialization error: unknown command \"{command}\" in dialect \"{dialect}\".")]
    UnknownCommand { command: String, dialect: String },
    #[error(
        "Deserialization error: command index {index} is outside the saved translation table ({len} entries) for dialect \"{dialect}\"."
    )]
    TranslationIndexOutOfRange {
        index: usize,
        len: usize,
        dialect: String,
    },
    #[error(
        "Script is bound to a different instance of dialect \"{dialect}\" than the one registered under that name."
    )]
    ForeignDialect { dialect: String },
    #[error("Unsupported script schema \"{found}\", expected \"{expected}\".")]
    UnsupportedSchema { expected: String, found: String },
    #[error("Failed to encode script as {encoding}: {message}")]
    Encode {
        encoding: &'static str,
        message: String,
    },
    #[error("Failed to decode {encoding} script: {message}")]
    Decode {
        encoding: &'static str,
        message: String,
    },
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Script(#[from] CmdScriptError),
}

impl SerialError {
    pub fn code(&self) -> &str {
        match self {
            Self::UnknownDialect { .. } => "SERIAL_UNKNOWN_DIALECT",
            Self::UnknownCommand { .. } => "SERIAL_UNKNOWN_COMMAND",
            Self::TranslationIndexOutOfRange { .. } => "SERIAL_TRANSLATION_INDEX",
            Self::ForeignDialect { .. } => "SERIAL_FOREIGN_DIALECT",
            Self::UnsupportedSchema { .. } => "SERIAL_SCHEMA",
            Self::Encode { .. } => "SERIAL_ENCODE",
            Self::Decode { .. } => "SERIAL_DECODE",
            Self::Io { .. } => "SERIAL_IO",
            Self::Script(error) => error.code.as_str(),
        }
    }
}

impl From<SerialError> for CmdScriptError {
    fn from(error: SerialError) -> Self {
        match error {
            SerialError::Script(error) => error,
            other => CmdScriptError::new(other.code(), other.to_string()),
        }
    }
}
