use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SerialError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Binary,
    Json,
}

impl Encoding {
    /// JSON records always open with `{`; bincode records open with the
    /// length prefix of the schema string.
    pub fn detect(bytes: &[u8]) -> Self {
        match bytes.iter().find(|byte| !byte.is_ascii_whitespace()) {
            Some(b'{') => Self::Json,
            _ => Self::Binary,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Json => "json",
        }
    }

    pub fn encode<T: Serialize>(self, value: &T) -> Result<Vec<u8>, SerialError> {
        let encoded = match self {
            Self::Binary => bincode::serialize(value).map_err(|error| error.to_string()),
            Self::Json => serde_json::to_vec_pretty(value).map_err(|error| error.to_string()),
        };
        encoded.map_err(|message| SerialError::Encode {
            encoding: self.name(),
            message,
        })
    }

    pub fn decode<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T, SerialError> {
        let decoded = match self {
            Self::Binary => bincode::deserialize(bytes).map_err(|error| error.to_string()),
            Self::Json => serde_json::from_slice(bytes).map_err(|error| error.to_string()),
        };
        decoded.map_err(|message| SerialError::Decode {
            encoding: self.name(),
            message,
        })
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "binary" | "bin" => Ok(Self::Binary),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown encoding \"{}\", expected json or binary",
                other
            )),
        }
    }
}
