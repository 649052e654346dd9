use cs_bytecode::ScriptParts;
use serde::{Deserialize, Serialize};

pub const SCRIPT_SCHEMA_V1: &str = "cmdscript-script.v1";

/// Persisted form of a script.
///
/// Field order is the stream order: the structural body is written before
/// the dialect section, and the dialect section must be read after it since
/// resolving command operands needs the saved translation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedScript {
    pub schema_version: String,
    pub body: ScriptParts,
    pub dialect: SavedDialect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDialect {
    pub name: String,
    /// `translation[i]` is the lookup key command index `i` denoted in the
    /// saving process.
    pub translation: Vec<String>,
}
