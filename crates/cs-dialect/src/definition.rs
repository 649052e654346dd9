use cs_core::{CmdScriptError, ValueType};
use serde::{Deserialize, Serialize};

use crate::command::{CommandDescriptor, CommandKind};
use crate::dialect::Dialect;
use crate::table::CommandTable;

/// Dialect as described in a JSON definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectDefinition {
    pub name: String,
    pub commands: Vec<CommandDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    pub key: String,
    #[serde(default = "default_kind")]
    pub kind: CommandKind,
    #[serde(default)]
    pub args: Vec<ValueType>,
    #[serde(default)]
    pub returns: Option<ValueType>,
}

fn default_kind() -> CommandKind {
    CommandKind::Command
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DefinitionDocument {
    One(DialectDefinition),
    Many(Vec<DialectDefinition>),
}

impl DialectDefinition {
    pub fn into_dialect(self) -> Result<Dialect, CmdScriptError> {
        let commands = self
            .commands
            .into_iter()
            .map(|command| {
                let descriptor = CommandDescriptor::new(command.key, command.kind, command.args);
                match command.returns {
                    Some(returns) => descriptor.returning(returns),
                    None => descriptor,
                }
            })
            .collect();
        let table = CommandTable::new(commands).map_err(|error| {
            CmdScriptError::new(
                error.code,
                format!("Dialect \"{}\": {}", self.name, error.message),
            )
        })?;
        Dialect::new(self.name, table)
    }
}

impl From<&Dialect> for DialectDefinition {
    fn from(dialect: &Dialect) -> Self {
        Self {
            name: dialect.name().to_string(),
            commands: dialect
                .commands()
                .iter()
                .map(|command| CommandDefinition {
                    key: command.key().to_string(),
                    kind: command.kind(),
                    args: command.args().to_vec(),
                    returns: command.returns(),
                })
                .collect(),
        }
    }
}

/// Parses a definition document holding either one dialect or a list.
pub fn parse_dialect_definitions(raw: &str) -> Result<Vec<DialectDefinition>, CmdScriptError> {
    let document: DefinitionDocument = serde_json::from_str(raw).map_err(|error| {
        CmdScriptError::new("DIALECT_DEFINITION_INVALID", error.to_string())
    })?;
    Ok(match document {
        DefinitionDocument::One(definition) => vec![definition],
        DefinitionDocument::Many(definitions) => definitions,
    })
}
