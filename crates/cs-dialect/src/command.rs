use cs_core::ValueType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// Statement-position command; produces no value.
    Command,
    /// Expression-position command; produces a value.
    Expression,
}

impl CommandKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Expression => "expression",
        }
    }
}

/// One entry of a command table. The lookup key is unique within its table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    key: String,
    kind: CommandKind,
    args: Vec<ValueType>,
    returns: Option<ValueType>,
}

impl CommandDescriptor {
    pub fn new(key: impl Into<String>, kind: CommandKind, args: Vec<ValueType>) -> Self {
        Self {
            key: key.into(),
            kind,
            args,
            returns: None,
        }
    }

    pub fn returning(mut self, returns: ValueType) -> Self {
        self.returns = Some(returns);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn args(&self) -> &[ValueType] {
        &self.args
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn returns(&self) -> Option<ValueType> {
        self.returns
    }
}

/// Compile-time form of a descriptor, used by the built-in catalogs.
#[derive(Debug, Clone, Copy)]
pub struct StaticCommand {
    pub key: &'static str,
    pub kind: CommandKind,
    pub args: &'static [ValueType],
    pub returns: Option<ValueType>,
}

impl From<&StaticCommand> for CommandDescriptor {
    fn from(command: &StaticCommand) -> Self {
        Self {
            key: command.key.to_string(),
            kind: command.kind,
            args: command.args.to_vec(),
            returns: command.returns,
        }
    }
}
