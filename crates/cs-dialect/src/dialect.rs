use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use cs_core::{CmdScriptError, CommandIndex};
use serde::{Deserialize, Serialize};

use crate::command::{CommandDescriptor, StaticCommand};
use crate::table::CommandTable;

static NEXT_DIALECT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a constructed [`Dialect`]. Two dialects that
/// share a name still get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DialectId(u64);

impl DialectId {
    fn next() -> Self {
        Self(NEXT_DIALECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A named command set, e.g. the commands understood by one game version.
#[derive(Debug)]
pub struct Dialect {
    id: DialectId,
    name: String,
    commands: CommandTable,
}

impl Dialect {
    pub fn new(name: impl Into<String>, commands: CommandTable) -> Result<Self, CmdScriptError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CmdScriptError::new(
                "DIALECT_EMPTY_NAME",
                "Dialect name must not be empty.",
            ));
        }
        Ok(Self {
            id: DialectId::next(),
            name,
            commands,
        })
    }

    /// Built-in catalogs only; panics on an invalid catalog.
    pub fn from_static(name: &'static str, commands: &[StaticCommand]) -> Self {
        Self::new(name, CommandTable::from_static(commands))
            .unwrap_or_else(|error| panic!("invalid built-in dialect {}: {}", name, error))
    }

    pub fn id(&self) -> DialectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> DialectHandle {
        DialectHandle::new(self.name.clone())
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    pub fn count(&self) -> usize {
        self.commands.count()
    }

    pub fn find_command(&self, key: &str) -> Option<&CommandDescriptor> {
        self.commands.find_command(key)
    }

    pub fn command_at(&self, index: CommandIndex) -> &CommandDescriptor {
        self.commands.command_at(index)
    }

    pub fn index_of(&self, command: &CommandDescriptor) -> CommandIndex {
        self.commands.index_of(command)
    }
}

/// Non-owning reference from a script to the dialect it was compiled
/// against. Resolved through a [`crate::DialectRegistry`] on demand.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialectHandle(String);

impl DialectHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DialectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
