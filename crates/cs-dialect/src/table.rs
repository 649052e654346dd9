use cs_core::{CmdScriptError, CommandIndex};

use crate::command::{CommandDescriptor, StaticCommand};

/// Immutable command table of one dialect.
///
/// Descriptors keep their declaration order, which defines the command index
/// stored in bytecode. A key-sorted permutation built once at construction
/// backs `find_command` with a binary search.
#[derive(Debug, Clone)]
pub struct CommandTable {
    commands: Vec<CommandDescriptor>,
    sorted: Vec<usize>,
}

impl CommandTable {
    pub fn new(commands: Vec<CommandDescriptor>) -> Result<Self, CmdScriptError> {
        if let Some(position) = commands.iter().position(|command| command.key().is_empty()) {
            return Err(CmdScriptError::new(
                "DIALECT_EMPTY_COMMAND_KEY",
                format!("Command at position {} has an empty lookup key.", position),
            ));
        }

        let mut sorted = (0..commands.len()).collect::<Vec<_>>();
        sorted.sort_by(|a, b| commands[*a].key().cmp(commands[*b].key()));

        if let Some(pair) = sorted
            .windows(2)
            .find(|pair| commands[pair[0]].key() == commands[pair[1]].key())
        {
            return Err(CmdScriptError::new(
                "DIALECT_DUPLICATE_COMMAND",
                format!(
                    "Duplicate command key \"{}\" at positions {} and {}.",
                    commands[pair[0]].key(),
                    pair[0].min(pair[1]),
                    pair[0].max(pair[1])
                ),
            ));
        }

        Ok(Self { commands, sorted })
    }

    /// Builds a table from a built-in catalog. Duplicate keys in a catalog
    /// are a programming error and panic.
    pub fn from_static(commands: &[StaticCommand]) -> Self {
        Self::new(commands.iter().map(CommandDescriptor::from).collect())
            .unwrap_or_else(|error| panic!("invalid built-in command catalog: {}", error))
    }

    pub fn count(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn find_command(&self, key: &str) -> Option<&CommandDescriptor> {
        self.find_index(key).map(|index| &self.commands[index.index()])
    }

    pub fn find_index(&self, key: &str) -> Option<CommandIndex> {
        self.sorted
            .binary_search_by(|position| self.commands[*position].key().cmp(key))
            .ok()
            .map(|slot| CommandIndex::new(self.sorted[slot]))
    }

    /// Panics when `index` is past the end of the table.
    pub fn command_at(&self, index: CommandIndex) -> &CommandDescriptor {
        let position = index.index();
        assert!(
            position < self.commands.len(),
            "command index {} out of range for table of {} commands",
            position,
            self.commands.len()
        );
        &self.commands[position]
    }

    /// Inverse of [`CommandTable::command_at`]. Panics when `command` is not
    /// an element of this table.
    pub fn index_of(&self, command: &CommandDescriptor) -> CommandIndex {
        let range = self.commands.as_ptr_range();
        let pointer = command as *const CommandDescriptor;
        assert!(
            range.contains(&pointer),
            "command \"{}\" does not belong to this table",
            command.key()
        );
        let offset = (pointer as usize - range.start as usize)
            / std::mem::size_of::<CommandDescriptor>();
        CommandIndex::new(offset)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.iter()
    }

    /// Lookup keys in command-index order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(CommandDescriptor::key)
    }

    /// Lookup keys in ascending key order.
    pub fn sorted_keys(&self) -> impl Iterator<Item = &str> {
        self.sorted
            .iter()
            .map(|position| self.commands[*position].key())
    }
}

impl PartialEq for CommandTable {
    fn eq(&self, other: &Self) -> bool {
        self.commands == other.commands
    }
}

impl Eq for CommandTable {}
