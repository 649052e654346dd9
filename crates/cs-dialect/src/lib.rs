//! Command dialects: the per-version command tables scripts are compiled
//! against, and the registry that maps dialect names to them.

pub mod catalog;
mod command;
mod definition;
mod dialect;
mod registry;
mod table;

pub use command::{CommandDescriptor, CommandKind, StaticCommand};
pub use definition::{parse_dialect_definitions, CommandDefinition, DialectDefinition};
pub use dialect::{Dialect, DialectHandle, DialectId};
pub use registry::{DialectRegistry, DialectRegistryBuilder};
pub use table::CommandTable;
