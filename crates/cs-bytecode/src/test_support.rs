use cs_dialect::{CommandDescriptor, CommandKind, CommandTable, Dialect};

pub(crate) fn test_dialect(name: &str, keys: &[&str]) -> Dialect {
    let table = CommandTable::new(
        keys.iter()
            .map(|key| CommandDescriptor::new(*key, CommandKind::Command, Vec::new()))
            .collect(),
    )
    .expect("test table");
    Dialect::new(name, table).expect("test dialect")
}
