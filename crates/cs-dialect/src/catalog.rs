//! Built-in dialects.
//!
//! Three command generations ship with the engine. They share most lookup
//! keys but differ in membership and declaration order, so a script saved
//! against one can only be moved to another through name-based resolution.
//!
//! Keys are prefixed with their position kind: `cmd ` for statements and
//! `expr ` for value-producing commands.

use cs_core::{CmdScriptError, ValueType};

use crate::command::{CommandKind, StaticCommand};
use crate::dialect::Dialect;
use crate::registry::DialectRegistryBuilder;

pub const C1: &str = "c1";
pub const C2: &str = "c2";
pub const C3: &str = "c3";

macro_rules! cmd {
    ($key:literal $(, $arg:ident)*) => {
        StaticCommand {
            key: concat!("cmd ", $key),
            kind: CommandKind::Command,
            args: &[$(ValueType::$arg),*],
            returns: None,
        }
    };
}

macro_rules! expr {
    ($key:literal -> $ret:ident $(, $arg:ident)*) => {
        StaticCommand {
            key: concat!("expr ", $key),
            kind: CommandKind::Expression,
            args: &[$(ValueType::$arg),*],
            returns: Some(ValueType::$ret),
        }
    };
}

const C1_COMMANDS: &[StaticCommand] = &[
    cmd!("doif", Condition),
    cmd!("elif", Condition),
    cmd!("else"),
    cmd!("endi"),
    cmd!("reps", Integer),
    cmd!("repe"),
    cmd!("loop"),
    cmd!("untl", Condition),
    cmd!("ever"),
    cmd!("enum", Integer, Integer, Integer),
    cmd!("next"),
    cmd!("gsub", Label),
    cmd!("subr", Label),
    cmd!("retn"),
    cmd!("stop"),
    cmd!("wait", Integer),
    cmd!("setv", Variable, Integer),
    cmd!("addv", Variable, Integer),
    cmd!("subv", Variable, Integer),
    cmd!("targ", Agent),
    cmd!("kill", Agent),
    cmd!("new: simp", Integer, Integer, Integer, String, Integer, Integer, Integer),
    cmd!("anim", Bytes),
    cmd!("pose", Integer),
    cmd!("tick", Integer),
    cmd!("mesg writ", Agent, Integer),
    cmd!("snde", String),
    expr!("targ" -> Agent),
    expr!("ownr" -> Agent),
    expr!("from" -> Agent),
    expr!("rand" -> Integer, Integer, Integer),
    expr!("posx" -> Integer),
    expr!("posy" -> Integer),
    expr!("va00" -> Variable),
    expr!("obv0" -> Variable),
];

const C2_COMMANDS: &[StaticCommand] = &[
    cmd!("doif", Condition),
    cmd!("elif", Condition),
    cmd!("else"),
    cmd!("endi"),
    cmd!("enum", Integer, Integer, Integer),
    cmd!("esee", Integer, Integer, Integer),
    cmd!("etch", Integer, Integer, Integer),
    cmd!("next"),
    cmd!("reps", Integer),
    cmd!("repe"),
    cmd!("loop"),
    cmd!("untl", Condition),
    cmd!("ever"),
    cmd!("gsub", Label),
    cmd!("subr", Label),
    cmd!("retn"),
    cmd!("stop"),
    cmd!("wait", Integer),
    cmd!("setv", Variable, Integer),
    cmd!("addv", Variable, Integer),
    cmd!("subv", Variable, Integer),
    cmd!("mulv", Variable, Integer),
    cmd!("divv", Variable, Integer),
    cmd!("targ", Agent),
    cmd!("kill", Agent),
    cmd!("new: simp", Integer, Integer, Integer, String, Integer, Integer, Integer),
    cmd!("anim", Bytes),
    cmd!("pose", Integer),
    cmd!("tick", Integer),
    cmd!("mesg writ", Agent, Integer),
    cmd!("snde", String),
    cmd!("sndc", String),
    cmd!("outs", String),
    expr!("targ" -> Agent),
    expr!("ownr" -> Agent),
    expr!("from" -> Agent),
    expr!("_it_" -> Agent),
    expr!("rand" -> Integer, Integer, Integer),
    expr!("posx" -> Integer),
    expr!("posy" -> Integer),
    expr!("va00" -> Variable),
    expr!("ov00" -> Variable),
];

const C3_COMMANDS: &[StaticCommand] = &[
    cmd!("doif", Condition),
    cmd!("elif", Condition),
    cmd!("else"),
    cmd!("endi"),
    cmd!("enum", Integer, Integer, Integer),
    cmd!("esee", Integer, Integer, Integer),
    cmd!("etch", Integer, Integer, Integer),
    cmd!("epas", Integer, Integer, Integer),
    cmd!("next"),
    cmd!("reps", Integer),
    cmd!("repe"),
    cmd!("loop"),
    cmd!("untl", Condition),
    cmd!("ever"),
    cmd!("gsub", Label),
    cmd!("subr", Label),
    cmd!("retn"),
    cmd!("stop"),
    cmd!("wait", Integer),
    cmd!("setv", Variable, Any),
    cmd!("sets", Variable, String),
    cmd!("seta", Variable, Agent),
    cmd!("addv", Variable, Any),
    cmd!("subv", Variable, Any),
    cmd!("mulv", Variable, Any),
    cmd!("divv", Variable, Any),
    cmd!("targ", Agent),
    cmd!("kill", Agent),
    cmd!("new: simp", Integer, Integer, Integer, Integer, String, Integer, Integer),
    cmd!("anim", Bytes),
    cmd!("pose", Integer),
    cmd!("tick", Integer),
    cmd!("mesg writ", Agent, Integer),
    cmd!("mesg wrt+", Agent, Integer, Any, Any, Integer),
    cmd!("sndc", String),
    cmd!("outs", String),
    cmd!("outv", Float),
    expr!("targ" -> Agent),
    expr!("ownr" -> Agent),
    expr!("from" -> Agent),
    expr!("_it_" -> Agent),
    expr!("rand" -> Integer, Integer, Integer),
    expr!("posx" -> Float),
    expr!("posy" -> Float),
    expr!("va00" -> Variable),
    expr!("ov00" -> Variable),
    expr!("mv00" -> Variable),
    expr!("game" -> Variable, String),
];

pub fn c1() -> Dialect {
    Dialect::from_static(C1, C1_COMMANDS)
}

pub fn c2() -> Dialect {
    Dialect::from_static(C2, C2_COMMANDS)
}

pub fn c3() -> Dialect {
    Dialect::from_static(C3, C3_COMMANDS)
}

/// Every built-in dialect.
pub fn builtin_dialects() -> Vec<Dialect> {
    vec![c1(), c2(), c3()]
}

/// A registry builder pre-populated with the built-in dialects.
pub fn builtin_registry_builder() -> Result<DialectRegistryBuilder, CmdScriptError> {
    let mut builder = DialectRegistryBuilder::new();
    for dialect in builtin_dialects() {
        builder.register(dialect)?;
    }
    Ok(builder)
}

#[cfg(test)]
mod catalog_tests {
    use super::*;

    #[test]
    fn builtin_catalogs_build_without_duplicates() {
        let dialects = builtin_dialects();
        let names = dialects.iter().map(Dialect::name).collect::<Vec<_>>();
        assert_eq!(names, vec![C1, C2, C3]);
        for dialect in &dialects {
            assert!(dialect.count() > 0, "{} should not be empty", dialect.name());
        }
    }

    #[test]
    fn catalogs_share_keys_at_different_indices() {
        let c1 = c1();
        let c2 = c2();
        let in_c1 = c1.commands().find_index("cmd next").expect("next in c1");
        let in_c2 = c2.commands().find_index("cmd next").expect("next in c2");
        assert_ne!(in_c1, in_c2);
        assert!(c1.find_command("cmd outs").is_none());
        assert!(c2.find_command("cmd outs").is_some());
    }

    #[test]
    fn statement_and_expression_forms_are_distinct_keys() {
        let c3 = c3();
        let statement = c3.find_command("cmd targ").expect("cmd targ");
        let expression = c3.find_command("expr targ").expect("expr targ");
        assert_eq!(statement.kind(), CommandKind::Command);
        assert_eq!(expression.kind(), CommandKind::Expression);
        assert_eq!(expression.returns(), Some(ValueType::Agent));
    }

    #[test]
    fn builtin_registry_contains_every_catalog() {
        let registry = builtin_registry_builder().expect("builtins").build();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec![C1, C2, C3]);
    }
}
