use std::sync::Arc;

use cs_core::{CmdScriptError, ConstValue, Op, TokenTrace};
use cs_dialect::{Dialect, DialectHandle, DialectId, DialectRegistry};
use serde::{Deserialize, Serialize};

/// Event slot a script is installed under: family, genus and species of the
/// owning agent class plus the event number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScriptClassifier {
    pub family: u8,
    pub genus: u8,
    pub species: u16,
    pub event: u16,
}

/// Structural fields of a compiled script, without its dialect binding.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScriptParts {
    pub ops: Vec<Op>,
    pub consts: Vec<ConstValue>,
    /// Index-aligned with `ops`.
    pub trace: Vec<TokenTrace>,
    pub filename: String,
    pub source: Option<String>,
    pub classifier: Option<ScriptClassifier>,
}

/// Compiled script bound to the dialect it was compiled against.
///
/// Every `Call`/`SaveCall` operand is a valid index into that dialect's
/// command table; [`Script::bind`] is the only way to build one.
///
/// Operands are only meaningful against the exact [`Dialect`] instance
/// passed to `bind`. Bind against the instance held by the registry the
/// script will be saved through; a serializer rejects any other instance,
/// even one with the same name.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    parts: ScriptParts,
    dialect: DialectHandle,
    dialect_id: DialectId,
}

impl Script {
    pub fn bind(parts: ScriptParts, dialect: &Dialect) -> Result<Self, CmdScriptError> {
        validate_parts(&parts, dialect)?;
        Ok(Self {
            parts,
            dialect: dialect.handle(),
            dialect_id: dialect.id(),
        })
    }

    pub fn ops(&self) -> &[Op] {
        &self.parts.ops
    }

    pub fn consts(&self) -> &[ConstValue] {
        &self.parts.consts
    }

    pub fn trace(&self) -> &[TokenTrace] {
        &self.parts.trace
    }

    pub fn trace_at(&self, index: usize) -> Option<TokenTrace> {
        self.parts.trace.get(index).copied()
    }

    pub fn filename(&self) -> &str {
        &self.parts.filename
    }

    pub fn source(&self) -> Option<&str> {
        self.parts.source.as_deref()
    }

    pub fn classifier(&self) -> Option<ScriptClassifier> {
        self.parts.classifier
    }

    pub fn dialect(&self) -> &DialectHandle {
        &self.dialect
    }

    /// Identity of the dialect instance this script was bound to.
    pub fn dialect_id(&self) -> DialectId {
        self.dialect_id
    }

    pub fn parts(&self) -> &ScriptParts {
        &self.parts
    }

    pub fn into_parts(self) -> (ScriptParts, DialectHandle) {
        (self.parts, self.dialect)
    }

    pub fn len(&self) -> usize {
        self.parts.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.ops.is_empty()
    }

    pub fn resolve_dialect(
        &self,
        registry: &DialectRegistry,
    ) -> Result<Arc<Dialect>, CmdScriptError> {
        registry.resolve(&self.dialect).ok_or_else(|| {
            CmdScriptError::new(
                "SCRIPT_DIALECT_UNRESOLVED",
                format!(
                    "Dialect \"{}\" of script \"{}\" is not registered.",
                    self.dialect, self.parts.filename
                ),
            )
        })
    }

    /// Lookup key of every command operand, in instruction order.
    pub fn command_names<'d>(&self, dialect: &'d Dialect) -> Vec<&'d str> {
        self.parts
            .ops
            .iter()
            .filter_map(Op::command)
            .map(|index| dialect.command_at(index).key())
            .collect()
    }
}

fn validate_parts(parts: &ScriptParts, dialect: &Dialect) -> Result<(), CmdScriptError> {
    if parts.trace.len() != parts.ops.len() {
        return Err(CmdScriptError::new(
            "SCRIPT_TRACE_MISALIGNED",
            format!(
                "Script \"{}\" has {} instructions but {} trace records.",
                parts.filename,
                parts.ops.len(),
                parts.trace.len()
            ),
        ));
    }

    for (position, (op, trace)) in parts.ops.iter().zip(&parts.trace).enumerate() {
        if let Some(command) = op.command() {
            if command.index() >= dialect.count() {
                return Err(CmdScriptError::with_trace(
                    "SCRIPT_COMMAND_OUT_OF_RANGE",
                    format!(
                        "Instruction {} calls command {} but dialect \"{}\" has {} commands.",
                        position,
                        command,
                        dialect.name(),
                        dialect.count()
                    ),
                    *trace,
                ));
            }
        }

        if let Some(constant) = op.constant() {
            let Some(value) = parts.consts.get(constant.index()) else {
                return Err(CmdScriptError::with_trace(
                    "SCRIPT_CONST_OUT_OF_RANGE",
                    format!(
                        "Instruction {} reads constant {} but the pool has {} entries.",
                        position,
                        constant,
                        parts.consts.len()
                    ),
                    *trace,
                ));
            };
            let expects_bytes = matches!(op, Op::Bytes(_));
            if expects_bytes != matches!(value, ConstValue::Bytes(_)) {
                return Err(CmdScriptError::with_trace(
                    "SCRIPT_CONST_KIND_MISMATCH",
                    format!(
                        "Instruction {} ({}) cannot load a {} constant.",
                        position,
                        op.mnemonic(),
                        value.type_name()
                    ),
                    *trace,
                ));
            }
        }

        if let Some(target) = op.target() {
            if target.index() > parts.ops.len() {
                return Err(CmdScriptError::with_trace(
                    "SCRIPT_JUMP_OUT_OF_RANGE",
                    format!(
                        "Instruction {} jumps to {} past the end ({}).",
                        position,
                        target,
                        parts.ops.len()
                    ),
                    *trace,
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod script_tests {
    use super::*;
    use crate::test_support::test_dialect;
    use cs_core::{CodeOffset, CommandIndex, ConstIndex};

    fn parts(ops: Vec<Op>) -> ScriptParts {
        let trace = (0..ops.len())
            .map(|line| TokenTrace::new(4, line as u32 + 1))
            .collect();
        ScriptParts {
            ops,
            consts: vec![ConstValue::Integer(5), ConstValue::Bytes(vec![1, 2])],
            trace,
            filename: "test.cos".to_string(),
            source: None,
            classifier: None,
        }
    }

    #[test]
    fn bind_accepts_valid_operands() {
        let dialect = test_dialect("Test1", &["dde", "doif", "endi"]);
        let script = Script::bind(
            parts(vec![
                Op::Const(ConstIndex::new(0)),
                Op::Call(CommandIndex::new(1)),
                Op::Bytes(ConstIndex::new(1)),
                Op::SaveCall(CommandIndex::new(2)),
                Op::Jump(CodeOffset::new(5)),
            ]),
            &dialect,
        )
        .expect("bind should pass");
        assert_eq!(script.dialect().name(), "Test1");
        assert_eq!(script.len(), 5);
        assert_eq!(script.command_names(&dialect), vec!["doif", "endi"]);
        assert_eq!(script.trace_at(1), Some(TokenTrace::new(4, 2)));
    }

    #[test]
    fn bind_records_the_dialect_instance() {
        let first = test_dialect("Test1", &["dde"]);
        let second = test_dialect("Test1", &["dde"]);
        let a = Script::bind(parts(vec![Op::Stop]), &first).expect("bind");
        let b = Script::bind(parts(vec![Op::Stop]), &second).expect("bind");
        assert_eq!(a.dialect(), b.dialect());
        assert_eq!(a.dialect_id(), first.id());
        assert_ne!(a.dialect_id(), b.dialect_id());
    }

    #[test]
    fn bind_rejects_command_past_table() {
        let dialect = test_dialect("Test1", &["dde", "doif", "endi"]);
        let error = Script::bind(parts(vec![Op::Call(CommandIndex::new(3))]), &dialect)
            .expect_err("out of range command should fail");
        assert_eq!(error.code, "SCRIPT_COMMAND_OUT_OF_RANGE");
        assert_eq!(error.trace, Some(TokenTrace::new(4, 1)));
    }

    #[test]
    fn bind_rejects_misaligned_trace() {
        let dialect = test_dialect("Test1", &["dde"]);
        let mut parts = parts(vec![Op::Stop]);
        parts.trace.push(TokenTrace::synthetic());
        let error = Script::bind(parts, &dialect).expect_err("misaligned trace should fail");
        assert_eq!(error.code, "SCRIPT_TRACE_MISALIGNED");
    }

    #[test]
    fn bind_rejects_bad_constant_operands() {
        let dialect = test_dialect("Test1", &["dde"]);
        let missing = Script::bind(parts(vec![Op::Const(ConstIndex::new(2))]), &dialect)
            .expect_err("missing constant should fail");
        assert_eq!(missing.code, "SCRIPT_CONST_OUT_OF_RANGE");

        let mismatch = Script::bind(parts(vec![Op::Bytes(ConstIndex::new(0))]), &dialect)
            .expect_err("bytes op on integer should fail");
        assert_eq!(mismatch.code, "SCRIPT_CONST_KIND_MISMATCH");
    }

    #[test]
    fn bind_rejects_jump_past_end() {
        let dialect = test_dialect("Test1", &["dde"]);
        let error = Script::bind(parts(vec![Op::Gosub(CodeOffset::new(2))]), &dialect)
            .expect_err("jump past end should fail");
        assert_eq!(error.code, "SCRIPT_JUMP_OUT_OF_RANGE");
    }

    #[test]
    fn resolve_dialect_goes_through_registry() {
        let dialect = test_dialect("Test1", &["dde", "doif"]);
        let script = Script::bind(parts(vec![Op::Call(CommandIndex::new(0))]), &dialect)
            .expect("bind");

        let mut builder = DialectRegistry::builder();
        builder.register(dialect).expect("register");
        let registry = builder.build();
        let resolved = script.resolve_dialect(&registry).expect("resolve");
        assert_eq!(resolved.count(), 2);

        let empty = DialectRegistry::builder().build();
        let error = script
            .resolve_dialect(&empty)
            .expect_err("missing dialect should fail");
        assert_eq!(error.code, "SCRIPT_DIALECT_UNRESOLVED");
    }

    #[test]
    fn parts_serialize_with_field_names() {
        let value = serde_json::to_value(parts(vec![Op::Stop])).expect("serialize");
        assert_eq!(value["filename"], "test.cos");
        assert_eq!(value["ops"][0], "stop");
        assert_eq!(value["trace"][0]["line"], 1);
    }
}
