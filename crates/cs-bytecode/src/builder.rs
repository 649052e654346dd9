use cs_core::{CmdScriptError, CodeOffset, CommandIndex, ConstIndex, ConstValue, Op, TokenTrace};
use cs_dialect::Dialect;

use crate::script::{Script, ScriptClassifier, ScriptParts};

/// Instruction emitter used by compilers to produce a [`Script`] against
/// one dialect. Command names are resolved as they are emitted.
pub struct ScriptBuilder<'d> {
    dialect: &'d Dialect,
    parts: ScriptParts,
}

impl<'d> ScriptBuilder<'d> {
    pub fn new(dialect: &'d Dialect, filename: impl Into<String>) -> Self {
        Self {
            dialect,
            parts: ScriptParts {
                filename: filename.into(),
                ..ScriptParts::default()
            },
        }
    }

    pub fn dialect(&self) -> &'d Dialect {
        self.dialect
    }

    /// Position the next emitted instruction will occupy.
    pub fn here(&self) -> CodeOffset {
        CodeOffset::new(self.parts.ops.len())
    }

    pub fn op(&mut self, op: Op, trace: TokenTrace) -> CodeOffset {
        let position = self.here();
        self.parts.ops.push(op);
        self.parts.trace.push(trace);
        position
    }

    pub fn call(&mut self, key: &str, trace: TokenTrace) -> Result<CodeOffset, CmdScriptError> {
        let command = self.resolve(key, trace)?;
        Ok(self.op(Op::Call(command), trace))
    }

    pub fn save_call(
        &mut self,
        key: &str,
        trace: TokenTrace,
    ) -> Result<CodeOffset, CmdScriptError> {
        let command = self.resolve(key, trace)?;
        Ok(self.op(Op::SaveCall(command), trace))
    }

    /// Adds a literal to the pool, reusing an equal entry when present.
    pub fn constant(&mut self, value: ConstValue) -> ConstIndex {
        if let Some(existing) = self.parts.consts.iter().position(|entry| *entry == value) {
            return ConstIndex::new(existing);
        }
        self.parts.consts.push(value);
        ConstIndex::new(self.parts.consts.len() - 1)
    }

    /// Emits the load instruction matching the literal's kind.
    pub fn push_const(&mut self, value: ConstValue, trace: TokenTrace) -> CodeOffset {
        match value {
            ConstValue::Integer(value) => self.op(Op::ConstInt(value), trace),
            ConstValue::Bytes(_) => {
                let index = self.constant(value);
                self.op(Op::Bytes(index), trace)
            }
            other => {
                let index = self.constant(other);
                self.op(Op::Const(index), trace)
            }
        }
    }

    /// Rewrites the target of an already emitted jump.
    pub fn patch_target(
        &mut self,
        at: CodeOffset,
        target: CodeOffset,
    ) -> Result<(), CmdScriptError> {
        let Some(op) = self.parts.ops.get_mut(at.index()) else {
            return Err(CmdScriptError::new(
                "BUILDER_PATCH_OUT_OF_RANGE",
                format!("No instruction at {} to patch.", at),
            ));
        };
        *op = match *op {
            Op::Jump(_) => Op::Jump(target),
            Op::JumpIfFalse(_) => Op::JumpIfFalse(target),
            Op::DecJumpNonZero(_) => Op::DecJumpNonZero(target),
            Op::Gosub(_) => Op::Gosub(target),
            Op::Enumerate(_) => Op::Enumerate(target),
            other => {
                return Err(CmdScriptError::new(
                    "BUILDER_NOT_A_JUMP",
                    format!("Instruction {} ({}) has no jump target.", at, other.mnemonic()),
                ))
            }
        };
        Ok(())
    }

    pub fn source(&mut self, text: impl Into<String>) -> &mut Self {
        self.parts.source = Some(text.into());
        self
    }

    pub fn classifier(&mut self, classifier: ScriptClassifier) -> &mut Self {
        self.parts.classifier = Some(classifier);
        self
    }

    pub fn finish(self) -> Result<Script, CmdScriptError> {
        Script::bind(self.parts, self.dialect)
    }

    fn resolve(&self, key: &str, trace: TokenTrace) -> Result<CommandIndex, CmdScriptError> {
        self.dialect
            .find_command(key)
            .map(|command| self.dialect.index_of(command))
            .ok_or_else(|| {
                CmdScriptError::with_trace(
                    "BUILDER_UNKNOWN_COMMAND",
                    format!(
                        "Command \"{}\" is not part of dialect \"{}\".",
                        key,
                        self.dialect.name()
                    ),
                    trace,
                )
            })
    }
}

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::test_support::test_dialect;
    use cs_core::Comparison;

    #[test]
    fn emits_calls_with_resolved_indices() {
        let dialect = test_dialect("Test1", &["dde", "doif", "endi"]);
        let mut builder = ScriptBuilder::new(&dialect, "doif.cos");
        builder.op(Op::Cond(Comparison::Eq, None), TokenTrace::new(2, 1));
        builder.call("doif", TokenTrace::new(4, 1)).expect("doif");
        builder.save_call("endi", TokenTrace::new(4, 2)).expect("endi");
        let script = builder.finish().expect("finish");

        assert_eq!(
            script.ops(),
            &[
                Op::Cond(Comparison::Eq, None),
                Op::Call(CommandIndex::new(1)),
                Op::SaveCall(CommandIndex::new(2)),
            ]
        );
        assert_eq!(script.filename(), "doif.cos");
        assert_eq!(script.trace().len(), 3);
    }

    #[test]
    fn unknown_command_reports_trace() {
        let dialect = test_dialect("Test1", &["dde"]);
        let mut builder = ScriptBuilder::new(&dialect, "bad.cos");
        let error = builder
            .call("zzzz", TokenTrace::new(4, 7))
            .expect_err("unknown command should fail");
        assert_eq!(error.code, "BUILDER_UNKNOWN_COMMAND");
        assert_eq!(error.trace, Some(TokenTrace::new(4, 7)));
        assert_eq!(builder.here().index(), 0);
    }

    #[test]
    fn constants_are_pooled_and_typed() {
        let dialect = test_dialect("Test1", &["dde"]);
        let mut builder = ScriptBuilder::new(&dialect, "consts.cos");
        builder.push_const(ConstValue::String("hi".to_string()), TokenTrace::new(4, 1));
        builder.push_const(ConstValue::Integer(3), TokenTrace::new(1, 1));
        builder.push_const(ConstValue::Bytes(vec![1, 2]), TokenTrace::new(5, 2));
        builder.push_const(ConstValue::String("hi".to_string()), TokenTrace::new(4, 3));
        let script = builder.finish().expect("finish");

        assert_eq!(
            script.consts(),
            &[
                ConstValue::String("hi".to_string()),
                ConstValue::Bytes(vec![1, 2])
            ]
        );
        assert_eq!(
            script.ops(),
            &[
                Op::Const(ConstIndex::new(0)),
                Op::ConstInt(3),
                Op::Bytes(ConstIndex::new(1)),
                Op::Const(ConstIndex::new(0)),
            ]
        );
    }

    #[test]
    fn forward_jumps_are_patched() {
        let dialect = test_dialect("Test1", &["dde", "doif", "endi"]);
        let mut builder = ScriptBuilder::new(&dialect, "jump.cos");
        let jump = builder.op(Op::JumpIfFalse(CodeOffset::new(0)), TokenTrace::new(4, 1));
        builder.call("dde", TokenTrace::new(3, 2)).expect("dde");
        let end = builder.here();
        builder.patch_target(jump, end).expect("patch");
        builder.op(Op::Stop, TokenTrace::new(4, 3));

        let error = builder
            .patch_target(end, end)
            .expect_err("stop has no target");
        assert_eq!(error.code, "BUILDER_NOT_A_JUMP");

        let script = builder.finish().expect("finish");
        assert_eq!(script.ops()[0], Op::JumpIfFalse(CodeOffset::new(2)));
    }

    #[test]
    fn metadata_is_carried_into_script() {
        let dialect = test_dialect("Test1", &["dde"]);
        let mut builder = ScriptBuilder::new(&dialect, "meta.cos");
        builder.source("dde").classifier(ScriptClassifier {
            family: 2,
            genus: 13,
            species: 1000,
            event: 9,
        });
        let script = builder.finish().expect("finish");
        assert_eq!(script.source(), Some("dde"));
        assert_eq!(script.classifier().map(|c| c.event), Some(9));
        assert!(script.is_empty());
    }
}
