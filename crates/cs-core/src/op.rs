use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{CodeOffset, CommandIndex, ConstIndex};

// =============================================================================
// OP - Bytecode instructions
// =============================================================================

/// One compiled instruction. Each opcode carries exactly the operand its
/// kind needs, so a command index can never be read as a constant slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    Nop,
    /// End the script normally.
    Stop,
    /// Abort the script with a runtime failure.
    Fail,
    /// Give up the rest of the current tick.
    Yield,
    /// Return from a `Gosub`.
    Return,

    // ==========================================================================
    // Command dispatch (operands index the dialect's command table)
    // ==========================================================================
    /// Invoke a command.
    Call(CommandIndex),
    /// Push a command reference for deferred invocation without calling it.
    SaveCall(CommandIndex),

    // ==========================================================================
    // Literals
    // ==========================================================================
    Const(ConstIndex),
    ConstInt(i32),
    Bytes(ConstIndex),

    // ==========================================================================
    // Control flow (operands are absolute instruction positions)
    // ==========================================================================
    /// Pop two values, compare, and fold the result into the condition flag.
    Cond(Comparison, Option<CondJoin>),
    Jump(CodeOffset),
    JumpIfFalse(CodeOffset),
    /// Decrement the loop counter and jump while it stays above zero.
    DecJumpNonZero(CodeOffset),
    Gosub(CodeOffset),
    /// Advance an enumeration, jumping to the target when exhausted.
    Enumerate(CodeOffset),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    BitAnd,
    BitNotAnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CondJoin {
    And,
    Or,
}

impl Op {
    /// The command-table operand of `Call` and `SaveCall`.
    pub fn command(&self) -> Option<CommandIndex> {
        match self {
            Self::Call(index) | Self::SaveCall(index) => Some(*index),
            _ => None,
        }
    }

    /// Same opcode with its command operand replaced; other ops are returned
    /// unchanged.
    pub fn with_command(self, index: CommandIndex) -> Self {
        match self {
            Self::Call(_) => Self::Call(index),
            Self::SaveCall(_) => Self::SaveCall(index),
            other => other,
        }
    }

    pub fn constant(&self) -> Option<ConstIndex> {
        match self {
            Self::Const(index) | Self::Bytes(index) => Some(*index),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<CodeOffset> {
        match self {
            Self::Jump(target)
            | Self::JumpIfFalse(target)
            | Self::DecJumpNonZero(target)
            | Self::Gosub(target)
            | Self::Enumerate(target) => Some(*target),
            _ => None,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Nop => "NOP",
            Self::Stop => "STOP",
            Self::Fail => "FAIL",
            Self::Yield => "YIELD",
            Self::Return => "RETURN",
            Self::Call(_) => "CALL",
            Self::SaveCall(_) => "SAVE_CALL",
            Self::Const(_) => "CONST",
            Self::ConstInt(_) => "CONST_INT",
            Self::Bytes(_) => "BYTES",
            Self::Cond(..) => "COND",
            Self::Jump(_) => "JMP",
            Self::JumpIfFalse(_) => "JMP_FALSE",
            Self::DecJumpNonZero(_) => "DEC_JNZ",
            Self::Gosub(_) => "GOSUB",
            Self::Enumerate(_) => "ENUM",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Le => "le",
            Self::Ge => "ge",
            Self::BitAnd => "bt",
            Self::BitNotAnd => "bf",
        };
        f.write_str(text)
    }
}

impl fmt::Display for CondJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("and"),
            Self::Or => f.write_str("or"),
        }
    }
}

#[cfg(test)]
mod op_tests {
    use super::*;

    #[test]
    fn command_operand_is_exposed_for_both_call_kinds() {
        let index = CommandIndex::new(4);
        assert_eq!(Op::Call(index).command(), Some(index));
        assert_eq!(Op::SaveCall(index).command(), Some(index));
        assert_eq!(Op::Const(ConstIndex::new(4)).command(), None);
        assert_eq!(Op::ConstInt(4).command(), None);
    }

    #[test]
    fn with_command_only_touches_command_ops() {
        let rewritten = Op::SaveCall(CommandIndex::new(1)).with_command(CommandIndex::new(9));
        assert_eq!(rewritten, Op::SaveCall(CommandIndex::new(9)));

        let jump = Op::Jump(CodeOffset::new(2));
        assert_eq!(jump.with_command(CommandIndex::new(9)), jump);
    }

    #[test]
    fn constant_and_target_operands() {
        assert_eq!(
            Op::Bytes(ConstIndex::new(2)).constant(),
            Some(ConstIndex::new(2))
        );
        assert_eq!(
            Op::Enumerate(CodeOffset::new(6)).target(),
            Some(CodeOffset::new(6))
        );
        assert_eq!(Op::Stop.target(), None);
    }

    #[test]
    fn ops_serialize_as_snake_case_variants() {
        let json = serde_json::to_string(&vec![
            Op::Call(CommandIndex::new(1)),
            Op::Cond(Comparison::Ge, Some(CondJoin::Or)),
            Op::Stop,
        ])
        .expect("serialize");
        assert_eq!(json, r#"[{"call":1},{"cond":["ge","or"]},"stop"]"#);
    }

    #[test]
    fn ops_survive_binary_encoding() {
        let ops = vec![
            Op::SaveCall(CommandIndex::new(3)),
            Op::Cond(Comparison::BitNotAnd, None),
            Op::ConstInt(-12),
        ];
        let bytes = bincode::serialize(&ops).expect("encode");
        let decoded: Vec<Op> = bincode::deserialize(&bytes).expect("decode");
        assert_eq!(decoded, ops);
    }
}
