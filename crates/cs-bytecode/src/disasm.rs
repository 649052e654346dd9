use std::collections::BTreeSet;
use std::fmt::Write;

use cs_core::Op;
use cs_dialect::Dialect;

use crate::script::Script;

/// Render a script one instruction per line:
/// `0003 > 12:4 CALL #17 "cmd doif"`. Jump targets are marked with `>`.
pub fn disassemble(script: &Script, dialect: &Dialect) -> String {
    let targets = collect_jump_targets(script.ops());
    let mut out = String::new();

    for (ip, op) in script.ops().iter().enumerate() {
        let marker = if targets.contains(&ip) { '>' } else { ' ' };
        let trace = script.trace_at(ip).unwrap_or_default().to_string();
        let _ = write!(out, "{:04} {} {:>7} {}", ip, marker, trace, op.mnemonic());
        let operand = render_operand(script, dialect, op);
        if !operand.is_empty() {
            out.push(' ');
            out.push_str(&operand);
        }
        out.push('\n');
    }

    if targets.contains(&script.len()) {
        let _ = writeln!(out, "{:04} > end", script.len());
    }

    out
}

fn collect_jump_targets(ops: &[Op]) -> BTreeSet<usize> {
    ops.iter()
        .filter_map(Op::target)
        .map(|target| target.index())
        .collect()
}

fn render_operand(script: &Script, dialect: &Dialect, op: &Op) -> String {
    match op {
        Op::Call(index) | Op::SaveCall(index) => {
            // Tolerate a dialect other than the one the script was bound to.
            if index.index() < dialect.count() {
                format!("#{} {:?}", index, dialect.command_at(*index).key())
            } else {
                format!("#{} <unknown>", index)
            }
        }
        Op::Const(index) | Op::Bytes(index) => match script.consts().get(index.index()) {
            Some(value) => format!("#{} {}", index, value),
            None => format!("#{} <missing>", index),
        },
        Op::ConstInt(value) => value.to_string(),
        Op::Cond(comparison, Some(join)) => format!("{} {}", comparison, join),
        Op::Cond(comparison, None) => comparison.to_string(),
        Op::Jump(target)
        | Op::JumpIfFalse(target)
        | Op::DecJumpNonZero(target)
        | Op::Gosub(target)
        | Op::Enumerate(target) => format!("-> {:04}", target.index()),
        Op::Nop | Op::Stop | Op::Fail | Op::Yield | Op::Return => String::new(),
    }
}
