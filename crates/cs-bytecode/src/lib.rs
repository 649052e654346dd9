mod builder;
pub mod disasm;
mod script;

pub use builder::ScriptBuilder;
pub use disasm::disassemble;
pub use script::{Script, ScriptClassifier, ScriptParts};

#[cfg(test)]
pub(crate) mod test_support;
