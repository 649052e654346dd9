use std::fmt;

use serde::{Deserialize, Serialize};

/// Source position recorded for one instruction: the token width and the
/// line it was compiled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TokenTrace {
    pub width: u16,
    pub line: u32,
}

impl TokenTrace {
    pub fn new(width: u16, line: u32) -> Self {
        Self { width, line }
    }

    pub fn synthetic() -> Self {
        Self { width: 0, line: 0 }
    }
}

impl fmt::Display for TokenTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Integer,
    Float,
    String,
    Bytes,
    Agent,
    Variable,
    Condition,
    Label,
    Any,
}

impl ValueType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Agent => "agent",
            Self::Variable => "variable",
            Self::Condition => "condition",
            Self::Label => "label",
            Self::Any => "any",
        }
    }
}

macro_rules! operand_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Panics if `index` does not fit an operand slot.
            pub fn new(index: usize) -> Self {
                let raw = u32::try_from(index).unwrap_or_else(|_| {
                    panic!("{} {} exceeds operand range", stringify!($name), index)
                });
                Self(raw)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

operand_index!(
    /// Position of a command inside one dialect's command table.
    CommandIndex
);
operand_index!(
    /// Position of a literal inside a script's constant pool.
    ConstIndex
);
operand_index!(
    /// Absolute instruction position used by jumps and subroutine calls.
    CodeOffset
);
