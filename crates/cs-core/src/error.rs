use crate::types::TokenTrace;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct CmdScriptError {
    pub code: String,
    pub message: String,
    pub trace: Option<TokenTrace>,
}

impl CmdScriptError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            trace: None,
        }
    }

    pub fn with_trace(
        code: impl Into<String>,
        message: impl Into<String>,
        trace: TokenTrace,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            trace: Some(trace),
        }
    }
}
