pub mod error;
pub mod op;
pub mod types;
pub mod value;

pub use error::CmdScriptError;
pub use op::*;
pub use types::*;
pub use value::*;
