//! Dialect-portable persistence for compiled scripts.
//!
//! Command operands are only meaningful against the exact command table a
//! script was compiled with. A saved script therefore carries, next to its
//! raw instructions, the dialect name and the lookup key of every command
//! index in the saving process's table. Loading maps each saved index back
//! to a key and resolves that key in the loading process's dialect of the
//! same name, whatever its size or order.

mod cache;
mod encoding;
mod error;
mod record;
mod serializer;

pub use cache::{build_translation, TranslationCache};
pub use encoding::Encoding;
pub use error::SerialError;
pub use record::{SavedDialect, SavedScript, SCRIPT_SCHEMA_V1};
pub use serializer::ScriptSerializer;
