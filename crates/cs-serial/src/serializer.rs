use std::fs;
use std::path::Path;
use std::sync::Arc;

use cs_bytecode::Script;
use cs_core::CommandIndex;
use cs_dialect::{Dialect, DialectRegistry};
use tracing::{debug, info, warn};

use crate::cache::TranslationCache;
use crate::encoding::Encoding;
use crate::error::SerialError;
use crate::record::{SavedDialect, SavedScript, SCRIPT_SCHEMA_V1};

/// Saves and loads scripts against a registry of dialects.
///
/// Save writes command operands as they are together with the saving
/// dialect's translation table. Load re-resolves every operand by key in
/// the local dialect of the same name, so the saving and loading command
/// tables may differ in size and order.
#[derive(Debug, Clone)]
pub struct ScriptSerializer {
    registry: Arc<DialectRegistry>,
    cache: Arc<TranslationCache>,
}

impl ScriptSerializer {
    pub fn new(registry: Arc<DialectRegistry>) -> Self {
        Self::with_cache(registry, Arc::new(TranslationCache::new()))
    }

    pub fn with_cache(registry: Arc<DialectRegistry>, cache: Arc<TranslationCache>) -> Self {
        Self { registry, cache }
    }

    pub fn registry(&self) -> &Arc<DialectRegistry> {
        &self.registry
    }

    pub fn cache(&self) -> &Arc<TranslationCache> {
        &self.cache
    }

    pub fn to_record(&self, script: &Script) -> Result<SavedScript, SerialError> {
        let dialect = self.dialect_named(script.dialect().name())?;
        if dialect.id() != script.dialect_id() {
            return Err(SerialError::ForeignDialect {
                dialect: dialect.name().to_string(),
            });
        }
        let translation = self.cache.translation_for(&dialect);

        if let Some(stale) = script
            .ops()
            .iter()
            .filter_map(|op| op.command())
            .find(|index| index.index() >= translation.len())
        {
            return Err(SerialError::TranslationIndexOutOfRange {
                index: stale.index(),
                len: translation.len(),
                dialect: dialect.name().to_string(),
            });
        }

        Ok(SavedScript {
            schema_version: SCRIPT_SCHEMA_V1.to_string(),
            body: script.parts().clone(),
            dialect: SavedDialect {
                name: dialect.name().to_string(),
                translation: translation.to_vec(),
            },
        })
    }

    pub fn save(&self, script: &Script, encoding: Encoding) -> Result<Vec<u8>, SerialError> {
        let record = self.to_record(script)?;
        let bytes = encoding.encode(&record)?;
        info!(
            script = script.filename(),
            dialect = record.dialect.name.as_str(),
            encoding = encoding.name(),
            bytes = bytes.len(),
            "saved script"
        );
        Ok(bytes)
    }

    pub fn save_to_path(
        &self,
        script: &Script,
        path: &Path,
        encoding: Encoding,
    ) -> Result<(), SerialError> {
        let bytes = self.save(script, encoding)?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|source| SerialError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
        fs::write(path, bytes).map_err(|source| SerialError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rebuilds a script from a record, translating every command operand
    /// into the local dialect. Any unresolvable operand rejects the whole
    /// record.
    pub fn from_record(&self, record: SavedScript) -> Result<Script, SerialError> {
        let filename = record.body.filename.clone();
        let dialect_name = record.dialect.name.clone();
        self.resolve_record(record).map_err(|error| {
            warn!(
                script = filename.as_str(),
                dialect = dialect_name.as_str(),
                code = error.code(),
                "rejected saved script: {}",
                error
            );
            error
        })
    }

    pub fn load(&self, bytes: &[u8], encoding: Encoding) -> Result<Script, SerialError> {
        let record: SavedScript = encoding.decode(bytes)?;
        let script = self.from_record(record)?;
        info!(
            script = script.filename(),
            dialect = script.dialect().name(),
            encoding = encoding.name(),
            ops = script.len(),
            "loaded script"
        );
        Ok(script)
    }

    pub fn load_detected(&self, bytes: &[u8]) -> Result<Script, SerialError> {
        self.load(bytes, Encoding::detect(bytes))
    }

    pub fn load_from_path(&self, path: &Path) -> Result<Script, SerialError> {
        let bytes = fs::read(path).map_err(|source| SerialError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_detected(&bytes)
    }

    /// Moves a script onto another registered dialect by resolving its
    /// commands by key, exactly as a load into that dialect would.
    pub fn retarget(&self, script: &Script, target: &str) -> Result<Script, SerialError> {
        let mut record = self.to_record(script)?;
        record.dialect.name = target.to_string();
        self.from_record(record)
    }

    fn resolve_record(&self, record: SavedScript) -> Result<Script, SerialError> {
        let SavedScript {
            schema_version,
            mut body,
            dialect: saved,
        } = record;

        if schema_version != SCRIPT_SCHEMA_V1 {
            return Err(SerialError::UnsupportedSchema {
                expected: SCRIPT_SCHEMA_V1.to_string(),
                found: schema_version,
            });
        }

        let dialect = self.dialect_named(&saved.name)?;
        let mut resolved: Vec<Option<CommandIndex>> = vec![None; saved.translation.len()];
        let mut rewritten = 0usize;

        for op in &mut body.ops {
            let Some(saved_index) = op.command() else {
                continue;
            };
            let local = match resolved.get(saved_index.index()).copied() {
                Some(Some(local)) => local,
                Some(None) => {
                    let local =
                        translate(&dialect, &saved.translation[saved_index.index()])?;
                    resolved[saved_index.index()] = Some(local);
                    local
                }
                None => {
                    return Err(SerialError::TranslationIndexOutOfRange {
                        index: saved_index.index(),
                        len: saved.translation.len(),
                        dialect: saved.name,
                    })
                }
            };
            if local != saved_index {
                rewritten += 1;
            }
            *op = op.with_command(local);
        }
        debug!(
            dialect = dialect.name(),
            rewritten,
            "translated command operands"
        );

        Ok(Script::bind(body, &dialect)?)
    }

    fn dialect_named(&self, name: &str) -> Result<Arc<Dialect>, SerialError> {
        self.registry
            .lookup(name)
            .ok_or_else(|| SerialError::UnknownDialect {
                dialect: name.to_string(),
            })
    }
}

fn translate(dialect: &Dialect, key: &str) -> Result<CommandIndex, SerialError> {
    dialect
        .find_command(key)
        .map(|command| dialect.index_of(command))
        .ok_or_else(|| SerialError::UnknownCommand {
            command: key.to_string(),
            dialect: dialect.name().to_string(),
        })
}
