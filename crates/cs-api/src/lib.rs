use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use cs_bytecode::Script;
use cs_core::CmdScriptError;
use cs_dialect::{catalog, parse_dialect_definitions, Dialect, DialectRegistry};
use cs_serial::{Encoding, ScriptSerializer, TranslationCache};
use tracing::debug;

static DEFAULT_REGISTRY: OnceLock<Arc<DialectRegistry>> = OnceLock::new();
static DEFAULT_CACHE: OnceLock<Arc<TranslationCache>> = OnceLock::new();

/// Process-wide registry holding the built-in dialects.
pub fn default_registry() -> Arc<DialectRegistry> {
    Arc::clone(DEFAULT_REGISTRY.get_or_init(|| {
        let builder = catalog::builtin_registry_builder()
            .expect("built-in dialect names should be unique");
        Arc::new(builder.build())
    }))
}

/// Process-wide translation cache. Entries are keyed by dialect identity,
/// so it can be shared by serializers over different registries.
pub fn default_cache() -> Arc<TranslationCache> {
    Arc::clone(DEFAULT_CACHE.get_or_init(|| Arc::new(TranslationCache::new())))
}

pub fn default_serializer() -> ScriptSerializer {
    serializer_for(default_registry())
}

pub fn serializer_for(registry: Arc<DialectRegistry>) -> ScriptSerializer {
    ScriptSerializer::with_cache(registry, default_cache())
}

pub fn load_dialect_definitions(path: &Path) -> Result<Vec<Dialect>, CmdScriptError> {
    let raw = fs::read_to_string(path).map_err(|error| {
        CmdScriptError::new(
            "API_DIALECT_FILE_READ",
            format!(
                "Failed to read dialect definitions {}: {}",
                path.display(),
                error
            ),
        )
    })?;
    let dialects = parse_dialect_definitions(&raw)
        .map_err(|error| {
            CmdScriptError::new(
                error.code,
                format!("{}: {}", path.display(), error.message),
            )
        })?
        .into_iter()
        .map(|definition| definition.into_dialect())
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        path = %path.display(),
        dialects = dialects.len(),
        "loaded dialect definitions"
    );
    Ok(dialects)
}

/// Built-in dialects followed by every dialect defined in `paths`, in order.
///
/// The built-ins are the instances held by [`default_registry`], so scripts
/// bound to them can be saved through either registry and share entries in
/// [`default_cache`].
pub fn registry_with_definitions<P: AsRef<Path>>(
    paths: &[P],
) -> Result<Arc<DialectRegistry>, CmdScriptError> {
    let defaults = default_registry();
    if paths.is_empty() {
        return Ok(defaults);
    }
    let mut builder = defaults.to_builder();
    for path in paths {
        for dialect in load_dialect_definitions(path.as_ref())? {
            builder.register(dialect)?;
        }
    }
    Ok(Arc::new(builder.build()))
}

pub fn save_script(script: &Script, encoding: Encoding) -> Result<Vec<u8>, CmdScriptError> {
    Ok(default_serializer().save(script, encoding)?)
}

/// Loads a script against the built-in dialects, detecting its encoding.
pub fn load_script(bytes: &[u8]) -> Result<Script, CmdScriptError> {
    Ok(default_serializer().load_detected(bytes)?)
}
