use std::path::{Path, PathBuf};
use std::sync::Arc;

use cs_core::CmdScriptError;
use cs_dialect::DialectRegistry;
use tracing::debug;
use walkdir::WalkDir;

use crate::{map_cli_dialect_scan, map_cli_path};

const DEFINITION_SUFFIX: &str = ".dialect.json";

/// Built-in dialects plus the explicit definition files, then every
/// definition found under `dialect_dir`.
pub(crate) fn build_registry(
    files: &[String],
    dialect_dir: Option<&str>,
) -> Result<Arc<DialectRegistry>, CmdScriptError> {
    let mut paths = files.iter().map(PathBuf::from).collect::<Vec<_>>();
    if let Some(dir) = dialect_dir {
        let root = resolve_dialect_dir(dir)?;
        paths.extend(collect_definition_files(&root)?);
    }
    debug!(files = paths.len(), "building dialect registry");
    cs_api::registry_with_definitions(paths.as_slice())
}

pub(crate) fn resolve_dialect_dir(dialect_dir: &str) -> Result<PathBuf, CmdScriptError> {
    let path = PathBuf::from(dialect_dir);
    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir().map_err(map_cli_path)?.join(path)
    };

    if !absolute.exists() {
        return Err(CmdScriptError::new(
            "CLI_DIALECT_DIR_NOT_FOUND",
            format!("dialect-dir does not exist: {}", absolute.display()),
        ));
    }

    if !absolute.is_dir() {
        return Err(CmdScriptError::new(
            "CLI_DIALECT_DIR_NOT_DIR",
            format!("dialect-dir is not a directory: {}", absolute.display()),
        ));
    }

    Ok(absolute)
}

pub(crate) fn collect_definition_files(dialect_dir: &Path) -> Result<Vec<PathBuf>, CmdScriptError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dialect_dir)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(map_cli_dialect_scan)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().to_string_lossy().ends_with(DEFINITION_SUFFIX) {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        return Err(CmdScriptError::new(
            "CLI_DIALECT_DIR_EMPTY",
            format!(
                "No {} files under {}",
                DEFINITION_SUFFIX,
                dialect_dir.display()
            ),
        ));
    }

    Ok(files)
}
