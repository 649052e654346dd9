use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use cs_dialect::{Dialect, DialectId};
use tracing::debug;

/// Lookup keys of a dialect's commands in command-index order.
pub fn build_translation(dialect: &Dialect) -> Vec<String> {
    dialect.commands().keys().map(str::to_string).collect()
}

/// Per-dialect translation tables, built on first use and kept for the
/// lifetime of the cache. Entries are keyed by dialect identity, not name.
#[derive(Debug, Default)]
pub struct TranslationCache {
    tables: Mutex<HashMap<DialectId, Arc<[String]>>>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translation_for(&self, dialect: &Dialect) -> Arc<[String]> {
        let mut tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        tables
            .entry(dialect.id())
            .or_insert_with(|| {
                debug!(
                    dialect = dialect.name(),
                    commands = dialect.count(),
                    "built translation table"
                );
                Arc::from(build_translation(dialect))
            })
            .clone()
    }

    pub fn contains(&self, dialect: &Dialect) -> bool {
        self.tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&dialect.id())
    }

    pub fn len(&self) -> usize {
        self.tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
