use std::collections::BTreeMap;
use std::sync::Arc;

use cs_core::CmdScriptError;
use tracing::debug;

use crate::dialect::{Dialect, DialectHandle};

/// Collects dialects during startup. Each name may be registered once.
#[derive(Debug, Default)]
pub struct DialectRegistryBuilder {
    dialects: BTreeMap<String, Arc<Dialect>>,
}

impl DialectRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, dialect: Dialect) -> Result<&mut Self, CmdScriptError> {
        if let Some(existing) = self.dialects.get(dialect.name()) {
            return Err(CmdScriptError::new(
                "REGISTRY_DUPLICATE_DIALECT",
                format!(
                    "Dialect \"{}\" is already registered with {} commands.",
                    dialect.name(),
                    existing.count()
                ),
            ));
        }

        debug!(
            dialect = dialect.name(),
            commands = dialect.count(),
            "registered dialect"
        );
        self.dialects
            .insert(dialect.name().to_string(), Arc::new(dialect));
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.dialects.contains_key(name)
    }

    pub fn build(self) -> DialectRegistry {
        DialectRegistry {
            dialects: self.dialects,
        }
    }
}

/// Read-only mapping from dialect name to dialect.
#[derive(Debug, Clone, Default)]
pub struct DialectRegistry {
    dialects: BTreeMap<String, Arc<Dialect>>,
}

impl DialectRegistry {
    pub fn builder() -> DialectRegistryBuilder {
        DialectRegistryBuilder::new()
    }

    /// Builder seeded with this registry's dialects. The new registry shares
    /// the same `Arc<Dialect>` instances, so their identities carry over.
    pub fn to_builder(&self) -> DialectRegistryBuilder {
        DialectRegistryBuilder {
            dialects: self.dialects.clone(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<Dialect>> {
        self.dialects.get(name).cloned()
    }

    pub fn get(&self, name: &str) -> Option<&Dialect> {
        self.dialects.get(name).map(Arc::as_ref)
    }

    pub fn resolve(&self, handle: &DialectHandle) -> Option<Arc<Dialect>> {
        self.lookup(handle.name())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dialects.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Dialect>> {
        self.dialects.values()
    }

    pub fn len(&self) -> usize {
        self.dialects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialects.is_empty()
    }
}
