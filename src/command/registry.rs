//! Command registry keyed by name and alias.
//!
//! The [`CommandRegistry`] is owned by the hosting adapter and shared by
//! reference. Mutation takes the write lock; dispatch only reads.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::definition::CommandDefinition;
use crate::error::{CommandError, Result};

/// Registry of commands.
#[derive(Default)]
pub struct CommandRegistry {
    commands: RwLock<HashMap<String, Arc<CommandDefinition>>>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<CommandDefinition>>> {
        self.commands.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<CommandDefinition>>> {
        self.commands.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a command under its name and every alias.
    ///
    /// Fails with [`CommandError::DuplicateCommand`] if any key is taken; in
    /// that case nothing is inserted.
    pub fn register(&self, definition: CommandDefinition) -> Result<Arc<CommandDefinition>> {
        let mut commands = self.write();
        for key in definition.keys() {
            if let Some(existing) = commands.get(key) {
                return Err(CommandError::DuplicateCommand {
                    key: key.to_string(),
                    existing: existing.name().to_string(),
                });
            }
        }

        let definition = Arc::new(definition);
        for key in definition.keys() {
            commands.insert(key.to_string(), Arc::clone(&definition));
        }
        tracing::debug!(
            command = definition.name(),
            aliases = definition.aliases().len(),
            "registered command"
        );
        Ok(definition)
    }

    /// Remove the command owning `name` (a name or an alias) along with all
    /// of its keys. Does nothing if absent.
    pub fn unregister(&self, name: &str) -> Option<Arc<CommandDefinition>> {
        let mut commands = self.write();
        let definition = commands.get(&name.to_lowercase()).cloned()?;
        for key in definition.keys() {
            commands.remove(key);
        }
        tracing::debug!(command = definition.name(), "unregistered command");
        Some(definition)
    }

    /// Exact, case-insensitive lookup by name or alias.
    pub fn lookup(&self, token: &str) -> Option<Arc<CommandDefinition>> {
        self.read().get(&token.to_lowercase()).cloned()
    }

    /// Check whether a name or alias is registered.
    pub fn contains(&self, token: &str) -> bool {
        self.read().contains_key(&token.to_lowercase())
    }

    /// Distinct commands sorted by name.
    pub fn commands(&self) -> Vec<Arc<CommandDefinition>> {
        let commands = self.read();
        let unique: BTreeMap<&str, &Arc<CommandDefinition>> = commands
            .values()
            .map(|def| (def.name(), def))
            .collect();
        unique.into_values().cloned().collect()
    }

    /// Number of distinct commands.
    pub fn len(&self) -> usize {
        self.read()
            .iter()
            .filter(|(key, def)| key.as_str() == def.name())
            .count()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
