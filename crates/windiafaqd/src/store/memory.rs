//! In-memory FAQ store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{FaqAlias, FaqCommand, FaqStore, RecordKind, StoreError};

/// FAQ store held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryFaqStore {
    commands: BTreeMap<String, FaqCommand>,
    aliases: BTreeMap<String, FaqAlias>,
}

/// Serialised form: two flat, name-ordered lists.
#[derive(Debug, Default, Deserialize, Serialize)]
pub(super) struct FaqDocument {
    #[serde(default)]
    pub(super) commands: Vec<FaqCommand>,
    #[serde(default)]
    pub(super) aliases: Vec<FaqAlias>,
}

impl MemoryFaqStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from a document, enforcing the key invariants.
    pub(super) fn from_document(document: FaqDocument) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for command in document.commands {
            store.put(command)?;
        }
        for alias in document.aliases {
            store.put_alias(alias)?;
        }
        Ok(store)
    }

    pub(super) fn to_document(&self) -> FaqDocument {
        FaqDocument {
            commands: self.commands.values().cloned().collect(),
            aliases: self.aliases.values().cloned().collect(),
        }
    }

    fn existing_kind(&self, key: &str) -> Option<RecordKind> {
        if self.commands.contains_key(key) {
            Some(RecordKind::Command)
        } else if self.aliases.contains_key(key) {
            Some(RecordKind::Alias)
        } else {
            None
        }
    }
}

impl FaqStore for MemoryFaqStore {
    fn get(&self, key: &str) -> Option<FaqCommand> {
        if let Some(command) = self.commands.get(key) {
            return Some(command.clone());
        }
        let alias = self.aliases.get(key)?;
        self.commands.get(&alias.command).cloned()
    }

    fn list_all(&self) -> Vec<FaqCommand> {
        self.commands.values().cloned().collect()
    }

    fn put(&mut self, command: FaqCommand) -> Result<(), StoreError> {
        if let Some(existing) = self.existing_kind(&command.command) {
            return Err(StoreError::conflict(command.command, existing));
        }
        self.commands.insert(command.command.clone(), command);
        Ok(())
    }

    fn update(&mut self, key: &str, description: &str) -> Result<bool, StoreError> {
        Ok(match self.commands.get_mut(key) {
            Some(command) => {
                description.clone_into(&mut command.description);
                true
            }
            None => false,
        })
    }

    fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        if self.commands.remove(key).is_none() {
            return Ok(false);
        }
        self.aliases.retain(|_, alias| alias.command != key);
        Ok(true)
    }

    fn put_alias(&mut self, alias: FaqAlias) -> Result<(), StoreError> {
        if let Some(existing) = self.existing_kind(&alias.alias) {
            return Err(StoreError::conflict(alias.alias, existing));
        }
        if !self.commands.contains_key(&alias.command) {
            return Err(StoreError::missing_target(alias.alias, alias.command));
        }
        self.aliases.insert(alias.alias.clone(), alias);
        Ok(())
    }
}
