//! Command registry.
//!
//! Central storage for the fixed command set, with trie-based lookup for
//! ordered name completion.

use std::collections::HashMap;

use bevy::prelude::*;

use super::{CommandHandler, CommandMeta, Trie};

/// Registry of console commands.
///
/// Commands are registered once at console construction and never mutated
/// or removed during a session. Registering a duplicate name is a
/// programmer error and panics; nothing else in the console may abort.
///
/// # Examples
///
/// ```ignore
/// let mut registry = CommandRegistry::new();
/// registry.register(meta); // panics if meta.name is already registered
///
/// if let Some(meta) = registry.get("loadmodule") {
///     println!("{}", meta.usage);
/// }
/// ```
#[derive(Resource, Default)]
pub struct CommandRegistry {
    /// Trie for ordered prefix lookup (stores () to save memory).
    trie: Trie<()>,
    /// Actual metadata storage.
    entries: HashMap<Box<str>, CommandMeta>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command's metadata.
    ///
    /// # Panics
    ///
    /// Panics if a command with the same name is already registered. The
    /// command set is fixed per console instance; a collision is a bug in
    /// the embedding code, not a runtime condition.
    pub fn register(&mut self, meta: CommandMeta) {
        assert!(
            !self.entries.contains_key(&meta.name),
            "console command '{}' registered twice",
            meta.name
        );

        self.trie.insert(&meta.name, ());
        self.entries.insert(meta.name.clone(), meta);
    }

    /// Get a command's metadata by exact (case-sensitive) name.
    pub fn get(&self, name: &str) -> Option<&CommandMeta> {
        self.entries.get(name)
    }

    /// Get a command's usage text by name.
    pub fn usage(&self, name: &str) -> Option<&'static str> {
        self.entries.get(name).map(|meta| meta.usage)
    }

    /// Check if a command exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Get the number of registered commands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all commands whose name starts with `prefix`, in
    /// lexicographic order.
    pub fn prefix_iter(&self, prefix: &str) -> impl Iterator<Item = &CommandMeta> {
        self.trie
            .prefix_iter(prefix)
            .filter_map(|(name, _)| self.entries.get(name))
    }

    /// Iterate over all commands in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandMeta> {
        self.prefix_iter("")
    }

    /// Iterate over all command names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.trie.keys()
    }
}

/// Stores command handlers separately from metadata.
///
/// This separation allows handlers to access `World` (including
/// `CommandRegistry`) without borrow conflicts: the dispatcher takes a
/// handler out, runs it against the world, and puts it back.
#[derive(Resource, Default)]
pub struct CommandHandlers {
    handlers: HashMap<Box<str>, CommandHandler>,
}

impl CommandHandlers {
    /// Create a new empty handler storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a command.
    pub fn register(&mut self, name: Box<str>, handler: CommandHandler) {
        self.handlers.insert(name, handler);
    }

    /// Check if a handler exists for a command.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Take a handler temporarily for execution.
    ///
    /// Use `put` to return the handler after execution.
    pub fn take(&mut self, name: &str) -> Option<CommandHandler> {
        self.handlers.remove(name)
    }

    /// Put a handler back after temporary removal.
    pub fn put(&mut self, name: &str, handler: CommandHandler) {
        self.handlers.insert(name.into(), handler);
    }
}
