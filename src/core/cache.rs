//! Per-command argument caches.
//!
//! Commands that take a world-dependent argument (module names, trigger
//! tags) declare a source; the cache keeps the last queried list so
//! tab-completion does not re-run a potentially expensive provider scan on
//! every keystroke. The cache is advisory: it goes stale the moment the
//! world changes and is rebuilt wholesale on refresh. It is never consulted
//! to authorize execution; handlers re-query the provider directly.

use std::collections::HashMap;

use bevy::prelude::*;

use super::{ArgumentSource, WorldProvider, matcher};

/// Cached argument lists for completion, keyed by command name.
#[derive(Resource, Default)]
pub struct ArgumentCache {
    sources: HashMap<Box<str>, ArgumentSource>,
    values: HashMap<Box<str>, Vec<String>>,
}

impl ArgumentCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an argument source for a command.
    ///
    /// The list starts empty; call `refresh` (or wait for the next context
    /// change) to populate it.
    pub fn register(&mut self, command: impl Into<Box<str>>, source: ArgumentSource) {
        let command = command.into();
        self.values.insert(command.clone(), Vec::new());
        self.sources.insert(command, source);
    }

    /// Whether a command has a registered argument source.
    pub fn is_cached(&self, command: &str) -> bool {
        self.sources.contains_key(command)
    }

    /// Names of all cache-bearing commands.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(|k| k.as_ref())
    }

    /// Rebuild the list for one command by querying the provider.
    ///
    /// Clear-then-repopulate: the previous list is discarded entirely.
    /// Duplicates (case-insensitive) are dropped, keeping the provider's
    /// order for the first occurrence. No-op for commands without a source.
    pub fn refresh(&mut self, command: &str, provider: &dyn WorldProvider) {
        let Some(source) = self.sources.get(command) else {
            return;
        };

        let mut list: Vec<String> = Vec::new();
        for value in source(provider) {
            if !matcher::contains_ignore_case(list.iter().map(|s| s.as_str()), &value) {
                list.push(value);
            }
        }

        self.values.insert(command.into(), list);
    }

    /// Rebuild the lists of all cache-bearing commands.
    ///
    /// Invoked whenever global context changes (a module or area was loaded
    /// or left) so completions stay consistent with the live world.
    pub fn refresh_all(&mut self, provider: &dyn WorldProvider) {
        let commands: Vec<Box<str>> = self.sources.keys().cloned().collect();
        for command in commands {
            self.refresh(&command, provider);
        }
    }

    /// The current (possibly stale) argument list for a command.
    pub fn get(&self, command: &str) -> &[String] {
        self.values.get(command).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Cached values starting with `partial`, ignoring ASCII case.
    pub fn complete(&self, command: &str, partial: &str) -> Vec<String> {
        matcher::filter_prefix(partial, self.get(command).iter().map(|s| s.as_str()))
    }

    /// Clear all cached lists, keeping the registered sources.
    pub fn clear(&mut self) {
        for list in self.values.values_mut() {
            list.clear();
        }
    }
}
