//! Console orchestration surface.
//!
//! [`ConsoleVisibility`] is the shown/hidden state machine; [`Console`] is a
//! system parameter bundling registry, cache and visibility for the
//! embedding UI layer.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::{ArgumentCache, CommandMeta, CommandRegistry};

/// Shown/hidden state of the console.
///
/// Hidden is the initial and idle state. Certain commands force a
/// transition to hidden as a side effect (a module change closes the
/// console so the world view is restored). There is no terminal state; the
/// console persists for the process lifetime.
#[derive(Resource, Debug, Default)]
pub struct ConsoleVisibility {
    open: bool,
}

impl ConsoleVisibility {
    /// Whether the console is currently shown.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Transition to shown. Returns `true` if a transition occurred,
    /// `false` if already shown.
    pub fn show(&mut self) -> bool {
        let transitioned = !self.open;
        self.open = true;
        transitioned
    }

    /// Transition to hidden. Returns `true` if a transition occurred,
    /// `false` if already hidden.
    pub fn hide(&mut self) -> bool {
        let transitioned = self.open;
        self.open = false;
        transitioned
    }
}

/// Unified console system parameter for the embedding layer.
///
/// # Examples
///
/// ```ignore
/// fn on_tab_pressed(console: Console, input_line: Res<InputLine>) {
///     for candidate in console.complete(&input_line.0) {
///         // feed the completion popup
///     }
/// }
/// ```
#[derive(SystemParam)]
pub struct Console<'w> {
    registry: Res<'w, CommandRegistry>,
    cache: Res<'w, ArgumentCache>,
    visibility: ResMut<'w, ConsoleVisibility>,
}

impl Console<'_> {
    /// Whether the console is currently shown.
    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    /// Show the console.
    pub fn show(&mut self) -> bool {
        self.visibility.show()
    }

    /// Hide the console.
    pub fn hide(&mut self) -> bool {
        self.visibility.hide()
    }

    /// Check if a command exists (exact, case-sensitive name).
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Get a command's usage text.
    pub fn usage(&self, name: &str) -> Option<&'static str> {
        self.registry.usage(name)
    }

    /// Iterate over all commands in lexicographic name order.
    pub fn commands(&self) -> impl Iterator<Item = &CommandMeta> {
        self.registry.iter()
    }

    /// Complete a partial input line.
    ///
    /// Before the first whitespace the command name is completed
    /// (case-sensitive prefix, lexicographic order); after it, the cached
    /// argument list of that command is filtered case-insensitively.
    pub fn complete(&self, input: &str) -> Vec<String> {
        let input = input.trim_start();

        match input.split_once(char::is_whitespace) {
            Some((name, rest)) => self.cache.complete(name, rest.trim_start()),
            None => self
                .registry
                .prefix_iter(input)
                .map(|meta| meta.name().to_string())
                .collect(),
        }
    }

    /// Read-only access to the underlying registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Read-only access to the underlying argument cache.
    pub fn cache(&self) -> &ArgumentCache {
        &self.cache
    }
}
