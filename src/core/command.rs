//! Console command definitions.
//!
//! A command is immutable once registered: a unique name, a usage string,
//! and a handler. The set of commands is fixed when the console is built.

use bevy::prelude::*;

use super::{CommandLine, WorldProvider};

/// Type alias for command handler functions.
///
/// Handlers receive:
/// - `cl`: The parsed command line (name plus opaque argument text)
/// - `world`: Mutable access to the Bevy world
///
/// Handlers must validate their own argument content and convert every
/// failure into printed output; nothing may escape dispatch.
pub type CommandHandler = Box<dyn Fn(&CommandLine, &mut World) + Send + Sync>;

/// Type alias for argument-list sources.
///
/// A source queries the world provider for the currently valid argument
/// values of one command (e.g. known module names). The
/// [`ArgumentCache`](super::ArgumentCache) invokes it on refresh.
pub type ArgumentSource = Box<dyn Fn(&dyn WorldProvider) -> Vec<String> + Send + Sync>;

/// Metadata for a registered command (stored in the registry).
///
/// The handler is stored separately in `CommandHandlers` so handlers can
/// access `World` (including the registry itself) without borrow conflicts.
#[derive(Debug, Clone)]
pub struct CommandMeta {
    /// The command name. Case-sensitive, unique per console instance.
    pub name: Box<str>,
    /// Usage text, printed by `help` and on missing arguments.
    pub usage: &'static str,
}

impl CommandMeta {
    /// Get the command name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A console command under construction.
///
/// # Examples
///
/// ```ignore
/// let cmd = ConsoleCommand::new("getmodule", |_cl, world| {
///     // query the world, print the result
/// })
/// .usage("Usage: getmodule\nReturns the name of the currently loaded module");
/// ```
pub struct ConsoleCommand {
    name: Box<str>,
    usage: &'static str,
    handler: CommandHandler,
    arguments: Option<ArgumentSource>,
}

impl ConsoleCommand {
    /// Create a new command with the given name and handler.
    pub fn new<F>(name: impl Into<Box<str>>, handler: F) -> Self
    where
        F: Fn(&CommandLine, &mut World) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            usage: "",
            handler: Box::new(handler),
            arguments: None,
        }
    }

    /// Set the usage text.
    pub fn usage(mut self, usage: &'static str) -> Self {
        self.usage = usage;
        self
    }

    /// Declare an argument-list source for this command.
    ///
    /// The cache will query it on every refresh to keep completions in step
    /// with the live world.
    pub fn arguments<F>(mut self, source: F) -> Self
    where
        F: Fn(&dyn WorldProvider) -> Vec<String> + Send + Sync + 'static,
    {
        self.arguments = Some(Box::new(source));
        self
    }

    /// Get the command name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Split the command into metadata, handler and argument source.
    pub fn split(self) -> (CommandMeta, CommandHandler, Option<ArgumentSource>) {
        (
            CommandMeta {
                name: self.name,
                usage: self.usage,
            },
            self.handler,
            self.arguments,
        )
    }
}

impl std::fmt::Debug for ConsoleCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleCommand")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("has_arguments", &self.arguments.is_some())
            .finish_non_exhaustive()
    }
}
