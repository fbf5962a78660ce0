//! Core console types with zero optional dependencies.
//!
//! This module provides the fundamental building blocks:
//! - [`Console`] - Unified system parameter for the embedding layer
//! - [`CommandRegistry`] - Fixed registry of console commands
//! - [`ArgumentCache`] - Refreshable per-command completion lists
//! - [`WorldProvider`] - The engine/game collaborator boundary
//! - [`parse`] - Raw line to [`CommandLine`] translation
//! - [`Trie`] - Ordered prefix lookup for name completion
//! - Events for communication between layers

mod cache;
mod command;
mod console;
mod events;
mod matcher;
mod parser;
mod registry;
mod trie;
mod world;

pub use cache::ArgumentCache;
pub use command::{ArgumentSource, CommandHandler, CommandMeta, ConsoleCommand};
pub use console::{Console, ConsoleVisibility};
pub use events::{
    ConsoleEventsPlugin, ConsoleInputEvent, ConsoleOutputEvent, ConsoleOutputLevel,
    ConsoleToggleEvent, ContextChangedEvent,
};
pub use matcher::{contains_ignore_case, eq_ignore_case, filter_prefix, starts_with_ignore_case};
pub use parser::{CommandLine, parse};
pub use registry::{CommandHandlers, CommandRegistry};
pub use trie::Trie;
pub use world::{GameWorld, Trigger, WorldError, WorldProvider};
