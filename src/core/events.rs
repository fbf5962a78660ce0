//! Console events for communication between layers.
//!
//! Events are the only coupling to the out-of-scope collaborators:
//! - Input source -> Core: submitted lines
//! - Core -> Renderer: output text and visibility transitions
//! - World owner -> Core: context-change notifications

use bevy::prelude::*;

/// Event sent when a line is submitted to the console.
///
/// # Examples
///
/// ```ignore
/// fn submit_line(mut events: MessageWriter<ConsoleInputEvent>) {
///     events.write(ConsoleInputEvent::new("loadmodule j01_town"));
/// }
/// ```
#[derive(Message, Debug, Clone)]
pub struct ConsoleInputEvent {
    /// The raw input line.
    pub line: String,
}

impl ConsoleInputEvent {
    /// Create a new input event.
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }
}

/// Event sent when the console produces a line of output.
///
/// The renderer collaborator consumes these; the core never reads back.
#[derive(Message, Debug, Clone)]
pub struct ConsoleOutputEvent {
    /// The message text.
    pub message: String,
    /// The output kind.
    pub level: ConsoleOutputLevel,
}

/// Output kind for console lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleOutputLevel {
    /// General information.
    #[default]
    Info,
    /// Warning (usage text, recoverable misuse).
    Warn,
    /// Error (unknown command, invalid argument, collaborator failure).
    Error,
    /// Command echo (shows the line that was executed).
    Command,
    /// Command result/response.
    Result,
}

impl ConsoleOutputEvent {
    /// Create a new output event.
    pub fn new(level: ConsoleOutputLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    /// Create an info message.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Info, message)
    }

    /// Create a warning message.
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Warn, message)
    }

    /// Create an error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Error, message)
    }

    /// Create a command echo message.
    pub fn command(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Command, message)
    }

    /// Create a result message.
    pub fn result(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Result, message)
    }
}

/// Event sent when world state relevant to cached completions changed.
///
/// The world-state owner writes this whenever the active module or area
/// changes; the console reacts by rebuilding all argument caches. Commands
/// that change context themselves (e.g. a successful module load) emit it
/// too.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ContextChangedEvent;

/// Event sent when the console is shown or hidden.
#[derive(Message, Debug, Clone, Copy)]
pub struct ConsoleToggleEvent {
    /// Whether the console is now shown.
    pub open: bool,
}

impl ConsoleToggleEvent {
    /// Create an event for showing the console.
    pub fn shown() -> Self {
        Self { open: true }
    }

    /// Create an event for hiding the console.
    pub fn hidden() -> Self {
        Self { open: false }
    }
}

/// Plugin that registers all console events.
pub struct ConsoleEventsPlugin;

impl Plugin for ConsoleEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ConsoleInputEvent>()
            .add_message::<ConsoleOutputEvent>()
            .add_message::<ContextChangedEvent>()
            .add_message::<ConsoleToggleEvent>();
    }
}
