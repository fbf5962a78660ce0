//! Command line parsing.
//!
//! Deliberately minimal: the first whitespace-delimited token is the command
//! name, everything after it (trimmed) is handed to the command as a single
//! opaque argument string. Commands that need more structure parse their
//! argument themselves.

/// One parsed console input line.
///
/// Created per submitted line, discarded after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// The raw input line as submitted.
    pub raw: String,
    /// The command name (first token). Empty for blank input.
    pub name: String,
    /// The trimmed remainder of the line after the command name.
    pub args: String,
}

impl CommandLine {
    /// Whether this line carries an argument.
    #[inline]
    pub fn has_args(&self) -> bool {
        !self.args.is_empty()
    }

    /// Whether this line is blank (no command name).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// Parse a raw input line into a [`CommandLine`].
///
/// Blank input (empty or whitespace-only) parses to an empty command name;
/// dispatch treats that as a no-op.
///
/// # Examples
///
/// ```
/// use bevy_world_console::core::parse;
///
/// let cl = parse("loadmodule j01_town");
/// assert_eq!(cl.name, "loadmodule");
/// assert_eq!(cl.args, "j01_town");
///
/// let cl = parse("  listmodules  ");
/// assert_eq!(cl.name, "listmodules");
/// assert!(!cl.has_args());
/// ```
pub fn parse(raw: &str) -> CommandLine {
    let trimmed = raw.trim();

    let (name, args) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (trimmed, ""),
    };

    CommandLine {
        raw: raw.to_string(),
        name: name.to_string(),
        args: args.to_string(),
    }
}
