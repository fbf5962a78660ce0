//! The engine/game collaborator boundary.
//!
//! The console never owns world state. Everything it introspects or mutates
//! goes through [`WorldProvider`], which the host implements and injects as
//! the [`GameWorld`] resource before the console plugin runs.

use bevy::prelude::*;

/// A trigger placed in the currently loaded area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    /// Unique tag identifying the trigger within its area.
    pub tag: String,
    /// Text shown when the trigger fires a transition.
    pub transition_text: String,
}

impl Trigger {
    /// Create a new trigger description.
    pub fn new(tag: impl Into<String>, transition_text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            transition_text: transition_text.into(),
        }
    }
}

/// Errors reported by the world provider for mutating operations.
///
/// These are user-visible diagnostics, never fatal to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The requested module does not exist.
    NoSuchModule(String),
    /// The module exists but failed to load.
    LoadFailed {
        /// The module that was being loaded.
        module: String,
        /// Provider-supplied failure reason.
        reason: String,
    },
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldError::NoSuchModule(module) => {
                write!(f, "no such module \"{}\"", module)
            }
            WorldError::LoadFailed { module, reason } => {
                write!(f, "failed to load module \"{}\": {}", module, reason)
            }
        }
    }
}

impl std::error::Error for WorldError {}

/// Read and mutate access to the running game world.
///
/// Queries run synchronously on the calling thread. `list_modules` may be
/// arbitrarily expensive (a resource scan in a real engine), which is why
/// the console caches its result for completion (see
/// [`ArgumentCache`](super::ArgumentCache)).
pub trait WorldProvider: Send + Sync + 'static {
    /// List all known module names, in the provider's canonical order.
    fn list_modules(&self) -> Vec<String>;

    /// The name of the currently loaded module, if any.
    fn current_module(&self) -> Option<String>;

    /// Load and enter the named module.
    fn load_module(&mut self, name: &str) -> Result<(), WorldError>;

    /// Exit the current module, returning to the main menu.
    fn exit_module(&mut self);

    /// Triggers in the current area. Empty when no area is loaded.
    fn area_triggers(&self) -> Vec<Trigger>;
}

/// Resource wrapping the host-supplied [`WorldProvider`].
///
/// Insert this before adding [`WorldConsolePlugin`](crate::WorldConsolePlugin):
///
/// ```ignore
/// app.insert_resource(GameWorld::new(MyEngineBridge::default()));
/// ```
#[derive(Resource)]
pub struct GameWorld(Box<dyn WorldProvider>);

impl GameWorld {
    /// Wrap a provider implementation.
    pub fn new(provider: impl WorldProvider) -> Self {
        Self(Box::new(provider))
    }

    /// Read access to the provider.
    #[inline]
    pub fn provider(&self) -> &dyn WorldProvider {
        self.0.as_ref()
    }

    /// Mutating access to the provider.
    #[inline]
    pub fn provider_mut(&mut self) -> &mut dyn WorldProvider {
        self.0.as_mut()
    }
}
