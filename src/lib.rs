//! An embeddable developer console for module-based game worlds.
//!
//! The console lets an operator introspect and mutate live engine state
//! from a line-oriented command interface, without leaving the running
//! session:
//!
//! - **CommandRegistry**: Fixed table of named commands with usage text
//! - **ArgumentCache**: Refreshable completion lists tracking the live world
//! - **Dispatch pipeline**: Raw input lines to typed engine operations,
//!   tolerant of malformed input, never able to crash the host
//! - **WorldProvider**: The trait boundary to the engine/game layer
//!
//! The widget layer, the raw input source and the world object model stay
//! outside this crate; they talk to the core through messages and the
//! [`GameWorld`] resource.
//!
//! # Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_world_console::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .insert_resource(GameWorld::new(MyEngineBridge::default()))
//!         .add_plugins(WorldConsolePlugin)
//!         .run();
//! }
//!
//! fn submit_line(mut events: MessageWriter<ConsoleInputEvent>) {
//!     events.write(ConsoleInputEvent::new("loadmodule j01_town"));
//! }
//! ```

use bevy::prelude::*;

pub mod core;

pub use core::{
    ArgumentCache, ArgumentSource, CommandHandler, CommandHandlers, CommandLine, CommandMeta,
    CommandRegistry, Console, ConsoleCommand, ConsoleEventsPlugin, ConsoleInputEvent,
    ConsoleOutputEvent, ConsoleOutputLevel, ConsoleToggleEvent, ConsoleVisibility,
    ContextChangedEvent, GameWorld, Trie, Trigger, WorldError, WorldProvider, parse,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::core::{
        ArgumentCache, CommandLine, CommandRegistry, Console, ConsoleCommand, ConsoleInputEvent,
        ConsoleOutputEvent, ConsoleOutputLevel, ConsoleToggleEvent, ConsoleVisibility,
        ContextChangedEvent, GameWorld, Trigger, WorldError, WorldProvider, parse,
    };
    pub use crate::{WorldConsolePlugin, console_print, mark_context_changed, register_command};
}

/// Main console plugin.
///
/// Insert a [`GameWorld`] resource before this plugin runs; the built-in
/// commands and the cache-refresh system query it.
#[derive(Default)]
pub struct WorldConsolePlugin;

impl Plugin for WorldConsolePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CommandRegistry>()
            .init_resource::<CommandHandlers>()
            .init_resource::<ArgumentCache>()
            .init_resource::<ConsoleVisibility>()
            .init_resource::<PendingCommands>()
            .add_plugins(core::ConsoleEventsPlugin);

        // The command set is fixed at construction time.
        app.add_systems(Startup, register_builtin_commands);

        // Dispatch pipeline, one pass per frame:
        // 1. parse_console_input: read input lines, parse, queue
        // 2. execute_pending_commands: run handlers with exclusive World access
        // 3. send_pending_outputs: emit output and context-change messages
        // 4. refresh_caches_on_context_change: rebuild completion lists
        // 5. notify_visibility_changes: emit show/hide transitions
        app.add_systems(
            Update,
            (
                parse_console_input,
                execute_pending_commands,
                send_pending_outputs,
                refresh_caches_on_context_change,
                notify_visibility_changes,
            )
                .chain(),
        );
    }
}

/// Register a command in the registry, handler table and argument cache.
///
/// Call this from a `Startup` system to extend the built-in command set.
///
/// # Panics
///
/// Panics if the name is already registered.
pub fn register_command(
    registry: &mut CommandRegistry,
    handlers: &mut CommandHandlers,
    cache: &mut ArgumentCache,
    cmd: ConsoleCommand,
) {
    let (meta, handler, arguments) = cmd.split();
    let name = meta.name.clone();

    registry.register(meta);
    handlers.register(name.clone(), handler);
    if let Some(source) = arguments {
        cache.register(name, source);
    }
}

/// Queue a line of console output from inside a command handler.
pub fn console_print(world: &mut World, event: ConsoleOutputEvent) {
    world.resource_mut::<PendingCommands>().outputs.push(event);
}

/// Flag that the current command changed cache-relevant world state.
///
/// A [`ContextChangedEvent`] is emitted once dispatch finishes, which
/// rebuilds all argument caches.
pub fn mark_context_changed(world: &mut World) {
    world.resource_mut::<PendingCommands>().context_changed = true;
}

/// Print a command's registered usage text (missing-argument diagnostics).
fn print_usage(world: &mut World, name: &str) {
    let usage = world
        .resource::<CommandRegistry>()
        .usage(name)
        .unwrap_or_default();
    console_print(world, ConsoleOutputEvent::warn(usage));
}

/// Register the fixed built-in command set.
fn register_builtin_commands(
    mut registry: ResMut<CommandRegistry>,
    mut handlers: ResMut<CommandHandlers>,
    mut cache: ResMut<ArgumentCache>,
) {
    // help - Show usage for a command, or list all commands
    register_command(
        &mut registry,
        &mut handlers,
        &mut cache,
        ConsoleCommand::new("help", |cl, world| {
            if cl.has_args() {
                match world.resource::<CommandRegistry>().usage(&cl.args) {
                    Some(usage) => console_print(world, ConsoleOutputEvent::result(usage)),
                    None => console_print(
                        world,
                        ConsoleOutputEvent::error(format!("Unknown command \"{}\"", cl.args)),
                    ),
                }
            } else {
                let names: Vec<String> = world
                    .resource::<CommandRegistry>()
                    .names()
                    .map(str::to_string)
                    .collect();
                for name in names {
                    console_print(world, ConsoleOutputEvent::result(name));
                }
            }
        })
        .usage("Usage: help [command]\nShow usage for a command, or list all commands"),
    );

    // listmodules - List all modules
    register_command(
        &mut registry,
        &mut handlers,
        &mut cache,
        ConsoleCommand::new("listmodules", |_cl, world| {
            let modules = world.resource::<GameWorld>().provider().list_modules();

            // Listing already paid for the provider scan; fold the result
            // into the completion cache while it is fresh.
            world.resource_scope(|world, mut cache: Mut<ArgumentCache>| {
                let game = world.resource::<GameWorld>();
                cache.refresh("loadmodule", game.provider());
            });

            for module in modules {
                console_print(world, ConsoleOutputEvent::result(module));
            }
        })
        .usage("Usage: listmodules\nList all modules"),
    );

    // loadmodule - Load and enter the specified module
    register_command(
        &mut registry,
        &mut handlers,
        &mut cache,
        ConsoleCommand::new("loadmodule", |cl, world| {
            if !cl.has_args() {
                print_usage(world, &cl.name);
                return;
            }

            // Validation asks the authoritative provider, not the advisory
            // cache. Module names match case-insensitively; the literal
            // user-typed casing is what gets loaded.
            let known = world.resource::<GameWorld>().provider().list_modules();
            if !core::contains_ignore_case(known.iter().map(String::as_str), &cl.args) {
                console_print(
                    world,
                    ConsoleOutputEvent::error(format!("No such module \"{}\"", cl.args)),
                );
                return;
            }

            let result = world
                .resource_mut::<GameWorld>()
                .provider_mut()
                .load_module(&cl.args);

            match result {
                Ok(()) => {
                    world.resource_mut::<ConsoleVisibility>().hide();
                    mark_context_changed(world);
                }
                Err(err) => {
                    console_print(world, ConsoleOutputEvent::error(err.to_string()));
                }
            }
        })
        .usage("Usage: loadmodule <module>\nLoad and enter the specified module")
        .arguments(|provider| provider.list_modules()),
    );

    // getmodule - Returns the name of the currently loaded module
    register_command(
        &mut registry,
        &mut handlers,
        &mut cache,
        ConsoleCommand::new("getmodule", |_cl, world| {
            match world.resource::<GameWorld>().provider().current_module() {
                Some(name) => console_print(world, ConsoleOutputEvent::result(name)),
                None => console_print(world, ConsoleOutputEvent::info("No module loaded")),
            }
        })
        .usage("Usage: getmodule\nReturns the name of the currently loaded module"),
    );

    // exitmodule - Exit the module, returning to the main menu
    register_command(
        &mut registry,
        &mut handlers,
        &mut cache,
        ConsoleCommand::new("exitmodule", |_cl, world| {
            world.resource_mut::<ConsoleVisibility>().hide();
            world.resource_mut::<GameWorld>().provider_mut().exit_module();
            mark_context_changed(world);
        })
        .usage("Usage: exitmodule\nExit the module, returning to the main menu"),
    );

    // listtriggers - List all triggers in this area
    register_command(
        &mut registry,
        &mut handlers,
        &mut cache,
        ConsoleCommand::new("listtriggers", |_cl, world| {
            let triggers = world.resource::<GameWorld>().provider().area_triggers();
            for trigger in triggers {
                console_print(world, ConsoleOutputEvent::result(trigger.transition_text));
            }
        })
        .usage("Usage: listtriggers\nList all triggers in this area"),
    );

    // gettrigger - Show the transition text of the specified trigger
    register_command(
        &mut registry,
        &mut handlers,
        &mut cache,
        ConsoleCommand::new("gettrigger", |cl, world| {
            if !cl.has_args() {
                print_usage(world, &cl.name);
                return;
            }

            let triggers = world.resource::<GameWorld>().provider().area_triggers();
            match triggers
                .into_iter()
                .find(|t| core::eq_ignore_case(&t.tag, &cl.args))
            {
                Some(trigger) => console_print(
                    world,
                    ConsoleOutputEvent::result(format!(
                        "{}: {}",
                        trigger.tag, trigger.transition_text
                    )),
                ),
                None => console_print(
                    world,
                    ConsoleOutputEvent::error(format!("No such trigger \"{}\"", cl.args)),
                ),
            }
        })
        .usage("Usage: gettrigger <trigger>\nShow the transition text of the specified trigger")
        .arguments(|provider| {
            provider
                .area_triggers()
                .into_iter()
                .map(|t| t.tag)
                .collect()
        }),
    );
}

/// Resource that holds queued command lines and their pending output.
#[derive(Resource, Default)]
struct PendingCommands {
    queue: Vec<CommandLine>,
    outputs: Vec<ConsoleOutputEvent>,
    context_changed: bool,
}

/// System that parses submitted input lines and queues them for dispatch.
fn parse_console_input(
    mut input_events: MessageReader<ConsoleInputEvent>,
    mut pending: ResMut<PendingCommands>,
) {
    for event in input_events.read() {
        let cl = parse(&event.line);

        // Blank input is a no-op, not an error.
        if cl.is_empty() {
            continue;
        }

        pending
            .outputs
            .push(ConsoleOutputEvent::command(format!("$ {}", cl.raw.trim())));
        pending.queue.push(cl);
    }
}

/// Exclusive system that dispatches queued command lines.
///
/// A handler failure of any kind, including a panic, becomes a printed
/// diagnostic; the console must never take down the process it is
/// debugging.
fn execute_pending_commands(world: &mut World) {
    let queue = std::mem::take(&mut world.resource_mut::<PendingCommands>().queue);
    if queue.is_empty() {
        return;
    }

    for cl in queue {
        if !world.resource::<CommandRegistry>().contains(&cl.name) {
            console_print(
                world,
                ConsoleOutputEvent::error(format!("Unknown command \"{}\"", cl.name)),
            );
            continue;
        }

        // Take the handler out so it can access the World (including the
        // handler table itself) without borrow conflicts; always put it
        // back, panic or not.
        let panic_msg = world.resource_scope(|world, mut handlers: Mut<CommandHandlers>| {
            let Some(handler) = handlers.take(&cl.name) else {
                return None;
            };

            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler(&cl, world);
            }));

            handlers.put(&cl.name, handler);

            result.err().map(|panic_info| {
                if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "unknown panic".to_string()
                }
            })
        });

        if let Some(msg) = panic_msg {
            error!("Console command \"{}\" panicked: {}", cl.name, msg);
            console_print(
                world,
                ConsoleOutputEvent::error(format!("Command \"{}\" panicked: {}", cl.name, msg)),
            );
        }
    }
}

/// System that emits queued output and context-change messages.
fn send_pending_outputs(
    mut pending: ResMut<PendingCommands>,
    mut output_events: MessageWriter<ConsoleOutputEvent>,
    mut context_events: MessageWriter<ContextChangedEvent>,
) {
    for output in pending.outputs.drain(..) {
        output_events.write(output);
    }

    if pending.context_changed {
        pending.context_changed = false;
        context_events.write(ContextChangedEvent);
    }
}

/// System that rebuilds all argument caches when world context changes.
///
/// The world-state owner (or a context-changing command) writes
/// [`ContextChangedEvent`]; any number of notifications in one frame
/// collapse into a single refresh.
fn refresh_caches_on_context_change(
    mut context_events: MessageReader<ContextChangedEvent>,
    mut cache: ResMut<ArgumentCache>,
    game: Option<Res<GameWorld>>,
) {
    if context_events.is_empty() {
        return;
    }
    context_events.clear();

    match game {
        Some(game) => cache.refresh_all(game.provider()),
        None => warn!("Console: no GameWorld resource, argument caches not refreshed"),
    }
}

/// System that emits a toggle message on every visibility transition.
fn notify_visibility_changes(
    visibility: Res<ConsoleVisibility>,
    mut last_open: Local<Option<bool>>,
    mut toggle_events: MessageWriter<ConsoleToggleEvent>,
) {
    let open = visibility.is_open();

    if *last_open == Some(open) {
        return;
    }

    // The initial state is not a transition.
    if last_open.is_some() {
        toggle_events.write(if open {
            ConsoleToggleEvent::shown()
        } else {
            ConsoleToggleEvent::hidden()
        });
    }

    *last_open = Some(open);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::sync::{Arc, Mutex};

    /// Scriptable world provider that records every mutating call.
    #[derive(Default)]
    struct FakeWorldState {
        modules: Vec<String>,
        current: Option<String>,
        triggers: Vec<Trigger>,
        loads: Vec<String>,
        exits: usize,
        fail_loads: bool,
    }

    #[derive(Clone, Default)]
    struct FakeWorld(Arc<Mutex<FakeWorldState>>);

    impl FakeWorld {
        fn with_modules(modules: &[&str]) -> Self {
            let fake = Self::default();
            fake.0.lock().unwrap().modules = modules.iter().map(|s| s.to_string()).collect();
            fake
        }

        fn loads(&self) -> Vec<String> {
            self.0.lock().unwrap().loads.clone()
        }

        fn exits(&self) -> usize {
            self.0.lock().unwrap().exits
        }
    }

    impl WorldProvider for FakeWorld {
        fn list_modules(&self) -> Vec<String> {
            self.0.lock().unwrap().modules.clone()
        }

        fn current_module(&self) -> Option<String> {
            self.0.lock().unwrap().current.clone()
        }

        fn load_module(&mut self, name: &str) -> Result<(), WorldError> {
            let mut state = self.0.lock().unwrap();
            if state.fail_loads {
                return Err(WorldError::LoadFailed {
                    module: name.to_string(),
                    reason: "disk on fire".into(),
                });
            }
            state.loads.push(name.to_string());
            state.current = Some(name.to_string());
            Ok(())
        }

        fn exit_module(&mut self) {
            let mut state = self.0.lock().unwrap();
            state.exits += 1;
            state.current = None;
        }

        fn area_triggers(&self) -> Vec<Trigger> {
            self.0.lock().unwrap().triggers.clone()
        }
    }

    /// Captures messages the out-of-scope collaborators would consume.
    #[derive(Resource, Clone, Default)]
    struct Captured {
        outputs: Arc<Mutex<Vec<ConsoleOutputEvent>>>,
        toggles: Arc<Mutex<Vec<bool>>>,
    }

    impl Captured {
        fn lines(&self, level: ConsoleOutputLevel) -> Vec<String> {
            self.outputs
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.level == level)
                .map(|e| e.message.clone())
                .collect()
        }

        fn all_lines(&self) -> Vec<String> {
            self.outputs
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.message.clone())
                .collect()
        }

        fn toggles(&self) -> Vec<bool> {
            self.toggles.lock().unwrap().clone()
        }
    }

    fn capture_messages(
        mut outputs: MessageReader<ConsoleOutputEvent>,
        mut toggles: MessageReader<ConsoleToggleEvent>,
        captured: Res<Captured>,
    ) {
        for event in outputs.read() {
            captured.outputs.lock().unwrap().push(event.clone());
        }
        for event in toggles.read() {
            captured.toggles.lock().unwrap().push(event.open);
        }
    }

    fn test_app(fake: FakeWorld) -> (App, Captured) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameWorld::new(fake));
        app.add_plugins(WorldConsolePlugin);

        let captured = Captured::default();
        app.insert_resource(captured.clone());
        app.add_systems(
            Update,
            capture_messages
                .after(send_pending_outputs)
                .after(notify_visibility_changes),
        );

        // Run Startup so the built-in commands exist.
        app.update();
        (app, captured)
    }

    fn submit(app: &mut App, line: &str) {
        app.world_mut().write_message(ConsoleInputEvent::new(line));
        app.update();
    }

    fn show_console(app: &mut App) {
        app.world_mut().resource_mut::<ConsoleVisibility>().show();
        app.update();
    }

    fn is_open(app: &App) -> bool {
        app.world().resource::<ConsoleVisibility>().is_open()
    }

    #[test]
    fn test_unknown_command_is_diagnosed_without_side_effects() {
        let fake = FakeWorld::with_modules(&["Intro"]);
        let (mut app, captured) = test_app(fake.clone());

        submit(&mut app, "nosuchcommand foo");

        assert_eq!(
            captured.lines(ConsoleOutputLevel::Error),
            vec!["Unknown command \"nosuchcommand\""]
        );
        assert!(fake.loads().is_empty());
        assert_eq!(fake.exits(), 0);
    }

    #[test]
    fn test_empty_input_is_a_noop() {
        let (mut app, captured) = test_app(FakeWorld::default());

        submit(&mut app, "");
        submit(&mut app, "   \t  ");

        assert!(captured.all_lines().is_empty());
    }

    #[test]
    fn test_dispatch_routes_by_exact_name() {
        let (mut app, _captured) = test_app(FakeWorld::default());

        #[derive(Resource, Default)]
        struct Tracker {
            count: usize,
            last_args: String,
        }
        app.init_resource::<Tracker>();

        {
            let world = app.world_mut();
            world.resource_scope(|world, mut registry: Mut<CommandRegistry>| {
                world.resource_scope(|world, mut handlers: Mut<CommandHandlers>| {
                    let mut cache = world.resource_mut::<ArgumentCache>();
                    register_command(
                        &mut registry,
                        &mut handlers,
                        &mut cache,
                        ConsoleCommand::new("poke", |cl, world| {
                            let mut tracker = world.resource_mut::<Tracker>();
                            tracker.count += 1;
                            tracker.last_args = cl.args.clone();
                        }),
                    );
                });
            });
        }

        submit(&mut app, "poke some trailing args");
        // Dispatch is case-sensitive; this one must miss.
        submit(&mut app, "Poke again");

        let tracker = app.world().resource::<Tracker>();
        assert_eq!(tracker.count, 1);
        assert_eq!(tracker.last_args, "some trailing args");
    }

    #[test]
    fn test_command_echo() {
        let (mut app, captured) = test_app(FakeWorld::default());

        submit(&mut app, "  getmodule  ");

        assert_eq!(
            captured.lines(ConsoleOutputLevel::Command),
            vec!["$ getmodule"]
        );
    }

    #[test]
    fn test_listmodules_prints_provider_order() {
        let fake = FakeWorld::with_modules(&["Intro", "Town", "Dungeon1"]);
        let (mut app, captured) = test_app(fake);

        submit(&mut app, "listmodules");

        assert_eq!(
            captured.lines(ConsoleOutputLevel::Result),
            vec!["Intro", "Town", "Dungeon1"]
        );

        // Listing also refreshed the loadmodule completion cache.
        let cache = app.world().resource::<ArgumentCache>();
        assert_eq!(cache.get("loadmodule"), ["Intro", "Town", "Dungeon1"]);
    }

    #[test]
    fn test_loadmodule_without_argument_prints_usage() {
        let fake = FakeWorld::with_modules(&["Intro"]);
        let (mut app, captured) = test_app(fake.clone());

        submit(&mut app, "loadmodule");

        let warnings = captured.lines(ConsoleOutputLevel::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Usage: loadmodule <module>"));
        assert!(fake.loads().is_empty());
    }

    #[test]
    fn test_loadmodule_unknown_module_is_rejected() {
        let fake = FakeWorld::with_modules(&["Intro", "Town"]);
        let (mut app, captured) = test_app(fake.clone());

        submit(&mut app, "loadmodule FooBar");

        assert_eq!(
            captured.lines(ConsoleOutputLevel::Error),
            vec!["No such module \"FooBar\""]
        );
        assert!(fake.loads().is_empty());
    }

    #[test]
    fn test_loadmodule_matches_case_insensitively_keeps_user_casing() {
        let fake = FakeWorld::with_modules(&["Foo"]);
        let (mut app, _captured) = test_app(fake.clone());
        show_console(&mut app);
        assert!(is_open(&app));

        submit(&mut app, "loadmodule foo");

        // The literal user-typed casing is passed through.
        assert_eq!(fake.loads(), vec!["foo"]);
        // A successful module change hides the console.
        assert!(!is_open(&app));
    }

    #[test]
    fn test_loadmodule_failure_leaves_visibility_unchanged() {
        let fake = FakeWorld::with_modules(&["Intro"]);
        fake.0.lock().unwrap().fail_loads = true;
        let (mut app, captured) = test_app(fake.clone());
        show_console(&mut app);

        submit(&mut app, "loadmodule Intro");

        assert_eq!(
            captured.lines(ConsoleOutputLevel::Error),
            vec!["failed to load module \"Intro\": disk on fire"]
        );
        // The user gets to retry without reopening the console.
        assert!(is_open(&app));
        assert!(fake.loads().is_empty());
    }

    #[test]
    fn test_loadmodule_success_refreshes_caches() {
        let fake = FakeWorld::with_modules(&["Foo", "Bar"]);
        let (mut app, _captured) = test_app(fake.clone());

        submit(&mut app, "loadmodule bar");

        let cache = app.world().resource::<ArgumentCache>();
        assert_eq!(cache.get("loadmodule"), ["Foo", "Bar"]);
    }

    #[test]
    fn test_exitmodule_hides_console_and_calls_collaborator() {
        let fake = FakeWorld::with_modules(&[]);
        let (mut app, _captured) = test_app(fake.clone());
        show_console(&mut app);

        submit(&mut app, "exitmodule");
        assert_eq!(fake.exits(), 1);
        assert!(!is_open(&app));

        // Hidden stays hidden; the collaborator is still called.
        submit(&mut app, "exitmodule");
        assert_eq!(fake.exits(), 2);
        assert!(!is_open(&app));
    }

    #[test]
    fn test_getmodule() {
        let fake = FakeWorld::with_modules(&["Town"]);
        let (mut app, captured) = test_app(fake.clone());

        submit(&mut app, "getmodule");
        assert_eq!(
            captured.lines(ConsoleOutputLevel::Info),
            vec!["No module loaded"]
        );

        submit(&mut app, "loadmodule Town");
        submit(&mut app, "getmodule");
        assert_eq!(captured.lines(ConsoleOutputLevel::Result), vec!["Town"]);
    }

    #[test]
    fn test_listtriggers_prints_transition_texts() {
        let fake = FakeWorld::default();
        fake.0.lock().unwrap().triggers = vec![
            Trigger::new("tr_door01", "To the teahouse"),
            Trigger::new("tr_door02", "To the market"),
        ];
        let (mut app, captured) = test_app(fake);

        submit(&mut app, "listtriggers");

        assert_eq!(
            captured.lines(ConsoleOutputLevel::Result),
            vec!["To the teahouse", "To the market"]
        );
    }

    #[test]
    fn test_gettrigger() {
        let fake = FakeWorld::default();
        fake.0.lock().unwrap().triggers = vec![Trigger::new("tr_door01", "To the teahouse")];
        let (mut app, captured) = test_app(fake);

        submit(&mut app, "gettrigger TR_DOOR01");
        assert_eq!(
            captured.lines(ConsoleOutputLevel::Result),
            vec!["tr_door01: To the teahouse"]
        );

        submit(&mut app, "gettrigger tr_ghost");
        assert_eq!(
            captured.lines(ConsoleOutputLevel::Error),
            vec!["No such trigger \"tr_ghost\""]
        );

        submit(&mut app, "gettrigger");
        let warnings = captured.lines(ConsoleOutputLevel::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Usage: gettrigger <trigger>"));
    }

    #[test]
    fn test_help_lists_commands_sorted() {
        let (mut app, captured) = test_app(FakeWorld::default());

        submit(&mut app, "help");

        assert_eq!(
            captured.lines(ConsoleOutputLevel::Result),
            vec![
                "exitmodule",
                "getmodule",
                "gettrigger",
                "help",
                "listmodules",
                "listtriggers",
                "loadmodule",
            ]
        );
    }

    #[test]
    fn test_help_prints_usage_for_command() {
        let (mut app, captured) = test_app(FakeWorld::default());

        submit(&mut app, "help loadmodule");
        let results = captured.lines(ConsoleOutputLevel::Result);
        assert_eq!(results.len(), 1);
        assert!(results[0].starts_with("Usage: loadmodule <module>"));

        submit(&mut app, "help nosuchcommand");
        assert_eq!(
            captured.lines(ConsoleOutputLevel::Error),
            vec!["Unknown command \"nosuchcommand\""]
        );
    }

    #[test]
    fn test_context_change_notification_refreshes_caches() {
        let fake = FakeWorld::with_modules(&["Intro", "Town", "Dungeon1"]);
        let (mut app, _captured) = test_app(fake.clone());

        // Never refreshed: advisory list starts empty.
        assert!(app.world().resource::<ArgumentCache>().get("loadmodule").is_empty());

        // The world-state owner announces a context change.
        app.world_mut().write_message(ContextChangedEvent);
        app.update();

        let cache = app.world().resource::<ArgumentCache>();
        assert_eq!(
            cache.get("loadmodule"),
            fake.list_modules().as_slice(),
        );
    }

    #[test]
    fn test_panicking_handler_is_contained() {
        let (mut app, captured) = test_app(FakeWorld::default());

        app.world_mut()
            .resource_scope(|world, mut registry: Mut<CommandRegistry>| {
                world.resource_scope(|world, mut handlers: Mut<CommandHandlers>| {
                    let mut cache = world.resource_mut::<ArgumentCache>();
                    register_command(
                        &mut registry,
                        &mut handlers,
                        &mut cache,
                        ConsoleCommand::new("explode", |_cl, _world| {
                            panic!("boom");
                        }),
                    );
                });
            });

        submit(&mut app, "explode");

        assert_eq!(
            captured.lines(ConsoleOutputLevel::Error),
            vec!["Command \"explode\" panicked: boom"]
        );

        // The handler went back into the table; dispatch still reaches it.
        submit(&mut app, "explode");
        assert_eq!(captured.lines(ConsoleOutputLevel::Error).len(), 2);
    }

    #[test]
    fn test_visibility_transitions_emit_toggle_events_once() {
        let (mut app, captured) = test_app(FakeWorld::with_modules(&[]));

        show_console(&mut app);
        assert_eq!(captured.toggles(), vec![true]);

        // exitmodule hides: one transition.
        submit(&mut app, "exitmodule");
        assert_eq!(captured.toggles(), vec![true, false]);

        // Hiding an already-hidden console is not a transition.
        submit(&mut app, "exitmodule");
        assert_eq!(captured.toggles(), vec![true, false]);
    }

    #[test]
    fn test_console_param_completion() {
        let fake = FakeWorld::with_modules(&["Town", "Temple", "Dungeon1"]);
        let (mut app, _captured) = test_app(fake);

        app.world_mut().write_message(ContextChangedEvent);
        app.update();

        let names = app
            .world_mut()
            .run_system_once(|console: Console| console.complete("li"))
            .unwrap();
        assert_eq!(names, vec!["listmodules", "listtriggers"]);

        let args = app
            .world_mut()
            .run_system_once(|console: Console| console.complete("loadmodule t"))
            .unwrap();
        assert_eq!(args, vec!["Town", "Temple"]);
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn test_duplicate_builtin_registration_panics() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameWorld::new(FakeWorld::default()));
        app.add_plugins(WorldConsolePlugin);

        app.add_systems(
            Startup,
            (|world: &mut World| {
                world.resource_scope(|world, mut registry: Mut<CommandRegistry>| {
                    world.resource_scope(|world, mut handlers: Mut<CommandHandlers>| {
                        let mut cache = world.resource_mut::<ArgumentCache>();
                        register_command(
                            &mut registry,
                            &mut handlers,
                            &mut cache,
                            ConsoleCommand::new("help", |_cl, _world| {}),
                        );
                    });
                });
            })
            .after(register_builtin_commands),
        );

        app.update();
    }
}
