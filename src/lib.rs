//! A nestable, runtime-editable text menu engine for terminal programs.
//!
//! Create a [`MenuSystem`], build menus with [`MenuSystem::create_menu`], bind
//! entries to closures and start the main menu:
//!
//! ```no_run
//! use juusmenu::MenuSystem;
//!
//! let system = MenuSystem::new();
//! let main = system.create_menu("Main");
//! main.add_entry("1", "Say hello", || println!("hello")).unwrap();
//! main.set_break_item("q", "Quit", || {});
//! system.start_main_menu().unwrap();
//! ```

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

/// Command line front end of the demo binary.
pub mod cli;
/// Default texts and fixed values.
pub mod constants;
/// Menus, validation and the input loop.
pub mod core;
/// Entries, actions and menu options.
pub mod models;
/// Navigation state shared by nested menus.
pub mod state;
/// Terminal and options file access.
pub mod system;

pub use crate::core::error::{ErrorKind, MenuError, MenuWarning};
pub use crate::core::menu::Menu;
pub use crate::core::system::MenuSystem;
pub use crate::models::{Action, Alignment, Entry, MenuOptions};
pub use crate::system::console::{Console, ScriptedConsole, StdConsole, Transcript};
