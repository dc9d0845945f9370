//! # System Interaction Layer
//!
//! Everything that touches the outside world: the terminal and the options
//! file. The core menu logic only sees these through narrow interfaces.
//!
//! ## Modules
//!
//! - **`console`**: The `Console` trait the runner reads input from and writes
//!   output to, with a stdin/stdout implementation and a scripted one that
//!   replays fixed input and records everything printed.
//! - **`aligner`**: Lays out the tab-separated entry rows of a menu in aligned
//!   columns, left or right.
//! - **`options_config`**: Loads and writes `options.toml`, the user's menu
//!   options file.

/// Column layout of menu rows.
pub mod aligner;
/// Terminal input and output.
pub mod console;
/// The options file.
pub mod options_config;
