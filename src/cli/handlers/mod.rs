// src/cli/handlers/mod.rs

/// The sample menu tree.
pub mod demo;
/// Showing and writing options.
pub mod options;
