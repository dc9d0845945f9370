// src/core/mod.rs

/// Trimming helpers.
pub mod commons;
/// The key registry of one menu.
pub mod entries;
/// Errors and warnings.
pub mod error;
/// Menu handles and their operations.
pub mod menu;
/// Text of the menu screen.
pub mod render;
/// The input loop.
pub mod runner;
/// The menu system context.
pub mod system;
/// Validation and finalization.
pub mod validation;
