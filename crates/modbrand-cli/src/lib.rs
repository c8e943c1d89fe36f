//! modbrand CLI Library
//!
//! Terminal dashboard for Mod Developer Branding submissions.
//! Provides both TUI (ratatui) and headless modes.

pub mod app;
#[cfg(test)]
mod fake_api;
pub mod headless;
pub mod runtime;
pub mod tui;
pub mod ui;
