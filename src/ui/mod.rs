//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library:
//! the wizard header, the form body for the active step, and the footer
//! with navigation controls and the latest log line.

type Frame<'a> = ratatui::Frame<'a>;

mod render;

pub use render::render;
