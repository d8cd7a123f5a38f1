//! Event handling module.
//!
//! Contains the network event handler (server communication) and the
//! terminal event handler (keyboard input).

pub mod network;
pub mod terminal;
