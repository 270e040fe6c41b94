//! reply-pro library crate
//!
//! Exposes the generation client and UI state so the binary and tests can
//! drive them without a terminal.

pub mod app;
pub mod config;
pub mod reply;
pub mod ui;
pub mod util;

#[cfg(test)]
pub(crate) mod fixtures;
