//! Terminal UI for Vignette.
//!
//! Renders one scenario at a time: the question, its lettered options, and
//! a modal outcome dialog, with a running list of committed decisions in a
//! sidebar. All story state lives in [`vignette_core::Session`]; this crate
//! only translates key presses into session calls and draws the result.

/// Application state and key handling.
pub mod app;
/// Terminal setup, teardown, and the event loop.
pub mod terminal;
/// Widget layout and rendering.
pub mod ui;
