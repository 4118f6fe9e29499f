//! A desktop-style portfolio hosted in the terminal.
//!
//! Content sections live in floating windows that can be dragged, resized,
//! closed and sent to a dock. The window manager works in logical pixels;
//! [`viewport::Viewport`] maps terminal cells onto that space.

pub mod config;
pub mod constants;
pub mod content;
pub mod dock;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod host;
pub mod keybindings;
pub mod runner;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod viewport;
pub mod window;
