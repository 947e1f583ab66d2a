//! Terminal User Interface module.
//!
//! This module provides the product listing page, including:
//! - Main event loop (`run`)
//! - Input handling for the sidebar, search box, sort control, grid and pager
//! - Rendering of the page at the current breakpoints
//! - Background fetch task event processing
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Page layout and draw dispatch
//! - `helpers` - Fetch task spawning and panic guard
//! - `sidebar` - Category list widget
//! - `toolbar` - Breadcrumb, search box and sort control
//! - `grid` - Product card grid
//! - `pager` - Pagination control
//! - `status` - Status bar widget
//! - `help` - Keybinding overlay

mod events;
mod grid;
mod help;
mod helpers;
mod input;
mod loop_runner;
mod pager;
mod render;
mod sidebar;
mod status;
mod toolbar;

// Re-export the public API
pub use loop_runner::{run, Action};
