//! Terminal product-listing browser.
//!
//! The crate is split the same way the binary is wired together:
//!
//! - [`catalog`] - product/category types, the shared cache and the HTTP client
//! - [`listing`] - pure filtering, sorting and pagination over the cached catalog
//! - [`layout`] - width breakpoints that decide what the page shows
//! - [`app`] - page state and the events background tasks send back
//! - [`ui`] - the terminal event loop and widgets

pub mod app;
pub mod catalog;
pub mod config;
pub mod keybindings;
pub mod layout;
pub mod listing;
pub mod theme;
pub mod ui;
pub mod util;
