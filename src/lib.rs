//! Media gallery viewer for a static directory listing.
//!
//! The core modules are host-independent; `web` binds them to the browser DOM
//! when built for `wasm32`.

pub mod config;
pub mod error;
pub mod gallery;
pub mod index;
pub mod keybinds;
pub mod listing;
pub mod logging;
pub mod media;

#[cfg(target_arch = "wasm32")]
mod web;
