//! Copy-to-clipboard buttons for code blocks.
//!
//! The core (`config`, `state`, `host`, `control`, `initialize`) is
//! platform-neutral. `web` binds it to the browser; `app`, `pages` and
//! `components` render the pages whose blocks get enhanced.

pub mod app;
pub mod catalog;
pub mod components;
pub mod config;
pub mod control;
pub mod host;
pub mod initialize;
pub mod pages;
pub mod state;

#[cfg(feature = "hydrate")]
pub mod web;

#[cfg(test)]
mod testing;

pub use control::{Activation, CopyControl};
pub use initialize::{Enhancement, initialize};

/// Browser entry point, run by the wasm-bindgen init call on the page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web::run_when_ready();
}
