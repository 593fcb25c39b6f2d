// SPDX-License-Identifier: MIT

//!
//! *Part of the wider AlgoScene project*
//!
//! This crate is the scene engine behind algorithm animations.  It can be
//! compiled for native use as well as to WASM for use in the browser (or any
//! other environment running WASM).
//!
//! The core of the crate is a platform independent engine responsible for:
//!
//! - Owning the objects and edges that make up a scene
//! - Applying the commands algorithm modules send it
//! - Deciding what is visible (layers)
//! - Working out what each frame looks like, in a fixed paint order
//!
//! The rest of the crate holds the frontends that paint those frames:
//!
//! - HTML Canvas for browser rendering
//! - `egui` for native desktop rendering
//! - A recorder for headless use (replaying scripts, tests)
//!
//! ## Usage
//!
//! To use in a native `egui` desktop application the crate can simply be
//! included like any other crate.
//!
//! To use in a browser one can use the following to compile to WASM:
//!
//! ```sh
//! wasm-pack build --target web
//! ```
//!

extern crate console_error_panic_hook;

pub mod engine;
pub mod frontends;

pub use engine::*;
pub use frontends::html_canvas::SceneHtmlCanvas;
