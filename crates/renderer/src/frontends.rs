// SPDX-License-Identifier: MIT

//!
//! Frontends: the surfaces the engine's frames are painted onto
//!

pub mod desktop_egui;
pub mod html_canvas;
pub mod recorder;
