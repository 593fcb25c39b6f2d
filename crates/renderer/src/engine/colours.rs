// SPDX-License-Identifier: MIT

//!
//! Colours
//!

use algoscene_core::Colour;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// The colours the engine uses when a command doesn't say otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneColours {
    /// Outlines and text of new objects
    pub foreground: Colour,

    /// Fill of new objects
    pub background: Colour,

    /// The pulsing ring drawn around highlighted objects and edges
    pub highlight: Colour,

    /// The status label
    pub status_text: Colour,

    /// What a frontend clears the surface to
    pub surface: Colour,
}

impl Default for SceneColours {
    fn default() -> Self {
        Self {
            foreground: Colour::BLACK,
            background: Colour::WHITE,
            highlight: Colour::RED,
            status_text: Colour::BLACK,
            surface: Colour::WHITE,
        }
    }
}
