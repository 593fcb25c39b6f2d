// SPDX-License-Identifier: MIT

//!
//! What applying a command did
//!

use crate::{EdgeUndo, Mutation, Position, SceneObject};
use algoscene_core::{Colour, Handle};
use serde::Serialize;

/// An object taken out of the scene along with the edges that went with it.
/// Hand it to [`crate::Engine::restore`] to put both back
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemovedObject {
    pub handle: Handle,
    pub object: SceneObject,

    /// In the order they were removed (outgoing first, then incoming)
    pub edges: Vec<EdgeUndo>,
}

/// The result of a successfully applied command, carrying whatever an undo
/// would need
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Effect {
    Created(Handle),
    Removed(RemovedObject),
    Mutated(Mutation),
    Connected,

    /// One descriptor per removed edge (empty if nothing matched)
    Disconnected(Vec<EdgeUndo>),

    PreviousColour(Option<Colour>),
    PreviousAlpha(Option<f64>),
    PreviousHighlight(Option<bool>),

    /// An alignment moved an object away from `from`
    Moved {
        handle: Handle,
        from: Position,
    },

    StepBoundary,
}
