// SPDX-License-Identifier: MIT

//!
//! Object handles and layer numbers
//!

/// A layer number.  Objects tagged with the same layer are shown and hidden
/// together
pub type Layer = u32;

/// The handle of a scene object.
///
/// Handles are chosen by the caller (typically a counter kept per algorithm
/// module), never generated by the engine.  A handle names at most one live
/// object at a time, and may be reused once that object has been removed.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(derive_more::Display, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Handle(u32);

impl Handle {
    /// Create a handle from its raw value
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Handle {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
