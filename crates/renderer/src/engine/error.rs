// SPDX-License-Identifier: MIT

//!
//! Errors and mutation results
//!

use algoscene_core::Handle;
use serde::Serialize;
use thiserror::Error;

/// Errors returned by strict engine operations.  These indicate a bug in the
/// caller's command sequencing and are never retried
#[derive(Debug, Error, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
pub enum SceneError {
    #[error("Handle {0} already denotes a live object")]
    DuplicateHandle(Handle),

    #[error("Handle {0} does not denote a live object")]
    UnknownHandle(Handle),
}

/// Why a tolerant mutation did nothing
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
pub enum IgnoreReason {
    /// No live object has the handle (e.g. it was removed by a later step
    /// and an older batch is being replayed)
    UnknownHandle,

    /// The object's kind doesn't have the attribute (e.g. the width of a
    /// label, which is measured)
    UnsupportedAttribute,

    /// The text field index is beyond the object's fields
    FieldOutOfRange,
}

/// The result of a tolerant mutation
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
pub enum Mutation {
    Applied,
    Ignored(IgnoreReason),
}

impl Mutation {
    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied)
    }
}
