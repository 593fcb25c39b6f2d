// SPDX-License-Identifier: MIT

//!
//! *Part of the wider AlgoScene project*
//!
//! This crate defines the basic datatypes shared across the AlgoScene project
//! (scene engine, frontends, replay tools).
//!
//! Algorithm modules talk to the scene engine exclusively through the
//! [`Command`] vocabulary defined here.  Objects are named by caller-chosen
//! [`Handle`]s and coloured with [`Colour`]s, both of which (de)serialise in
//! the same shape a browser-side caller would send them.
//!

mod colour;
mod command;
mod handle;
mod script;

pub use colour::*;
pub use command::*;
pub use handle::*;
pub use script::*;
