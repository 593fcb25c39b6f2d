// SPDX-License-Identifier: MIT

//!
//! Engine defaults
//!

/// The radius of a circle created without an explicit one
pub const DEFAULT_CIRCLE_RADIUS: f64 = 20.0;

/// The font size (px) used for object text
pub const DEFAULT_FONT_SIZE_PX: f64 = 12.0;

/// The frame index wraps at this value before the pulse is calculated
pub const PULSE_FRAME_MODULUS: u64 = 1000;

/// The thinnest a pulsing highlight gets
pub const PULSE_MIN_THICKNESS: f64 = 3.0;

/// How far (in px) a pulsing highlight grows beyond its minimum, plus one
pub const PULSE_RANGE: f64 = 5.0;

/// The number of frames spent on each pixel of pulse growth
pub const PULSE_FRAMES_PER_PX: f64 = 7.0;

/// The line width of an edge
pub const EDGE_THICKNESS: f64 = 1.0;

/// The size of an edge's arrow head
pub const ARROW_HEAD_SIZE: f64 = 8.0;

/// The line width of a highlight circle's ring
pub const HIGHLIGHT_CIRCLE_THICKNESS: f64 = 4.0;
