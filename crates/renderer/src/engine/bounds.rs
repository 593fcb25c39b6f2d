// SPDX-License-Identifier: MIT

//!
//! Bounding boxes
//!

use crate::{Point, Position};
use serde::Serialize;
use std::fmt::Debug;

/// A box that specifies the location and size of something (e.g. the area
/// covered by a rectangle, or the box around a circle)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bounds {
    /// The smallest x/y values (boxes grow down and to the right from here)
    pub position: Position,

    /// The width of the box (from which the largest x value can be derived)
    pub width: f64,

    /// The height of the box (from which the largest y value can be derived)
    pub height: f64,
}

impl Bounds {
    /// Create the box of the given size centred on `centre`
    pub fn centred_on(centre: Point, width: f64, height: f64) -> Self {
        Bounds {
            position: centre.offset(-width / 2.0, -height / 2.0),
            width,
            height,
        }
    }

    /// Calculate the largest x value of the box
    pub fn max_x(&self) -> f64 {
        self.position.x + self.width
    }

    /// Calculate the largest y value of the box (i.e. how far the box grows
    /// downwards)
    pub fn max_y(&self) -> f64 {
        self.position.y + self.height
    }

    pub fn centre(&self) -> Point {
        self.position.offset(self.width / 2.0, self.height / 2.0)
    }

    /// Grow the box by `by` on every side
    pub fn expanded(&self, by: f64) -> Self {
        Bounds {
            position: self.position.offset(-by, -by),
            width: self.width + (2.0 * by),
            height: self.height + (2.0 * by),
        }
    }
}
