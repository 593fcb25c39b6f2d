// SPDX-License-Identifier: MIT

//!
//! Points and sizes
//!

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub type Size = Point;
pub type Position = Point;

#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// The vector from `self` to `other`
    pub fn to(self, other: Self) -> Self {
        Point {
            x: other.x - self.x,
            y: other.y - self.y,
        }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn midpoint(self, other: Self) -> Self {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    pub fn offset(self, x: f64, y: f64) -> Self {
        Point {
            x: self.x + x,
            y: self.y + y,
        }
    }
}
