// SPDX-License-Identifier: MIT

//!
//! Primitives
//!

use crate::{ARROW_HEAD_SIZE, Bounds, Point, Shape};
use algoscene_core::{Colour, Handle};
use serde::Serialize;
use std::fmt::Debug;

/// Information needed to draw text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextOut {
    /// The centre of the text if `centred`, otherwise its top left
    pub position: Point,
    pub text: String,
    pub colour: Colour,
    pub font_size: f64,
    pub centred: bool,
}

/// Information needed to draw a pulsing highlight
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HighlightOut {
    pub thickness: f64,
    pub colour: Colour,
}

/// Information needed to draw an object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectOut {
    pub handle: Handle,
    pub shape: Shape,
    pub centre: Point,
    pub bounds: Bounds,
    pub foreground: Colour,
    pub background: Colour,
    pub alpha: f64,

    /// One per text field
    pub texts: Vec<TextOut>,

    /// The box of each text field (multi-field kinds only)
    pub slots: Vec<Bounds>,

    /// The pointer slot of a linked-list node
    pub link_slot: Option<Bounds>,

    /// The slot singled out by the object's highlight index
    pub highlighted_slot: Option<Bounds>,

    /// Present only when the object is highlighted
    pub highlight: Option<HighlightOut>,

    pub null_pointer: bool,
}

/// Information needed to draw an edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeOut {
    pub from: Handle,
    pub to: Handle,
    pub start: Point,
    pub end: Point,

    /// The control point of a curved (quadratic) edge
    pub control: Option<Point>,

    pub colour: Colour,
    pub alpha: f64,
    pub thickness: f64,
    pub directed: bool,
    pub label: Option<TextOut>,

    /// Present only when the edge is highlighted
    pub highlight: Option<HighlightOut>,
}

impl EdgeOut {
    /// The corners of the arrow head (tip first), if the edge is directed
    pub fn arrow_head(&self) -> Option<[Point; 3]> {
        if !self.directed {
            return None;
        }
        // Back along the edge's tangent at the tip
        let back = self.end.to(self.control.unwrap_or(self.start));
        let length = back.length();
        if length == 0.0 {
            return None;
        }
        let along = Point::new(
            back.x / length * ARROW_HEAD_SIZE,
            back.y / length * ARROW_HEAD_SIZE,
        );
        let across = Point::new(-along.y / 2.0, along.x / 2.0);
        Some([
            self.end,
            self.end.offset(along.x + across.x, along.y + across.y),
            self.end.offset(along.x - across.x, along.y - across.y),
        ])
    }
}

/// One thing to draw, in the order it is to be drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawItem {
    Object(ObjectOut),
    Edge(EdgeOut),
    Status(TextOut),
}

#[cfg(test)]
mod test {
    use super::*;

    fn edge(directed: bool, control: Option<Point>) -> EdgeOut {
        EdgeOut {
            from: Handle::new(1),
            to: Handle::new(2),
            start: Point::new(0.0, 0.0),
            end: Point::new(100.0, 0.0),
            control,
            colour: Colour::BLACK,
            alpha: 1.0,
            thickness: 1.0,
            directed,
            label: None,
            highlight: None,
        }
    }

    #[test]
    fn arrow_heads() {
        assert_eq!(edge(false, None).arrow_head(), None);
        assert_eq!(
            edge(true, None).arrow_head(),
            Some([
                Point::new(100.0, 0.0),
                Point::new(92.0, -4.0),
                Point::new(92.0, 4.0)
            ])
        );

        // A curved edge arrives along the line from its control point
        let [tip, left, right] = edge(true, Some(Point::new(100.0, -50.0)))
            .arrow_head()
            .unwrap();
        assert_eq!(tip, Point::new(100.0, 0.0));
        assert_eq!(left.y, -8.0);
        assert_eq!(right.y, -8.0);
    }
}
