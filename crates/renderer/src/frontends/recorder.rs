// SPDX-License-Identifier: MIT

//!
//! A headless frontend that records what it is asked to draw.  Used by the
//! replay tool and by tests
//!

use crate::{DrawItem, EdgeOut, FrameSurface, ObjectOut, Size, TextOut};

/// The width of a character as a fraction of the font size
const MONOSPACE_WIDTH_RATIO: f64 = 0.6;

/// Measures text as if it were set in a monospace font.  For when there's no
/// real font to measure with
pub fn monospace_measure(font_size: f64, text: String) -> (f64, f64) {
    let width = text.chars().count() as f64 * font_size * MONOSPACE_WIDTH_RATIO;
    (width, font_size)
}

/// A surface that keeps every item drawn since it was last cleared
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    pub size: Size,

    /// How many times the surface has been cleared
    pub clears: usize,

    /// The items of the current frame in the order they were drawn
    pub items: Vec<DrawItem>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }
}

impl FrameSurface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.items.clear();
    }

    fn draw_object(&mut self, object: &ObjectOut) {
        self.items.push(DrawItem::Object(object.clone()));
    }

    fn draw_edge(&mut self, edge: &EdgeOut) {
        self.items.push(DrawItem::Edge(edge.clone()));
    }

    fn draw_status(&mut self, status: &TextOut) {
        self.items.push(DrawItem::Status(status.clone()));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Engine;
    use algoscene_core::{Command, Handle};

    #[test]
    fn monospace() {
        assert_eq!(monospace_measure(10.0, "abc".to_string()), (18.0, 10.0));
        assert_eq!(monospace_measure(10.0, String::new()), (0.0, 10.0));
    }

    #[test]
    fn each_render_replaces_the_last() {
        let mut engine = Engine::new(monospace_measure);
        engine
            .apply(Command::CreateCircle {
                handle: Handle::new(1),
                label: "A".to_string(),
                x: 10.0,
                y: 10.0,
            })
            .unwrap();
        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        engine.render_frame(0, &mut surface);
        engine.render_frame(1, &mut surface);
        assert_eq!(surface.clears, 2);
        assert_eq!(surface.items, engine.frame(1, surface.size));
    }
}
