// SPDX-License-Identifier: MIT

//!
//! Scene objects
//!

use crate::{Bounds, IgnoreReason, Mutation, Point, Position, SceneColours};
use algoscene_core::{Colour, Layer};
use serde::Serialize;
use std::fmt::Debug;

/// The kind of a [`SceneObject`] along with the geometry particular to that
/// kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Shape {
    Circle {
        radius: f64,
    },

    /// A ring drawn around something else to mark it
    HighlightCircle {
        radius: f64,
    },

    Rectangle {
        width: f64,
        height: f64,
    },

    /// Free text.  The width and height are measured from the text
    Label {
        centered: bool,
        width: f64,
        height: f64,
    },

    /// A linked-list node: data fields plus a pointer slot
    LinkedListNode {
        width: f64,
        height: f64,
        link_percent: f64,
        vertical: bool,
        link_at_end: bool,
    },

    /// A B-tree node: one slot per key
    BTreeNode {
        width_per_element: f64,
        height: f64,
    },
}

/// One text field of an object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextField {
    pub text: String,
    pub colour: Colour,
}

/// A drawable object and all of its visual state.  Owned by the engine; callers
/// only ever hold its handle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneObject {
    shape: Shape,

    /// The centre of the object (the top left for labels that aren't centred)
    position: Position,

    foreground: Colour,
    background: Colour,
    alpha: f64,

    highlighted: bool,

    /// Which field is singled out (for objects with several fields)
    highlight_index: Option<usize>,

    texts: Vec<TextField>,

    /// Draw the pointer slot crossed out
    null_pointer: bool,

    layer: Layer,

    /// Derived from the layer table, never set directly by callers
    visible: bool,

    always_on_top: bool,
}

impl SceneObject {
    /// Create an object with the default colours.  Highlight circles start
    /// always on top
    pub fn new(shape: Shape, position: Position, texts: Vec<String>, colours: &SceneColours) -> Self {
        let texts = match shape {
            Shape::HighlightCircle { .. } => Vec::new(),
            _ => texts
                .into_iter()
                .map(|text| TextField {
                    text,
                    colour: colours.foreground,
                })
                .collect(),
        };
        Self {
            shape,
            position,
            foreground: colours.foreground,
            background: colours.background,
            alpha: 1.0,
            highlighted: false,
            highlight_index: None,
            texts,
            null_pointer: false,
            layer: 0,
            visible: false,
            always_on_top: matches!(shape, Shape::HighlightCircle { .. }),
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn foreground(&self) -> Colour {
        self.foreground
    }

    pub fn background(&self) -> Colour {
        self.background
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn highlight_index(&self) -> Option<usize> {
        self.highlight_index
    }

    pub fn texts(&self) -> &[TextField] {
        &self.texts
    }

    /// The text of a field (if the object has that field)
    pub fn text(&self, index: usize) -> Option<&str> {
        self.texts.get(index).map(|field| field.text.as_str())
    }

    pub fn is_null(&self) -> bool {
        self.null_pointer
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_always_on_top(&self) -> bool {
        self.always_on_top
    }

    /// Whether the object is a label whose position is its top left
    fn is_top_left_anchored(&self) -> bool {
        matches!(self.shape, Shape::Label { centered: false, .. })
    }

    pub fn width(&self) -> f64 {
        match self.shape {
            Shape::Circle { radius } | Shape::HighlightCircle { radius } => 2.0 * radius,
            Shape::Rectangle { width, .. }
            | Shape::Label { width, .. }
            | Shape::LinkedListNode { width, .. } => width,
            Shape::BTreeNode {
                width_per_element, ..
            } => width_per_element * self.texts.len() as f64,
        }
    }

    pub fn height(&self) -> f64 {
        match self.shape {
            Shape::Circle { radius } | Shape::HighlightCircle { radius } => 2.0 * radius,
            Shape::Rectangle { height, .. }
            | Shape::Label { height, .. }
            | Shape::LinkedListNode { height, .. }
            | Shape::BTreeNode { height, .. } => height,
        }
    }

    pub fn centre(&self) -> Point {
        if self.is_top_left_anchored() {
            self.position.offset(self.width() / 2.0, self.height() / 2.0)
        } else {
            self.position
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::centred_on(self.centre(), self.width(), self.height())
    }

    /// The position the object would need for its centre to be at `centre`
    pub fn position_for_centre(&self, centre: Point) -> Position {
        if self.is_top_left_anchored() {
            centre.offset(-self.width() / 2.0, -self.height() / 2.0)
        } else {
            centre
        }
    }

    //--------------------------------------------------------------------------
    // Mutators (only reachable through the registries)
    //--------------------------------------------------------------------------

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(crate) fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub(crate) fn set_highlight(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub(crate) fn set_highlight_index(&mut self, index: Option<usize>) {
        self.highlight_index = index;
    }

    pub(crate) fn set_null(&mut self, null_pointer: bool) {
        self.null_pointer = null_pointer;
    }

    pub(crate) fn set_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_always_on_top(&mut self, always_on_top: bool) {
        self.always_on_top = always_on_top;
    }

    /// Also recolours every text field (text follows the outline colour until
    /// a field is recoloured on its own)
    pub(crate) fn set_foreground(&mut self, colour: Colour) {
        self.foreground = colour;
        for field in &mut self.texts {
            field.colour = colour;
        }
    }

    pub(crate) fn set_background(&mut self, colour: Colour) {
        self.background = colour;
    }

    pub(crate) fn set_colours(&mut self, foreground: Option<Colour>, background: Option<Colour>) {
        if let Some(foreground) = foreground {
            self.set_foreground(foreground);
        }
        if let Some(background) = background {
            self.set_background(background);
        }
    }

    pub(crate) fn set_text(&mut self, text: String, index: usize) -> Mutation {
        if matches!(self.shape, Shape::HighlightCircle { .. }) {
            return Mutation::Ignored(IgnoreReason::UnsupportedAttribute);
        }
        match self.texts.get_mut(index) {
            Some(field) => {
                field.text = text;
                Mutation::Applied
            }
            None => Mutation::Ignored(IgnoreReason::FieldOutOfRange),
        }
    }

    pub(crate) fn set_text_colour(&mut self, colour: Colour, index: usize) -> Mutation {
        if matches!(self.shape, Shape::HighlightCircle { .. }) {
            return Mutation::Ignored(IgnoreReason::UnsupportedAttribute);
        }
        match self.texts.get_mut(index) {
            Some(field) => {
                field.colour = colour;
                Mutation::Applied
            }
            None => Mutation::Ignored(IgnoreReason::FieldOutOfRange),
        }
    }

    pub(crate) fn set_width(&mut self, new_width: f64) -> Mutation {
        let element_count = self.texts.len().max(1) as f64;
        match &mut self.shape {
            Shape::Circle { radius } | Shape::HighlightCircle { radius } => *radius = new_width / 2.0,
            Shape::Rectangle { width, .. } | Shape::LinkedListNode { width, .. } => {
                *width = new_width
            }
            Shape::BTreeNode {
                width_per_element, ..
            } => *width_per_element = new_width / element_count,
            Shape::Label { .. } => return Mutation::Ignored(IgnoreReason::UnsupportedAttribute),
        }
        Mutation::Applied
    }

    pub(crate) fn set_height(&mut self, new_height: f64) -> Mutation {
        match &mut self.shape {
            Shape::Circle { radius } | Shape::HighlightCircle { radius } => {
                *radius = new_height / 2.0
            }
            Shape::Rectangle { height, .. }
            | Shape::LinkedListNode { height, .. }
            | Shape::BTreeNode { height, .. } => *height = new_height,
            Shape::Label { .. } => return Mutation::Ignored(IgnoreReason::UnsupportedAttribute),
        }
        Mutation::Applied
    }

    /// Resize a B-tree node's key slots, keeping the existing keys
    pub(crate) fn set_num_elements(&mut self, num_elements: usize) -> Mutation {
        if !matches!(self.shape, Shape::BTreeNode { .. }) {
            return Mutation::Ignored(IgnoreReason::UnsupportedAttribute);
        }
        let padding = TextField {
            text: String::new(),
            colour: self.foreground,
        };
        self.texts.resize(num_elements, padding);
        if self
            .highlight_index
            .is_some_and(|index| index >= num_elements)
        {
            self.highlight_index = None;
        }
        Mutation::Applied
    }

    /// Store the measured size of a label's text
    pub(crate) fn set_measured_size(&mut self, measured_width: f64, measured_height: f64) {
        if let Shape::Label { width, height, .. } = &mut self.shape {
            *width = measured_width;
            *height = measured_height;
        }
    }
}
