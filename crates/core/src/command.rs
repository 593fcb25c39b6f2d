// SPDX-License-Identifier: MIT

//!
//! The command vocabulary understood by the scene engine
//!

use crate::{Colour, Handle, Layer};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_link_percent() -> f64 {
    0.25
}

fn default_one() -> usize {
    1
}

fn default_alpha() -> f64 {
    1.0
}

/// A single drawing command.
///
/// Every command maps onto exactly one scene engine operation.  Commands are
/// (de)serialised tagged by their name, e.g.
///
/// ```json
/// { "command": "CreateCircle", "handle": 3, "label": "A", "x": 10, "y": 20 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum Command {
    CreateCircle {
        handle: Handle,
        #[serde(default)]
        label: String,
        x: f64,
        y: f64,
    },
    CreateRectangle {
        handle: Handle,
        #[serde(default)]
        label: String,
        width: f64,
        height: f64,
        x: f64,
        y: f64,
    },
    CreateLabel {
        handle: Handle,
        label: String,
        x: f64,
        y: f64,
        /// Whether (x, y) is the centre of the text rather than its top left
        #[serde(default = "default_true")]
        centered: bool,
    },
    CreateHighlightCircle {
        handle: Handle,
        colour: Colour,
        x: f64,
        y: f64,
        #[serde(default)]
        radius: Option<f64>,
    },
    CreateLinkedList {
        handle: Handle,
        #[serde(default)]
        label: String,
        width: f64,
        height: f64,
        x: f64,
        y: f64,
        /// The fraction of the node taken up by the pointer slot
        #[serde(default = "default_link_percent")]
        link_percent: f64,
        #[serde(default)]
        vertical: bool,
        /// Whether the pointer slot is at the right (or bottom) of the node
        #[serde(default)]
        link_at_end: bool,
        #[serde(default = "default_one")]
        num_labels: usize,
    },
    CreateBTreeNode {
        handle: Handle,
        width_per_element: f64,
        height: f64,
        num_elements: usize,
        x: f64,
        y: f64,
        #[serde(default)]
        background: Option<Colour>,
        #[serde(default)]
        foreground: Option<Colour>,
    },
    Delete {
        handle: Handle,
    },
    Move {
        handle: Handle,
        x: f64,
        y: f64,
    },
    SetPosition {
        handle: Handle,
        x: f64,
        y: f64,
    },
    SetText {
        handle: Handle,
        text: String,
        #[serde(default)]
        index: usize,
    },
    SetHeight {
        handle: Handle,
        height: f64,
    },
    SetWidth {
        handle: Handle,
        width: f64,
    },
    SetAlpha {
        handle: Handle,
        alpha: f64,
    },
    SetHighlight {
        handle: Handle,
        highlight: bool,
    },
    SetHighlightIndex {
        handle: Handle,
        #[serde(default)]
        index: Option<usize>,
    },
    SetForegroundColour {
        handle: Handle,
        colour: Colour,
    },
    SetBackgroundColour {
        handle: Handle,
        colour: Colour,
    },
    SetTextColour {
        handle: Handle,
        colour: Colour,
        #[serde(default)]
        index: usize,
    },
    SetNull {
        handle: Handle,
        null: bool,
    },
    SetAlwaysOnTop {
        handle: Handle,
        always_on_top: bool,
    },
    SetNumElements {
        handle: Handle,
        num_elements: usize,
    },
    SetLayer {
        handle: Handle,
        layer: Layer,
    },
    Connect {
        from: Handle,
        to: Handle,
        #[serde(default)]
        colour: Colour,
        #[serde(default)]
        curve: f64,
        #[serde(default = "default_true")]
        directed: bool,
        #[serde(default)]
        label: String,
        #[serde(default)]
        connection_point: Option<usize>,
    },
    Disconnect {
        from: Handle,
        to: Handle,
    },
    SetEdgeColour {
        from: Handle,
        to: Handle,
        colour: Colour,
    },
    SetEdgeAlpha {
        from: Handle,
        to: Handle,
        #[serde(default = "default_alpha")]
        alpha: f64,
    },
    SetEdgeHighlight {
        from: Handle,
        to: Handle,
        highlight: bool,
    },
    AlignLeft {
        handle: Handle,
        relative_to: Handle,
    },
    AlignRight {
        handle: Handle,
        relative_to: Handle,
    },
    AlignTop {
        handle: Handle,
        relative_to: Handle,
    },
    AlignBottom {
        handle: Handle,
        relative_to: Handle,
    },
    Step,
}

impl Command {
    /// The name of the command (as used in its serialised form)
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateCircle { .. } => "CreateCircle",
            Command::CreateRectangle { .. } => "CreateRectangle",
            Command::CreateLabel { .. } => "CreateLabel",
            Command::CreateHighlightCircle { .. } => "CreateHighlightCircle",
            Command::CreateLinkedList { .. } => "CreateLinkedList",
            Command::CreateBTreeNode { .. } => "CreateBTreeNode",
            Command::Delete { .. } => "Delete",
            Command::Move { .. } => "Move",
            Command::SetPosition { .. } => "SetPosition",
            Command::SetText { .. } => "SetText",
            Command::SetHeight { .. } => "SetHeight",
            Command::SetWidth { .. } => "SetWidth",
            Command::SetAlpha { .. } => "SetAlpha",
            Command::SetHighlight { .. } => "SetHighlight",
            Command::SetHighlightIndex { .. } => "SetHighlightIndex",
            Command::SetForegroundColour { .. } => "SetForegroundColour",
            Command::SetBackgroundColour { .. } => "SetBackgroundColour",
            Command::SetTextColour { .. } => "SetTextColour",
            Command::SetNull { .. } => "SetNull",
            Command::SetAlwaysOnTop { .. } => "SetAlwaysOnTop",
            Command::SetNumElements { .. } => "SetNumElements",
            Command::SetLayer { .. } => "SetLayer",
            Command::Connect { .. } => "Connect",
            Command::Disconnect { .. } => "Disconnect",
            Command::SetEdgeColour { .. } => "SetEdgeColour",
            Command::SetEdgeAlpha { .. } => "SetEdgeAlpha",
            Command::SetEdgeHighlight { .. } => "SetEdgeHighlight",
            Command::AlignLeft { .. } => "AlignLeft",
            Command::AlignRight { .. } => "AlignRight",
            Command::AlignTop { .. } => "AlignTop",
            Command::AlignBottom { .. } => "AlignBottom",
            Command::Step => "Step",
        }
    }

    /// Whether this command marks the end of a batch
    pub fn is_step(&self) -> bool {
        matches!(self, Command::Step)
    }
}
