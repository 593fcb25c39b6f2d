// SPDX-License-Identifier: MIT

//!
//! The `algoscene-renderer` engine
//!

mod align;
mod bounds;
mod colours;
mod config;
mod consts;
mod edges;
mod effect;
mod error;
mod frame;
mod geometry;
mod helpers;
mod layers;
mod object;
mod objects;
mod point;
mod primitives;

pub(crate) use edges::EdgeRegistry;
pub(crate) use helpers::*;
pub(crate) use layers::*;
pub(crate) use objects::*;

pub use bounds::*;
pub use colours::*;
pub use config::*;
pub use consts::*;
pub use edges::{Edge, EdgeId, EdgeStyle, EdgeUndo};
pub use effect::*;
pub use error::*;
pub use frame::*;
pub use object::*;
pub use point::*;
pub use primitives::*;

use algoscene_core::{Colour, Command, Handle, Layer};
use log::{debug, trace};

/// The function an engine uses to measure text.
///
/// It is passed the pixel font size and the string, and returns the width and
/// height of the text.
///
/// i.e. `function(font_size, text) -> (width, height)`
pub type MeasureTextFn = Box<dyn Fn(f64, String) -> (f64, f64)>;

/// The core `algoscene-renderer` engine.  This owns the scene (objects, edges,
/// and layers), applies commands to it, and works out what each frame looks
/// like.  It is common to all frontends (e.g. the desktop and HTML canvas
/// ones)
pub struct Engine {
    objects: ObjectRegistry,
    edges: EdgeRegistry,

    /// Which layers are shown
    layers: LayerTable,

    /// The function supplied to the engine that it can use to measure text
    /// (labels are sized by their text)
    measure_text_fn: MeasureTextFn,

    config: SceneConfig,

    /// The text of the status label
    status: String,
}

impl Engine {
    /// Create a new engine with the default config.  Pass in a function that
    /// the engine can call to measure text
    pub fn new<T>(measure_text_fn: T) -> Self
    where
        T: 'static + Fn(f64, String) -> (f64, f64),
    {
        Self::with_config(SceneConfig::default(), measure_text_fn)
    }

    /// Create a new engine with the given config
    pub fn with_config<T>(config: SceneConfig, measure_text_fn: T) -> Self
    where
        T: 'static + Fn(f64, String) -> (f64, f64),
    {
        Self {
            objects: ObjectRegistry::default(),
            edges: EdgeRegistry::default(),
            layers: LayerTable::with_active(&config.active_layers),
            measure_text_fn: Box::new(measure_text_fn),
            status: config.status.text.clone(),
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Set the text of the status label drawn at the bottom left
    pub fn set_status<S: Into<String>>(&mut self, text: S) {
        self.status = text.into();
    }

    //--------------------------------------------------------------------------
    // Dispatch
    //--------------------------------------------------------------------------

    /// Apply one command.  Errors come only from the strict operations
    /// (creation, deletion, connection, disconnection, and alignment) and leave
    /// the scene unchanged
    pub fn apply(&mut self, command: Command) -> Result<Effect, SceneError> {
        trace!("applying {}", command.name());
        let effect = match command {
            Command::CreateCircle { handle, label, x, y } => {
                let shape = Shape::Circle {
                    radius: self.config.circle_radius,
                };
                self.create(handle, shape, Point::new(x, y), vec![label])?
            }
            Command::CreateRectangle {
                handle,
                label,
                width,
                height,
                x,
                y,
            } => self.create(
                handle,
                Shape::Rectangle { width, height },
                Point::new(x, y),
                vec![label],
            )?,
            Command::CreateLabel {
                handle,
                label,
                x,
                y,
                centered,
            } => {
                let shape = Shape::Label {
                    centered,
                    width: 0.0,
                    height: 0.0,
                };
                self.create(handle, shape, Point::new(x, y), vec![label])?
            }
            Command::CreateHighlightCircle {
                handle,
                colour,
                x,
                y,
                radius,
            } => {
                let shape = Shape::HighlightCircle {
                    radius: radius.unwrap_or(self.config.circle_radius),
                };
                let mut object =
                    SceneObject::new(shape, Point::new(x, y), Vec::new(), &self.config.colours);
                object.set_foreground(colour);
                self.create_object(handle, object)?;
                Effect::Created(handle)
            }
            Command::CreateLinkedList {
                handle,
                label,
                width,
                height,
                x,
                y,
                link_percent,
                vertical,
                link_at_end,
                num_labels,
            } => {
                let mut texts = vec![String::new(); num_labels];
                if let Some(first) = texts.first_mut() {
                    *first = label;
                }
                let shape = Shape::LinkedListNode {
                    width,
                    height,
                    link_percent: link_percent.clamp(0.0, 1.0),
                    vertical,
                    link_at_end,
                };
                self.create(handle, shape, Point::new(x, y), texts)?
            }
            Command::CreateBTreeNode {
                handle,
                width_per_element,
                height,
                num_elements,
                x,
                y,
                background,
                foreground,
            } => {
                let shape = Shape::BTreeNode {
                    width_per_element,
                    height,
                };
                let mut object = SceneObject::new(
                    shape,
                    Point::new(x, y),
                    vec![String::new(); num_elements],
                    &self.config.colours,
                );
                object.set_colours(foreground, background);
                self.create_object(handle, object)?;
                Effect::Created(handle)
            }
            Command::Delete { handle } => Effect::Removed(self.remove_object(handle)?),
            Command::Move { handle, x, y } | Command::SetPosition { handle, x, y } => {
                Effect::Mutated(self.set_position(handle, Point::new(x, y)))
            }
            Command::SetText {
                handle,
                text,
                index,
            } => Effect::Mutated(self.set_text(handle, text, index)),
            Command::SetHeight { handle, height } => {
                Effect::Mutated(self.set_height(handle, height))
            }
            Command::SetWidth { handle, width } => Effect::Mutated(self.set_width(handle, width)),
            Command::SetAlpha { handle, alpha } => Effect::Mutated(self.set_alpha(handle, alpha)),
            Command::SetHighlight { handle, highlight } => {
                Effect::Mutated(self.set_highlight(handle, highlight))
            }
            Command::SetHighlightIndex { handle, index } => {
                Effect::Mutated(self.set_highlight_index(handle, index))
            }
            Command::SetForegroundColour { handle, colour } => {
                Effect::Mutated(self.set_foreground_colour(handle, colour))
            }
            Command::SetBackgroundColour { handle, colour } => {
                Effect::Mutated(self.set_background_colour(handle, colour))
            }
            Command::SetTextColour {
                handle,
                colour,
                index,
            } => Effect::Mutated(self.set_text_colour(handle, colour, index)),
            Command::SetNull { handle, null } => Effect::Mutated(self.set_null(handle, null)),
            Command::SetAlwaysOnTop {
                handle,
                always_on_top,
            } => Effect::Mutated(self.set_always_on_top(handle, always_on_top)),
            Command::SetNumElements {
                handle,
                num_elements,
            } => Effect::Mutated(self.set_num_elements(handle, num_elements)),
            Command::SetLayer { handle, layer } => Effect::Mutated(self.set_layer(handle, layer)),
            Command::Connect {
                from,
                to,
                colour,
                curve,
                directed,
                label,
                connection_point,
            } => {
                let style = EdgeStyle {
                    colour,
                    curve,
                    directed,
                    label,
                    connection_point,
                };
                self.connect(from, to, style)?;
                Effect::Connected
            }
            Command::Disconnect { from, to } => Effect::Disconnected(self.disconnect(from, to)?),
            Command::SetEdgeColour { from, to, colour } => {
                Effect::PreviousColour(self.set_edge_colour(from, to, colour))
            }
            Command::SetEdgeAlpha { from, to, alpha } => {
                Effect::PreviousAlpha(self.set_edge_alpha(from, to, alpha))
            }
            Command::SetEdgeHighlight {
                from,
                to,
                highlight,
            } => Effect::PreviousHighlight(self.set_edge_highlight(from, to, highlight)),
            Command::AlignLeft { handle, relative_to } => Effect::Moved {
                handle,
                from: self.align_left(handle, relative_to)?,
            },
            Command::AlignRight { handle, relative_to } => Effect::Moved {
                handle,
                from: self.align_right(handle, relative_to)?,
            },
            Command::AlignTop { handle, relative_to } => Effect::Moved {
                handle,
                from: self.align_top(handle, relative_to)?,
            },
            Command::AlignBottom { handle, relative_to } => Effect::Moved {
                handle,
                from: self.align_bottom(handle, relative_to)?,
            },
            Command::Step => Effect::StepBoundary,
        };
        Ok(effect)
    }

    /// Apply every command in order, stopping at the first error.  Returns the
    /// effects of the commands applied along with the index and error of the
    /// one that failed (if any)
    pub fn apply_all<I>(&mut self, commands: I) -> (Vec<Effect>, Option<(usize, SceneError)>)
    where
        I: IntoIterator<Item = Command>,
    {
        let mut effects = Vec::new();
        for (index, command) in commands.into_iter().enumerate() {
            match self.apply(command) {
                Ok(effect) => effects.push(effect),
                Err(error) => return (effects, Some((index, error))),
            }
        }
        (effects, None)
    }

    //--------------------------------------------------------------------------
    // Object lifecycle (strict)
    //--------------------------------------------------------------------------

    fn create(
        &mut self,
        handle: Handle,
        shape: Shape,
        position: Position,
        texts: Vec<String>,
    ) -> Result<Effect, SceneError> {
        let object = SceneObject::new(shape, position, texts, &self.config.colours);
        self.create_object(handle, object)?;
        Ok(Effect::Created(handle))
    }

    /// Add an object under `handle`.  Its visibility is set from its layer and
    /// labels are measured
    pub fn create_object(&mut self, handle: Handle, mut object: SceneObject) -> Result<(), SceneError> {
        object.set_visible(self.layers.is_active(object.layer()));
        measure_label(
            self.measure_text_fn.as_ref(),
            self.config.font_size_px,
            &mut object,
        );
        self.objects.create(handle, object)?;
        debug!("created {handle}");
        Ok(())
    }

    /// Remove an object along with every edge touching it
    pub fn remove_object(&mut self, handle: Handle) -> Result<RemovedObject, SceneError> {
        self.objects.get(handle)?;
        let edges = self.edges.delete_incident(handle);
        let object = self.objects.remove(handle)?;
        debug!("removed {handle} along with {} edges", edges.len());
        Ok(RemovedObject {
            handle,
            object,
            edges,
        })
    }

    /// Put back an object (and its edges) taken out by
    /// [`Engine::remove_object`].  Nothing changes if the handle has been
    /// reused or an edge's other endpoint has since gone
    pub fn restore(&mut self, removed: RemovedObject) -> Result<(), SceneError> {
        let RemovedObject {
            handle,
            object,
            edges,
        } = removed;
        if self.objects.contains(handle) {
            return Err(SceneError::DuplicateHandle(handle));
        }
        for edge in &edges {
            for end in [edge.from, edge.to] {
                if end != handle && !self.objects.contains(end) {
                    return Err(SceneError::UnknownHandle(end));
                }
            }
        }
        self.create_object(handle, object)?;
        for edge in edges {
            self.connect(edge.from, edge.to, edge.style)?;
        }
        Ok(())
    }

    //--------------------------------------------------------------------------
    // Queries (strict)
    //--------------------------------------------------------------------------

    pub fn object(&self, handle: Handle) -> Result<&SceneObject, SceneError> {
        self.objects.get(handle)
    }

    /// Live objects in handle order
    pub fn objects(&self) -> impl Iterator<Item = (Handle, &SceneObject)> {
        self.objects.iter()
    }

    pub fn position(&self, handle: Handle) -> Result<Position, SceneError> {
        Ok(self.objects.get(handle)?.position())
    }

    pub fn position_x(&self, handle: Handle) -> Result<f64, SceneError> {
        Ok(self.position(handle)?.x)
    }

    pub fn position_y(&self, handle: Handle) -> Result<f64, SceneError> {
        Ok(self.position(handle)?.y)
    }

    pub fn width(&self, handle: Handle) -> Result<f64, SceneError> {
        Ok(self.objects.get(handle)?.width())
    }

    pub fn height(&self, handle: Handle) -> Result<f64, SceneError> {
        Ok(self.objects.get(handle)?.height())
    }

    /// The text of a field (empty if the object has no such field)
    pub fn text(&self, handle: Handle, index: usize) -> Result<&str, SceneError> {
        Ok(self.objects.get(handle)?.text(index).unwrap_or_default())
    }

    pub fn is_visible(&self, handle: Handle) -> Result<bool, SceneError> {
        Ok(self.objects.get(handle)?.is_visible())
    }

    /// Every edge, ordered by source handle then by creation
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// The edges leaving `handle`, in the order they were made
    pub fn edges_from(&self, handle: Handle) -> impl Iterator<Item = &Edge> {
        self.edges
            .outgoing(handle)
            .iter()
            .filter_map(|id| self.edges.get(*id))
    }

    /// The edges arriving at `handle`, in the order they were made
    pub fn edges_to(&self, handle: Handle) -> impl Iterator<Item = &Edge> {
        self.edges
            .incoming(handle)
            .iter()
            .filter_map(|id| self.edges.get(*id))
    }

    /// Whether the (first) edge from `from` to `to` is visible, or `None` if
    /// there is no such edge
    pub fn edge_visible(&self, from: Handle, to: Handle) -> Option<bool> {
        self.edges
            .matching(from, to)
            .first()
            .and_then(|id| self.edges.get(*id))
            .map(Edge::is_visible)
    }

    //--------------------------------------------------------------------------
    // Object mutators (tolerant)
    //--------------------------------------------------------------------------

    pub fn set_position(&mut self, handle: Handle, position: Position) -> Mutation {
        self.objects
            .mutate(handle, |object| object.set_position(position))
    }

    pub fn set_alpha(&mut self, handle: Handle, alpha: f64) -> Mutation {
        self.objects.mutate(handle, |object| object.set_alpha(alpha))
    }

    pub fn set_highlight(&mut self, handle: Handle, highlighted: bool) -> Mutation {
        self.objects
            .mutate(handle, |object| object.set_highlight(highlighted))
    }

    pub fn set_highlight_index(&mut self, handle: Handle, index: Option<usize>) -> Mutation {
        self.objects
            .mutate(handle, |object| object.set_highlight_index(index))
    }

    /// Set a field's text.  Labels are re-measured
    pub fn set_text(&mut self, handle: Handle, text: String, index: usize) -> Mutation {
        let measure_text_fn = self.measure_text_fn.as_ref();
        let font_size = self.config.font_size_px;
        self.objects.try_mutate(handle, |object| {
            let result = object.set_text(text, index);
            if result.is_applied() {
                measure_label(measure_text_fn, font_size, object);
            }
            result
        })
    }

    /// Set the outline colour (text fields follow it)
    pub fn set_foreground_colour(&mut self, handle: Handle, colour: Colour) -> Mutation {
        self.objects
            .mutate(handle, |object| object.set_foreground(colour))
    }

    pub fn set_background_colour(&mut self, handle: Handle, colour: Colour) -> Mutation {
        self.objects
            .mutate(handle, |object| object.set_background(colour))
    }

    pub fn set_text_colour(&mut self, handle: Handle, colour: Colour, index: usize) -> Mutation {
        self.objects
            .try_mutate(handle, |object| object.set_text_colour(colour, index))
    }

    pub fn set_width(&mut self, handle: Handle, width: f64) -> Mutation {
        self.objects.try_mutate(handle, |object| object.set_width(width))
    }

    pub fn set_height(&mut self, handle: Handle, height: f64) -> Mutation {
        self.objects
            .try_mutate(handle, |object| object.set_height(height))
    }

    pub fn set_null(&mut self, handle: Handle, null_pointer: bool) -> Mutation {
        self.objects
            .mutate(handle, |object| object.set_null(null_pointer))
    }

    pub fn set_always_on_top(&mut self, handle: Handle, always_on_top: bool) -> Mutation {
        self.objects
            .mutate(handle, |object| object.set_always_on_top(always_on_top))
    }

    pub fn set_num_elements(&mut self, handle: Handle, num_elements: usize) -> Mutation {
        self.objects
            .try_mutate(handle, |object| object.set_num_elements(num_elements))
    }

    //--------------------------------------------------------------------------
    // Layers
    //--------------------------------------------------------------------------

    /// Move an object onto a layer.  Its visibility, and that of the edges
    /// touching it, follow straight away
    pub fn set_layer(&mut self, handle: Handle, layer: Layer) -> Mutation {
        let visible = self.layers.is_active(layer);
        let result = self.objects.mutate(handle, |object| {
            object.set_layer(layer);
            object.set_visible(visible);
        });
        if result.is_applied() {
            self.edges
                .refresh_incident_visibility(&self.objects, handle);
        }
        result
    }

    /// Show or hide one layer
    pub fn set_layer_active(&mut self, layer: Layer, active: bool) {
        debug!("layer {layer} active = {active}");
        self.layers.set(layer, active);
        self.refresh_visibility();
    }

    /// Show exactly the given layers
    pub fn set_active_layers(&mut self, layers: &[Layer]) {
        debug!("active layers = {layers:?}");
        self.layers.replace(layers);
        self.refresh_visibility();
    }

    /// The active layers in ascending order
    pub fn active_layers(&self) -> Vec<Layer> {
        self.layers.active_layers()
    }

    fn refresh_visibility(&mut self) {
        for object in self.objects.iter_mut() {
            object.set_visible(self.layers.is_active(object.layer()));
        }
        self.edges.refresh_visibility(&self.objects);
    }

    //--------------------------------------------------------------------------
    // Edges
    //--------------------------------------------------------------------------

    /// Connect two live objects.  Parallel edges are allowed
    pub fn connect(&mut self, from: Handle, to: Handle, style: EdgeStyle) -> Result<(), SceneError> {
        self.edges.connect(&self.objects, from, to, style)?;
        debug!("connected {from} -> {to}");
        Ok(())
    }

    /// Remove every edge from `from` to `to`, returning what's needed to put
    /// them back
    pub fn disconnect(&mut self, from: Handle, to: Handle) -> Result<Vec<EdgeUndo>, SceneError> {
        let removed = self.edges.disconnect(&self.objects, from, to)?;
        debug!("disconnected {from} -> {to} ({} edges)", removed.len());
        Ok(removed)
    }

    pub fn set_edge_colour(&mut self, from: Handle, to: Handle, colour: Colour) -> Option<Colour> {
        self.edges.set_colour(from, to, colour)
    }

    pub fn set_edge_alpha(&mut self, from: Handle, to: Handle, alpha: f64) -> Option<f64> {
        self.edges.set_alpha(from, to, alpha)
    }

    pub fn set_edge_highlight(&mut self, from: Handle, to: Handle, highlighted: bool) -> Option<bool> {
        self.edges.set_highlight(from, to, highlighted)
    }
}

/// Size a label by its text (other kinds are left alone)
fn measure_label(measure_text_fn: &dyn Fn(f64, String) -> (f64, f64), font_size: f64, object: &mut SceneObject) {
    if let Shape::Label { .. } = object.shape() {
        let text = object.text(0).unwrap_or_default().to_string();
        let (width, height) = measure_text_fn(font_size, text);
        object.set_measured_size(width, height);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::frontends::recorder::monospace_measure;

    fn engine() -> Engine {
        Engine::new(monospace_measure)
    }

    fn circle(handle: u32, x: f64, y: f64) -> Command {
        Command::CreateCircle {
            handle: Handle::new(handle),
            label: handle.to_string(),
            x,
            y,
        }
    }

    fn connect(from: u32, to: u32) -> Command {
        Command::Connect {
            from: Handle::new(from),
            to: Handle::new(to),
            colour: Colour::BLACK,
            curve: 0.0,
            directed: true,
            label: String::new(),
            connection_point: None,
        }
    }

    fn style() -> EdgeStyle {
        EdgeStyle {
            colour: Colour::BLACK,
            curve: 0.0,
            directed: true,
            label: String::new(),
            connection_point: None,
        }
    }

    #[test]
    fn worked_scenario() {
        let mut engine = engine();
        let (h1, h2) = (Handle::new(1), Handle::new(2));
        engine.apply(circle(1, 100.0, 100.0)).unwrap();
        engine.apply(circle(2, 200.0, 100.0)).unwrap();
        engine.apply(connect(1, 2)).unwrap();

        engine.set_layer(h2, 1);
        assert_eq!(engine.edge_visible(h1, h2), Some(false));
        engine.set_layer_active(1, true);
        assert_eq!(engine.edge_visible(h1, h2), Some(true));

        engine.apply(Command::Delete { handle: h1 }).unwrap();
        assert_eq!(engine.edges_to(h2).count(), 0);
        assert_eq!(engine.edge_count(), 0);
        assert_eq!(engine.position_x(h1), Err(SceneError::UnknownHandle(h1)));
    }

    #[test]
    fn visibility_follows_layers() {
        let mut engine = engine();
        let handle = Handle::new(1);
        engine.apply(circle(1, 0.0, 0.0)).unwrap();
        assert_eq!(engine.is_visible(handle), Ok(true));

        engine.apply(Command::SetLayer { handle, layer: 4 }).unwrap();
        assert_eq!(engine.is_visible(handle), Ok(false));

        engine.set_active_layers(&[4]);
        assert_eq!(engine.is_visible(handle), Ok(true));
        assert_eq!(engine.active_layers(), vec![4]);

        engine.set_layer_active(4, false);
        assert_eq!(engine.is_visible(handle), Ok(false));
    }

    #[test]
    fn edge_visibility_is_and_of_endpoints() {
        let mut engine = engine();
        for handle in 1..=3 {
            engine.apply(circle(handle, 0.0, 0.0)).unwrap();
        }
        engine.apply(connect(1, 2)).unwrap();
        engine.apply(connect(2, 3)).unwrap();
        engine.apply(connect(3, 3)).unwrap();

        engine.set_layer(Handle::new(2), 7);
        assert_eq!(engine.edge_visible(Handle::new(1), Handle::new(2)), Some(false));
        assert_eq!(engine.edge_visible(Handle::new(2), Handle::new(3)), Some(false));
        assert_eq!(engine.edge_visible(Handle::new(3), Handle::new(3)), Some(true));
        assert_eq!(engine.edge_visible(Handle::new(1), Handle::new(3)), None);

        // Connecting to a hidden object makes a hidden edge
        engine.apply(connect(3, 2)).unwrap();
        assert_eq!(engine.edge_visible(Handle::new(3), Handle::new(2)), Some(false));
    }

    #[test]
    fn duplicate_create_changes_nothing() {
        let mut engine = engine();
        engine.apply(circle(1, 10.0, 20.0)).unwrap();
        engine.apply(circle(2, 0.0, 0.0)).unwrap();
        engine.apply(connect(1, 2)).unwrap();

        assert_eq!(
            engine.apply(circle(1, 99.0, 99.0)),
            Err(SceneError::DuplicateHandle(Handle::new(1)))
        );
        assert_eq!(engine.object_count(), 2);
        assert_eq!(engine.edge_count(), 1);
        assert_eq!(engine.position(Handle::new(1)), Ok(Point::new(10.0, 20.0)));
    }

    #[test]
    fn mutators_are_tolerant() {
        let mut engine = engine();
        let missing = Handle::new(42);
        assert_eq!(
            engine.apply(Command::Move {
                handle: missing,
                x: 1.0,
                y: 1.0
            }),
            Ok(Effect::Mutated(Mutation::Ignored(IgnoreReason::UnknownHandle)))
        );
        assert_eq!(
            engine.set_edge_colour(missing, Handle::new(1), Colour::RED),
            None
        );

        engine.apply(circle(1, 0.0, 0.0)).unwrap();
        assert_eq!(
            engine.set_text(Handle::new(1), "x".to_string(), 3),
            Mutation::Ignored(IgnoreReason::FieldOutOfRange)
        );
        assert_eq!(engine.set_alpha(Handle::new(1), 0.5), Mutation::Applied);
        assert_eq!(engine.object(Handle::new(1)).unwrap().alpha(), 0.5);
    }

    #[test]
    fn strict_operations_reject_unknown_handles() {
        let mut engine = engine();
        engine.apply(circle(1, 0.0, 0.0)).unwrap();
        let missing = Handle::new(9);
        assert_eq!(
            engine.apply(Command::Delete { handle: missing }),
            Err(SceneError::UnknownHandle(missing))
        );
        assert_eq!(
            engine.apply(connect(1, 9)),
            Err(SceneError::UnknownHandle(missing))
        );
        assert_eq!(
            engine.apply(Command::Disconnect {
                from: missing,
                to: Handle::new(1)
            }),
            Err(SceneError::UnknownHandle(missing))
        );
        assert_eq!(engine.width(missing), Err(SceneError::UnknownHandle(missing)));
        assert_eq!(engine.edge_count(), 0);
    }

    #[test]
    fn delete_then_restore() {
        let mut engine = engine();
        for handle in 1..=3 {
            engine.apply(circle(handle, 0.0, 0.0)).unwrap();
        }
        engine.apply(connect(1, 2)).unwrap();
        engine.apply(connect(3, 1)).unwrap();
        engine.apply(connect(2, 3)).unwrap();

        let removed = engine.remove_object(Handle::new(1)).unwrap();
        assert_eq!(removed.edges.len(), 2);
        assert_eq!(removed.edges[0].to, Handle::new(2));
        assert_eq!(removed.edges[1].from, Handle::new(3));
        assert_eq!(engine.edge_count(), 1);

        engine.restore(removed).unwrap();
        assert_eq!(engine.edge_count(), 3);
        assert_eq!(engine.edges_from(Handle::new(1)).count(), 1);
        assert_eq!(engine.edges_to(Handle::new(1)).count(), 1);
        assert_eq!(engine.text(Handle::new(1), 0), Ok("1"));
    }

    #[test]
    fn restore_refuses_when_neighbour_gone() {
        let mut engine = engine();
        engine.apply(circle(1, 0.0, 0.0)).unwrap();
        engine.apply(circle(2, 0.0, 0.0)).unwrap();
        engine.apply(connect(1, 2)).unwrap();

        let removed = engine.remove_object(Handle::new(1)).unwrap();
        engine.remove_object(Handle::new(2)).unwrap();
        assert_eq!(
            engine.restore(removed),
            Err(SceneError::UnknownHandle(Handle::new(2)))
        );
        assert_eq!(engine.object_count(), 0);
    }

    #[test]
    fn disconnect_reports_every_parallel_edge() {
        let mut engine = engine();
        engine.apply(circle(1, 0.0, 0.0)).unwrap();
        engine.apply(circle(2, 0.0, 0.0)).unwrap();
        engine.connect(Handle::new(1), Handle::new(2), style()).unwrap();
        engine.connect(Handle::new(1), Handle::new(2), style()).unwrap();

        let Effect::Disconnected(removed) = engine
            .apply(Command::Disconnect {
                from: Handle::new(1),
                to: Handle::new(2),
            })
            .unwrap()
        else {
            panic!("expected a disconnection");
        };
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0].to_command(), connect(1, 2));
    }

    #[test]
    fn labels_are_measured() {
        let mut engine = engine();
        let handle = Handle::new(1);
        engine
            .apply(Command::CreateLabel {
                handle,
                label: "abcd".to_string(),
                x: 0.0,
                y: 0.0,
                centered: true,
            })
            .unwrap();
        let (width, height) = monospace_measure(DEFAULT_FONT_SIZE_PX, "abcd".to_string());
        assert_eq!(engine.width(handle), Ok(width));
        assert_eq!(engine.height(handle), Ok(height));

        engine.set_text(handle, "ab".to_string(), 0);
        assert_eq!(engine.width(handle), Ok(width / 2.0));
        assert_eq!(
            engine.set_width(handle, 500.0),
            Mutation::Ignored(IgnoreReason::UnsupportedAttribute)
        );
    }

    #[test]
    fn multi_field_objects() {
        let mut engine = engine();
        let list = Handle::new(1);
        engine
            .apply(Command::CreateLinkedList {
                handle: list,
                label: "head".to_string(),
                width: 80.0,
                height: 30.0,
                x: 0.0,
                y: 0.0,
                link_percent: 0.25,
                vertical: false,
                link_at_end: true,
                num_labels: 2,
            })
            .unwrap();
        assert_eq!(engine.text(list, 0), Ok("head"));
        assert_eq!(engine.text(list, 1), Ok(""));
        assert_eq!(engine.text(list, 5), Ok(""));

        let node = Handle::new(2);
        engine
            .apply(Command::CreateBTreeNode {
                handle: node,
                width_per_element: 20.0,
                height: 20.0,
                num_elements: 3,
                x: 0.0,
                y: 0.0,
                background: Some(Colour::RED),
                foreground: None,
            })
            .unwrap();
        assert_eq!(engine.width(node), Ok(60.0));
        assert_eq!(engine.object(node).unwrap().background(), Colour::RED);
        engine.set_num_elements(node, 4);
        assert_eq!(engine.width(node), Ok(80.0));
    }

    #[test]
    fn highlight_circle_uses_its_colour() {
        let mut engine = engine();
        let handle = Handle::new(1);
        engine
            .apply(Command::CreateHighlightCircle {
                handle,
                colour: Colour::RED,
                x: 0.0,
                y: 0.0,
                radius: None,
            })
            .unwrap();
        let object = engine.object(handle).unwrap();
        assert_eq!(object.foreground(), Colour::RED);
        assert!(object.is_always_on_top());
        assert_eq!(object.width(), 2.0 * DEFAULT_CIRCLE_RADIUS);
    }

    #[test]
    fn applies_commands_from_json() {
        let json = r##"[
            { "command": "CreateCircle", "handle": 1, "label": "A", "x": 10, "y": 10 },
            { "command": "CreateCircle", "handle": 2, "label": "B", "x": 50, "y": 10 },
            { "command": "Connect", "from": 1, "to": 2 },
            { "command": "SetEdgeHighlight", "from": 1, "to": 2, "highlight": true },
            { "command": "CreateCircle", "handle": 1, "label": "C", "x": 0, "y": 0 },
            { "command": "Move", "handle": 2, "x": 0, "y": 0 }
        ]"##;
        let commands: Vec<Command> = serde_json::from_str(json).unwrap();
        let mut engine = engine();
        let (effects, failure) = engine.apply_all(commands);
        assert_eq!(effects.len(), 4);
        assert_eq!(effects[3], Effect::PreviousHighlight(Some(false)));
        assert_eq!(
            failure,
            Some((4, SceneError::DuplicateHandle(Handle::new(1))))
        );
        // Nothing after the failure was applied
        assert_eq!(engine.position_x(Handle::new(2)), Ok(50.0));
    }

    #[test]
    fn status_text() {
        let mut engine = engine();
        assert_eq!(engine.status(), "");
        engine.set_status("Inserting 5");
        assert_eq!(engine.status(), "Inserting 5");
    }
}
