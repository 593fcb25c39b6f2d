// SPDX-License-Identifier: MIT

//!
//! Turning the scene into a frame
//!

use super::geometry::{
    boundary_point, control_point, edge_midpoint, field_slots, link_slot, tail_point,
};
use crate::{
    DrawItem, EDGE_THICKNESS, Edge, EdgeOut, Engine, HighlightOut, ObjectOut, Point, SceneObject,
    Shape, Size, TextOut, pulse_thickness,
};
use algoscene_core::Handle;

/// Something a frame can be painted onto (e.g. an HTML canvas or an `egui`
/// painter)
pub trait FrameSurface {
    /// The size of the drawable area
    fn size(&self) -> Size;

    /// Wipe the surface ready for a new frame
    fn clear(&mut self);

    fn draw_object(&mut self, object: &ObjectOut);

    fn draw_edge(&mut self, edge: &EdgeOut);

    fn draw_status(&mut self, status: &TextOut);
}

impl Engine {
    /// Work out everything to draw for the given frame, in paint order:
    ///
    /// 1. visible objects that are neither highlighted nor always on top
    /// 2. visible highlighted objects that aren't always on top
    /// 3. visible always-on-top objects
    /// 4. visible edges
    /// 5. the status label
    ///
    /// Objects are in handle order within each tier, edges by source handle
    /// then creation.  The frame index only drives the highlight pulse, so a
    /// frame is the same as the one `modulus` frames later
    pub fn frame(&self, frame_index: u64, surface_size: Size) -> Vec<DrawItem> {
        let highlight = HighlightOut {
            thickness: pulse_thickness(frame_index, &self.config.pulse),
            colour: self.config.colours.highlight,
        };
        let visible = || self.objects.iter().filter(|(_, object)| object.is_visible());
        let mut items = Vec::with_capacity(self.objects.len() + self.edges.len() + 1);

        // Plain objects
        items.extend(
            visible()
                .filter(|(_, object)| !object.is_highlighted() && !object.is_always_on_top())
                .map(|(handle, object)| {
                    DrawItem::Object(self.object_for_drawing(handle, object, None))
                }),
        );

        // Highlighted objects
        items.extend(
            visible()
                .filter(|(_, object)| object.is_highlighted() && !object.is_always_on_top())
                .map(|(handle, object)| {
                    DrawItem::Object(self.object_for_drawing(handle, object, Some(highlight)))
                }),
        );

        // Always on top
        items.extend(
            visible()
                .filter(|(_, object)| object.is_always_on_top())
                .map(|(handle, object)| {
                    let highlight = object.is_highlighted().then_some(highlight);
                    DrawItem::Object(self.object_for_drawing(handle, object, highlight))
                }),
        );

        // Edges
        items.extend(
            self.edges
                .iter()
                .filter(|edge| edge.is_visible())
                .filter_map(|edge| {
                    self.edge_for_drawing(edge, edge.is_highlighted().then_some(highlight))
                })
                .map(DrawItem::Edge),
        );

        items.push(DrawItem::Status(self.status_for_drawing(surface_size)));
        items
    }

    /// Clear the surface and paint the given frame onto it
    pub fn render_frame<S: FrameSurface + ?Sized>(&self, frame_index: u64, surface: &mut S) {
        let items = self.frame(frame_index, surface.size());
        surface.clear();
        for item in &items {
            match item {
                DrawItem::Object(object) => surface.draw_object(object),
                DrawItem::Edge(edge) => surface.draw_edge(edge),
                DrawItem::Status(status) => surface.draw_status(status),
            }
        }
    }

    fn object_for_drawing(
        &self,
        handle: Handle,
        object: &SceneObject,
        highlight: Option<HighlightOut>,
    ) -> ObjectOut {
        let slots = field_slots(object);
        let font_size = self.config.font_size_px;
        let texts = object
            .texts()
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let (position, centred) = match (object.shape(), slots.get(index)) {
                    (_, Some(slot)) => (slot.centre(), true),
                    (Shape::Label { centered, .. }, None) => (object.position(), centered),
                    _ => (object.centre(), true),
                };
                TextOut {
                    position,
                    text: field.text.clone(),
                    colour: field.colour,
                    font_size,
                    centred,
                }
            })
            .collect();
        let highlighted_slot = object
            .highlight_index()
            .and_then(|index| slots.get(index))
            .copied();
        ObjectOut {
            handle,
            shape: object.shape(),
            centre: object.centre(),
            bounds: object.bounds(),
            foreground: object.foreground(),
            background: object.background(),
            alpha: object.alpha(),
            texts,
            slots,
            link_slot: link_slot(object),
            highlighted_slot,
            highlight,
            null_pointer: object.is_null(),
        }
    }

    /// `None` if an endpoint has gone (which the registries never allow, but
    /// a frame is never worth failing over)
    fn edge_for_drawing(&self, edge: &Edge, highlight: Option<HighlightOut>) -> Option<EdgeOut> {
        let from = self.objects.get(edge.from()).ok()?;
        let to = self.objects.get(edge.to()).ok()?;
        let style = edge.style();

        // Aim at the bow of a curved edge rather than straight across
        let aim = control_point(from.centre(), to.centre(), style.curve);
        let start = tail_point(from, aim.unwrap_or(to.centre()), style.connection_point);
        let end = boundary_point(to, aim.unwrap_or(start));
        let control = control_point(start, end, style.curve);

        let label = (!style.label.is_empty()).then(|| TextOut {
            position: edge_midpoint(start, end, control),
            text: style.label.clone(),
            colour: style.colour,
            font_size: self.config.font_size_px,
            centred: true,
        });
        Some(EdgeOut {
            from: edge.from(),
            to: edge.to(),
            start,
            end,
            control,
            colour: style.colour,
            alpha: edge.alpha(),
            thickness: EDGE_THICKNESS,
            directed: style.directed,
            label,
            highlight,
        })
    }

    /// The status label sits `offset` in from the bottom left corner
    fn status_for_drawing(&self, surface_size: Size) -> TextOut {
        let status = &self.config.status;
        TextOut {
            position: Point::new(status.offset.x, surface_size.y - status.offset.y),
            text: self.status.clone(),
            colour: self.config.colours.status_text,
            font_size: status.font_size_px,
            centred: false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::frontends::recorder::{RecordingSurface, monospace_measure};
    use crate::PULSE_FRAME_MODULUS;
    use algoscene_core::{Colour, Command};

    const SIZE: Size = Size::new(400.0, 300.0);

    fn engine_with_circles(count: u32) -> Engine {
        let mut engine = Engine::new(monospace_measure);
        for handle in 1..=count {
            engine
                .apply(Command::CreateCircle {
                    handle: Handle::new(handle),
                    label: handle.to_string(),
                    x: 50.0 * handle as f64,
                    y: 50.0,
                })
                .unwrap();
        }
        engine
    }

    fn connect(engine: &mut Engine, from: u32, to: u32) {
        engine
            .apply(Command::Connect {
                from: Handle::new(from),
                to: Handle::new(to),
                colour: Colour::BLACK,
                curve: 0.0,
                directed: true,
                label: String::new(),
                connection_point: None,
            })
            .unwrap();
    }

    /// A compact description of each item: "o<handle>", "e<from>-<to>", or "s"
    fn order(items: &[DrawItem]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item {
                DrawItem::Object(object) => format!("o{}", object.handle),
                DrawItem::Edge(edge) => format!("e{}-{}", edge.from, edge.to),
                DrawItem::Status(_) => "s".to_string(),
            })
            .collect()
    }

    #[test]
    fn paints_in_tier_order() {
        let mut engine = engine_with_circles(4);
        connect(&mut engine, 1, 2);
        engine.set_highlight(Handle::new(1), true);
        engine.set_always_on_top(Handle::new(2), true);
        engine.set_highlight(Handle::new(3), true);

        let items = engine.frame(0, SIZE);
        assert_eq!(order(&items), vec!["o4", "o1", "o3", "o2", "e1-2", "s"]);

        // Only the highlighted objects carry a highlight
        let highlighted: Vec<bool> = items
            .iter()
            .filter_map(|item| match item {
                DrawItem::Object(object) => Some(object.highlight.is_some()),
                _ => None,
            })
            .collect();
        assert_eq!(highlighted, vec![false, true, true, false]);
    }

    #[test]
    fn highlight_pulses() {
        let mut engine = engine_with_circles(1);
        engine.set_highlight(Handle::new(1), true);
        let thickness = |frame| match &engine.frame(frame, SIZE)[0] {
            DrawItem::Object(object) => object.highlight.map(|highlight| highlight.thickness),
            _ => None,
        };
        assert_eq!(thickness(0), Some(7.0));
        assert_eq!(thickness(28), Some(3.0));
        assert_eq!(thickness(56), Some(7.0));
    }

    #[test]
    fn frames_repeat() {
        let mut engine = engine_with_circles(3);
        connect(&mut engine, 1, 3);
        engine.set_highlight(Handle::new(2), true);
        engine.set_edge_highlight(Handle::new(1), Handle::new(3), true);
        for frame in [0, 17, 999] {
            assert_eq!(
                engine.frame(frame, SIZE),
                engine.frame(frame + PULSE_FRAME_MODULUS, SIZE)
            );
        }
    }

    #[test]
    fn empty_scene_draws_only_status() {
        let mut engine = Engine::new(monospace_measure);
        engine.set_status("Ready");
        let mut surface = RecordingSurface::new(SIZE);
        engine.render_frame(0, &mut surface);
        assert_eq!(surface.clears, 1);
        assert_eq!(order(&surface.items), vec!["s"]);
        let DrawItem::Status(status) = &surface.items[0] else {
            panic!("expected the status label");
        };
        assert_eq!(status.text, "Ready");
        assert_eq!(status.position, Point::new(5.0, 285.0));
    }

    #[test]
    fn hidden_layers_draw_nothing() {
        let mut engine = engine_with_circles(3);
        connect(&mut engine, 1, 2);
        engine.set_active_layers(&[]);
        assert_eq!(order(&engine.frame(0, SIZE)), vec!["s"]);

        engine.set_layer_active(0, true);
        assert_eq!(order(&engine.frame(0, SIZE)), vec!["o1", "o2", "o3", "e1-2", "s"]);
    }

    #[test]
    fn deleted_endpoint_takes_edge_out_of_next_frame() {
        let mut engine = engine_with_circles(2);
        connect(&mut engine, 1, 2);
        engine.apply(Command::Delete { handle: Handle::new(2) }).unwrap();
        assert_eq!(order(&engine.frame(1, SIZE)), vec!["o1", "s"]);
    }

    #[test]
    fn edges_attach_to_boundaries() {
        let mut engine = engine_with_circles(2);
        connect(&mut engine, 1, 2);
        let items = engine.frame(0, SIZE);
        let Some(DrawItem::Edge(edge)) = items.get(2) else {
            panic!("expected an edge");
        };
        assert_eq!(edge.start, Point::new(70.0, 50.0));
        assert_eq!(edge.end, Point::new(80.0, 50.0));
        assert_eq!(edge.control, None);
        assert!(edge.directed);
        assert_eq!(edge.highlight, None);
    }

    #[test]
    fn multi_field_text_sits_in_slots() {
        let mut engine = Engine::new(monospace_measure);
        engine
            .apply(Command::CreateBTreeNode {
                handle: Handle::new(1),
                width_per_element: 20.0,
                height: 20.0,
                num_elements: 2,
                x: 20.0,
                y: 10.0,
                background: None,
                foreground: None,
            })
            .unwrap();
        engine.set_text(Handle::new(1), "7".to_string(), 1);
        engine.set_highlight_index(Handle::new(1), Some(1));

        let DrawItem::Object(object) = &engine.frame(0, SIZE)[0] else {
            panic!("expected an object");
        };
        assert_eq!(object.slots.len(), 2);
        assert_eq!(object.texts[1].text, "7");
        assert_eq!(object.texts[1].position, Point::new(30.0, 10.0));
        assert_eq!(object.highlighted_slot, Some(object.slots[1]));
    }
}
