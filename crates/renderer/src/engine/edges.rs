// SPDX-License-Identifier: MIT

//!
//! Edges and the edge registry
//!

use crate::{ObjectRegistry, SceneError};
use algoscene_core::{Colour, Command, Handle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// How an edge looks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub colour: Colour,

    /// How far the edge bows away from a straight line, as a fraction of its
    /// length (0 is straight, the sign picks the side)
    pub curve: f64,

    /// Whether an arrow head is drawn at the destination
    pub directed: bool,

    pub label: String,

    /// Which of the source's connection points the edge leaves from (e.g.
    /// the child slot of a B-tree node)
    pub connection_point: Option<usize>,
}

/// A directed edge between two live objects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    from: Handle,
    to: Handle,
    style: EdgeStyle,
    highlighted: bool,
    alpha: f64,

    /// The AND of both endpoints' visibility
    visible: bool,
}

impl Edge {
    pub fn from(&self) -> Handle {
        self.from
    }

    pub fn to(&self) -> Handle {
        self.to
    }

    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Internal identity of an edge.  Both indexes refer to edges by this id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EdgeId(u64);

/// Everything needed to recreate a removed edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeUndo {
    pub from: Handle,
    pub to: Handle,
    pub style: EdgeStyle,
}

impl EdgeUndo {
    /// The command that recreates the edge
    pub fn to_command(&self) -> Command {
        Command::Connect {
            from: self.from,
            to: self.to,
            colour: self.style.colour,
            curve: self.style.curve,
            directed: self.style.directed,
            label: self.style.label.clone(),
            connection_point: self.style.connection_point,
        }
    }
}

impl From<Edge> for EdgeUndo {
    fn from(edge: Edge) -> Self {
        EdgeUndo {
            from: edge.from,
            to: edge.to,
            style: edge.style,
        }
    }
}

/// Owns every edge.
///
/// `edges` is the single authoritative store.  `forward` (by source) and
/// `backward` (by destination) are derived indexes, and they are only ever
/// touched by [`EdgeRegistry::insert`] and [`EdgeRegistry::remove`], which keeps
/// them symmetric: an id is listed under `forward[from]` exactly when it is
/// listed under `backward[to]`.
#[derive(Debug, Default)]
pub(crate) struct EdgeRegistry {
    edges: BTreeMap<EdgeId, Edge>,
    forward: BTreeMap<Handle, Vec<EdgeId>>,
    backward: BTreeMap<Handle, Vec<EdgeId>>,
    next_id: u64,
}

impl EdgeRegistry {
    fn insert(&mut self, edge: Edge) -> EdgeId {
        let id = EdgeId(self.next_id);
        self.next_id += 1;
        self.forward.entry(edge.from).or_default().push(id);
        self.backward.entry(edge.to).or_default().push(id);
        self.edges.insert(id, edge);
        id
    }

    fn remove(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.remove(&id)?;
        detach(&mut self.forward, edge.from, id);
        detach(&mut self.backward, edge.to, id);
        Some(edge)
    }

    /// Connect two live objects.  The edge's visibility is worked out from
    /// the endpoints straight away
    pub fn connect(
        &mut self,
        objects: &ObjectRegistry,
        from: Handle,
        to: Handle,
        style: EdgeStyle,
    ) -> Result<EdgeId, SceneError> {
        let visible = objects.get(from)?.is_visible() && objects.get(to)?.is_visible();
        Ok(self.insert(Edge {
            from,
            to,
            style,
            highlighted: false,
            alpha: 1.0,
            visible,
        }))
    }

    /// Remove every edge from `from` to `to`
    pub fn disconnect(
        &mut self,
        objects: &ObjectRegistry,
        from: Handle,
        to: Handle,
    ) -> Result<Vec<EdgeUndo>, SceneError> {
        objects.get(from)?;
        objects.get(to)?;
        Ok(self
            .matching(from, to)
            .into_iter()
            .filter_map(|id| self.remove(id))
            .map(EdgeUndo::from)
            .collect())
    }

    /// Remove every edge touching `handle` (outgoing first, then incoming)
    pub fn delete_incident(&mut self, handle: Handle) -> Vec<EdgeUndo> {
        let mut ids = self.outgoing(handle).to_vec();
        for id in self.incoming(handle) {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids.into_iter()
            .filter_map(|id| self.remove(id))
            .map(EdgeUndo::from)
            .collect()
    }

    /// The ids of the edges leaving `handle`, in the order they were made
    pub fn outgoing(&self, handle: Handle) -> &[EdgeId] {
        self.forward.get(&handle).map_or(&[], Vec::as_slice)
    }

    /// The ids of the edges arriving at `handle`, in the order they were made
    pub fn incoming(&self, handle: Handle) -> &[EdgeId] {
        self.backward.get(&handle).map_or(&[], Vec::as_slice)
    }

    pub fn get(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Edges ordered by source handle, then by creation
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.forward
            .values()
            .flatten()
            .filter_map(|id| self.edges.get(id))
    }

    /// The edges from `from` to `to`, found by scanning the forward index
    pub fn matching(&self, from: Handle, to: Handle) -> Vec<EdgeId> {
        self.outgoing(from)
            .iter()
            .copied()
            .filter(|id| self.edges.get(id).is_some_and(|edge| edge.to == to))
            .collect()
    }

    /// Apply `update` to every matching edge and return what it returned for
    /// the first one (`None` if no edge matches)
    fn update_matching<T, F>(&mut self, from: Handle, to: Handle, mut update: F) -> Option<T>
    where
        F: FnMut(&mut Edge) -> T,
    {
        let mut first = None;
        for id in self.matching(from, to) {
            if let Some(edge) = self.edges.get_mut(&id) {
                let previous = update(edge);
                first.get_or_insert(previous);
            }
        }
        first
    }

    /// Recolour the matching edges, returning the previous colour
    pub fn set_colour(&mut self, from: Handle, to: Handle, colour: Colour) -> Option<Colour> {
        self.update_matching(from, to, |edge| {
            std::mem::replace(&mut edge.style.colour, colour)
        })
    }

    /// Set the alpha of the matching edges, returning the previous alpha
    pub fn set_alpha(&mut self, from: Handle, to: Handle, alpha: f64) -> Option<f64> {
        let alpha = alpha.clamp(0.0, 1.0);
        self.update_matching(from, to, |edge| std::mem::replace(&mut edge.alpha, alpha))
    }

    /// (Un)highlight the matching edges, returning the previous state
    pub fn set_highlight(&mut self, from: Handle, to: Handle, highlighted: bool) -> Option<bool> {
        self.update_matching(from, to, |edge| {
            std::mem::replace(&mut edge.highlighted, highlighted)
        })
    }

    /// Recompute the visibility of the edges touching `handle`
    pub fn refresh_incident_visibility(&mut self, objects: &ObjectRegistry, handle: Handle) {
        let ids: Vec<EdgeId> = self
            .outgoing(handle)
            .iter()
            .chain(self.incoming(handle))
            .copied()
            .collect();
        for id in ids {
            if let Some(edge) = self.edges.get_mut(&id) {
                edge.visible = endpoints_visible(objects, edge.from, edge.to);
            }
        }
    }

    /// Recompute the visibility of every edge
    pub fn refresh_visibility(&mut self, objects: &ObjectRegistry) {
        for edge in self.edges.values_mut() {
            edge.visible = endpoints_visible(objects, edge.from, edge.to);
        }
    }
}

fn detach(index: &mut BTreeMap<Handle, Vec<EdgeId>>, handle: Handle, id: EdgeId) {
    if let Some(ids) = index.get_mut(&handle) {
        ids.retain(|other| *other != id);
        if ids.is_empty() {
            index.remove(&handle);
        }
    }
}

fn endpoints_visible(objects: &ObjectRegistry, from: Handle, to: Handle) -> bool {
    let visible = |handle| objects.get(handle).is_ok_and(|object| object.is_visible());
    visible(from) && visible(to)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Point, SceneColours, SceneObject, Shape};

    fn style(label: &str) -> EdgeStyle {
        EdgeStyle {
            colour: Colour::BLACK,
            curve: 0.0,
            directed: true,
            label: label.to_string(),
            connection_point: None,
        }
    }

    fn objects(handles: &[u32]) -> ObjectRegistry {
        let mut objects = ObjectRegistry::default();
        for handle in handles {
            let mut object = SceneObject::new(
                Shape::Circle { radius: 20.0 },
                Point::default(),
                vec![handle.to_string()],
                &SceneColours::default(),
            );
            object.set_visible(true);
            objects.create(Handle::new(*handle), object).unwrap();
        }
        objects
    }

    /// Check every id is indexed under its endpoints and nowhere else
    fn assert_symmetric(registry: &EdgeRegistry) {
        for (handle, ids) in &registry.forward {
            for id in ids {
                let edge = registry.get(*id).unwrap();
                assert_eq!(edge.from(), *handle);
                assert!(registry.incoming(edge.to()).contains(id));
            }
        }
        for (handle, ids) in &registry.backward {
            for id in ids {
                let edge = registry.get(*id).unwrap();
                assert_eq!(edge.to(), *handle);
                assert!(registry.outgoing(edge.from()).contains(id));
            }
        }
        let indexed: usize = registry.forward.values().map(Vec::len).sum();
        assert_eq!(indexed, registry.len());
    }

    #[test]
    fn connect_then_disconnect_round_trip() {
        let objects = objects(&[1, 2, 3]);
        let (a, b, c) = (Handle::new(1), Handle::new(2), Handle::new(3));
        let mut registry = EdgeRegistry::default();
        registry.connect(&objects, a, c, style("ac")).unwrap();
        registry.connect(&objects, c, b, style("cb")).unwrap();
        registry.connect(&objects, a, a, style("aa")).unwrap();

        let forward_before = registry.outgoing(a).to_vec();
        let backward_before = registry.incoming(b).to_vec();

        registry.connect(&objects, a, b, style("ab")).unwrap();
        let undo = registry.disconnect(&objects, a, b).unwrap();

        assert_eq!(registry.outgoing(a), forward_before.as_slice());
        assert_eq!(registry.incoming(b), backward_before.as_slice());
        assert_eq!(undo.len(), 1);
        assert_eq!(undo[0].style.label, "ab");
        assert_symmetric(&registry);

        // Nothing left between the pair
        assert!(registry.disconnect(&objects, a, b).unwrap().is_empty());
    }

    #[test]
    fn disconnect_removes_parallel_edges_in_order() {
        let objects = objects(&[1, 2]);
        let (a, b) = (Handle::new(1), Handle::new(2));
        let mut registry = EdgeRegistry::default();
        registry.connect(&objects, a, b, style("first")).unwrap();
        registry.connect(&objects, b, a, style("back")).unwrap();
        registry.connect(&objects, a, b, style("second")).unwrap();

        let undo = registry.disconnect(&objects, a, b).unwrap();
        let labels: Vec<&str> = undo.iter().map(|undo| undo.style.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second"]);
        assert!(registry.outgoing(a).is_empty());
        assert_eq!(registry.len(), 1);
        assert_symmetric(&registry);
    }

    #[test]
    fn endpoints_must_exist() {
        let objects = objects(&[1]);
        let mut registry = EdgeRegistry::default();
        assert_eq!(
            registry.connect(&objects, Handle::new(1), Handle::new(2), style("")),
            Err(SceneError::UnknownHandle(Handle::new(2)))
        );
        assert_eq!(
            registry.disconnect(&objects, Handle::new(7), Handle::new(1)),
            Err(SceneError::UnknownHandle(Handle::new(7)))
        );
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn delete_incident_cascades() {
        let objects = objects(&[1, 2, 3]);
        let (a, b, c) = (Handle::new(1), Handle::new(2), Handle::new(3));
        let mut registry = EdgeRegistry::default();
        registry.connect(&objects, b, a, style("ba")).unwrap();
        registry.connect(&objects, a, b, style("ab")).unwrap();
        registry.connect(&objects, a, a, style("aa")).unwrap();
        registry.connect(&objects, c, a, style("ca")).unwrap();
        registry.connect(&objects, b, c, style("bc")).unwrap();

        let undo = registry.delete_incident(a);
        let labels: Vec<&str> = undo.iter().map(|undo| undo.style.label.as_str()).collect();
        assert_eq!(labels, vec!["ab", "aa", "ba", "ca"]);

        assert!(registry.outgoing(a).is_empty());
        assert!(registry.incoming(a).is_empty());
        for edge in registry.iter() {
            assert_ne!(edge.from(), a);
            assert_ne!(edge.to(), a);
        }
        assert_eq!(registry.len(), 1);
        assert_symmetric(&registry);
    }

    #[test]
    fn value_setters_return_previous() {
        let objects = objects(&[1, 2]);
        let (a, b) = (Handle::new(1), Handle::new(2));
        let mut registry = EdgeRegistry::default();
        registry.connect(&objects, a, b, style("")).unwrap();

        assert_eq!(registry.set_colour(a, b, Colour::RED), Some(Colour::BLACK));
        assert_eq!(registry.set_colour(a, b, Colour::WHITE), Some(Colour::RED));
        assert_eq!(registry.set_alpha(a, b, 0.25), Some(1.0));
        assert_eq!(registry.set_highlight(a, b, true), Some(false));

        // Reversed pair doesn't match
        assert_eq!(registry.set_colour(b, a, Colour::RED), None);
        assert_eq!(registry.set_highlight(Handle::new(5), b, true), None);
    }

    #[test]
    fn undo_descriptor_recreates_edge() {
        let undo = EdgeUndo {
            from: Handle::new(1),
            to: Handle::new(2),
            style: EdgeStyle {
                colour: Colour::RED,
                curve: 0.5,
                directed: false,
                label: "w".to_string(),
                connection_point: Some(1),
            },
        };
        assert_eq!(
            undo.to_command(),
            Command::Connect {
                from: Handle::new(1),
                to: Handle::new(2),
                colour: Colour::RED,
                curve: 0.5,
                directed: false,
                label: "w".to_string(),
                connection_point: Some(1),
            }
        );
    }
}
