// SPDX-License-Identifier: MIT

//!
//! Where edges attach to objects, and where the parts of multi-field objects
//! sit
//!

use crate::{Bounds, Point, SceneObject, Shape};

/// Where a line aimed at the object's centre from `towards` crosses the
/// object's boundary
pub(crate) fn boundary_point(object: &SceneObject, towards: Point) -> Point {
    let centre = object.centre();
    let direction = centre.to(towards);
    let distance = direction.length();
    if distance == 0.0 {
        return centre;
    }
    match object.shape() {
        Shape::Circle { radius } | Shape::HighlightCircle { radius } => centre.offset(
            direction.x / distance * radius,
            direction.y / distance * radius,
        ),
        _ => {
            let half_width = object.width() / 2.0;
            let half_height = object.height() / 2.0;
            let scale_x = if direction.x == 0.0 {
                f64::INFINITY
            } else {
                half_width / direction.x.abs()
            };
            let scale_y = if direction.y == 0.0 {
                f64::INFINITY
            } else {
                half_height / direction.y.abs()
            };
            let scale = scale_x.min(scale_y).min(1.0);
            centre.offset(direction.x * scale, direction.y * scale)
        }
    }
}

/// Where an edge leaving the object (heading for `towards`) starts
pub(crate) fn tail_point(
    object: &SceneObject,
    towards: Point,
    connection_point: Option<usize>,
) -> Point {
    match (object.shape(), connection_point) {
        (
            Shape::BTreeNode {
                width_per_element, ..
            },
            Some(index),
        ) => {
            let bounds = object.bounds();
            Point::new(
                bounds.position.x + (width_per_element * index as f64),
                bounds.max_y(),
            )
        }
        (Shape::LinkedListNode { .. }, _) => match link_slot(object) {
            Some(slot) => slot.centre(),
            None => boundary_point(object, towards),
        },
        _ => boundary_point(object, towards),
    }
}

/// The control point of a curved edge: off the chord's midpoint, at right
/// angles to it, by `curve` times the chord's length
pub(crate) fn control_point(start: Point, end: Point, curve: f64) -> Option<Point> {
    if curve == 0.0 {
        return None;
    }
    let chord = start.to(end);
    Some(start.midpoint(end).offset(-chord.y * curve, chord.x * curve))
}

/// The halfway point along an edge (straight or quadratic)
pub(crate) fn edge_midpoint(start: Point, end: Point, control: Option<Point>) -> Point {
    match control {
        Some(control) => Point::new(
            (0.25 * start.x) + (0.5 * control.x) + (0.25 * end.x),
            (0.25 * start.y) + (0.5 * control.y) + (0.25 * end.y),
        ),
        None => start.midpoint(end),
    }
}

/// The pointer slot of a linked-list node
pub(crate) fn link_slot(object: &SceneObject) -> Option<Bounds> {
    let Shape::LinkedListNode {
        link_percent,
        vertical,
        link_at_end,
        ..
    } = object.shape()
    else {
        return None;
    };
    let bounds = object.bounds();
    let slot = if vertical {
        let height = bounds.height * link_percent;
        let y = if link_at_end {
            bounds.max_y() - height
        } else {
            bounds.position.y
        };
        Bounds {
            position: Point::new(bounds.position.x, y),
            width: bounds.width,
            height,
        }
    } else {
        let width = bounds.width * link_percent;
        let x = if link_at_end {
            bounds.max_x() - width
        } else {
            bounds.position.x
        };
        Bounds {
            position: Point::new(x, bounds.position.y),
            width,
            height: bounds.height,
        }
    };
    Some(slot)
}

/// The box of each text field of a multi-field object (empty for the
/// single-field kinds)
pub(crate) fn field_slots(object: &SceneObject) -> Vec<Bounds> {
    let count = object.texts().len();
    let bounds = object.bounds();
    match object.shape() {
        Shape::BTreeNode {
            width_per_element,
            height,
        } => (0..count)
            .map(|index| Bounds {
                position: bounds.position.offset(width_per_element * index as f64, 0.0),
                width: width_per_element,
                height,
            })
            .collect(),
        Shape::LinkedListNode {
            link_percent,
            vertical,
            link_at_end,
            ..
        } => {
            if count == 0 {
                return Vec::new();
            }
            // The data area is whatever the pointer slot leaves over
            let mut data = bounds;
            if vertical {
                data.height *= 1.0 - link_percent;
                if !link_at_end {
                    data.position.y = bounds.max_y() - data.height;
                }
                let slot_height = data.height / count as f64;
                (0..count)
                    .map(|index| Bounds {
                        position: data.position.offset(0.0, slot_height * index as f64),
                        width: data.width,
                        height: slot_height,
                    })
                    .collect()
            } else {
                data.width *= 1.0 - link_percent;
                if !link_at_end {
                    data.position.x = bounds.max_x() - data.width;
                }
                let slot_width = data.width / count as f64;
                (0..count)
                    .map(|index| Bounds {
                        position: data.position.offset(slot_width * index as f64, 0.0),
                        width: slot_width,
                        height: data.height,
                    })
                    .collect()
            }
        }
        _ => Vec::new(),
    }
}
