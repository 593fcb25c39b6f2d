// SPDX-License-Identifier: MIT

//!
//! Placing one object flush against another
//!

use crate::{Engine, Point, Position, SceneError};
use algoscene_core::Handle;

/// Which side of the reference object to sit against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Engine {
    /// Where `handle` would go to sit against `side` of `relative_to`, centred
    /// on it along the other axis
    fn aligned_position(
        &self,
        handle: Handle,
        relative_to: Handle,
        side: Side,
    ) -> Result<Position, SceneError> {
        let object = self.objects.get(handle)?;
        let target = self.objects.get(relative_to)?.bounds();
        let (half_width, half_height) = (object.width() / 2.0, object.height() / 2.0);
        let centre = match side {
            Side::Left => Point::new(target.position.x - half_width, target.centre().y),
            Side::Right => Point::new(target.max_x() + half_width, target.centre().y),
            Side::Top => Point::new(target.centre().x, target.position.y - half_height),
            Side::Bottom => Point::new(target.centre().x, target.max_y() + half_height),
        };
        Ok(object.position_for_centre(centre))
    }

    /// Move `handle` against `side` of `relative_to`, returning where it was
    fn align(&mut self, handle: Handle, relative_to: Handle, side: Side) -> Result<Position, SceneError> {
        let position = self.aligned_position(handle, relative_to, side)?;
        let previous = self.objects.get(handle)?.position();
        self.set_position(handle, position);
        Ok(previous)
    }

    /// Where `handle` would go with its right edge on the left edge of
    /// `relative_to`
    pub fn align_left_position(&self, handle: Handle, relative_to: Handle) -> Result<Position, SceneError> {
        self.aligned_position(handle, relative_to, Side::Left)
    }

    pub fn align_right_position(&self, handle: Handle, relative_to: Handle) -> Result<Position, SceneError> {
        self.aligned_position(handle, relative_to, Side::Right)
    }

    pub fn align_top_position(&self, handle: Handle, relative_to: Handle) -> Result<Position, SceneError> {
        self.aligned_position(handle, relative_to, Side::Top)
    }

    pub fn align_bottom_position(&self, handle: Handle, relative_to: Handle) -> Result<Position, SceneError> {
        self.aligned_position(handle, relative_to, Side::Bottom)
    }

    /// Put `handle` to the left of `relative_to`.  Returns the previous
    /// position
    pub fn align_left(&mut self, handle: Handle, relative_to: Handle) -> Result<Position, SceneError> {
        self.align(handle, relative_to, Side::Left)
    }

    pub fn align_right(&mut self, handle: Handle, relative_to: Handle) -> Result<Position, SceneError> {
        self.align(handle, relative_to, Side::Right)
    }

    pub fn align_top(&mut self, handle: Handle, relative_to: Handle) -> Result<Position, SceneError> {
        self.align(handle, relative_to, Side::Top)
    }

    pub fn align_bottom(&mut self, handle: Handle, relative_to: Handle) -> Result<Position, SceneError> {
        self.align(handle, relative_to, Side::Bottom)
    }
}
