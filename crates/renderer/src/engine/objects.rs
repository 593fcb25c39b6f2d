// SPDX-License-Identifier: MIT

//!
//! The object registry
//!

use crate::{IgnoreReason, Mutation, SceneError, SceneObject};
use algoscene_core::Handle;
use log::trace;
use std::collections::BTreeMap;

/// Owns every live [`SceneObject`], keyed by handle.
///
/// Creation and reads are strict (duplicate or unknown handles are errors).
/// Mutation is tolerant: an unknown handle is reported as
/// [`IgnoreReason::UnknownHandle`] rather than an error, so that replaying an
/// old batch against a scene where the object has since gone is harmless.
#[derive(Debug, Default)]
pub(crate) struct ObjectRegistry {
    /// Ordered by handle, which is also the paint order within a tier
    objects: BTreeMap<Handle, SceneObject>,
}

impl ObjectRegistry {
    pub fn create(&mut self, handle: Handle, object: SceneObject) -> Result<(), SceneError> {
        if self.objects.contains_key(&handle) {
            return Err(SceneError::DuplicateHandle(handle));
        }
        self.objects.insert(handle, object);
        Ok(())
    }

    pub fn get(&self, handle: Handle) -> Result<&SceneObject, SceneError> {
        self.objects
            .get(&handle)
            .ok_or(SceneError::UnknownHandle(handle))
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.objects.contains_key(&handle)
    }

    pub fn remove(&mut self, handle: Handle) -> Result<SceneObject, SceneError> {
        self.objects
            .remove(&handle)
            .ok_or(SceneError::UnknownHandle(handle))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Objects in handle order
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &SceneObject)> {
        self.objects.iter().map(|(handle, object)| (*handle, object))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneObject> {
        self.objects.values_mut()
    }

    /// Apply a mutation that can't itself be refused
    pub fn mutate<F>(&mut self, handle: Handle, mutation: F) -> Mutation
    where
        F: FnOnce(&mut SceneObject),
    {
        self.try_mutate(handle, |object| {
            mutation(object);
            Mutation::Applied
        })
    }

    /// Apply a mutation that the object may refuse (e.g. a text field it
    /// doesn't have)
    pub fn try_mutate<F>(&mut self, handle: Handle, mutation: F) -> Mutation
    where
        F: FnOnce(&mut SceneObject) -> Mutation,
    {
        let result = match self.objects.get_mut(&handle) {
            Some(object) => mutation(object),
            None => Mutation::Ignored(IgnoreReason::UnknownHandle),
        };
        if let Mutation::Ignored(reason) = result {
            trace!("mutation of {handle} ignored: {reason:?}");
        }
        result
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Point, SceneColours, Shape};

    fn circle(label: &str) -> SceneObject {
        SceneObject::new(
            Shape::Circle { radius: 20.0 },
            Point::new(0.0, 0.0),
            vec![label.to_string()],
            &SceneColours::default(),
        )
    }

    #[test]
    fn create_get_remove() {
        let mut registry = ObjectRegistry::default();
        let handle = Handle::new(1);
        registry.create(handle, circle("A")).unwrap();
        assert_eq!(registry.get(handle).unwrap().text(0), Some("A"));

        let removed = registry.remove(handle).unwrap();
        assert_eq!(removed.text(0), Some("A"));
        assert_eq!(registry.get(handle), Err(SceneError::UnknownHandle(handle)));
        assert_eq!(registry.remove(handle), Err(SceneError::UnknownHandle(handle)));

        // The handle can be reused once removed
        registry.create(handle, circle("B")).unwrap();
        assert_eq!(registry.get(handle).unwrap().text(0), Some("B"));
    }

    #[test]
    fn duplicate_rejected_and_registry_unchanged() {
        let mut registry = ObjectRegistry::default();
        registry.create(Handle::new(1), circle("A")).unwrap();
        assert_eq!(
            registry.create(Handle::new(1), circle("B")),
            Err(SceneError::DuplicateHandle(Handle::new(1)))
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(Handle::new(1)).unwrap().text(0), Some("A"));
    }

    #[test]
    fn tolerant_mutation() {
        let mut registry = ObjectRegistry::default();
        registry.create(Handle::new(1), circle("A")).unwrap();
        assert_eq!(
            registry.mutate(Handle::new(1), |object| object.set_alpha(0.5)),
            Mutation::Applied
        );
        assert_eq!(registry.get(Handle::new(1)).unwrap().alpha(), 0.5);
        assert_eq!(
            registry.mutate(Handle::new(9), |object| object.set_alpha(0.5)),
            Mutation::Ignored(IgnoreReason::UnknownHandle)
        );
    }

    #[test]
    fn iterates_in_handle_order() {
        let mut registry = ObjectRegistry::default();
        for handle in [5, 1, 3] {
            registry.create(Handle::new(handle), circle("x")).unwrap();
        }
        let handles: Vec<u32> = registry.iter().map(|(handle, _)| handle.value()).collect();
        assert_eq!(handles, vec![1, 3, 5]);
    }
}
