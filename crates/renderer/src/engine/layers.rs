// SPDX-License-Identifier: MIT

//!
//! The layer visibility table
//!

use algoscene_core::Layer;
use std::collections::BTreeMap;

/// Which layers are shown.  Layers never mentioned are hidden
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LayerTable {
    active: BTreeMap<Layer, bool>,
}

impl LayerTable {
    pub fn with_active(layers: &[Layer]) -> Self {
        let mut table = Self::default();
        table.replace(layers);
        table
    }

    pub fn is_active(&self, layer: Layer) -> bool {
        self.active.get(&layer).copied().unwrap_or(false)
    }

    pub fn set(&mut self, layer: Layer, active: bool) {
        self.active.insert(layer, active);
    }

    /// Make exactly `layers` active
    pub fn replace(&mut self, layers: &[Layer]) {
        self.active = layers.iter().map(|layer| (*layer, true)).collect();
    }

    /// The active layers in ascending order
    pub fn active_layers(&self) -> Vec<Layer> {
        self.active
            .iter()
            .filter(|(_, active)| **active)
            .map(|(layer, _)| *layer)
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unknown_layers_are_hidden() {
        let table = LayerTable::with_active(&[0]);
        assert!(table.is_active(0));
        assert!(!table.is_active(1));
        assert!(!LayerTable::default().is_active(0));
    }

    #[test]
    fn set_and_replace() {
        let mut table = LayerTable::with_active(&[0]);
        table.set(3, true);
        table.set(0, false);
        assert_eq!(table.active_layers(), vec![3]);
        table.replace(&[5, 1]);
        assert_eq!(table.active_layers(), vec![1, 5]);
        assert!(!table.is_active(3));
    }
}
