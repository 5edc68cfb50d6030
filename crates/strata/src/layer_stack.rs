//! Ordered storage for layers, split into regular layers followed by overlays.

use crate::layer::{Layer, LayerId};

struct Entry {
    id: LayerId,
    layer: Box<dyn Layer>,
}

/// Owns every pushed layer.
///
/// Regular layers occupy `[0, split)` and overlays `[split, len)`, so
/// overlays always sit above regular layers regardless of push order. Forward
/// iteration is the update order; reverse iteration is the event order.
///
/// # Example
///
/// ```
/// use strata::layer::Layer;
/// use strata::layer_stack::LayerStack;
///
/// struct World;
/// impl Layer for World {}
/// struct Hud;
/// impl Layer for Hud {}
///
/// let mut stack = LayerStack::new();
/// let hud = stack.push_overlay(Hud);
/// stack.push_layer(World);
///
/// let names: Vec<&str> = stack.iter().map(|l| l.name()).collect();
/// assert!(names[0].ends_with("World"));
/// assert!(names[1].ends_with("Hud"));
///
/// assert!(stack.pop_layer(hud).is_none());
/// assert!(stack.pop_overlay(hud).is_some());
/// ```
pub struct LayerStack {
    entries: Vec<Entry>,
    split: usize,
    next_id: u64,
}

impl LayerStack {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            split: 0,
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Inserts a regular layer above the existing regular layers and below
    /// every overlay, then attaches it.
    pub fn push_layer(&mut self, layer: impl Layer + 'static) -> LayerId {
        self.push_layer_boxed(Box::new(layer))
    }

    pub fn push_layer_boxed(&mut self, mut layer: Box<dyn Layer>) -> LayerId {
        let id = self.next_id();
        layer.on_attach();
        tracing::debug!("Pushed layer {} ({})", layer.name(), id);

        self.entries.insert(self.split, Entry { id, layer });
        self.split += 1;
        id
    }

    /// Appends an overlay on top of the stack, then attaches it.
    pub fn push_overlay(&mut self, layer: impl Layer + 'static) -> LayerId {
        self.push_overlay_boxed(Box::new(layer))
    }

    pub fn push_overlay_boxed(&mut self, mut layer: Box<dyn Layer>) -> LayerId {
        let id = self.next_id();
        layer.on_attach();
        tracing::debug!("Pushed overlay {} ({})", layer.name(), id);

        self.entries.push(Entry { id, layer });
        id
    }

    /// Detaches and returns the regular layer `id`.
    ///
    /// Overlays are never matched; an unknown id is logged and ignored.
    pub fn pop_layer(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        let Some(index) = self.entries[..self.split].iter().position(|e| e.id == id) else {
            tracing::warn!("pop_layer: {} is not a regular layer in this stack", id);
            return None;
        };

        let mut entry = self.entries.remove(index);
        self.split -= 1;
        entry.layer.on_detach();
        tracing::debug!("Popped layer {} ({})", entry.layer.name(), id);
        Some(entry.layer)
    }

    /// Detaches and returns the overlay `id`.
    ///
    /// Regular layers are never matched; an unknown id is logged and ignored.
    pub fn pop_overlay(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        let Some(offset) = self.entries[self.split..].iter().position(|e| e.id == id) else {
            tracing::warn!("pop_overlay: {} is not an overlay in this stack", id);
            return None;
        };

        let mut entry = self.entries.remove(self.split + offset);
        entry.layer.on_detach();
        tracing::debug!("Popped overlay {} ({})", entry.layer.name(), id);
        Some(entry.layer)
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: LayerId) -> Option<&dyn Layer> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.layer.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn layer_count(&self) -> usize {
        self.split
    }

    pub fn overlay_count(&self) -> usize {
        self.entries.len() - self.split
    }

    /// Ids in forward order.
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = LayerId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Regular layers in push order, then overlays in push order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &(dyn Layer + 'static)> + '_ {
        self.entries.iter().map(|e| e.layer.as_ref())
    }

    pub fn iter_mut(
        &mut self,
    ) -> impl DoubleEndedIterator<Item = &mut (dyn Layer + 'static)> + '_ {
        self.entries.iter_mut().map(|e| e.layer.as_mut())
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LayerStack {
    fn drop(&mut self) {
        for entry in &mut self.entries {
            entry.layer.on_detach();
        }
        tracing::debug!("Layer stack dropped, detached {} layers", self.entries.len());
    }
}
