//! Per-pass layout slots.

use std::collections::HashMap;

use chipflow_core::ObjectId;
use chipflow_render::Rect;

/// Position and size assigned to one child by a measurement pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutSlot {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutSlot {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The slot as a rectangle in container coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Slots produced by one measurement pass, keyed by child.
///
/// A table is built from scratch by every pass and replaced wholesale; hidden
/// children have no entry. Iteration follows insertion (layout) order.
#[derive(Debug, Clone, Default)]
pub struct SlotTable {
    order: Vec<ObjectId>,
    slots: HashMap<ObjectId, LayoutSlot>,
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// Record the slot for `id`. A second insert for the same child replaces
    /// the slot but keeps its original position in the order.
    pub fn insert(&mut self, id: ObjectId, slot: LayoutSlot) {
        if self.slots.insert(id, slot).is_none() {
            self.order.push(id);
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<LayoutSlot> {
        self.slots.get(&id).copied()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate `(id, slot)` pairs in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, LayoutSlot)> + '_ {
        self.order.iter().map(|id| (*id, self.slots[id]))
    }
}
