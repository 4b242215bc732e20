//! State every widget carries.

use chipflow_core::{Object, ObjectBase, ObjectId, ObjectResult, Signal};
use chipflow_render::{Point, Rect, Size};

/// Identity, geometry and visibility, embedded as a field by each widget.
///
/// Hiding a widget does not clear its geometry; it keeps the rectangle of its
/// last placement until placed again.
pub struct WidgetBase {
    object: ObjectBase,
    geometry: Rect,
    visible: bool,

    pub geometry_changed: Signal<Rect>,
    pub visible_changed: Signal<bool>,
}

impl WidgetBase {
    /// Register a node for widget type `T`.
    pub fn new<T: Object>() -> Self {
        Self {
            object: ObjectBase::new::<T>(),
            geometry: Rect::ZERO,
            visible: true,
            geometry_changed: Signal::new(),
            visible_changed: Signal::new(),
        }
    }

    #[inline]
    pub fn object_id(&self) -> ObjectId {
        self.object.id()
    }

    pub fn name(&self) -> String {
        self.object.name()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.object.set_name(name);
    }

    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.object.set_parent(parent)
    }

    /// Attach below `parent` at position `index` among its children.
    pub fn set_parent_at(&self, parent: Option<ObjectId>, index: usize) -> ObjectResult<()> {
        self.object.set_parent_at(parent, index)
    }

    /// Registered children in display order.
    pub fn children_ids(&self) -> Vec<ObjectId> {
        self.object.children()
    }

    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Emits `geometry_changed` when `rect` differs from the current geometry.
    pub fn set_geometry(&mut self, rect: Rect) {
        if self.geometry == rect {
            return;
        }
        self.geometry = rect;
        self.geometry_changed.emit(rect);
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.geometry.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.set_geometry(Rect::at(self.geometry.origin, size));
    }

    /// Own bounds, origin at zero.
    pub fn rect(&self) -> Rect {
        Rect::at(Point::ZERO, self.size())
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Emits `visible_changed` on an actual change.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        self.visible_changed.emit(visible);
    }
}

static_assertions::assert_impl_all!(WidgetBase: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Blank(WidgetBase);

    impl Object for Blank {
        fn object_id(&self) -> ObjectId {
            self.0.object_id()
        }
    }

    fn blank() -> WidgetBase {
        WidgetBase::new::<Blank>()
    }

    #[test]
    fn test_geometry_changed_fires_once_per_change() {
        let mut base = blank();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        base.geometry_changed.connect(move |r| sink.lock().push(*r));

        base.set_geometry(Rect::new(0.0, 0.0, 80.0, 32.0));
        base.set_geometry(Rect::new(0.0, 0.0, 80.0, 32.0));
        base.set_size(Size::new(120.0, 32.0));

        assert_eq!(
            *seen.lock(),
            vec![Rect::new(0.0, 0.0, 80.0, 32.0), Rect::new(0.0, 0.0, 120.0, 32.0)]
        );
        assert_eq!(base.rect(), Rect::new(0.0, 0.0, 120.0, 32.0));
    }

    #[test]
    fn test_hidden_widget_keeps_geometry() {
        let mut base = blank();
        let toggles = Arc::new(Mutex::new(Vec::new()));
        let sink = toggles.clone();
        base.visible_changed.connect(move |v| sink.lock().push(*v));

        base.set_geometry(Rect::new(0.0, 32.0, 80.0, 32.0));
        base.set_visible(false);
        base.set_visible(false);
        assert_eq!(base.geometry().top(), 32.0);
        base.set_visible(true);

        assert_eq!(*toggles.lock(), vec![false, true]);
    }
}
