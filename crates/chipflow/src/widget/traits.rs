//! The widget trait.

use chipflow_core::Object;
use chipflow_render::{Point, Rect};

use super::base::WidgetBase;
use super::events::WidgetEvent;
use super::geometry::SizeHint;

/// Something the chips container can measure, place, hide and click.
///
/// Widgets never paint. Implementors hand out their [`WidgetBase`] and report
/// a size hint; everything else has a default.
///
/// ```
/// use chipflow::widget::{SizeHint, Widget, WidgetBase};
/// use chipflow_core::{Object, ObjectId};
///
/// struct Spacer {
///     base: WidgetBase,
/// }
///
/// impl Object for Spacer {
///     fn object_id(&self) -> ObjectId {
///         self.base.object_id()
///     }
/// }
///
/// impl Widget for Spacer {
///     fn widget_base(&self) -> &WidgetBase { &self.base }
///     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
///     fn size_hint(&self) -> SizeHint { SizeHint::from_dimensions(8.0, 8.0) }
/// }
/// ```
pub trait Widget: Object + Send + Sync {
    fn widget_base(&self) -> &WidgetBase;

    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// Natural size, before any container constraint.
    fn size_hint(&self) -> SizeHint;

    fn geometry(&self) -> Rect {
        self.widget_base().geometry()
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.widget_base_mut().set_geometry(rect);
    }

    fn is_visible(&self) -> bool {
        self.widget_base().is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.widget_base_mut().set_visible(visible);
    }

    fn show(&mut self) {
        self.set_visible(true);
    }

    fn hide(&mut self) {
        self.set_visible(false);
    }

    /// Returns `true` if the widget consumed the event.
    fn event(&mut self, _event: &mut WidgetEvent) -> bool {
        false
    }

    /// Convert a point in the parent's coordinates to this widget's.
    fn map_from_parent(&self, point: Point) -> Point {
        self.geometry().to_local(point)
    }
}
