//! A single selectable, deletable chip.
//!
//! A chip shows an icon followed by a label. It has two interaction states:
//!
//! | state    | gesture | next     | effect          |
//! |----------|---------|----------|-----------------|
//! | Normal   | Body    | Selected | `Select`        |
//! | Selected | Body    | Normal   | `Restore`       |
//! | Normal   | Icon    | Selected | `Select`        |
//! | Selected | Icon    | Selected | `RequestDelete` |
//!
//! While selected the chip draws a pressed background and shows the delete
//! glyph in place of its icon. Tapping the glyph asks the registered
//! [`ChipListener`] to delete the chip; the chip itself does not go away.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use chipflow::model::SimpleChipModel;
//! use chipflow::widget::widgets::{Chip, ChipGesture, ChipState};
//! use chipflow_render::Icon;
//!
//! let mut chip = Chip::new();
//! chip.set_model(Some(Arc::new(SimpleChipModel::new("1", Icon::named("boy"), "Ada"))));
//!
//! chip.handle_gesture(ChipGesture::Body);
//! assert_eq!(chip.state(), ChipState::Selected);
//! assert_eq!(chip.displayed_icon(), Some(&Icon::named("delete")));
//! ```

use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use chipflow_core::logging::targets;
use chipflow_core::{Object, ObjectId, Signal};
use chipflow_render::{Icon, Point, Rect, Size};

use crate::model::ChipModel;
use crate::widget::layout::dp_to_px;
use crate::widget::{SizeHint, Widget, WidgetBase, WidgetEvent};

/// Interaction state of a chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChipState {
    #[default]
    Normal,
    Selected,
}

/// Which part of the chip was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChipGesture {
    /// Anywhere on the chip outside the icon region.
    Body,
    /// The icon region at the start of the chip.
    Icon,
}

/// What a transition asks the chip to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChipEffect {
    /// Pressed background, delete glyph.
    Select,
    /// Normal background, bound icon.
    Restore,
    /// Notify the listener that the chip should be deleted.
    RequestDelete,
}

impl ChipState {
    /// The state machine. Pure; every (state, gesture) pair is defined.
    pub fn transition(self, gesture: ChipGesture) -> (ChipState, ChipEffect) {
        match (self, gesture) {
            (ChipState::Normal, _) => (ChipState::Selected, ChipEffect::Select),
            (ChipState::Selected, ChipGesture::Body) => (ChipState::Normal, ChipEffect::Restore),
            (ChipState::Selected, ChipGesture::Icon) => {
                (ChipState::Selected, ChipEffect::RequestDelete)
            }
        }
    }

    pub fn is_selected(self) -> bool {
        self == ChipState::Selected
    }
}

/// Background the host should draw behind the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChipBackground {
    #[default]
    Normal,
    Pressed,
}

/// Receives delete requests from chips.
pub trait ChipListener: Send + Sync {
    /// The chip `chip` asked to be deleted.
    fn on_delete(&self, chip: ObjectId);
}

/// Dimensions used to derive a chip's natural size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChipMetrics {
    /// Horizontal padding on each side.
    pub padding: f32,
    /// Edge length of the icon.
    pub icon_size: f32,
    /// Gap between icon and label.
    pub spacing: f32,
    /// Advance per grapheme of the label.
    pub glyph_advance: f32,
    /// Chip height.
    pub height: f32,
}

impl Default for ChipMetrics {
    fn default() -> Self {
        Self {
            padding: 8.0,
            icon_size: 24.0,
            spacing: 6.0,
            glyph_advance: 7.0,
            height: 32.0,
        }
    }
}

impl ChipMetrics {
    /// Scale dp metrics to pixels.
    pub fn scaled(&self, density: f32) -> Self {
        Self {
            padding: dp_to_px(self.padding, density),
            icon_size: dp_to_px(self.icon_size, density),
            spacing: dp_to_px(self.spacing, density),
            glyph_advance: self.glyph_advance * density,
            height: dp_to_px(self.height, density),
        }
    }

    /// Natural width for a label.
    pub fn natural_width(&self, text: &str) -> f32 {
        let glyphs = text.graphemes(true).count() as f32;
        (self.padding * 2.0 + self.icon_size + self.spacing + glyphs * self.glyph_advance).round()
    }

    /// Right edge of the icon hit region, in chip-local coordinates.
    pub fn icon_region_end(&self) -> f32 {
        self.padding + self.icon_size + self.spacing / 2.0
    }
}

/// A chip widget bound to an entity of type `M`.
pub struct Chip<M: ChipModel> {
    base: WidgetBase,
    model: Option<Arc<M>>,
    state: ChipState,
    background: ChipBackground,
    /// Icon restored when leaving the selected state.
    icon: Option<Icon>,
    /// Icon currently shown.
    displayed_icon: Option<Icon>,
    text: String,
    delete_glyph: Icon,
    metrics: ChipMetrics,
    fixed_size: Option<Size>,
    listener: Option<Arc<dyn ChipListener>>,

    /// Emitted with the new state whenever the state changes.
    pub state_changed: Signal<ChipState>,

    /// Emitted with this chip's id when a delete is requested.
    pub delete_requested: Signal<ObjectId>,
}

impl<M: ChipModel> Default for Chip<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ChipModel> Chip<M> {
    /// Create an unbound chip with default metrics and the `"delete"` glyph.
    pub fn new() -> Self {
        Self::with_style(ChipMetrics::default(), Icon::named("delete"))
    }

    /// Create an unbound chip with pixel metrics and a delete glyph.
    pub fn with_style(metrics: ChipMetrics, delete_glyph: Icon) -> Self {
        Self {
            base: WidgetBase::new::<Self>(),
            model: None,
            state: ChipState::Normal,
            background: ChipBackground::Normal,
            icon: None,
            displayed_icon: None,
            text: String::new(),
            delete_glyph,
            metrics,
            fixed_size: None,
            listener: None,
            state_changed: Signal::new(),
            delete_requested: Signal::new(),
        }
    }

    // =========================================================================
    // Model binding
    // =========================================================================

    pub fn model(&self) -> Option<&Arc<M>> {
        self.model.as_ref()
    }

    /// Bind an entity and show its icon and label.
    ///
    /// Binding `None` drops the entity but leaves the icon and label that
    /// were showing.
    pub fn set_model(&mut self, model: Option<Arc<M>>) {
        self.model = model;
        let Some(model) = self.model.clone() else {
            return;
        };
        self.set_icon(model.chip_icon());
        self.set_text(model.chip_text());
    }

    // =========================================================================
    // Visuals
    // =========================================================================

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    /// The icon being shown: the bound icon, or the delete glyph while selected.
    pub fn displayed_icon(&self) -> Option<&Icon> {
        self.displayed_icon.as_ref()
    }

    /// Show `icon` now and restore it when leaving the selected state.
    pub fn set_icon(&mut self, icon: Icon) {
        self.displayed_icon = Some(icon.clone());
        self.icon = Some(icon);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn delete_glyph(&self) -> &Icon {
        &self.delete_glyph
    }

    pub fn background(&self) -> ChipBackground {
        self.background
    }

    pub fn metrics(&self) -> &ChipMetrics {
        &self.metrics
    }

    /// Override the natural size. `None` goes back to the metrics-derived size.
    pub fn set_fixed_size(&mut self, size: Option<Size>) {
        self.fixed_size = size;
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    pub fn state(&self) -> ChipState {
        self.state
    }

    /// Register the delete sink, replacing any earlier one.
    pub fn set_listener(&mut self, listener: Arc<dyn ChipListener>) {
        self.listener = Some(listener);
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn has_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Which region a chip-local point falls in.
    pub fn hit_test(&self, local: Point) -> ChipGesture {
        if local.x < self.metrics.icon_region_end() {
            ChipGesture::Icon
        } else {
            ChipGesture::Body
        }
    }

    /// The icon hit region in chip-local coordinates.
    pub fn icon_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.metrics.icon_region_end(), self.base.size().height)
    }

    /// Run one gesture through the state machine and apply its effect.
    pub fn handle_gesture(&mut self, gesture: ChipGesture) -> ChipEffect {
        let previous = self.state;
        let (next, effect) = previous.transition(gesture);

        match effect {
            ChipEffect::Select => {
                self.background = ChipBackground::Pressed;
                self.displayed_icon = Some(self.delete_glyph.clone());
            }
            ChipEffect::Restore => {
                self.background = ChipBackground::Normal;
                self.displayed_icon = self.icon.clone();
            }
            ChipEffect::RequestDelete => self.request_delete(),
        }
        self.state = next;

        tracing::debug!(
            target: targets::CHIP,
            id = ?self.object_id(),
            ?gesture,
            ?previous,
            ?next,
            ?effect,
            "chip gesture"
        );

        if next != previous {
            self.state_changed.emit(next);
        }
        effect
    }

    fn request_delete(&self) {
        let id = self.object_id();
        self.delete_requested.emit(id);
        match &self.listener {
            Some(listener) => listener.on_delete(id),
            None => tracing::debug!(target: targets::CHIP, ?id, "delete requested without listener"),
        }
    }
}

impl<M: ChipModel> Object for Chip<M> {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl<M: ChipModel> Widget for Chip<M> {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        match self.fixed_size {
            Some(size) => SizeHint::new(size),
            None => SizeHint::from_dimensions(
                self.metrics.natural_width(&self.text),
                self.metrics.height,
            ),
        }
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        let Some(pos) = event.primary_click_pos() else {
            return false;
        };
        let gesture = self.hit_test(pos);
        self.handle_gesture(gesture);
        event.accept();
        true
    }
}

static_assertions::assert_impl_all!(Chip<crate::model::SimpleChipModel>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SimpleChipModel;
    use crate::widget::{ClickEvent, MouseButton};
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingListener {
        deleted: Mutex<Vec<ObjectId>>,
    }

    impl ChipListener for RecordingListener {
        fn on_delete(&self, chip: ObjectId) {
            self.deleted.lock().push(chip);
        }
    }

    fn bound_chip(text: &str) -> Chip<SimpleChipModel> {
        let mut chip = Chip::new();
        chip.set_model(Some(Arc::new(SimpleChipModel::new(
            "k",
            Icon::named("boy"),
            text,
        ))));
        chip
    }

    #[test]
    fn test_transition_table() {
        assert_eq!(
            ChipState::Normal.transition(ChipGesture::Body),
            (ChipState::Selected, ChipEffect::Select)
        );
        assert_eq!(
            ChipState::Selected.transition(ChipGesture::Body),
            (ChipState::Normal, ChipEffect::Restore)
        );
        assert_eq!(
            ChipState::Normal.transition(ChipGesture::Icon),
            (ChipState::Selected, ChipEffect::Select)
        );
        assert_eq!(
            ChipState::Selected.transition(ChipGesture::Icon),
            (ChipState::Selected, ChipEffect::RequestDelete)
        );
    }

    #[test]
    fn test_bind_model() {
        let chip = bound_chip("Ada");
        assert_eq!(chip.text(), "Ada");
        assert_eq!(chip.icon(), Some(&Icon::named("boy")));
        assert_eq!(chip.displayed_icon(), Some(&Icon::named("boy")));
        assert_eq!(chip.state(), ChipState::Normal);
    }

    #[test]
    fn test_bind_absent_model_keeps_visuals() {
        let mut chip = bound_chip("Ada");
        chip.set_model(None);
        assert!(chip.model().is_none());
        assert_eq!(chip.text(), "Ada");
        assert_eq!(chip.icon(), Some(&Icon::named("boy")));
    }

    #[test]
    fn test_select_and_restore() {
        let mut chip = bound_chip("Ada");

        assert_eq!(chip.handle_gesture(ChipGesture::Body), ChipEffect::Select);
        assert_eq!(chip.background(), ChipBackground::Pressed);
        assert_eq!(chip.displayed_icon(), Some(&Icon::named("delete")));

        assert_eq!(chip.handle_gesture(ChipGesture::Body), ChipEffect::Restore);
        assert_eq!(chip.state(), ChipState::Normal);
        assert_eq!(chip.background(), ChipBackground::Normal);
        assert_eq!(chip.displayed_icon(), Some(&Icon::named("boy")));
    }

    #[test]
    fn test_icon_tap_twice_requests_delete() {
        let mut chip = bound_chip("Ada");
        let listener = Arc::new(RecordingListener::default());
        chip.set_listener(listener.clone());

        assert_eq!(chip.handle_gesture(ChipGesture::Icon), ChipEffect::Select);
        assert!(listener.deleted.lock().is_empty());

        assert_eq!(chip.handle_gesture(ChipGesture::Icon), ChipEffect::RequestDelete);
        assert_eq!(*listener.deleted.lock(), vec![chip.object_id()]);
        assert_eq!(chip.state(), ChipState::Selected);
    }

    #[test]
    fn test_listener_is_replaced() {
        let mut chip = bound_chip("Ada");
        let first = Arc::new(RecordingListener::default());
        let second = Arc::new(RecordingListener::default());
        chip.set_listener(first.clone());
        chip.set_listener(second.clone());

        chip.handle_gesture(ChipGesture::Icon);
        chip.handle_gesture(ChipGesture::Icon);

        assert!(first.deleted.lock().is_empty());
        assert_eq!(second.deleted.lock().len(), 1);

        chip.clear_listener();
        assert!(!chip.has_listener());
        chip.handle_gesture(ChipGesture::Icon);
        assert_eq!(second.deleted.lock().len(), 1);
    }

    #[test]
    fn test_signals() {
        let mut chip = bound_chip("Ada");
        let states = Arc::new(Mutex::new(Vec::new()));
        let deletes = Arc::new(Mutex::new(Vec::new()));

        let states_clone = states.clone();
        chip.state_changed.connect(move |s| states_clone.lock().push(*s));
        let deletes_clone = deletes.clone();
        chip.delete_requested.connect(move |id| deletes_clone.lock().push(*id));

        chip.handle_gesture(ChipGesture::Icon);
        chip.handle_gesture(ChipGesture::Icon);
        chip.handle_gesture(ChipGesture::Body);

        assert_eq!(*states.lock(), vec![ChipState::Selected, ChipState::Normal]);
        assert_eq!(*deletes.lock(), vec![chip.object_id()]);
    }

    #[test]
    fn test_set_icon_while_selected_is_restored_later() {
        let mut chip = bound_chip("Ada");
        chip.handle_gesture(ChipGesture::Body);
        chip.set_icon(Icon::named("girl"));
        chip.handle_gesture(ChipGesture::Body);
        assert_eq!(chip.displayed_icon(), Some(&Icon::named("girl")));
    }

    #[test]
    fn test_hit_test() {
        let chip = bound_chip("Ada");
        // padding 8 + icon 24 + half of spacing 6
        assert_eq!(chip.hit_test(Point::new(0.0, 10.0)), ChipGesture::Icon);
        assert_eq!(chip.hit_test(Point::new(34.9, 10.0)), ChipGesture::Icon);
        assert_eq!(chip.hit_test(Point::new(35.0, 10.0)), ChipGesture::Body);
    }

    #[test]
    fn test_click_event_drives_gestures() {
        let mut chip = bound_chip("Ada");

        let mut click = WidgetEvent::from(ClickEvent::left(Point::new(60.0, 10.0)));
        assert!(chip.event(&mut click));
        assert!(click.is_accepted());
        assert_eq!(chip.state(), ChipState::Selected);

        let mut right = WidgetEvent::from(ClickEvent::new(MouseButton::Right, Point::new(60.0, 10.0)));
        assert!(!chip.event(&mut right));
        assert_eq!(chip.state(), ChipState::Selected);
    }

    #[test]
    fn test_natural_size() {
        let chip = bound_chip("xxxxx 1");
        // 8 * 2 + 24 + 6 + 7 graphemes * 7
        assert_eq!(chip.size_hint().preferred, Size::new(95.0, 32.0));

        let accented = bound_chip("e\u{301}");
        assert_eq!(accented.size_hint().preferred.width, 53.0);
    }

    #[test]
    fn test_fixed_size_override() {
        let mut chip = bound_chip("a much longer label than fits");
        chip.set_fixed_size(Some(Size::new(80.0, 32.0)));
        assert_eq!(chip.size_hint().preferred, Size::new(80.0, 32.0));
        chip.set_fixed_size(None);
        assert!(chip.size_hint().preferred.width > 80.0);
    }

    #[test]
    fn test_scaled_metrics() {
        let metrics = ChipMetrics::default().scaled(2.0);
        assert_eq!(metrics.padding, 16.0);
        assert_eq!(metrics.icon_size, 48.0);
        assert_eq!(metrics.height, 64.0);
        assert_eq!(metrics.glyph_advance, 14.0);
    }
}
