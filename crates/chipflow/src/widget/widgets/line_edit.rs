//! Single-line text input placeholder.
//!
//! The chips container only needs the input's geometry: its natural height
//! sets the reference line height and its width is decided by the container.
//! Text editing itself (cursor, selection, IME) is the host's business; the
//! widget stores the text and hint and reports a natural size for them.

use unicode_segmentation::UnicodeSegmentation;

use chipflow_core::{Object, ObjectId, Signal};
use chipflow_render::Color;

use crate::widget::layout::dp_to_px;
use crate::widget::{SizeHint, Widget, WidgetBase, WidgetEvent};

/// Default height in dp.
const DEFAULT_HEIGHT_DP: f32 = 40.0;
/// Horizontal padding in dp.
const PADDING_DP: f32 = 8.0;
/// Advance per grapheme in dp.
const GLYPH_ADVANCE_DP: f32 = 8.0;

/// A single-line text input.
pub struct LineEdit {
    base: WidgetBase,
    text: String,
    placeholder: String,
    background: Option<Color>,
    density: f32,
    /// Cap applied to the natural height.
    max_height: Option<f32>,

    /// Emitted when the text changes.
    pub text_changed: Signal<String>,
}

impl Default for LineEdit {
    fn default() -> Self {
        Self::new()
    }
}

impl LineEdit {
    /// Create an empty input at density 1.
    pub fn new() -> Self {
        Self::with_density(1.0)
    }

    /// Create an empty input whose dp dimensions scale with `density`.
    pub fn with_density(density: f32) -> Self {
        Self {
            base: WidgetBase::new::<Self>(),
            text: String::new(),
            placeholder: String::new(),
            background: None,
            density,
            max_height: None,
            text_changed: Signal::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the text. Emits `text_changed` if it differs.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text != text {
            self.text = text.clone();
            self.text_changed.emit(text);
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_placeholder(&mut self, text: impl Into<String>) {
        self.placeholder = text.into();
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Set the background color. `None` means no background.
    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    pub fn max_height(&self) -> Option<f32> {
        self.max_height
    }

    pub fn set_max_height(&mut self, height: Option<f32>) {
        self.max_height = height;
    }
}

impl Object for LineEdit {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for LineEdit {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        // Wide enough for whichever of text and placeholder is longer.
        let glyphs = self
            .text
            .graphemes(true)
            .count()
            .max(self.placeholder.graphemes(true).count()) as f32;
        let padding = dp_to_px(PADDING_DP, self.density);
        let width = (padding * 2.0 + glyphs * GLYPH_ADVANCE_DP * self.density).round();

        let mut height = dp_to_px(DEFAULT_HEIGHT_DP, self.density);
        if let Some(max) = self.max_height {
            height = height.min(max);
        }
        SizeHint::from_dimensions(width, height)
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        // Clicks land here so they do not reach the container.
        if event.primary_click_pos().is_none() {
            return false;
        }
        event.accept();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::ClickEvent;
    use chipflow_render::{Point, Size};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_size_hint_uses_longer_of_text_and_placeholder() {
        let mut edit = LineEdit::new();
        edit.set_placeholder("chipflow");
        assert_eq!(edit.size_hint().preferred, Size::new(16.0 + 64.0, 40.0));

        edit.set_text("ab");
        assert_eq!(edit.size_hint().preferred.width, 80.0);

        edit.set_text("0123456789");
        assert_eq!(edit.size_hint().preferred.width, 96.0);
    }

    #[test]
    fn test_density_scaling() {
        let edit = LineEdit::with_density(2.0);
        assert_eq!(edit.size_hint().preferred, Size::new(32.0, 80.0));
    }

    #[test]
    fn test_max_height_caps_natural_height() {
        let mut edit = LineEdit::new();
        edit.set_max_height(Some(36.0));
        assert_eq!(edit.size_hint().preferred.height, 36.0);
        edit.set_max_height(Some(60.0));
        assert_eq!(edit.size_hint().preferred.height, 40.0);
    }

    #[test]
    fn test_text_changed_only_on_change() {
        let mut edit = LineEdit::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        edit.text_changed.connect(move |t| seen_clone.lock().push(t.clone()));

        edit.set_text("ada");
        edit.set_text("ada");
        edit.set_text("");

        assert_eq!(*seen.lock(), vec!["ada".to_string(), String::new()]);
    }

    #[test]
    fn test_consumes_clicks() {
        let mut edit = LineEdit::new();
        let mut click = WidgetEvent::from(ClickEvent::left(Point::new(4.0, 4.0)));
        assert!(edit.event(&mut click));
        assert!(click.is_accepted());
        assert_eq!(edit.background(), None);
    }
}
