//! Icon display widget.
//!
//! Shows a single [`Icon`] at a fixed size and reports clicks through
//! [`ImageWidget::clicked`]. The chips container uses two of these: the
//! trailing action icon and the hidden-count indicator.

use chipflow_core::{Object, ObjectId, Signal};
use chipflow_render::{Icon, Image, Size};

use crate::widget::{SizeHint, Widget, WidgetBase, WidgetEvent};

/// A widget that displays an icon.
pub struct ImageWidget {
    base: WidgetBase,
    icon: Option<Icon>,
    /// Overrides the pixel size of an image icon.
    fixed_size: Option<Size>,

    /// Emitted when the widget is clicked.
    pub clicked: Signal<()>,
}

impl Default for ImageWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWidget {
    /// Create an empty image widget.
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new::<Self>(),
            icon: None,
            fixed_size: None,
            clicked: Signal::new(),
        }
    }

    /// Create an image widget showing `icon`.
    pub fn with_icon(icon: Icon) -> Self {
        let mut widget = Self::new();
        widget.icon = Some(icon);
        widget
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn set_icon(&mut self, icon: Option<Icon>) {
        self.icon = icon;
    }

    pub fn fixed_size(&self) -> Option<Size> {
        self.fixed_size
    }

    pub fn with_fixed_size(mut self, size: Size) -> Self {
        self.fixed_size = Some(size);
        self
    }
}

impl Object for ImageWidget {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for ImageWidget {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        self.fixed_size
            .or_else(|| self.icon.as_ref().and_then(Icon::image).map(Image::size))
            .map(SizeHint::new)
            .unwrap_or_default()
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        if event.primary_click_pos().is_none() {
            return false;
        }
        self.clicked.emit(());
        event.accept();
        true
    }
}

static_assertions::assert_impl_all!(ImageWidget: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{ClickEvent, MouseButton};
    use chipflow_render::{Color, Point};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_size_hint_sources() {
        assert_eq!(ImageWidget::new().size_hint().preferred, Size::ZERO);

        let named = ImageWidget::with_icon(Icon::named("add"));
        assert_eq!(named.size_hint().preferred, Size::ZERO);

        let image = Image::from_color(16, 16, Color::WHITE).unwrap();
        let sized = ImageWidget::with_icon(Icon::from_image(image));
        assert_eq!(sized.size_hint().preferred, Size::new(16.0, 16.0));

        let fixed = ImageWidget::with_icon(Icon::named("add")).with_fixed_size(Size::new(24.0, 24.0));
        assert_eq!(fixed.size_hint().preferred, Size::new(24.0, 24.0));

        let image = Image::from_color(16, 16, Color::WHITE).unwrap();
        let shrunk = ImageWidget::with_icon(Icon::from_image(image)).with_fixed_size(Size::new(8.0, 8.0));
        assert_eq!(shrunk.size_hint().preferred, Size::new(8.0, 8.0));
    }

    #[test]
    fn test_click_emits() {
        let mut widget = ImageWidget::with_icon(Icon::named("add"));
        let clicks = Arc::new(AtomicUsize::new(0));
        let clicks_clone = clicks.clone();
        widget.clicked.connect(move |_| {
            clicks_clone.fetch_add(1, Ordering::SeqCst);
        });

        let mut click = WidgetEvent::from(ClickEvent::left(Point::ZERO));
        assert!(widget.event(&mut click));
        let mut right = WidgetEvent::from(ClickEvent::new(MouseButton::Right, Point::ZERO));
        assert!(!widget.event(&mut right));

        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }
}
