//! Input delivered to widgets.
//!
//! The chips widgets only react to completed clicks, so that is all this
//! module models. Positions are local to the receiving widget.

use chipflow_render::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

/// A press and release on the same widget.
#[derive(Debug, Clone, Copy)]
pub struct ClickEvent {
    pub button: MouseButton,
    pub local_pos: Point,
    accepted: bool,
}

impl ClickEvent {
    pub fn new(button: MouseButton, local_pos: Point) -> Self {
        Self {
            button,
            local_pos,
            accepted: false,
        }
    }

    pub fn left(local_pos: Point) -> Self {
        Self::new(MouseButton::Left, local_pos)
    }
}

/// What [`Widget::event`](super::Widget::event) receives.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum WidgetEvent {
    Click(ClickEvent),
}

impl WidgetEvent {
    /// Set once a widget has consumed the event.
    pub fn is_accepted(&self) -> bool {
        match self {
            Self::Click(click) => click.accepted,
        }
    }

    pub fn accept(&mut self) {
        match self {
            Self::Click(click) => click.accepted = true,
        }
    }

    /// Where a left click landed. `None` for anything else.
    pub fn primary_click_pos(&self) -> Option<Point> {
        match self {
            Self::Click(click) if click.button == MouseButton::Left => Some(click.local_pos),
            Self::Click(_) => None,
        }
    }
}

impl From<ClickEvent> for WidgetEvent {
    fn from(click: ClickEvent) -> Self {
        Self::Click(click)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_sticks() {
        let mut event = WidgetEvent::from(ClickEvent::left(Point::new(1.0, 2.0)));
        assert!(!event.is_accepted());
        event.accept();
        event.accept();
        assert!(event.is_accepted());
    }

    #[test]
    fn test_only_left_clicks_have_a_primary_position() {
        let left = WidgetEvent::from(ClickEvent::left(Point::new(3.0, 4.0)));
        assert_eq!(left.primary_click_pos(), Some(Point::new(3.0, 4.0)));

        let right = WidgetEvent::from(ClickEvent::new(MouseButton::Right, Point::ZERO));
        assert_eq!(right.primary_click_pos(), None);
    }
}
