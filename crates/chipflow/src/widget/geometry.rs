//! Size hints and size constraints for widget layout.
//!
//! Widgets report what they would like to be through a [`SizeHint`]; the
//! enclosing layout system tells a container how much room it has through
//! [`SizeConstraints`], and the container answers with a size resolved by
//! [`resolve_size`].

use chipflow_render::Size;

/// The size a widget would like to be, before the container constrains it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeHint {
    pub preferred: Size,
}

impl SizeHint {
    pub fn new(preferred: Size) -> Self {
        Self { preferred }
    }

    pub fn from_dimensions(width: f32, height: f32) -> Self {
        Self::new(Size::new(width, height))
    }
}

/// How much room the enclosing layout offers along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SizeConstraint {
    /// The widget must be exactly this size.
    Exactly(f32),
    /// The widget may be as large as this, but no larger.
    AtMost(f32),
    /// No limit; the widget reports its content size.
    #[default]
    Unbounded,
}

impl SizeConstraint {
    /// The available extent, if the constraint has one.
    pub fn available(self) -> Option<f32> {
        match self {
            Self::Exactly(v) | Self::AtMost(v) => Some(v.max(0.0)),
            Self::Unbounded => None,
        }
    }

    /// Check if the constraint imposes no limit.
    pub fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

/// Per-pass constraints for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeConstraints {
    pub width: SizeConstraint,
    pub height: SizeConstraint,
}

impl SizeConstraints {
    pub fn new(width: SizeConstraint, height: SizeConstraint) -> Self {
        Self { width, height }
    }

    /// A bounded width with an unbounded height, the common case for a
    /// vertically growing container.
    pub fn at_most_width(width: f32) -> Self {
        Self::new(SizeConstraint::AtMost(width), SizeConstraint::Unbounded)
    }

    /// Exact constraints on both axes.
    pub fn exact(size: Size) -> Self {
        Self::new(
            SizeConstraint::Exactly(size.width),
            SizeConstraint::Exactly(size.height),
        )
    }

    /// No constraints at all.
    pub fn unbounded() -> Self {
        Self::default()
    }
}

/// Reconcile a content extent with a constraint.
///
/// An exact constraint wins, an at-most constraint clamps, and an unbounded
/// constraint reports the content extent unchanged.
pub fn resolve_size(content: f32, constraint: SizeConstraint) -> f32 {
    match constraint {
        SizeConstraint::Exactly(v) => v,
        SizeConstraint::AtMost(v) => content.min(v),
        SizeConstraint::Unbounded => content,
    }
}
