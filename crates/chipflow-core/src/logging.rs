//! `tracing` targets and debugging aids.
//!
//! chipflow never installs a subscriber. Hosts pick what they want to see by
//! target, for example:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("chipflow::layout=debug,chipflow::collapse=debug")
//!     .init();
//! ```

use std::fmt::{self, Write as _};

use crate::error::ObjectResult;
use crate::object::{global_registry, ObjectId};

/// Target names, one per subsystem.
pub mod targets {
    pub const SIGNAL: &str = "chipflow_core::signal";
    pub const OBJECT: &str = "chipflow_core::object";
    /// Badge rasterization and icon loading.
    pub const RENDER: &str = "chipflow_render";
    /// TOML loading and builder validation.
    pub const CONFIG: &str = "chipflow::config";
    /// Measurement, placement and child bookkeeping.
    pub const LAYOUT: &str = "chipflow::layout";
    /// Chip tap handling.
    pub const CHIP: &str = "chipflow::chip";
    pub const COLLAPSE: &str = "chipflow::collapse";
    /// Timed passes, see [`PerfSpan`](super::PerfSpan).
    pub const PERF: &str = "chipflow::perf";
}

/// Branch glyphs for [`ObjectTreeDebug`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    Ascii,
    #[default]
    Unicode,
}

impl TreeStyle {
    /// (continuing ancestor, middle child, last child)
    fn glyphs(self) -> (&'static str, &'static str, &'static str) {
        match self {
            TreeStyle::Ascii => ("|   ", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}   ", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
        }
    }
}

/// What each line of a tree dump shows besides the object name.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    pub style: TreeStyle,
    pub show_ids: bool,
    /// Short type name, without module path or generics.
    pub show_types: bool,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::Unicode,
            show_ids: true,
            show_types: true,
        }
    }
}

impl TreeFormatOptions {
    /// Names only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_types: false,
            ..Self::default()
        }
    }
}

/// Renders part of the object tree as indented text, one object per line.
///
/// Its `Display` impl prints every root in the global registry.
#[derive(Debug, Clone, Default)]
pub struct ObjectTreeDebug {
    options: TreeFormatOptions,
}

impl ObjectTreeDebug {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Dump `root` and everything below it.
    pub fn format_subtree(&self, root: ObjectId) -> ObjectResult<String> {
        let mut out = String::new();
        // Each entry records whether that ancestor was the last of its siblings.
        let mut stack: Vec<(ObjectId, Vec<bool>)> = vec![(root, Vec::new())];

        while let Some((id, trail)) = stack.pop() {
            self.write_line(&mut out, id, &trail)?;

            let children = global_registry().children(id)?;
            let last = children.len().saturating_sub(1);
            for (i, child) in children.into_iter().enumerate().rev() {
                let mut child_trail = trail.clone();
                child_trail.push(i == last);
                stack.push((child, child_trail));
            }
        }
        Ok(out)
    }

    fn write_line(&self, out: &mut String, id: ObjectId, trail: &[bool]) -> ObjectResult<()> {
        let registry = global_registry();
        let (pipe, tee, corner) = self.options.style.glyphs();

        if let Some((&is_last, ancestors)) = trail.split_last() {
            for &ancestor_last in ancestors {
                out.push_str(if ancestor_last { "    " } else { pipe });
            }
            out.push_str(if is_last { corner } else { tee });
        }

        let name = registry.object_name(id)?;
        out.push_str(if name.is_empty() { "(unnamed)" } else { &name });
        if self.options.show_ids {
            let _ = write!(out, " [{id:?}]");
        }
        if self.options.show_types {
            let _ = write!(out, " ({})", short_type_name(registry.type_name(id)?));
        }
        out.push('\n');
        Ok(())
    }
}

/// `chipflow::widget::Chip<chipflow::SimpleChipModel>` becomes `Chip`.
fn short_type_name(full: &str) -> &str {
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

impl fmt::Display for ObjectTreeDebug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for root in global_registry().root_objects() {
            match self.format_subtree(root) {
                Ok(tree) => f.write_str(&tree)?,
                // A root can vanish between listing and formatting.
                Err(e) => writeln!(f, "<{e}>")?,
            }
        }
        Ok(())
    }
}

/// Keeps a `debug` span on [`targets::PERF`] entered until dropped.
#[derive(Debug)]
pub struct PerfSpan {
    _entered: tracing::span::EnteredSpan,
}

impl PerfSpan {
    pub fn new(operation: &'static str) -> Self {
        Self {
            _entered: tracing::debug_span!(target: targets::PERF, "perf", operation).entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Object, ObjectBase};

    struct Item(ObjectBase);

    impl Item {
        fn named(name: &str) -> Self {
            let item = Self(ObjectBase::new::<Self>());
            item.0.set_name(name);
            item
        }

        fn under(self, parent: &Item) -> Self {
            self.0.set_parent(Some(parent.object_id())).unwrap();
            self
        }
    }

    impl Object for Item {
        fn object_id(&self) -> ObjectId {
            self.0.id()
        }
    }

    #[test]
    fn test_single_line_shows_type() {
        let item = Item::named("root");
        let out = ObjectTreeDebug::new().format_subtree(item.object_id()).unwrap();
        assert!(out.starts_with("root ["));
        assert!(out.trim_end().ends_with("(Item)"));
    }

    #[test]
    fn test_nested_ascii_prefixes() {
        let chips = Item::named("chips");
        let ada = Item::named("ada").under(&chips);
        let _badge = Item::named("badge").under(&ada);
        let _input = Item::named("input").under(&chips);

        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::minimal()
        };
        let out = ObjectTreeDebug::with_options(options)
            .format_subtree(chips.object_id())
            .unwrap();

        assert_eq!(out, "chips\n+-- ada\n|   `-- badge\n`-- input\n");
    }

    #[test]
    fn test_unnamed_placeholder() {
        let item = Item(ObjectBase::new::<Item>());
        let out = ObjectTreeDebug::with_options(TreeFormatOptions::minimal())
            .format_subtree(item.object_id())
            .unwrap();
        assert_eq!(out, "(unnamed)\n");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("a::b::Chip<x::Model>"), "Chip");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn test_perf_span_enters() {
        let _span = PerfSpan::new("measure");
    }
}
