//! Icon references.
//!
//! An [`Icon`] is an opaque handle the widgets pass around and compare; they
//! never decode or draw it themselves. Hosts resolve named and path icons
//! when painting.

use std::path::{Path, PathBuf};

use crate::raster::Image;

/// Where an icon's pixels come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Icon {
    /// A symbolic name resolved by the host (for example `"add"`).
    Named(String),
    /// A file the host loads on demand.
    Path(PathBuf),
    /// Pixels already in memory, such as a rendered badge.
    Image(Image),
}

impl Icon {
    pub fn named(name: impl Into<String>) -> Self {
        Icon::Named(name.into())
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Icon::Path(path.into())
    }

    pub fn from_image(image: Image) -> Self {
        Icon::Image(image)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Icon::Named(name) => Some(name),
            _ => None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Icon::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&Image> {
        match self {
            Icon::Image(image) => Some(image),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Size};

    #[test]
    fn test_named_icon() {
        let icon = Icon::named("add");
        assert_eq!(icon.name(), Some("add"));
        assert!(icon.image().is_none());
        assert_eq!(icon, Icon::named("add"));
        assert_ne!(icon, Icon::named("delete"));
    }

    #[test]
    fn test_image_icon() {
        let image = Image::from_color(24, 24, Color::WHITE).unwrap();
        let icon = Icon::from_image(image);
        assert_eq!(icon.image().map(Image::size), Some(Size::new(24.0, 24.0)));
        assert!(icon.name().is_none());
    }

    #[test]
    fn test_path_icon() {
        let icon = Icon::from_path("icons/avatar.png");
        assert_eq!(icon.path(), Some(Path::new("icons/avatar.png")));
        assert!(icon.path().is_some() && icon.name().is_none());
    }
}
