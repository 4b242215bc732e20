//! Construction-time configuration for [`ChipsLayout`](crate::ChipsLayout).
//!
//! A configuration is built in code with the `with_*` methods or loaded from
//! TOML:
//!
//! ```toml
//! hint = "Add people"
//! app_name = "Contacts"
//! input_background = "#FFFFFF"
//! action_icon = "add"
//! delete_glyph = { path = "icons/delete.png" }
//! density = 2.0
//!
//! [badge]
//! size = 24
//! text_size = 13.0
//! color = "#888888"
//! ```
//!
//! Every key is optional. Icons are either a name resolved by the host or a
//! `{ path = "..." }` table.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use chipflow_core::logging::targets;
use chipflow_render::{BadgeStyle, Color, Icon};

use crate::error::ConfigError;
use crate::widget::layout::dp_to_px;

/// Hint fallback when no hint is configured.
pub const DEFAULT_APP_NAME: &str = "chipflow";

/// Settings applied once when a [`ChipsLayout`](crate::ChipsLayout) is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ChipsLayoutConfig {
    /// Placeholder hint of the input. Empty means `app_name`.
    pub hint: String,
    /// Fallback hint.
    pub app_name: String,
    /// Input background; `None` draws none.
    pub input_background: Option<Color>,
    /// Icon after the input.
    pub action_icon: Icon,
    /// Glyph a selected chip shows in place of its icon.
    pub delete_glyph: Icon,
    /// Physical pixels per dp.
    pub density: f32,
    /// Hidden-count badge style, in dp.
    pub badge_style: BadgeStyle,
}

impl Default for ChipsLayoutConfig {
    fn default() -> Self {
        Self {
            hint: String::new(),
            app_name: DEFAULT_APP_NAME.to_string(),
            input_background: None,
            action_icon: Icon::named("add"),
            delete_glyph: Icon::named("delete"),
            density: 1.0,
            badge_style: BadgeStyle::default(),
        }
    }
}

impl ChipsLayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn with_input_background(mut self, color: Color) -> Self {
        self.input_background = Some(color);
        self
    }

    pub fn with_action_icon(mut self, icon: Icon) -> Self {
        self.action_icon = icon;
        self
    }

    pub fn with_delete_glyph(mut self, icon: Icon) -> Self {
        self.delete_glyph = icon;
        self
    }

    /// Set the density. Values that are not finite and positive fall back to 1.
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = if density.is_finite() && density > 0.0 {
            density
        } else {
            tracing::warn!(target: targets::CONFIG, density, "ignoring invalid density");
            1.0
        };
        self
    }

    pub fn with_badge_style(mut self, style: BadgeStyle) -> Self {
        self.badge_style = style;
        self
    }

    /// The hint the input shows.
    pub fn effective_hint(&self) -> &str {
        if self.hint.is_empty() {
            &self.app_name
        } else {
            &self.hint
        }
    }

    /// Convert dp to physical pixels at this density.
    pub fn dp_to_px(&self, dp: f32) -> f32 {
        dp_to_px(dp, self.density)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(source)?;
        file.into_config()
    }

    /// Read and parse a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded config");
        Ok(config)
    }
}

/// On-disk shape of the configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    hint: Option<String>,
    app_name: Option<String>,
    input_background: Option<String>,
    action_icon: Option<IconEntry>,
    delete_glyph: Option<IconEntry>,
    density: Option<f32>,
    badge: Option<BadgeFile>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IconEntry {
    Named(String),
    Path { path: PathBuf },
}

impl From<IconEntry> for Icon {
    fn from(entry: IconEntry) -> Self {
        match entry {
            IconEntry::Named(name) => Icon::named(name),
            IconEntry::Path { path } => Icon::from_path(path),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct BadgeFile {
    size: Option<u32>,
    text_size: Option<f32>,
    color: Option<String>,
}

fn parse_color(value: &str) -> Result<Color, ConfigError> {
    Color::from_hex(value).ok_or_else(|| ConfigError::InvalidColor(value.to_string()))
}

impl ConfigFile {
    fn into_config(self) -> Result<ChipsLayoutConfig, ConfigError> {
        let mut config = ChipsLayoutConfig::default();

        if let Some(hint) = self.hint {
            config.hint = hint;
        }
        if let Some(app_name) = self.app_name {
            config.app_name = app_name;
        }
        if let Some(color) = self.input_background {
            config.input_background = Some(parse_color(&color)?);
        }
        if let Some(icon) = self.action_icon {
            config.action_icon = icon.into();
        }
        if let Some(icon) = self.delete_glyph {
            config.delete_glyph = icon.into();
        }
        if let Some(density) = self.density {
            if !density.is_finite() || density <= 0.0 {
                return Err(ConfigError::InvalidDensity(density));
            }
            config.density = density;
        }
        if let Some(badge) = self.badge {
            if let Some(size) = badge.size {
                if size == 0 {
                    return Err(ConfigError::InvalidBadgeSize);
                }
                config.badge_style.size = size;
            }
            if let Some(text_size) = badge.text_size {
                config.badge_style.text_size = text_size;
            }
            if let Some(color) = badge.color {
                config.badge_style.color = parse_color(&color)?;
            }
        }

        Ok(config)
    }
}
