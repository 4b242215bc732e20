use parking_lot::RwLock;

use chipflow_render::Icon;

use super::ChipModel;

/// A ready-made [`ChipModel`] with a mutable label.
///
/// ```
/// use chipflow::model::{ChipModel, SimpleChipModel};
/// use chipflow_render::Icon;
///
/// let model = SimpleChipModel::new("ada", Icon::named("person"), "Ada Lovelace");
/// model.set_chip_text("Ada");
/// assert_eq!(model.chip_text(), "Ada");
/// ```
#[derive(Debug)]
pub struct SimpleChipModel {
    key: String,
    icon: Icon,
    text: RwLock<String>,
}

impl SimpleChipModel {
    pub fn new(key: impl Into<String>, icon: Icon, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            icon,
            text: RwLock::new(text.into()),
        }
    }

    /// Replace the label. Chips already bound to this model keep showing the
    /// old label until they are bound again.
    pub fn set_chip_text(&self, text: impl Into<String>) {
        *self.text.write() = text.into();
    }
}

impl ChipModel for SimpleChipModel {
    fn chip_key(&self) -> String {
        self.key.clone()
    }

    fn chip_icon(&self) -> Icon {
        self.icon.clone()
    }

    fn chip_text(&self) -> String {
        self.text.read().clone()
    }
}

static_assertions::assert_impl_all!(SimpleChipModel: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let model = SimpleChipModel::new("7", Icon::named("boy"), "xxxxx 7");
        assert_eq!(model.chip_key(), "7");
        assert_eq!(model.chip_icon(), Icon::named("boy"));
        assert_eq!(model.chip_text(), "xxxxx 7");
    }

    #[test]
    fn test_set_chip_text() {
        let model = SimpleChipModel::new("1", Icon::named("boy"), "xxxxx 1");
        model.set_chip_text("This is one of the selected Space.");
        assert_eq!(model.chip_text(), "This is one of the selected Space.");
        assert_eq!(model.chip_key(), "1");
    }
}
