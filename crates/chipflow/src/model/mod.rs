//! Chip entities.
//!
//! A chip displays one entity supplied by the host. The container never
//! creates entities; it keeps the `Arc`s it was given, in insertion order.

mod simple;

pub use simple::SimpleChipModel;

use chipflow_render::Icon;

/// The data a chip displays.
///
/// Keys are expected to be unique within one container; the container does
/// not check.
pub trait ChipModel: Send + Sync + 'static {
    /// Stable identity of the entity.
    fn chip_key(&self) -> String;

    /// Icon shown at the start of the chip.
    fn chip_icon(&self) -> Icon;

    /// Label shown next to the icon.
    fn chip_text(&self) -> String;
}
