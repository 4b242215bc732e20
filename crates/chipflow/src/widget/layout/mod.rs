//! Flow measurement and slot bookkeeping.
//!
//! [`FlowMeasurer`] turns an ordered list of visible children into a
//! [`SlotTable`]. It knows nothing about widgets beyond an id, a kind and a
//! natural size, so it can be exercised without building any widget.

mod flow;
mod slot;

pub use flow::{
    dp_to_px, FlowItem, FlowItemKind, FlowMeasurement, FlowMeasurer, FlowMetrics,
    EDIT_TEXT_MIN_WIDTH_DP, ICON_MIN_SPACE_DP, ICON_SIZE_DP, OVERFLOW_INSET,
};
pub use slot::{LayoutSlot, SlotTable};
