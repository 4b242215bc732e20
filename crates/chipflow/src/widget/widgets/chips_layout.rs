//! The chips container.
//!
//! [`ChipsLayout`] arranges one [`Chip`] per entity in a wrapping flow,
//! followed by a single-line input and a trailing action icon. When the chips
//! span more than one line the container can collapse to its first line and
//! show a `+N` badge counting the chips it hid.
//!
//! Children are kept in this order:
//!
//! ```text
//! chip 0, chip 1, ..., chip n-1, input, action icon, more indicator
//! ```
//!
//! The action icon and the more indicator are never visible at the same time.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use chipflow::model::SimpleChipModel;
//! use chipflow::widget::SizeConstraints;
//! use chipflow::widget::widgets::{ChipsLayout, LayoutMode};
//! use chipflow_render::Icon;
//!
//! let mut chips = ChipsLayout::<SimpleChipModel>::new();
//! chips.add_chips((0..9).map(|i| {
//!     Arc::new(SimpleChipModel::new(i.to_string(), Icon::named("boy"), format!("Contact {i}")))
//! }));
//!
//! let size = chips.layout(SizeConstraints::at_most_width(300.0));
//! assert!(size.width <= 300.0);
//!
//! chips.collapse();
//! assert_eq!(chips.mode(), LayoutMode::Collapsed);
//! chips.expand();
//! assert_eq!(chips.mode(), LayoutMode::Expanded);
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use chipflow_core::logging::targets;
use chipflow_core::{Object, ObjectId, PerfSpan, Signal};
use chipflow_render::{BoxGlyphRasterizer, Icon, Point, Rect, Size, TextRasterizer};

use crate::config::ChipsLayoutConfig;
use crate::error::Result;
use crate::model::ChipModel;
use crate::widget::layout::{
    FlowItem, FlowItemKind, FlowMeasurer, FlowMetrics, SlotTable, ICON_SIZE_DP,
};
use crate::widget::{
    resolve_size, ClickEvent, SizeConstraints, SizeHint, Widget, WidgetBase, WidgetEvent,
};

use super::chip::{Chip, ChipEffect, ChipGesture, ChipListener, ChipMetrics};
use super::image_widget::ImageWidget;
use super::line_edit::LineEdit;

/// Collapse does nothing while the container has fewer children than this,
/// counting chips and the three fixed children.
pub const MIN_CHILD_COUNT: usize = 4;

/// One entry in the container's ordered child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildSlot {
    Chip(ObjectId),
    Input,
    ActionIcon,
    MoreIndicator,
}

impl ChildSlot {
    fn flow_kind(self) -> FlowItemKind {
        match self {
            Self::Chip(_) => FlowItemKind::Chip,
            Self::Input => FlowItemKind::Input,
            Self::ActionIcon | Self::MoreIndicator => FlowItemKind::Icon,
        }
    }
}

/// Whether the container shows every chip or only its first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutMode {
    #[default]
    Expanded,
    Collapsed,
}

/// What a call to [`ChipsLayout::collapse`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapseOutcome {
    /// Number of chips hidden.
    pub hidden: usize,
    /// Badge text shown in the more indicator, if the badge was updated.
    pub badge_text: Option<String>,
    /// Mode after the call.
    pub mode: LayoutMode,
}

/// Collects delete requests from chips.
///
/// Chips call [`ChipListener::on_delete`] while the container is busy
/// dispatching to them, so requests are queued here and applied once the
/// dispatch returns.
#[derive(Debug, Default)]
pub struct DeleteHandler {
    pending: Mutex<Vec<ObjectId>>,
}

impl DeleteHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued request, oldest first.
    pub fn drain(&self) -> Vec<ObjectId> {
        std::mem::take(&mut *self.pending.lock())
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}

impl ChipListener for DeleteHandler {
    fn on_delete(&self, chip: ObjectId) {
        self.pending.lock().push(chip);
    }
}

/// A wrapping row of chips with a trailing input and action icon.
///
/// # Signals
///
/// - `chip_added(String)`: key of an entity whose chip was added
/// - `chip_removed(String)`: key of an entity whose chip was removed
/// - `mode_changed(LayoutMode)`: the container collapsed or expanded
pub struct ChipsLayout<M: ChipModel> {
    base: WidgetBase,
    config: ChipsLayoutConfig,
    measurer: FlowMeasurer,
    chip_metrics: ChipMetrics,

    /// Bound entities in insertion order.
    entities: Vec<Arc<M>>,
    children: Vec<ChildSlot>,
    chips: HashMap<ObjectId, Chip<M>>,

    edit_text: LineEdit,
    image_view: ImageWidget,
    more_indicator: ImageWidget,

    mode: LayoutMode,
    slot_table: SlotTable,
    measured_size: Size,
    /// Shared vertical offset for icon children. Survives passes that
    /// measure no icon child.
    icon_top_offset: f32,
    last_constraints: Option<SizeConstraints>,

    delete_handler: Arc<DeleteHandler>,
    rasterizer: Box<dyn TextRasterizer>,

    pub chip_added: Signal<String>,
    pub chip_removed: Signal<String>,
    pub mode_changed: Signal<LayoutMode>,
}

impl<M: ChipModel> Default for ChipsLayout<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ChipModel> ChipsLayout<M> {
    /// Create an empty container with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ChipsLayoutConfig::default())
    }

    /// Create an empty container.
    pub fn with_config(config: ChipsLayoutConfig) -> Self {
        let density = config.density;
        let icon_edge = config.dp_to_px(ICON_SIZE_DP);
        let icon_size = Size::new(icon_edge, icon_edge);

        let mut edit_text = LineEdit::with_density(density);
        edit_text.set_placeholder(config.effective_hint());
        edit_text.set_background(config.input_background);
        edit_text.widget_base().set_name("input");

        let image_view =
            ImageWidget::with_icon(config.action_icon.clone()).with_fixed_size(icon_size);
        image_view.widget_base().set_name("action-icon");

        let mut more_indicator = ImageWidget::new().with_fixed_size(icon_size);
        more_indicator.hide();
        more_indicator.widget_base().set_name("more-indicator");

        let layout = Self {
            base: WidgetBase::new::<Self>(),
            measurer: FlowMeasurer::new(FlowMetrics::for_density(density)),
            chip_metrics: ChipMetrics::default().scaled(density),
            config,
            entities: Vec::new(),
            children: vec![ChildSlot::Input, ChildSlot::ActionIcon, ChildSlot::MoreIndicator],
            chips: HashMap::new(),
            edit_text,
            image_view,
            more_indicator,
            mode: LayoutMode::Expanded,
            slot_table: SlotTable::new(),
            measured_size: Size::ZERO,
            icon_top_offset: 0.0,
            last_constraints: None,
            delete_handler: Arc::new(DeleteHandler::new()),
            rasterizer: Box::new(BoxGlyphRasterizer::new()),
            chip_added: Signal::new(),
            chip_removed: Signal::new(),
            mode_changed: Signal::new(),
        };

        let parent = Some(layout.object_id());
        for child in [
            layout.edit_text.widget_base(),
            layout.image_view.widget_base(),
            layout.more_indicator.widget_base(),
        ] {
            if let Err(e) = child.set_parent(parent) {
                tracing::warn!(target: targets::LAYOUT, error = %e, "failed to parent fixed child");
            }
        }
        layout
    }

    /// Create an empty container from a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = ChipsLayoutConfig::from_toml_file(path)?;
        Ok(Self::with_config(config))
    }

    /// Replace the badge rasterizer.
    pub fn set_rasterizer(&mut self, rasterizer: Box<dyn TextRasterizer>) {
        self.rasterizer = rasterizer;
    }

    pub fn config(&self) -> &ChipsLayoutConfig {
        &self.config
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The live entity collection, in insertion order.
    pub fn all_chips(&self) -> &[Arc<M>] {
        &self.entities
    }

    pub fn edit_text(&self) -> &LineEdit {
        &self.edit_text
    }

    pub fn edit_text_mut(&mut self) -> &mut LineEdit {
        &mut self.edit_text
    }

    pub fn image_view(&self) -> &ImageWidget {
        &self.image_view
    }

    pub fn image_view_mut(&mut self) -> &mut ImageWidget {
        &mut self.image_view
    }

    pub fn more_indicator(&self) -> &ImageWidget {
        &self.more_indicator
    }

    pub fn chip(&self, id: ObjectId) -> Option<&Chip<M>> {
        self.chips.get(&id)
    }

    /// Run `f` on one chip, then apply any delete it requested.
    ///
    /// Returns `None` if `id` is not one of this container's chips.
    pub fn with_chip_mut<R>(
        &mut self,
        id: ObjectId,
        f: impl FnOnce(&mut Chip<M>) -> R,
    ) -> Option<R> {
        let result = f(self.chips.get_mut(&id)?);
        self.process_pending_deletes();
        Some(result)
    }

    /// Chip ids in display order.
    pub fn chip_ids(&self) -> Vec<ObjectId> {
        self.children
            .iter()
            .filter_map(|child| match child {
                ChildSlot::Chip(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// The ordered child list.
    pub fn children(&self) -> &[ChildSlot] {
        &self.children
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Slots from the most recent measurement pass.
    pub fn slot_table(&self) -> &SlotTable {
        &self.slot_table
    }

    /// Size reported by the most recent measurement pass.
    pub fn measured_size(&self) -> Size {
        self.measured_size
    }

    pub fn icon_top_offset(&self) -> f32 {
        self.icon_top_offset
    }

    fn child_widget(&self, child: ChildSlot) -> Option<&dyn Widget> {
        match child {
            ChildSlot::Chip(id) => self.chips.get(&id).map(|c| c as &dyn Widget),
            ChildSlot::Input => Some(&self.edit_text),
            ChildSlot::ActionIcon => Some(&self.image_view),
            ChildSlot::MoreIndicator => Some(&self.more_indicator),
        }
    }

    fn child_widget_mut(&mut self, child: ChildSlot) -> Option<&mut dyn Widget> {
        match child {
            ChildSlot::Chip(id) => self.chips.get_mut(&id).map(|c| c as &mut dyn Widget),
            ChildSlot::Input => Some(&mut self.edit_text),
            ChildSlot::ActionIcon => Some(&mut self.image_view),
            ChildSlot::MoreIndicator => Some(&mut self.more_indicator),
        }
    }

    // =========================================================================
    // Measurement and placement
    // =========================================================================

    /// Measure every visible child against `constraints`, place them, and
    /// return the resolved container size.
    pub fn layout(&mut self, constraints: SizeConstraints) -> Size {
        let _perf = PerfSpan::new("chips_layout");

        let items = self.flow_items();
        let width = constraints
            .width
            .available()
            .unwrap_or_else(|| self.measurer.single_line_width(&items));

        let measurement = self.measurer.measure(&items, width);
        if let Some(offset) = measurement.icon_top_offset {
            self.icon_top_offset = offset;
        }
        let size = Size::new(
            resolve_size(measurement.content_size.width, constraints.width),
            resolve_size(measurement.content_size.height, constraints.height),
        );

        tracing::trace!(
            target: targets::LAYOUT,
            available_width = width,
            lines = measurement.line_count,
            width = size.width,
            height = size.height,
            "measured"
        );

        self.slot_table = measurement.slots;
        self.place();
        self.edit_text.set_max_height(self.measurer.edit_height());
        self.measured_size = size;
        self.last_constraints = Some(constraints);
        self.base.set_size(size);
        size
    }

    fn flow_items(&self) -> Vec<FlowItem> {
        self.children
            .iter()
            .filter_map(|&child| {
                let widget = self.child_widget(child)?;
                widget.is_visible().then(|| {
                    FlowItem::new(
                        widget.object_id(),
                        child.flow_kind(),
                        widget.size_hint().preferred,
                    )
                })
            })
            .collect()
    }

    fn place(&mut self) {
        let offset = self.icon_top_offset;
        let children = self.children.clone();
        for child in children {
            // Children without a slot were hidden and keep their last geometry.
            let Some(slot) = self
                .child_widget(child)
                .and_then(|w| self.slot_table.get(w.object_id()))
            else {
                continue;
            };
            let mut rect = slot.rect();
            if child.flow_kind() == FlowItemKind::Icon {
                rect = rect.offset(0.0, offset);
            }
            if let Some(widget) = self.child_widget_mut(child) {
                widget.set_geometry(rect);
            }
        }
    }

    fn relayout(&mut self) {
        if let Some(constraints) = self.last_constraints {
            self.layout(constraints);
        }
    }

    // =========================================================================
    // Collapse / expand
    // =========================================================================

    /// Hide every chip below the first line and show a `+N` badge.
    ///
    /// Uses the geometry from the last placement. Chips hidden by an earlier
    /// collapse still carry their old geometry and are counted again, so
    /// collapsing twice matches collapsing once.
    ///
    /// The badge replaces the action icon as soon as the container has at
    /// least [`MIN_CHILD_COUNT`] children, but the mode only becomes
    /// [`LayoutMode::Collapsed`] when at least one chip was hidden.
    pub fn collapse(&mut self) -> CollapseOutcome {
        if self.children.len() < MIN_CHILD_COUNT {
            tracing::debug!(
                target: targets::COLLAPSE,
                children = self.children.len(),
                "too few children to collapse"
            );
            return CollapseOutcome {
                hidden: 0,
                badge_text: None,
                mode: self.mode,
            };
        }

        let Some(first) = self.child_widget(self.children[0]).map(|w| w.geometry()) else {
            return CollapseOutcome {
                hidden: 0,
                badge_text: None,
                mode: self.mode,
            };
        };
        let threshold = first.top() + first.height() / 2.0;

        let later_lines_start = self.children[1..]
            .iter()
            .position(|&child| {
                self.child_widget(child)
                    .is_some_and(|w| w.geometry().top() > threshold)
            })
            .map(|i| i + 1);

        let mut hidden = 0;
        if let Some(start) = later_lines_start {
            let to_hide: Vec<ObjectId> = self.children[start..]
                .iter()
                .filter_map(|child| match child {
                    ChildSlot::Chip(id) => Some(*id),
                    _ => None,
                })
                .collect();
            for id in to_hide {
                if let Some(chip) = self.chips.get_mut(&id) {
                    chip.hide();
                    hidden += 1;
                }
            }
        }

        let badge_text = format!("+{hidden}");
        self.show_badge(&badge_text);
        self.image_view.hide();

        let previous = self.mode;
        if hidden > 0 {
            self.mode = LayoutMode::Collapsed;
        }

        tracing::debug!(target: targets::COLLAPSE, hidden, mode = ?self.mode, "collapsed");

        if self.mode != previous {
            self.mode_changed.emit(self.mode);
        }
        self.relayout();

        CollapseOutcome {
            hidden,
            badge_text: Some(badge_text),
            mode: self.mode,
        }
    }

    fn show_badge(&mut self, text: &str) {
        let style = self.config.badge_style.scaled(self.config.density);
        match self.rasterizer.rasterize(text, &style) {
            Ok(image) => self.more_indicator.set_icon(Some(Icon::from_image(image))),
            Err(e) => {
                tracing::warn!(target: targets::COLLAPSE, error = %e, text, "failed to render badge");
            }
        }
        self.more_indicator.show();
    }

    /// Show every child again and swap the badge back for the action icon.
    ///
    /// Does nothing unless the container is collapsed.
    pub fn expand(&mut self) {
        if self.mode != LayoutMode::Collapsed {
            return;
        }

        for chip in self.chips.values_mut() {
            chip.show();
        }
        self.edit_text.show();
        self.more_indicator.hide();
        self.image_view.show();
        self.mode = LayoutMode::Expanded;

        tracing::debug!(target: targets::COLLAPSE, chips = self.chips.len(), "expanded");
        self.mode_changed.emit(self.mode);
        self.relayout();
    }

    /// Collapse when expanded, expand when collapsed.
    pub fn toggle(&mut self) {
        match self.mode {
            LayoutMode::Expanded => {
                self.collapse();
            }
            LayoutMode::Collapsed => self.expand(),
        }
    }

    // =========================================================================
    // Chip management
    // =========================================================================

    /// Append an entity and create its chip just before the input.
    pub fn add_chip(&mut self, entity: Arc<M>) -> ObjectId {
        let key = entity.chip_key();

        let mut chip = Chip::with_style(self.chip_metrics, self.config.delete_glyph.clone());
        chip.set_model(Some(entity.clone()));
        chip.set_listener(self.delete_handler.clone());
        chip.widget_base().set_name(key.clone());

        let id = chip.object_id();
        let index = self.input_index();
        if let Err(e) = chip
            .widget_base()
            .set_parent_at(Some(self.object_id()), index)
        {
            tracing::warn!(target: targets::LAYOUT, error = %e, ?id, "failed to parent chip");
        }

        self.children.insert(index, ChildSlot::Chip(id));
        self.chips.insert(id, chip);
        self.entities.push(entity);

        tracing::debug!(target: targets::LAYOUT, key, ?id, count = self.entities.len(), "chip added");
        self.chip_added.emit(key);
        self.relayout();
        id
    }

    /// Add several entities in order.
    pub fn add_chips<I>(&mut self, entities: I)
    where
        I: IntoIterator<Item = Arc<M>>,
    {
        for entity in entities {
            self.add_chip(entity);
        }
    }

    fn input_index(&self) -> usize {
        self.children
            .iter()
            .position(|child| *child == ChildSlot::Input)
            .unwrap_or(self.children.len())
    }

    /// Remove a chip and its entity.
    ///
    /// Returns `false` if `chip_id` is not one of this container's chips.
    pub fn on_delete(&mut self, chip_id: ObjectId) -> bool {
        let Some(index) = self
            .children
            .iter()
            .position(|child| *child == ChildSlot::Chip(chip_id))
        else {
            tracing::debug!(target: targets::LAYOUT, ?chip_id, "delete for unknown chip");
            return false;
        };
        self.children.remove(index);

        let Some(chip) = self.chips.remove(&chip_id) else {
            return false;
        };
        let entity = chip.model().cloned();
        drop(chip);

        let key = match entity {
            Some(entity) => {
                match self.entities.iter().position(|e| Arc::ptr_eq(e, &entity)) {
                    Some(pos) => {
                        self.entities.remove(pos);
                    }
                    None => {
                        tracing::debug!(target: targets::LAYOUT, ?chip_id, "entity already gone");
                    }
                }
                Some(entity.chip_key())
            }
            None => {
                tracing::debug!(target: targets::LAYOUT, ?chip_id, "deleted chip had no entity");
                None
            }
        };

        tracing::debug!(target: targets::LAYOUT, ?chip_id, ?key, count = self.entities.len(), "chip removed");
        if let Some(key) = key {
            self.chip_removed.emit(key);
        }
        self.relayout();
        true
    }

    /// Remove the first chip bound to an entity with `key`.
    pub fn remove_chip_by_key(&mut self, key: &str) -> bool {
        let found = self.chip_ids().into_iter().find(|id| {
            self.chips
                .get(id)
                .and_then(Chip::model)
                .is_some_and(|model| model.chip_key() == key)
        });
        match found {
            Some(id) => self.on_delete(id),
            None => false,
        }
    }

    /// Remove every chip.
    pub fn clear_chips(&mut self) {
        for id in self.chip_ids() {
            self.on_delete(id);
        }
    }

    /// Apply queued delete requests. Returns how many chips were removed.
    pub fn process_pending_deletes(&mut self) -> usize {
        self.delete_handler
            .drain()
            .into_iter()
            .filter(|&id| self.on_delete(id))
            .count()
    }

    /// Drive one chip's state machine, then apply any delete it requested.
    pub fn chip_gesture(&mut self, id: ObjectId, gesture: ChipGesture) -> Option<ChipEffect> {
        self.with_chip_mut(id, |chip| chip.handle_gesture(gesture))
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Route an event to the child under it.
    pub fn handle_event(&mut self, event: &mut WidgetEvent) -> bool {
        let Some(pos) = event.primary_click_pos() else {
            return false;
        };
        self.click_at(pos);
        event.accept();
        true
    }

    /// Dispatch a primary click at a container-local point.
    pub fn click_at(&mut self, pos: Point) {
        let target = self.children.iter().rev().copied().find(|&child| {
            self.child_widget(child)
                .is_some_and(|w| w.is_visible() && w.geometry().contains(pos))
        });

        tracing::trace!(target: targets::LAYOUT, x = pos.x, y = pos.y, ?target, "click");

        match target {
            Some(ChildSlot::MoreIndicator) => {
                self.forward_click(ChildSlot::MoreIndicator, pos);
                self.expand();
            }
            Some(child) => self.forward_click(child, pos),
            None => self.toggle(),
        }
        self.process_pending_deletes();
    }

    fn forward_click(&mut self, child: ChildSlot, pos: Point) {
        if let Some(widget) = self.child_widget_mut(child) {
            let local = widget.map_from_parent(pos);
            let mut event = WidgetEvent::from(ClickEvent::left(local));
            widget.event(&mut event);
        }
    }

    /// Bounds of a child, if it is currently visible.
    pub fn child_rect(&self, child: ChildSlot) -> Option<Rect> {
        self.child_widget(child)
            .filter(|w| w.is_visible())
            .map(|w| w.geometry())
    }
}

impl<M: ChipModel> Object for ChipsLayout<M> {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl<M: ChipModel> Widget for ChipsLayout<M> {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::new(self.measured_size)
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        self.handle_event(event)
    }
}

static_assertions::assert_impl_all!(ChipsLayout<crate::model::SimpleChipModel>: Send, Sync);
static_assertions::assert_impl_all!(DeleteHandler: Send, Sync);
