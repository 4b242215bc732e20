//! chipflow demo
//!
//! Builds a container with nine contacts, lays it out at a few widths,
//! collapses and expands it, and deletes a chip through the tap sequence a
//! user would perform. Geometry is printed to the console.
//!
//! Run with: RUST_LOG=chipflow=debug cargo run -p chipflow --example chips_demo

use std::sync::Arc;

use chipflow::prelude::*;
use chipflow::{ObjectTreeDebug, TreeFormatOptions};
use tracing_subscriber::EnvFilter;

fn print_layout(title: &str, chips: &ChipsLayout<SimpleChipModel>) {
    let size = chips.measured_size();
    println!("== {title} ({} x {}, {:?})", size.width, size.height, chips.mode());
    for id in chips.chip_ids() {
        if let Some(chip) = chips.chip(id) {
            let g = chip.geometry();
            let shown = if chip.is_visible() { "" } else { " (hidden)" };
            println!(
                "  chip {:<40} at ({:>5}, {:>5}) {:>5} wide{shown}",
                format!("{:?}", chip.text()),
                g.left(),
                g.top(),
                g.width()
            );
        }
    }
    let input = chips.edit_text().geometry();
    println!("  input at ({}, {}) {} wide", input.left(), input.top(), input.width());
}

fn main() -> chipflow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ChipsLayoutConfig::new()
        .with_hint("Add people")
        .with_input_background(Color::WHITE);
    let mut chips = ChipsLayout::with_config(config);

    chips.chip_removed.connect(|key| println!("removed chip {key}"));
    chips
        .mode_changed
        .connect(|mode| println!("mode changed to {mode:?}"));

    for i in 0..9 {
        let entity = SimpleChipModel::new(i.to_string(), Icon::named("boy"), format!("xxxxx {i}"));
        if i == 1 {
            entity.set_chip_text("This is one of the selected Space.");
        }
        chips.add_chip(Arc::new(entity));
    }

    for width in [480.0, 320.0] {
        chips.layout(SizeConstraints::at_most_width(width));
        print_layout(&format!("width {width}"), &chips);
    }

    let outcome = chips.collapse();
    println!("collapse hid {} chips, badge {:?}", outcome.hidden, outcome.badge_text);
    print_layout("collapsed", &chips);

    chips.expand();
    print_layout("expanded", &chips);

    // Select the first chip, then tap its delete glyph.
    if let Some(first) = chips.chip_ids().first().copied() {
        let g = chips.chip(first).map(|c| c.geometry()).unwrap_or(Rect::ZERO);
        let icon = Point::new(g.left() + 4.0, g.top() + 4.0);
        chips.click_at(icon);
        chips.click_at(icon);
    }
    print_layout("after delete", &chips);

    let tree = ObjectTreeDebug::with_options(TreeFormatOptions::minimal())
        .format_subtree(chips.object_id())?;
    println!("{tree}");

    Ok(())
}
