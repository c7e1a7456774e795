// Example: fixed-height rows, a scroll jump, and a scroll-to helper.
use scrollwin::{Align, VirtualListOptions, WindowEngine};

fn main() {
    let mut engine = WindowEngine::new(
        VirtualListOptions::new(1_000_000, 600)
            .with_fixed_item_height(73)
            .with_overscan(5),
    );
    engine.set_scroll_offset(123_456);

    println!("total_height={}", engine.total_height());
    println!("visible_range={:?}", engine.visible_range());
    println!("virtual_range={:?}", engine.virtual_range());

    let mut slots = Vec::new();
    engine.collect_slots(&mut slots);
    println!("first_slot={:?}", slots.first());
    println!("last_slot={:?}", slots.last());

    let off = engine.scroll_to_index(999_999, Align::End);
    println!("after scroll_to_index: offset={off}");
}
