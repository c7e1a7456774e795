// Example: per-index heights, estimates refined by measurement.
use scrollwin::{OffsetStrategy, VirtualListOptions, WindowEngine};

fn main() {
    let pattern = [30u32, 60, 45, 90];
    let mut engine = WindowEngine::new(
        VirtualListOptions::new(200, 300)
            .with_dynamic_item_height(move |i| pattern[i % pattern.len()])
            .with_offset_strategy(OffsetStrategy::PrefixSum)
            .with_overscan(2),
    );
    engine.set_scroll_offset(1_000);

    for slot in engine.render_window().slots {
        println!(
            "index={} top={} height={}",
            slot.index, slot.top_offset, slot.height
        );
    }

    // Estimated layout: every row starts at 50px until the host measures it.
    let mut estimated = WindowEngine::new(VirtualListOptions::new(200, 300));
    println!("estimated total={}", estimated.total_height());
    estimated.measure_many((0..10).map(|i| (i, 20 + i as u32)));
    println!(
        "after measuring 10 rows total={} version={}",
        estimated.total_height(),
        estimated.version()
    );
}
