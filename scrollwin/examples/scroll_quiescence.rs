// Example: a burst of scroll events and the quiescence timer settling afterwards.
use scrollwin::{VirtualListOptions, WindowEngine};

fn main() {
    let mut engine = WindowEngine::new(
        VirtualListOptions::new(10_000, 480)
            .with_fixed_item_height(32)
            .with_on_scrolling_change(Some(|scrolling: bool| {
                println!("  scrolling -> {scrolling}");
            })),
    );

    let mut now_ms = 0u64;
    for step in 0..5i64 {
        now_ms += 16;
        engine.on_scroll(step * 400, now_ms);
        println!(
            "t={now_ms}ms range={:?} deadline={:?}",
            engine.virtual_range(),
            engine.scroll_deadline_ms()
        );
    }

    // Simulate a 60fps tick until the viewport is idle again.
    while engine.is_scrolling() {
        now_ms += 16;
        engine.tick(now_ms);
    }
    println!("idle at t={now_ms}ms");

    engine.dispose();
}
