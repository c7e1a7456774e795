// Example: a customer table with fixed-height rows and a host-owned timer queue.
use std::rc::Rc;

use scrollwin::VirtualListOptions;
use scrollwin_adapter::{ManualTimers, VirtualList};

struct Customer {
    id: Option<u32>,
    name: String,
}

fn main() {
    let customers: Vec<Customer> = (0..5_000)
        .map(|i| Customer {
            id: (i % 7 != 0).then_some(i as u32),
            name: format!("Customer {i}"),
        })
        .collect();

    let timers = ManualTimers::shared();
    let mut list = VirtualList::new_with_key(
        VirtualListOptions::new(0, 600)
            .with_fixed_item_height(73)
            .with_overscan(5),
        customers,
        |c: &Customer, _| c.name.clone(),
        |c: &Customer, index| match c.id {
            Some(id) => format!("{id}"),
            None => format!("customer-{index}"),
        },
    )
    .with_timer_driver(Rc::clone(&timers));

    let mut now_ms = 0u64;
    for offset in [0i64, 730, 2_190, 7_300] {
        now_ms += 16;
        list.on_scroll(offset, now_ms);
        let frame = list.render();
        println!(
            "t={now_ms}ms offset={offset} rows={} first={:?} scrolling={}",
            frame.children.len(),
            frame.children.first().map(|c| (&c.key, c.slot.top_offset)),
            frame.is_scrolling,
        );
    }

    // The host loop drains due timers each frame.
    while list.is_scrolling() {
        now_ms += 16;
        let due = timers.borrow_mut().take_due(now_ms);
        for token in due {
            list.on_timer_fired(token, now_ms);
        }
    }
    println!("idle at t={now_ms}ms, pending timers: {}", timers.borrow().pending().len());
}
